//! One reconciliation run: read both sources, reconcile, describe the result.

use crate::config::{ConfigError, ReconcileConfig};
use crate::reconciliation::{reconcile, ReconcileError, ReconcileOptions, ReconciliationResult};
use crate::report::ReportContext;
use crate::source::{
    CsvGovernanceSource, DirectorySource, GithubDirectorySource, GithubSettings,
    GovernanceSource, LocalDirectorySource, SourceError,
};
use crate::utils::parse_repository;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Reconciliation error: {0}")]
    Reconcile(#[from] ReconcileError),
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub result: ReconciliationResult,
    pub directory_source: String,
    pub governance_source: String,
}

impl RunOutcome {
    pub fn report_context(&self) -> ReportContext {
        ReportContext::new(
            &self.result,
            self.directory_source.clone(),
            self.governance_source.clone(),
        )
    }
}

/// Build the directory source named by the configuration
pub fn build_directory_source(
    config: &ReconcileConfig,
    token: Option<String>,
) -> Result<Box<dyn DirectorySource>, RunError> {
    if let Some(root) = &config.local_root {
        return Ok(Box::new(LocalDirectorySource::new(root.clone(), config.path.clone())));
    }

    let identifier = config.repository.as_deref().unwrap_or_default();
    let repository = parse_repository(identifier).ok_or_else(|| {
        ConfigError::Invalid(format!("'{identifier}' is not an owner/name repository"))
    })?;

    let source = GithubDirectorySource::new(
        repository,
        config.branch.clone(),
        config.path.clone(),
        GithubSettings {
            api_url: config.api_url.clone(),
            token,
            timeout_secs: config.timeout_secs,
        },
    )?;
    Ok(Box::new(source))
}

/// Build the governance source named by the configuration
pub fn build_governance_source(config: &ReconcileConfig) -> Result<CsvGovernanceSource, RunError> {
    let path = config
        .governance_file
        .clone()
        .ok_or_else(|| ConfigError::Invalid("a governance file is required".to_string()))?;

    Ok(CsvGovernanceSource::new(path)
        .with_name_column(config.name_column.clone())
        .with_delimiter(config.delimiter_byte()?))
}

/// Read both sources concurrently and reconcile them.
///
/// Either source failing fails the run; no partial result is produced.
pub async fn run_with_sources(
    directory: &dyn DirectorySource,
    governance: &dyn GovernanceSource,
    options: &ReconcileOptions,
) -> Result<RunOutcome, RunError> {
    info!(
        directory = %directory.describe(),
        governance = %governance.describe(),
        "Reading sources"
    );

    let (repo_names, records) =
        tokio::try_join!(directory.directory_names(), governance.read_records())?;

    let result = reconcile(&repo_names, &records, options)?;
    let summary = result.summary();

    if result.is_in_sync() {
        info!(folders = summary.both, "Repository and governance list are in sync");
    } else {
        warn!(
            both = summary.both,
            governance_only = summary.governance_only,
            repo_only = summary.repo_only,
            "Repository and governance list differ"
        );
    }

    Ok(RunOutcome {
        result,
        directory_source: directory.describe(),
        governance_source: governance.describe(),
    })
}

/// Validate the configuration, build the sources and run
pub async fn run(config: &ReconcileConfig, token: Option<String>) -> Result<RunOutcome, RunError> {
    config.validate()?;
    let directory = build_directory_source(config, token)?;
    let governance = build_governance_source(config)?;
    run_with_sources(directory.as_ref(), &governance, &config.matching).await
}
