use anyhow::Context;
use clap::Parser;
use folder_reconcile::{
    read_config, run, write_config, DuplicatePolicy, ReconcileConfig, ReportEngine, ReportFormat,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_LOG_LEVEL: &str = "info";

/// Exit code when the repository and governance list differ under --fail-on-drift
const DRIFT_EXIT_CODE: u8 = 2;

/// Folder Reconcile - compare repository folders with a governance spreadsheet
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file. Flags override its values.
    #[arg(short, long, env = "FOLDER_RECONCILE_CONFIG")]
    config: Option<PathBuf>,

    /// GitHub repository to list, as owner/name
    #[arg(short, long, conflicts_with = "local")]
    repo: Option<String>,

    /// Local checkout to list instead of a GitHub repository
    #[arg(long)]
    local: Option<PathBuf>,

    /// Branch, tag or commit to list
    #[arg(short, long)]
    branch: Option<String>,

    /// Directory inside the repository whose children are compared
    #[arg(short, long)]
    path: Option<String>,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL")]
    api_url: Option<String>,

    /// GitHub token used for private repositories and higher rate limits
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Governance CSV file
    #[arg(short, long)]
    governance: Option<PathBuf>,

    /// Header of the governance column holding folder names
    #[arg(long)]
    name_column: Option<String>,

    /// Governance CSV delimiter
    #[arg(long)]
    delimiter: Option<char>,

    /// Match folder names ignoring case
    #[arg(long)]
    case_insensitive: bool,

    /// Keep trailing slashes when comparing names
    #[arg(long)]
    keep_trailing_slash: bool,

    /// Fail when a name appears twice in one source instead of collapsing it
    #[arg(long)]
    strict_duplicates: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Handlebars template used for text output instead of the built-in one
    #[arg(long)]
    template: Option<PathBuf>,

    /// Write the effective configuration to this file
    #[arg(long)]
    save_config: Option<PathBuf>,

    /// Exit with status 2 when the two sources differ
    #[arg(long)]
    fail_on_drift: bool,

    /// Log filter, e.g. "debug" or "folder_reconcile=trace"
    #[arg(long, env = "RUST_LOG", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

impl Args {
    /// Apply command line overrides on top of a loaded configuration
    fn apply(&self, config: &mut ReconcileConfig) {
        if let Some(repo) = &self.repo {
            config.repository = Some(repo.clone());
            config.local_root = None;
        }
        if let Some(local) = &self.local {
            config.local_root = Some(local.clone());
            config.repository = None;
        }
        if let Some(branch) = &self.branch {
            config.branch = branch.clone();
        }
        if let Some(path) = &self.path {
            config.path = path.clone();
        }
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if let Some(governance) = &self.governance {
            config.governance_file = Some(governance.clone());
        }
        if let Some(name_column) = &self.name_column {
            config.name_column = name_column.clone();
        }
        if let Some(delimiter) = self.delimiter {
            config.delimiter = delimiter;
        }
        if self.case_insensitive {
            config.matching.names.case_sensitive = false;
        }
        if self.keep_trailing_slash {
            config.matching.names.trim_trailing_slash = false;
        }
        if self.strict_duplicates {
            config.matching.duplicates = DuplicatePolicy::Strict;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so the report on stdout stays clean
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match execute(args).await {
        Ok(code) => code,
        Err(e) => {
            // Printed directly so failures stay visible with logging off
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

async fn execute(args: Args) -> anyhow::Result<ExitCode> {
    let mut config = match &args.config {
        Some(path) => read_config(path)
            .await
            .with_context(|| format!("reading config {}", path.display()))?,
        None => ReconcileConfig::default(),
    };
    args.apply(&mut config);

    if let Some(path) = &args.save_config {
        write_config(path, &config)
            .await
            .with_context(|| format!("writing config {}", path.display()))?;
        info!(path = %path.display(), "Saved effective configuration");
    }

    let outcome = run(&config, args.github_token.clone()).await?;

    let engine = ReportEngine::new();
    let context = outcome.report_context();
    let rendered = match (&args.template, args.format) {
        (Some(template_path), ReportFormat::Text) => {
            let template = engine.load_template(template_path).await?;
            engine.render_with(&template, &context)?
        }
        (_, format) => engine.render(&context, format)?,
    };
    println!("{rendered}");

    if args.fail_on_drift && !outcome.result.is_in_sync() {
        return Ok(ExitCode::from(DRIFT_EXIT_CODE));
    }
    Ok(ExitCode::SUCCESS)
}

/// One line describing a failed run, including every cause
fn failure_message(error: &anyhow::Error) -> String {
    format!("error: {error:#}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use folder_reconcile::{RunError, SourceError};

    #[test]
    fn test_failure_message_includes_cause_chain() {
        let error = anyhow::Error::from(RunError::Source(SourceError::unavailable(
            "csv:governance.csv",
            "No such file or directory",
        )))
        .context("reconciling folders");

        let message = failure_message(&error);
        assert!(message.starts_with("error: reconciling folders: "));
        assert!(message.contains("csv:governance.csv is unavailable: No such file or directory"));
    }

    #[test]
    fn test_args_parse_log_level_off() {
        let args = Args::try_parse_from([
            "folder-reconcile",
            "--local",
            ".",
            "--governance",
            "governance.csv",
            "--log-level",
            "off",
        ])
        .expect("Should parse args");
        assert_eq!(args.log_level, "off");
    }
}
