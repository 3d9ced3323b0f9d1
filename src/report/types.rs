use crate::folder::FolderMetadata;
use crate::reconciliation::{ReconciliationResult, ReconciliationSummary};
use crate::utils::{now_iso, TOOL_VERSION};
use clap::ValueEnum;
use serde::Serialize;
use std::collections::HashMap;

/// Output format of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// A governed folder with its metadata
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportEntry {
    pub name: String,
    pub metadata: FolderMetadata,
}

/// Everything a report template can reference.
/// Placeholders: {{runId}}, {{generatedAt}}, {{toolVersion}}, {{directorySource}},
/// {{governanceSource}}, {{inSync}}, {{summary}}, {{both}}, {{governanceOnly}}, {{repoOnly}}
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContext {
    pub run_id: String,
    pub generated_at: String,
    pub tool_version: String,
    pub directory_source: String,
    pub governance_source: String,
    pub in_sync: bool,
    pub summary: ReconciliationSummary,
    pub both: Vec<ReportEntry>,
    pub governance_only: Vec<ReportEntry>,
    pub repo_only: Vec<String>,
}

impl ReportContext {
    /// Build a report context, sorting every set by name
    pub fn new(
        result: &ReconciliationResult,
        directory_source: impl Into<String>,
        governance_source: impl Into<String>,
    ) -> Self {
        let mut repo_only: Vec<String> = result.repo_only.iter().cloned().collect();
        repo_only.sort();

        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            generated_at: now_iso(),
            tool_version: TOOL_VERSION.to_string(),
            directory_source: directory_source.into(),
            governance_source: governance_source.into(),
            in_sync: result.is_in_sync(),
            summary: result.summary(),
            both: sorted_entries(&result.both),
            governance_only: sorted_entries(&result.governance_only),
            repo_only,
        }
    }
}

fn sorted_entries(map: &HashMap<String, FolderMetadata>) -> Vec<ReportEntry> {
    let mut entries: Vec<ReportEntry> = map
        .iter()
        .map(|(name, metadata)| ReportEntry {
            name: name.clone(),
            metadata: metadata.clone(),
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}
