use crate::folder::{FolderMetadata, NamePolicy};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// What to do when the same name appears twice within one input
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Collapse duplicates. For governance rows the last row wins.
    #[default]
    Collapse,
    /// Reject the input with a duplicate key error
    Strict,
}

/// Which input a name came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputSide {
    Repository,
    Governance,
}

impl fmt::Display for InputSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSide::Repository => write!(f, "repository"),
            InputSide::Governance => write!(f, "governance"),
        }
    }
}

/// Options for a reconciliation run
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReconcileOptions {
    pub names: NamePolicy,
    pub duplicates: DuplicatePolicy,
}

/// Three-way partition of folder names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationResult {
    /// In the repository and in the governance list
    pub both: HashMap<String, FolderMetadata>,
    /// Only in the governance list
    pub governance_only: HashMap<String, FolderMetadata>,
    /// Only in the repository
    pub repo_only: HashSet<String>,
}

/// Set sizes of a reconciliation result
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationSummary {
    pub both: usize,
    pub governance_only: usize,
    pub repo_only: usize,
    pub total: usize,
}

impl ReconciliationResult {
    /// True when every repository folder is governed and every governed
    /// folder exists
    pub fn is_in_sync(&self) -> bool {
        self.governance_only.is_empty() && self.repo_only.is_empty()
    }

    pub fn summary(&self) -> ReconciliationSummary {
        let both = self.both.len();
        let governance_only = self.governance_only.len();
        let repo_only = self.repo_only.len();
        ReconciliationSummary {
            both,
            governance_only,
            repo_only,
            total: both + governance_only + repo_only,
        }
    }

    /// Union of the three sets
    pub fn all_names(&self) -> HashSet<&str> {
        self.both
            .keys()
            .chain(self.governance_only.keys())
            .chain(self.repo_only.iter())
            .map(String::as_str)
            .collect()
    }
}
