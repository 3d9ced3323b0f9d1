//! Data sources feeding the reconciler.
//!
//! A [`DirectorySource`] lists the immediate children of a repository path and
//! a [`GovernanceSource`] reads the governance records. Both are read
//! independently; the reconciler only needs their materialized results.

mod github;
mod governance;
mod local;
mod types;

pub use github::{
    parse_contents_response, GithubDirectorySource, GithubSettings, DEFAULT_GITHUB_API_URL,
    DEFAULT_TIMEOUT_SECS,
};
pub use governance::{parse_governance_csv, CsvGovernanceSource, DEFAULT_NAME_COLUMN};
pub use local::LocalDirectorySource;
pub use types::{DirectoryEntry, EntryType};

use crate::folder::FolderRecord;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{source_name} is unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    pub fn unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        SourceError::Unavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// Lists the immediate children of a directory in a repository
#[async_trait]
pub trait DirectorySource: Send + Sync {
    /// Human readable description used in logs and reports
    fn describe(&self) -> String;

    async fn list_entries(&self) -> Result<Vec<DirectoryEntry>, SourceError>;

    /// Names of the child entries that are directories
    async fn directory_names(&self) -> Result<Vec<String>, SourceError> {
        let entries = self.list_entries().await?;
        Ok(entries
            .into_iter()
            .filter(DirectoryEntry::is_directory)
            .map(|entry| entry.name)
            .collect())
    }
}

/// Reads governance records from a tabular file
#[async_trait]
pub trait GovernanceSource: Send + Sync {
    fn describe(&self) -> String;

    async fn read_records(&self) -> Result<Vec<FolderRecord>, SourceError>;
}
