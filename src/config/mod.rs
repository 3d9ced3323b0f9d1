use crate::reconciliation::ReconcileOptions;
use crate::source::{DEFAULT_GITHUB_API_URL, DEFAULT_NAME_COLUMN, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_api_url() -> String {
    DEFAULT_GITHUB_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_name_column() -> String {
    DEFAULT_NAME_COLUMN.to_string()
}

fn default_delimiter() -> char {
    ','
}

/// Reconciliation run configuration.
///
/// Loaded from an optional JSON file; command line flags are applied on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileConfig {
    /// `owner/name` of the GitHub repository to list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// Local checkout to list instead of a GitHub repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_root: Option<PathBuf>,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Directory inside the repository whose children are compared.
    /// Empty means the repository root.
    #[serde(default)]
    pub path: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance_file: Option<PathBuf>,
    #[serde(default = "default_name_column")]
    pub name_column: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub matching: ReconcileOptions,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            repository: None,
            local_root: None,
            branch: default_branch(),
            path: String::new(),
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            governance_file: None,
            name_column: default_name_column(),
            delimiter: default_delimiter(),
            matching: ReconcileOptions::default(),
        }
    }
}

impl ReconcileConfig {
    /// Check that exactly one directory source is configured and the
    /// governance settings are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        match (&self.repository, &self.local_root) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Invalid(
                    "repository and localRoot are mutually exclusive".to_string(),
                ))
            }
            (None, None) => {
                return Err(ConfigError::Invalid(
                    "either a repository or a localRoot is required".to_string(),
                ))
            }
            _ => {}
        }

        if self.governance_file.is_none() {
            return Err(ConfigError::Invalid(
                "a governance file is required".to_string(),
            ));
        }
        if self.name_column.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "nameColumn must not be empty".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeoutSecs must be positive".to_string(),
            ));
        }
        self.delimiter_byte()?;
        Ok(())
    }

    /// The CSV delimiter as a single byte
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(ConfigError::Invalid(format!(
                "delimiter '{}' is not a single ASCII character",
                self.delimiter
            )))
        }
    }
}

/// Read a configuration file
pub async fn read_config(config_path: &Path) -> Result<ReconcileConfig, ConfigError> {
    let content = fs::read_to_string(config_path).await?;
    let config: ReconcileConfig = serde_json::from_str(&content)?;
    Ok(config)
}

/// Write a configuration file
pub async fn write_config(config_path: &Path, config: &ReconcileConfig) -> Result<(), ConfigError> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(config_path, content).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconciliation::DuplicatePolicy;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: ReconcileConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.branch, "main");
        assert_eq!(config.api_url, DEFAULT_GITHUB_API_URL);
        assert_eq!(config.name_column, "name");
        assert_eq!(config.delimiter, ',');
        assert!(config.matching.names.case_sensitive);
        assert_eq!(config.matching.duplicates, DuplicatePolicy::Collapse);
    }

    #[test]
    fn test_matching_options_from_json() {
        let json = r#"{
            "repository": "octo/platform",
            "governanceFile": "governance.csv",
            "matching": {"names": {"caseSensitive": false}, "duplicates": "strict"}
        }"#;
        let config: ReconcileConfig = serde_json::from_str(json).unwrap();
        assert!(!config.matching.names.case_sensitive);
        assert!(config.matching.names.trim_trailing_slash);
        assert_eq!(config.matching.duplicates, DuplicatePolicy::Strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_requires_one_directory_source() {
        let mut config = ReconcileConfig {
            governance_file: Some(PathBuf::from("g.csv")),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.repository = Some("octo/platform".to_string());
        config.local_root = Some(PathBuf::from("."));
        assert!(config.validate().is_err());

        config.local_root = None;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_delimiter_must_be_ascii() {
        let config = ReconcileConfig {
            delimiter: '§',
            ..Default::default()
        };
        assert!(config.delimiter_byte().is_err());
    }
}
