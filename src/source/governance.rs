//! Governance source reading a CSV export of the governance spreadsheet.
//!
//! The file must have a header row with a name column. Every other column is
//! carried through as metadata on the record, keyed by its header.

use super::{GovernanceSource, SourceError};
use crate::folder::{FolderMetadata, FolderRecord};
use async_trait::async_trait;
use std::collections::HashSet;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, warn};

/// Header of the column holding folder names
pub const DEFAULT_NAME_COLUMN: &str = "name";

/// UTF-8 BOM bytes, written by most spreadsheet exports
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone)]
pub struct CsvGovernanceSource {
    path: PathBuf,
    name_column: String,
    delimiter: u8,
}

impl CsvGovernanceSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            name_column: DEFAULT_NAME_COLUMN.to_string(),
            delimiter: b',',
        }
    }

    pub fn with_name_column(mut self, name_column: impl Into<String>) -> Self {
        self.name_column = name_column.into();
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

#[async_trait]
impl GovernanceSource for CsvGovernanceSource {
    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }

    async fn read_records(&self) -> Result<Vec<FolderRecord>, SourceError> {
        let data = fs::read(&self.path)
            .await
            .map_err(|e| SourceError::unavailable(self.describe(), e.to_string()))?;

        let records = parse_governance_csv(&data, &self.name_column, self.delimiter)?;
        info!(
            source = %self.describe(),
            records = records.len(),
            "Read governance records"
        );
        Ok(records)
    }
}

/// Parse governance CSV content into folder records.
///
/// The name column header is matched case-insensitively. Repeated headers
/// are rejected. Rows whose cells are all blank are skipped; a row with data
/// but no name is rejected.
pub fn parse_governance_csv(
    data: &[u8],
    name_column: &str,
    delimiter: u8,
) -> Result<Vec<FolderRecord>, SourceError> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut seen = HashSet::new();
    if let Some(duplicate) = headers
        .iter()
        .filter(|h| !h.is_empty())
        .find(|h| !seen.insert(h.to_lowercase()))
    {
        return Err(SourceError::InvalidInput(format!(
            "governance file repeats the '{duplicate}' column"
        )));
    }

    let name_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name_column))
        .ok_or_else(|| {
            SourceError::InvalidInput(format!(
                "governance file has no '{name_column}' column (found: {})",
                headers.join(", ")
            ))
        })?;

    let mut records = Vec::new();
    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        let line_number = idx + 2; // header is line 1

        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let name = row.get(name_idx).unwrap_or("").trim();
        if name.is_empty() {
            return Err(SourceError::InvalidInput(format!(
                "line {line_number}: empty '{name_column}' cell"
            )));
        }

        let mut metadata = FolderMetadata::new();
        for (col, header) in headers.iter().enumerate() {
            if col == name_idx || header.is_empty() {
                continue;
            }
            let value = row.get(col).unwrap_or("").trim().to_string();
            metadata.insert(header.clone(), value);
        }

        if row.len() > headers.len() {
            warn!(line = line_number, "Ignoring cells beyond the header row");
        }

        records.push(FolderRecord {
            name: name.to_string(),
            metadata,
        });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_passes_metadata_through() {
        let data = b"name,plan,owner\nauth,modernize,team-a\nbilling,retain,\n";
        let records = parse_governance_csv(data, DEFAULT_NAME_COLUMN, b',').unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "auth");
        assert_eq!(records[0].plan(), Some("modernize"));
        assert_eq!(records[0].metadata.get("owner").unwrap(), "team-a");
        assert_eq!(records[1].metadata.get("owner").unwrap(), "");
        assert!(!records[0].metadata.contains_key("name"));
    }

    #[test]
    fn test_parse_strips_bom_and_matches_header_case() {
        let data = b"\xEF\xBB\xBFName,plan\nauth,remove\n";
        let records = parse_governance_csv(data, DEFAULT_NAME_COLUMN, b',').unwrap();
        assert_eq!(records[0].name, "auth");
    }

    #[test]
    fn test_parse_missing_name_column() {
        let err = parse_governance_csv(b"folder,plan\nauth,retain\n", "name", b',').unwrap_err();
        assert!(matches!(err, SourceError::InvalidInput(ref msg) if msg.contains("'name'")));
    }

    #[test]
    fn test_parse_rejects_row_without_name() {
        let err = parse_governance_csv(b"name,plan\nauth,retain\n,remove\n", "name", b',')
            .unwrap_err();
        assert!(matches!(err, SourceError::InvalidInput(ref msg) if msg.contains("line 3")));
    }

    #[test]
    fn test_parse_rejects_repeated_header() {
        let err = parse_governance_csv(b"name,plan,Plan\nauth,retain,remove\n", "name", b',')
            .unwrap_err();
        assert!(matches!(err, SourceError::InvalidInput(ref msg) if msg.contains("'Plan'")));
    }

    #[test]
    fn test_parse_skips_blank_rows() {
        let records = parse_governance_csv(b"name,plan\nauth,retain\n,\n", "name", b',').unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_parse_semicolon_delimiter_and_custom_column() {
        let data = b"folder;plan\nlegacy;remove\n";
        let records = parse_governance_csv(data, "folder", b';').unwrap();
        assert_eq!(records[0].name, "legacy");
        assert_eq!(records[0].plan(), Some("remove"));
    }
}
