#![allow(dead_code)]

use async_trait::async_trait;
use folder_reconcile::{
    DirectoryEntry, DirectorySource, EntryType, FolderRecord, GovernanceSource, SourceError,
};
use std::path::Path;
use tempfile::TempDir;
use tokio::fs;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Lay out a fake repository checkout with the given top-level folders
pub async fn create_checkout(root: &Path, folders: &[&str]) {
    for folder in folders {
        fs::create_dir_all(root.join(folder))
            .await
            .expect("Should create folder");
    }
    fs::write(root.join("README.md"), "# checkout\n")
        .await
        .expect("Should write README");
}

/// Write a governance CSV file and return its path
pub async fn write_governance_csv(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("governance.csv");
    fs::write(&path, content)
        .await
        .expect("Should write governance file");
    path
}

/// Directory source serving a fixed listing
pub struct StaticDirectory {
    pub entries: Vec<DirectoryEntry>,
}

impl StaticDirectory {
    pub fn dirs(names: &[&str]) -> Self {
        Self {
            entries: names
                .iter()
                .map(|n| DirectoryEntry::new(*n, EntryType::Directory))
                .collect(),
        }
    }
}

#[async_trait]
impl DirectorySource for StaticDirectory {
    fn describe(&self) -> String {
        "static".to_string()
    }

    async fn list_entries(&self) -> Result<Vec<DirectoryEntry>, SourceError> {
        Ok(self.entries.clone())
    }
}

/// Directory source that can never be read
pub struct UnreachableDirectory;

#[async_trait]
impl DirectorySource for UnreachableDirectory {
    fn describe(&self) -> String {
        "unreachable".to_string()
    }

    async fn list_entries(&self) -> Result<Vec<DirectoryEntry>, SourceError> {
        Err(SourceError::unavailable(self.describe(), "connection refused"))
    }
}

/// Governance source serving fixed records
pub struct StaticGovernance {
    pub records: Vec<FolderRecord>,
}

#[async_trait]
impl GovernanceSource for StaticGovernance {
    fn describe(&self) -> String {
        "static-governance".to_string()
    }

    async fn read_records(&self) -> Result<Vec<FolderRecord>, SourceError> {
        Ok(self.records.clone())
    }
}

/// The governance records used throughout the examples
pub fn sample_records() -> Vec<FolderRecord> {
    vec![
        FolderRecord::new("auth").with_metadata("plan", "modernize"),
        FolderRecord::new("billing").with_metadata("plan", "retain"),
        FolderRecord::new("old-reports").with_metadata("plan", "remove"),
    ]
}

/// Serve a single canned HTTP response on a local port.
///
/// Returns the base URL and a handle resolving to the raw request text.
pub async fn serve_once(
    status_line: &str,
    body: &str,
) -> (String, tokio::task::JoinHandle<String>) {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Should bind listener");
    let addr = listener.local_addr().expect("Should have local addr");
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("Should accept");
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.expect("Should read request");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        stream
            .write_all(response.as_bytes())
            .await
            .expect("Should write response");
        stream.shutdown().await.ok();
        String::from_utf8_lossy(&request).to_string()
    });

    (format!("http://{addr}"), handle)
}
