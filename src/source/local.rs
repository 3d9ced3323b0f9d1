use super::types::{DirectoryEntry, EntryType};
use super::{DirectorySource, SourceError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Version control metadata folder, never reported as a repository folder
const GIT_DIR: &str = ".git";

/// Directory source reading a checked-out working tree
#[derive(Debug, Clone)]
pub struct LocalDirectorySource {
    root: PathBuf,
    path: String,
}

impl LocalDirectorySource {
    pub fn new(root: impl Into<PathBuf>, path: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            path: path.into(),
        }
    }

    /// The directory whose children are listed
    pub fn target_dir(&self) -> PathBuf {
        let relative = self.path.trim_matches('/');
        if relative.is_empty() {
            self.root.clone()
        } else {
            self.root.join(relative)
        }
    }
}

#[async_trait]
impl DirectorySource for LocalDirectorySource {
    fn describe(&self) -> String {
        format!("local:{}", self.target_dir().display())
    }

    async fn list_entries(&self) -> Result<Vec<DirectoryEntry>, SourceError> {
        let target = self.target_dir();
        if !target.is_dir() {
            return Err(SourceError::unavailable(
                self.describe(),
                "path does not resolve to a directory",
            ));
        }

        let entries = scan_children(&target, &self.describe())?;
        info!(
            source = %self.describe(),
            entries = entries.len(),
            "Listed local directory"
        );
        Ok(entries)
    }
}

fn scan_children(dir: &Path, source_name: &str) -> Result<Vec<DirectoryEntry>, SourceError> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| SourceError::unavailable(source_name, e.to_string()))?;

        let name = match entry.file_name().to_str() {
            Some(name) => name.to_string(),
            None => {
                let lossy = entry.file_name().to_string_lossy().to_string();
                warn!(
                    path = %entry.path().display(),
                    name = %lossy,
                    "Folder name is not valid UTF-8, reporting it with replacement characters"
                );
                lossy
            }
        };
        if name == GIT_DIR {
            continue;
        }

        let file_type = entry.file_type();
        let entry_type = if file_type.is_symlink() {
            EntryType::Symlink
        } else if file_type.is_dir() {
            EntryType::Directory
        } else {
            EntryType::File
        };

        entries.push(DirectoryEntry::new(name, entry_type));
    }

    Ok(entries)
}
