use super::types::{DuplicatePolicy, InputSide, ReconcileOptions, ReconciliationResult};
use crate::folder::{FolderMetadata, FolderRecord};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Duplicate folder name '{name}' in {side} input")]
    DuplicateKey { name: String, side: InputSide },
}

/// Partition repository folder names and governance records into the
/// folders present in both, only in governance, and only in the repository.
///
/// Names are normalized with `options.names` before comparison and the
/// normalized form is what the result holds. Empty inputs are valid.
pub fn reconcile<I, S>(
    repo_names: I,
    governance_records: &[FolderRecord],
    options: &ReconcileOptions,
) -> Result<ReconciliationResult, ReconcileError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut repo: HashSet<String> = HashSet::new();
    for raw in repo_names {
        let name = normalized(raw.as_ref(), InputSide::Repository, options)?;
        if !repo.insert(name.clone()) && options.duplicates == DuplicatePolicy::Strict {
            return Err(ReconcileError::DuplicateKey {
                name,
                side: InputSide::Repository,
            });
        }
    }

    let mut governance: HashMap<String, FolderMetadata> = HashMap::new();
    for record in governance_records {
        let name = normalized(&record.name, InputSide::Governance, options)?;
        let previous = governance.insert(name.clone(), record.metadata.clone());
        if previous.is_some() && options.duplicates == DuplicatePolicy::Strict {
            return Err(ReconcileError::DuplicateKey {
                name,
                side: InputSide::Governance,
            });
        }
    }

    let mut result = ReconciliationResult::default();
    for (name, metadata) in governance {
        if repo.remove(&name) {
            result.both.insert(name, metadata);
        } else {
            result.governance_only.insert(name, metadata);
        }
    }
    result.repo_only = repo;

    debug!(
        both = result.both.len(),
        governance_only = result.governance_only.len(),
        repo_only = result.repo_only.len(),
        "Reconciled folder names"
    );

    Ok(result)
}

fn normalized(
    raw: &str,
    side: InputSide,
    options: &ReconcileOptions,
) -> Result<String, ReconcileError> {
    let name = options.names.normalize(raw);
    if name.is_empty() {
        return Err(ReconcileError::InvalidInput(format!(
            "empty folder name in {side} input: {raw:?}"
        )));
    }
    Ok(name)
}
