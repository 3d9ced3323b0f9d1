mod repository;

pub use repository::{parse_repository, RepositoryId};

/// Current folder-reconcile version
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// User agent sent to remote directory sources
pub const USER_AGENT: &str = concat!("folder-reconcile/", env!("CARGO_PKG_VERSION"));

/// Get current timestamp in ISO 8601 format
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}
