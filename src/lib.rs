pub mod config;
pub mod folder;
pub mod reconciliation;
pub mod report;
pub mod runner;
pub mod source;
pub mod utils;

// Re-export commonly used types
pub use config::{read_config, write_config, ConfigError, ReconcileConfig};
pub use folder::{FolderMetadata, FolderRecord, NamePolicy};
pub use reconciliation::{
    reconcile, DuplicatePolicy, InputSide, ReconcileError, ReconcileOptions, ReconciliationResult,
    ReconciliationSummary,
};
pub use report::{ReportContext, ReportEngine, ReportError, ReportFormat};
pub use runner::{run, run_with_sources, RunError, RunOutcome};
pub use source::{
    CsvGovernanceSource, DirectoryEntry, DirectorySource, EntryType, GithubDirectorySource,
    GithubSettings, GovernanceSource, LocalDirectorySource, SourceError,
};
