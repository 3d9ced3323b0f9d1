//! Folder records shared by both data sources and the reconciler.

mod normalize;
mod types;

pub use normalize::NamePolicy;
pub use types::{FolderMetadata, FolderRecord};
