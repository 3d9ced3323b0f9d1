//! Three-way reconciliation of repository folders against governance records.

mod reconcile;
mod types;

pub use reconcile::{reconcile, ReconcileError};
pub use types::{
    DuplicatePolicy, InputSide, ReconcileOptions, ReconciliationResult, ReconciliationSummary,
};
