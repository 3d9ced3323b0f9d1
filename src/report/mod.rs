//! Presentation of reconciliation results.

mod engine;
mod types;

pub use engine::{ReportEngine, ReportError, DEFAULT_TEXT_TEMPLATE};
pub use types::{ReportContext, ReportEntry, ReportFormat};
