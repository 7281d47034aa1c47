//! Pass reporting
//!
//! Collects the per-worker outcomes of one pass (stay, switch, would-switch
//! or failure) and summarizes them for logs and JSON output.

/// Submodule containing the pass report types
pub mod reporter;

// Re-export main components
pub use reporter::{PassReport, PassSummary, WorkerOutcome, WorkerReport};
