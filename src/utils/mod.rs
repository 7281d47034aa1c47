// src/utils/mod.rs
//! Utilities module for common functionality
//!
//! Error handling and logging infrastructure shared by every other module.

/// Error types and handling utilities
///
/// Contains the [`SwitcherError`] enum which defines all possible error
/// conditions, split into worker-scoped and pass-fatal kinds.
pub mod error;

/// Logging configuration and utilities
pub mod logging;

// Re-export for easier access
pub use error::SwitcherError;
pub use logging::init_logging;
