// src/config/mod.rs
//! Configuration management for the profit switcher
//!
//! This module handles all configuration-related functionality including:
//! - Loading and validating the configuration file (TOML or legacy JSON)
//! - Generating configuration templates
//! - Per-worker coin to flight-sheet bindings

/// Core configuration implementation
///
/// Contains the [`Config`] struct and the worker, binding and endpoint
/// records it is made of.
pub mod config;

// Re-export key items for easy access
pub use config::{ApiEndpoints, CoinBinding, Config, WorkerConfig};

use crate::utils::error::SwitcherError;
use std::path::{Path, PathBuf};

/// Loads and validates configuration from a file
///
/// # Arguments
/// * `path` - Path to the configuration file (anything convertible to PathBuf)
///
/// # Returns
/// * `Ok(Config)` - Successfully loaded configuration
/// * `Err(SwitcherError)` - If the file couldn't be read, parsed or validated
pub fn load(path: impl Into<PathBuf>) -> Result<Config, SwitcherError> {
    Config::load(path)
}

/// Locates the configuration file
///
/// A relative path that does not exist in the working directory is looked
/// up next to the executable, so a scheduler starting the binary from
/// elsewhere still finds the file installed beside it.
pub fn resolve_path(path: &Path) -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    resolve_path_in(path, exe_dir.as_deref())
}

fn resolve_path_in(path: &Path, exe_dir: Option<&Path>) -> PathBuf {
    if path.is_absolute() || path.exists() {
        return path.to_path_buf();
    }

    match exe_dir.map(|dir| dir.join(path)) {
        Some(candidate) if candidate.exists() => {
            log::debug!("Using config next to the executable: {}", candidate.display());
            candidate
        }
        _ => path.to_path_buf(),
    }
}

/// Generates a commented configuration template
pub fn generate_template() -> String {
    Config::generate_template()
}
