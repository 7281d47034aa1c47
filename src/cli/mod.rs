// src/cli/mod.rs
//! Command-line interface definitions

/// clap derive structures for the subcommands
pub mod commands;

pub use commands::{Action, CheckUpdateOptions, Commands, ConfigOptions, RunOptions};
