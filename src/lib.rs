//! Hive Profit Switcher - keeps mining workers on their most profitable flight sheet
//!
//! For each worker of a farm this crate:
//! - Converts per-coin BTC revenue estimates and the worker's power costs into daily USD profit
//! - Ranks the candidates under a selection policy (all coins, NiceHash only, configured only)
//! - Applies a hysteresis margin before deciding to switch
//! - Applies the flight sheet bound to the winning coin through the farm API

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Profit computation, ranking and switch decision
pub mod profit;

/// Per-worker evaluation pass
pub mod switcher;

/// Clients for the farm, profitability, spot-price and release APIs
pub mod network;

/// Pass reports
pub mod stats;

/// Utility functions and error handling
pub mod utils;

/// Command-line interface definitions
pub mod cli;

/// Configuration management
pub mod config;

/// Shared type definitions
pub mod types;

// Core exports
pub use cli::Commands;
pub use config::Config;
pub use network::{HiveClient, MarketClient, ReleaseClient};
pub use profit::{CoinProfit, CostProfile, Decision, MarketQuote, ProfitCalculator, Ranking};
pub use stats::{PassReport, WorkerOutcome};
pub use switcher::{FarmApi, MarketData, PassOptions, Switcher};
pub use types::{FlightSheet, SwitchPolicy, WorkerProfile};
pub use utils::{SwitcherError, init_logging};
