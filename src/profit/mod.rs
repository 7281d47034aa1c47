// src/profit/mod.rs
//! Profit evaluation and switch decision
//!
//! Everything in this module is synchronous and free of I/O:
//! - Algorithm to cost-parameter lookup
//! - Daily USD profit per coin
//! - Ranking under a switch policy
//! - Hysteresis-based stay/switch decision

/// Algorithm to cost-parameter mapping
///
/// Includes the Ethash fork rule and NiceHash coin identifiers.
pub mod algorithm;

/// Daily profit computation from feed revenue and a worker's cost profile
pub mod calculator;

/// Ranking of candidate coins under a [`SwitchPolicy`](crate::types::SwitchPolicy)
pub mod ranker;

/// Stay-or-switch decision
pub mod decision;

// Re-export main components for cleaner imports
pub use self::calculator::{CoinProfit, CostProfile, MarketQuote, ProfitCalculator};
pub use self::decision::{Decision, decide};
pub use self::ranker::{Ranking, rank};
