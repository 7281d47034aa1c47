// src/utils/error.rs
use std::io;
use thiserror::Error;

/// Main error type for the profit switcher
///
/// The first five variants are scoped to a single worker: they abort that
/// worker's evaluation and the pass moves on to the next one. The remaining
/// variants come from reading configuration or talking to the farm before
/// any worker has been looked at, and end the pass.
#[derive(Error, Debug)]
pub enum SwitcherError {
    /// Worker, coin binding or configured value does not match what the farm reports
    #[error("Configuration mismatch: {0}")]
    ConfigurationMismatch(String),

    /// Market feed empty, BTC rate missing or a cost-profile parameter absent
    #[error("Market data unavailable: {0}")]
    MarketDataUnavailable(String),

    /// The switch policy filtered out every candidate coin
    #[error("No eligible coin: {0}")]
    NoEligibleCoin(String),

    /// The bound flight sheet is not present on the farm
    #[error("Flight sheet not found: {0}")]
    FlightSheetNotFound(String),

    /// The farm rejected the flight-sheet assignment
    #[error("Remote update failed: {0}")]
    RemoteUpdateFailed(String),

    /// Configuration file or parameter errors
    ///
    /// Also covers an invalid hysteresis percentage. That value is shared by
    /// every worker, so instead of a per-worker `ConfigurationMismatch` it
    /// stops the run when the configuration is loaded.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Standard I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl SwitcherError {
    /// Returns `true` if the error only concerns the worker being evaluated
    pub fn is_worker_scoped(&self) -> bool {
        matches!(
            self,
            SwitcherError::ConfigurationMismatch(_)
                | SwitcherError::MarketDataUnavailable(_)
                | SwitcherError::NoEligibleCoin(_)
                | SwitcherError::FlightSheetNotFound(_)
                | SwitcherError::RemoteUpdateFailed(_)
        )
    }

    /// Short machine-readable name of the error kind, used in reports
    pub fn kind(&self) -> &'static str {
        match self {
            SwitcherError::ConfigurationMismatch(_) => "configuration_mismatch",
            SwitcherError::MarketDataUnavailable(_) => "market_data_unavailable",
            SwitcherError::NoEligibleCoin(_) => "no_eligible_coin",
            SwitcherError::FlightSheetNotFound(_) => "flight_sheet_not_found",
            SwitcherError::RemoteUpdateFailed(_) => "remote_update_failed",
            SwitcherError::ConfigError(_) => "config_error",
            SwitcherError::IoError(_) => "io_error",
            SwitcherError::JsonError(_) => "json_error",
            SwitcherError::HttpError(_) => "http_error",
        }
    }
}

/// Converts TOML decoding errors into SwitcherError
///
/// Only configuration files are TOML, so the error is always a
/// `ConfigError` carrying the parser's message.
impl From<toml::de::Error> for SwitcherError {
    fn from(e: toml::de::Error) -> Self {
        SwitcherError::ConfigError(format!("Invalid config format: {}", e))
    }
}
