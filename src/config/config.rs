// src/config/config.rs
use crate::{types::SwitchPolicy, utils::error::SwitcherError};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Environment variable read when the file leaves `api_key` empty
pub const API_KEY_ENV: &str = "HIVE_API_KEY";

const DEFAULT_HIVE_API: &str = "https://api2.hiveos.farm/api/v2";
const DEFAULT_PRICE_URL: &str = "https://api.coindesk.com/v1/bpi/currentprice.json";
const DEFAULT_RELEASE_FEED: &str =
    "https://api.github.com/repos/Lucas-Samuel/HiveOS-Profit-Switcher/tags";

/// Main configuration structure
///
/// Loaded once at startup and passed by reference to every component that
/// needs it. Field names follow the legacy `configs.json` layout so existing
/// files keep working.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Farm API bearer token
    #[serde(default)]
    pub api_key: String,

    /// Farm identifier
    pub farm_id: String,

    /// Hysteresis margin in percent ("coin difference")
    #[serde(
        default,
        alias = "coin_diference",
        deserialize_with = "deserialize_percent"
    )]
    pub coin_difference: f64,

    /// Candidate selection policy
    #[serde(default)]
    pub change_type: SwitchPolicy,

    /// Remote API locations
    #[serde(default)]
    pub endpoints: ApiEndpoints,

    /// Per-worker settings, matched to farm workers by name
    #[serde(default)]
    pub workers: Vec<WorkerConfig>,
}

/// Operator settings for one farm worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Worker name as shown by the farm API
    pub name: String,

    /// Profitability query URL; carries the cost profile as `factor[...]` parameters
    pub wtm_endpoint: String,

    /// Coin to flight-sheet bindings
    #[serde(default)]
    pub coins: Vec<CoinBinding>,
}

/// Declared mapping from a mineable coin to the flight sheet that mines it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinBinding {
    /// Coin identifier as produced by the profit calculator (e.g. `ETC`, `NICEHASH-KAWPOW`)
    ///
    /// Stored upper-cased, like the identifiers built from the feed.
    #[serde(deserialize_with = "deserialize_tag")]
    pub tag: String,

    /// Flight sheet name on the farm
    pub fs: String,
}

/// Base URLs of the consumed APIs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEndpoints {
    /// Farm API base URL
    #[serde(default = "default_hive_api")]
    pub hive_api: String,

    /// BTC/USD spot price URL
    #[serde(default = "default_price_url")]
    pub btc_price: String,

    /// Release tags feed used by the update check
    #[serde(default = "default_release_feed")]
    pub release_feed: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_hive_api() -> String {
    DEFAULT_HIVE_API.into()
}

fn default_price_url() -> String {
    DEFAULT_PRICE_URL.into()
}

fn default_release_feed() -> String {
    DEFAULT_RELEASE_FEED.into()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        ApiEndpoints {
            hive_api: default_hive_api(),
            btc_price: default_price_url(),
            release_feed: default_release_feed(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Accepts the hysteresis margin either as a number or as a numeric string
///
/// Older configuration files store it as a string. Anything that does not
/// parse, a blank string included, is rejected instead of being read as zero.
fn deserialize_percent<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Percent {
        Number(f64),
        Text(String),
    }

    match Percent::deserialize(deserializer)? {
        Percent::Number(value) => Ok(value),
        Percent::Text(text) => text.trim().parse::<f64>().map_err(|_| {
            serde::de::Error::custom(format!("coin_difference is not a number: {:?}", text))
        }),
    }
}

/// Reads a coin tag in the upper-case form the profit calculator produces
fn deserialize_tag<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = String::deserialize(deserializer)?;
    let normalized = tag.trim().to_uppercase();
    if normalized.is_empty() {
        return Err(serde::de::Error::custom("coin tag is empty"));
    }
    if normalized != tag {
        log::debug!("Coin tag {:?} read as {}", tag, normalized);
    }
    Ok(normalized)
}

impl Config {
    /// Loads configuration from a file
    ///
    /// `.json` files are read with `serde_json`, everything else as TOML.
    /// The result is validated before it is returned.
    ///
    /// # Returns
    /// * `Ok(Config)` - Successfully loaded configuration
    /// * `Err(SwitcherError)` - If the file couldn't be read, parsed or validated
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, SwitcherError> {
        let path = path.into();
        let config_str = std::fs::read_to_string(&path).map_err(|e| {
            SwitcherError::ConfigError(format!(
                "Failed to read config at {}: {}",
                path.display(),
                e
            ))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let mut config = if is_json {
            Self::from_json(&config_str)?
        } else {
            Self::from_toml(&config_str)?
        };

        if config.api_key.is_empty() {
            if let Ok(key) = std::env::var(API_KEY_ENV) {
                config.api_key = key;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document without validating it
    pub fn from_toml(text: &str) -> Result<Self, SwitcherError> {
        Ok(toml::from_str(text)?)
    }

    /// Parses a JSON document without validating it
    pub fn from_json(text: &str) -> Result<Self, SwitcherError> {
        serde_json::from_str(text)
            .map_err(|e| SwitcherError::ConfigError(format!("Invalid config format: {}", e)))
    }

    /// Checks the values that every worker evaluation depends on
    ///
    /// Duplicate coin tags inside one worker are only warned about; the
    /// first binding is the one used.
    pub fn validate(&self) -> Result<(), SwitcherError> {
        if self.api_key.trim().is_empty() {
            return Err(SwitcherError::ConfigError(format!(
                "API key not set (config or {})",
                API_KEY_ENV
            )));
        }

        if self.farm_id.trim().is_empty() {
            return Err(SwitcherError::ConfigError("Farm id not set".into()));
        }

        if !self.coin_difference.is_finite() || self.coin_difference < 0.0 {
            return Err(SwitcherError::ConfigError(format!(
                "coin_difference must be a non-negative percentage, got {}",
                self.coin_difference
            )));
        }

        for worker in &self.workers {
            if worker.wtm_endpoint.trim().is_empty() {
                return Err(SwitcherError::ConfigError(format!(
                    "Worker \"{}\" has no wtm_endpoint",
                    worker.name
                )));
            }

            let mut seen = HashSet::new();
            for binding in &worker.coins {
                if !seen.insert(binding.tag.as_str()) {
                    log::warn!(
                        "Worker \"{}\" binds coin {} more than once; using the first flight sheet",
                        worker.name,
                        binding.tag
                    );
                }
            }
        }

        Ok(())
    }

    /// Returns the configuration entry for a farm worker name
    pub fn worker(&self, name: &str) -> Option<&WorkerConfig> {
        self.workers.iter().find(|w| w.name == name)
    }

    /// Generates a configuration template string
    ///
    /// # Returns
    /// String containing a commented TOML configuration template
    pub fn generate_template() -> String {
        let mut template = String::new();
        template.push_str("# Hive Profit Switcher Configuration\n\n");
        template.push_str("# Farm API token (or leave empty and set HIVE_API_KEY)\n");
        template.push_str("api_key = \"\"\n");
        template.push_str("farm_id = \"123456\"\n");
        template.push_str("# Minimum advantage in percent before switching\n");
        template.push_str("coin_difference = 5\n");
        template.push_str("# best, best_nicehash or best_flight_sheet\n");
        template.push_str("change_type = \"best\"\n\n");

        template.push_str("[[workers]]\n");
        template.push_str("name = \"rig01\"\n");
        template.push_str("# Profitability query with the worker's power figures, e.g.\n");
        template.push_str("# factor[eth_p]=220&factor[kpw_p]=240&factor[cost]=0.1\n");
        template.push_str(
            "wtm_endpoint = \"https://whattomine.com/coins.json?factor%5Beth_p%5D=220&factor%5Be4g_p%5D=220&factor%5Bkpw_p%5D=240&factor%5Bcost%5D=0.1\"\n\n",
        );

        template.push_str("[[workers.coins]]\n");
        template.push_str("tag = \"ETC\"\n");
        template.push_str("fs = \"ETC-pool\"\n\n");
        template.push_str("[[workers.coins]]\n");
        template.push_str("tag = \"NICEHASH-KAWPOW\"\n");
        template.push_str("fs = \"NH-KawPow\"\n");

        template
    }
}
