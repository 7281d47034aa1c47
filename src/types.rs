// src/types.rs
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Selection policy applied to the candidate coins before picking the best one
///
/// The serialized names are the `change_type` values of the configuration
/// file.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum SwitchPolicy {
    /// Every coin in the profitability feed is a candidate
    #[default]
    #[serde(rename = "best")]
    #[value(name = "best")]
    Unrestricted,

    /// Only NiceHash entries are candidates
    #[serde(rename = "best_nicehash")]
    #[value(name = "best_nicehash")]
    NiceHashOnly,

    /// Only coins that have a flight sheet bound in the worker's configuration
    #[serde(rename = "best_flight_sheet")]
    #[value(name = "best_flight_sheet")]
    ConfiguredFlightSheetsOnly,
}

impl fmt::Display for SwitchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwitchPolicy::Unrestricted => write!(f, "best"),
            SwitchPolicy::NiceHashOnly => write!(f, "best_nicehash"),
            SwitchPolicy::ConfiguredFlightSheetsOnly => write!(f, "best_flight_sheet"),
        }
    }
}

impl FromStr for SwitchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "best" | "unrestricted" => Ok(SwitchPolicy::Unrestricted),
            "best_nicehash" | "nicehash" => Ok(SwitchPolicy::NiceHashOnly),
            "best_flight_sheet" | "flight_sheet" => Ok(SwitchPolicy::ConfiguredFlightSheetsOnly),
            _ => Err(format!("Unknown switch policy: {}", s)),
        }
    }
}

/// Farm worker as reported by the farm API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerProfile {
    /// Farm-assigned worker id
    pub id: u64,
    /// Worker name, matched against the configuration
    pub name: String,
    /// Flight sheet currently applied, if any
    #[serde(default)]
    pub flight_sheet: Option<FlightSheet>,
}

/// Flight sheet as reported by the farm API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSheet {
    /// Farm-assigned flight sheet id
    pub id: u64,
    /// Flight sheet name
    pub name: String,
}
