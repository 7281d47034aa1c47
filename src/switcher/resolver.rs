// src/switcher/resolver.rs
//! Coin and flight-sheet lookups

use crate::config::CoinBinding;
use crate::types::FlightSheet;
use crate::utils::error::SwitcherError;

/// Resolves coins to flight sheets through a worker's bindings
///
/// When a coin or flight sheet is bound more than once, the first binding
/// wins.
pub struct FlightSheetResolver<'a> {
    bindings: &'a [CoinBinding],
}

impl<'a> FlightSheetResolver<'a> {
    /// Creates a resolver over a worker's coin bindings
    pub fn new(bindings: &'a [CoinBinding]) -> Self {
        FlightSheetResolver { bindings }
    }

    /// Coin mined by the flight sheet currently applied to the worker
    ///
    /// # Errors
    /// `ConfigurationMismatch` if no binding uses that flight sheet.
    pub fn current_coin(&self, flight_sheet_name: &str) -> Result<&'a str, SwitcherError> {
        self.bindings
            .iter()
            .find(|b| b.fs == flight_sheet_name)
            .map(|b| b.tag.as_str())
            .ok_or_else(|| {
                SwitcherError::ConfigurationMismatch(format!(
                    "Flight sheet \"{}\" not found on config file",
                    flight_sheet_name
                ))
            })
    }

    /// Flight sheet name bound to a coin
    ///
    /// # Errors
    /// `ConfigurationMismatch` if the coin has no binding.
    pub fn flight_sheet_for(&self, coin: &str) -> Result<&'a str, SwitcherError> {
        self.bindings
            .iter()
            .find(|b| b.tag == coin)
            .map(|b| b.fs.as_str())
            .ok_or_else(|| {
                SwitcherError::ConfigurationMismatch(format!(
                    "No flight sheet configured for coin \"{}\"",
                    coin
                ))
            })
    }

    /// Farm id of a flight sheet name
    ///
    /// # Errors
    /// `FlightSheetNotFound` if the farm has no flight sheet of that name.
    pub fn flight_sheet_id(name: &str, sheets: &[FlightSheet]) -> Result<u64, SwitcherError> {
        sheets
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.id)
            .ok_or_else(|| {
                SwitcherError::FlightSheetNotFound(format!("\"{}\" not found on the farm", name))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings() -> Vec<CoinBinding> {
        vec![
            CoinBinding {
                tag: "ETC".into(),
                fs: "ETC-pool".into(),
            },
            CoinBinding {
                tag: "NICEHASH-KAWPOW".into(),
                fs: "NH-KawPow".into(),
            },
            CoinBinding {
                tag: "ETC".into(),
                fs: "ETC-backup".into(),
            },
        ]
    }

    #[test]
    fn test_current_coin() {
        let bindings = bindings();
        let resolver = FlightSheetResolver::new(&bindings);
        assert_eq!(resolver.current_coin("NH-KawPow").unwrap(), "NICEHASH-KAWPOW");
        assert_eq!(resolver.current_coin("ETC-backup").unwrap(), "ETC");
        assert!(matches!(
            resolver.current_coin("Unknown"),
            Err(SwitcherError::ConfigurationMismatch(_))
        ));
    }

    #[test]
    fn test_first_binding_wins() {
        let bindings = bindings();
        let resolver = FlightSheetResolver::new(&bindings);
        assert_eq!(resolver.flight_sheet_for("ETC").unwrap(), "ETC-pool");
        assert!(matches!(
            resolver.flight_sheet_for("RVN"),
            Err(SwitcherError::ConfigurationMismatch(_))
        ));
    }

    #[test]
    fn test_flight_sheet_id() {
        let sheets = vec![
            FlightSheet {
                id: 11,
                name: "ETC-pool".into(),
            },
            FlightSheet {
                id: 12,
                name: "NH-KawPow".into(),
            },
        ];
        assert_eq!(FlightSheetResolver::flight_sheet_id("NH-KawPow", &sheets).unwrap(), 12);
        assert!(matches!(
            FlightSheetResolver::flight_sheet_id("RVN-pool", &sheets),
            Err(SwitcherError::FlightSheetNotFound(_))
        ));
    }
}
