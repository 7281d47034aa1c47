// src/profit/decision.rs
//! Stay-or-switch decision with a hysteresis margin
//!
//! The margin is added to the current coin's profit only, so it can
//! suppress a switch but never forces one.

use crate::utils::error::SwitcherError;
use serde::Serialize;

/// Outcome of comparing the best candidate with the current coin
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Keep the current assignment
    Stay,
    /// Move the worker to `coin`
    SwitchTo {
        /// Coin identifier to switch to
        coin: String,
        /// Its estimated daily profit in USD
        profit: f64,
    },
}

/// Profit the best candidate has to reach before a switch happens
///
/// The margin is taken from the magnitude of the current profit, so the
/// threshold never drops below the current profit even when that is
/// negative.
pub fn hysteresis_threshold(current_profit: f64, hysteresis_percent: f64) -> f64 {
    current_profit + current_profit.abs() * (hysteresis_percent / 100.0)
}

/// Decides whether to leave the current coin for the best candidate
///
/// # Errors
/// `MarketDataUnavailable` if the best candidate differs from the current
/// coin and the current coin's profit is unknown (e.g. it left the feed).
pub fn decide(
    current_coin: &str,
    current_profit: Option<f64>,
    best_coin: &str,
    best_profit: f64,
    hysteresis_percent: f64,
) -> Result<Decision, SwitcherError> {
    if best_coin == current_coin {
        return Ok(Decision::Stay);
    }

    let current_profit = current_profit.ok_or_else(|| {
        SwitcherError::MarketDataUnavailable(format!(
            "No profit for current coin {} in the market feed",
            current_coin
        ))
    })?;

    let threshold = hysteresis_threshold(current_profit, hysteresis_percent);
    if best_profit < threshold {
        log::debug!(
            "{} at {:.2} does not beat {} threshold {:.2}",
            best_coin,
            best_profit,
            current_coin,
            threshold
        );
        return Ok(Decision::Stay);
    }

    Ok(Decision::SwitchTo {
        coin: best_coin.to_string(),
        profit: best_profit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hysteresis_margin() {
        assert_eq!(hysteresis_threshold(100.0, 5.0), 105.0);
        assert_eq!(decide("ETH", Some(100.0), "RVN", 104.0, 5.0).unwrap(), Decision::Stay);
        assert_eq!(
            decide("ETH", Some(100.0), "RVN", 106.0, 5.0).unwrap(),
            Decision::SwitchTo {
                coin: "RVN".into(),
                profit: 106.0
            }
        );
    }

    #[test]
    fn test_margin_never_lowers_threshold_for_losses() {
        assert_eq!(hysteresis_threshold(-10.0, 50.0), -5.0);
        assert_eq!(decide("ETH", Some(-10.0), "ETC", -12.0, 50.0).unwrap(), Decision::Stay);
        assert_eq!(decide("ETH", Some(-10.0), "ETC", -6.0, 50.0).unwrap(), Decision::Stay);
        assert_eq!(
            decide("ETH", Some(-10.0), "ETC", -5.0, 50.0).unwrap(),
            Decision::SwitchTo {
                coin: "ETC".into(),
                profit: -5.0
            }
        );
    }

    #[test]
    fn test_same_coin_stays() {
        assert_eq!(decide("RVN", Some(10.0), "RVN", 10.0, 0.0).unwrap(), Decision::Stay);
        assert_eq!(decide("RVN", None, "RVN", 10.0, 0.0).unwrap(), Decision::Stay);
    }

    #[test]
    fn test_zero_margin_switches_on_equal_profit() {
        assert!(matches!(
            decide("ETH", Some(50.0), "ETC", 50.0, 0.0).unwrap(),
            Decision::SwitchTo { .. }
        ));
    }

    #[test]
    fn test_unknown_current_profit_fails() {
        let result = decide("ETH", None, "ETC", 40.0, 10.0);
        assert!(matches!(result, Err(SwitcherError::MarketDataUnavailable(_))));
    }
}
