// src/profit/calculator.rs
//! Daily profit per coin
//!
//! Turns the feed's 24h BTC revenue into a USD profit figure by subtracting
//! the worker's power cost for the coin's algorithm.

use crate::profit::algorithm::{self, COST_PARAMETER, NICEHASH_TAG};
use crate::utils::error::SwitcherError;
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

/// One entry of the profitability feed
#[derive(Debug, Clone, PartialEq)]
pub struct MarketQuote {
    /// Ticker as reported by the feed (`NICEHASH` for NiceHash entries)
    pub tag: String,
    /// Algorithm label, upper-cased
    pub algorithm: String,
    /// Estimated 24h revenue in BTC
    pub btc_revenue: f64,
}

/// Comparable daily profit of one coin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoinProfit {
    /// Coin identifier (`NICEHASH-<ALGO>` for NiceHash entries)
    pub coin: String,
    /// Effective algorithm used for pricing
    pub algorithm: String,
    /// Daily profit in USD
    pub profit: f64,
    /// Whether the entry is NiceHash-backed
    pub nicehash: bool,
}

/// Worker power figures and electricity price
///
/// Built from the `factor[...]` query parameters of the worker's
/// profitability endpoint. Only the electricity price (`factor[cost]`) and
/// the consumption codes ending in `_p` are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostProfile {
    electricity_cost: Option<f64>,
    consumption: HashMap<String, f64>,
}

impl CostProfile {
    /// Creates a profile from explicit values
    pub fn new(electricity_cost: Option<f64>, consumption: HashMap<String, f64>) -> Self {
        CostProfile {
            electricity_cost,
            consumption,
        }
    }

    /// Parses the cost profile embedded in a profitability endpoint URL
    ///
    /// # Errors
    /// `ConfigurationMismatch` if the URL is invalid or a relevant factor
    /// is not a non-negative number. Empty values are treated as absent.
    pub fn from_endpoint(endpoint: &str) -> Result<Self, SwitcherError> {
        let url = Url::parse(endpoint).map_err(|e| {
            SwitcherError::ConfigurationMismatch(format!(
                "Invalid profitability endpoint '{}': {}",
                endpoint, e
            ))
        })?;

        let mut profile = CostProfile::default();

        for (name, value) in url.query_pairs() {
            let Some(key) = name
                .strip_prefix("factor[")
                .and_then(|rest| rest.strip_suffix(']'))
            else {
                continue;
            };

            if key != COST_PARAMETER && !key.ends_with("_p") {
                continue;
            }

            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            let number = value.parse::<f64>().ok().filter(|n| n.is_finite()).ok_or_else(|| {
                SwitcherError::ConfigurationMismatch(format!(
                    "factor[{}] is not a number: {:?}",
                    key, value
                ))
            })?;

            if number < 0.0 {
                return Err(SwitcherError::ConfigurationMismatch(format!(
                    "factor[{}] must not be negative, got {}",
                    key, number
                )));
            }

            if key == COST_PARAMETER {
                profile.electricity_cost = Some(number);
            } else {
                profile.consumption.insert(key.to_string(), number);
            }
        }

        Ok(profile)
    }

    /// Electricity price per kWh
    pub fn electricity_cost(&self) -> Option<f64> {
        self.electricity_cost
    }

    /// Power draw in watts for a cost-parameter code
    pub fn consumption(&self, key: &str) -> Option<f64> {
        self.consumption.get(key).copied()
    }
}

/// Daily profit in USD
///
/// `revenue * rate - 24 * (watts / 1000) * cost_per_kwh`
pub fn compute_profit(btc_revenue: f64, consumption_watts: f64, electricity_cost: f64, btc_usd: f64) -> f64 {
    let daily_power_cost = 24.0 * (consumption_watts / 1000.0) * electricity_cost;
    let daily_revenue = btc_revenue * btc_usd;
    daily_revenue - daily_power_cost
}

/// Prices feed entries for one worker
pub struct ProfitCalculator<'a> {
    profile: &'a CostProfile,
    electricity_cost: f64,
    btc_usd: f64,
}

impl<'a> ProfitCalculator<'a> {
    /// Creates a calculator for a worker's cost profile and the current BTC rate
    ///
    /// # Errors
    /// `MarketDataUnavailable` if the rate is not a positive number or the
    /// profile has no electricity price.
    pub fn new(profile: &'a CostProfile, btc_usd: f64) -> Result<Self, SwitcherError> {
        if !btc_usd.is_finite() || btc_usd <= 0.0 {
            return Err(SwitcherError::MarketDataUnavailable(format!(
                "Invalid BTC/USD rate: {}",
                btc_usd
            )));
        }

        let electricity_cost = profile.electricity_cost().ok_or_else(|| {
            SwitcherError::MarketDataUnavailable(format!(
                "Cost profile has no factor[{}]",
                COST_PARAMETER
            ))
        })?;

        Ok(ProfitCalculator {
            profile,
            electricity_cost,
            btc_usd,
        })
    }

    /// Computes the daily profit of a single feed entry
    ///
    /// # Errors
    /// `MarketDataUnavailable` if the algorithm has no cost parameter, the
    /// profile lacks the consumption figure, or the result is not finite.
    pub fn coin_profit(&self, quote: &MarketQuote) -> Result<CoinProfit, SwitcherError> {
        let tag = quote.tag.to_uppercase();
        let (algorithm, key) = algorithm::resolve(&quote.algorithm, &tag);

        let key = key.ok_or_else(|| {
            SwitcherError::MarketDataUnavailable(format!(
                "No cost parameter for algorithm {} ({})",
                algorithm, tag
            ))
        })?;

        let consumption = self.profile.consumption(key).ok_or_else(|| {
            SwitcherError::MarketDataUnavailable(format!(
                "Cost profile has no factor[{}] for {} ({})",
                key, algorithm, tag
            ))
        })?;

        let profit = compute_profit(
            quote.btc_revenue,
            consumption,
            self.electricity_cost,
            self.btc_usd,
        );

        if !profit.is_finite() {
            return Err(SwitcherError::MarketDataUnavailable(format!(
                "Profit for {} is not a number",
                tag
            )));
        }

        Ok(CoinProfit {
            coin: algorithm::coin_identifier(&tag, &algorithm),
            nicehash: tag == NICEHASH_TAG,
            algorithm,
            profit,
        })
    }

    /// Computes one profit per distinct coin, in feed order
    ///
    /// Entries that cannot be priced are left out rather than ranked at
    /// zero cost. A repeated coin identifier keeps its first occurrence.
    ///
    /// # Errors
    /// `MarketDataUnavailable` if no entry could be priced.
    pub fn coin_profits(&self, quotes: &[MarketQuote]) -> Result<Vec<CoinProfit>, SwitcherError> {
        let mut profits: Vec<CoinProfit> = Vec::with_capacity(quotes.len());

        for quote in quotes {
            match self.coin_profit(quote) {
                Ok(profit) => {
                    if profits.iter().any(|p| p.coin == profit.coin) {
                        log::debug!("Ignoring repeated feed entry for {}", profit.coin);
                        continue;
                    }
                    profits.push(profit);
                }
                Err(e) => log::debug!("Skipping {}: {}", quote.tag, e),
            }
        }

        if profits.is_empty() {
            return Err(SwitcherError::MarketDataUnavailable(format!(
                "None of the {} feed entries could be priced",
                quotes.len()
            )));
        }

        Ok(profits)
    }
}

/// Looks up the profit of a coin identifier
pub fn profit_of(profits: &[CoinProfit], coin: &str) -> Option<f64> {
    profits.iter().find(|p| p.coin == coin).map(|p| p.profit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(tag: &str, algorithm: &str, btc_revenue: f64) -> MarketQuote {
        MarketQuote {
            tag: tag.into(),
            algorithm: algorithm.into(),
            btc_revenue,
        }
    }

    fn profile() -> CostProfile {
        CostProfile::from_endpoint(
            "https://whattomine.com/coins.json?factor%5Beth_p%5D=200&factor%5Be4g_p%5D=180\
             &factor%5Bkpw_p%5D=250&factor%5Bcost%5D=0.1&factor%5Bcost_currency%5D=USD&sort=Profit",
        )
        .unwrap()
    }

    #[test]
    fn test_profit_formula() {
        let (r, c, e, p) = (0.00042, 215.0, 0.12, 61_250.5);
        assert_eq!(compute_profit(r, c, e, p), r * p - 24.0 * (c / 1000.0) * e);
        assert_eq!(compute_profit(0.001, 0.0, 0.1, 50_000.0), 50.0);
    }

    #[test]
    fn test_profile_from_endpoint() {
        let profile = profile();
        assert_eq!(profile.electricity_cost(), Some(0.1));
        assert_eq!(profile.consumption("eth_p"), Some(200.0));
        assert_eq!(profile.consumption("kpw_p"), Some(250.0));
        assert_eq!(profile.consumption("rmx_p"), None);
    }

    #[test]
    fn test_profile_rejects_non_numeric_factor() {
        let result = CostProfile::from_endpoint("https://whattomine.com/coins.json?factor[eth_p]=abc");
        assert!(matches!(result, Err(SwitcherError::ConfigurationMismatch(_))));
    }

    #[test]
    fn test_profile_rejects_negative_factors() {
        for endpoint in [
            "https://whattomine.com/coins.json?factor[eth_p]=-500&factor[cost]=0.2",
            "https://whattomine.com/coins.json?factor[eth_p]=200&factor[cost]=-0.2",
        ] {
            assert!(matches!(
                CostProfile::from_endpoint(endpoint),
                Err(SwitcherError::ConfigurationMismatch(_))
            ));
        }

        let free_power = CostProfile::from_endpoint(
            "https://whattomine.com/coins.json?factor[eth_p]=0&factor[cost]=0",
        )
        .unwrap();
        let calc = ProfitCalculator::new(&free_power, 50_000.0).unwrap();
        let eth = calc.coin_profit(&quote("ETH", "Ethash", 0.0005)).unwrap();
        assert_eq!(eth.profit, 25.0);
    }

    #[test]
    fn test_calculator_requires_rate_and_cost() {
        let profile = profile();
        assert!(matches!(
            ProfitCalculator::new(&profile, 0.0),
            Err(SwitcherError::MarketDataUnavailable(_))
        ));

        let no_cost = CostProfile::new(None, HashMap::new());
        assert!(matches!(
            ProfitCalculator::new(&no_cost, 50_000.0),
            Err(SwitcherError::MarketDataUnavailable(_))
        ));
    }

    #[test]
    fn test_ethash_fork_uses_variant_consumption() {
        let profile = profile();
        let calc = ProfitCalculator::new(&profile, 50_000.0).unwrap();

        let etc = calc.coin_profit(&quote("ETC", "Ethash", 0.001)).unwrap();
        assert_eq!(etc.algorithm, "ETHASH4");
        assert_eq!(etc.profit, compute_profit(0.001, 180.0, 0.1, 50_000.0));

        let eth = calc.coin_profit(&quote("ETH", "Ethash", 0.001)).unwrap();
        assert_eq!(eth.profit, compute_profit(0.001, 200.0, 0.1, 50_000.0));
    }

    #[test]
    fn test_nicehash_entries_are_disambiguated() {
        let profile = profile();
        let calc = ProfitCalculator::new(&profile, 50_000.0).unwrap();
        let profits = calc
            .coin_profits(&[
                quote("NICEHASH", "KawPow", 0.002),
                quote("NICEHASH", "Ethash", 0.002),
            ])
            .unwrap();

        assert_eq!(profits.len(), 2);
        assert_eq!(profits[0].coin, "NICEHASH-KAWPOW");
        assert_eq!(profits[1].coin, "NICEHASH-ETHASH");
        assert!(profits.iter().all(|p| p.nicehash));
    }

    #[test]
    fn test_unpriceable_entries_are_skipped() {
        let profile = profile();
        let calc = ProfitCalculator::new(&profile, 50_000.0).unwrap();
        let profits = calc
            .coin_profits(&[
                quote("XMR", "RandomX", 0.01),
                quote("ALPH", "Blake3", 0.01),
                quote("RVN", "KawPow", 0.001),
                quote("RVN", "KawPow", 0.005),
            ])
            .unwrap();

        assert_eq!(profits.len(), 1);
        assert_eq!(profits[0].coin, "RVN");
        assert_eq!(profit_of(&profits, "RVN"), Some(compute_profit(0.001, 250.0, 0.1, 50_000.0)));
        assert_eq!(profit_of(&profits, "XMR"), None);
    }

    #[test]
    fn test_nothing_priceable_is_an_error() {
        let profile = profile();
        let calc = ProfitCalculator::new(&profile, 50_000.0).unwrap();
        assert!(matches!(
            calc.coin_profits(&[quote("ALPH", "Blake3", 0.01)]),
            Err(SwitcherError::MarketDataUnavailable(_))
        ));
        assert!(calc.coin_profits(&[]).is_err());
    }
}
