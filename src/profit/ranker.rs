// src/profit/ranker.rs
//! Candidate ranking under a switch policy

use crate::config::CoinBinding;
use crate::profit::calculator::CoinProfit;
use crate::types::SwitchPolicy;
use crate::utils::error::SwitcherError;

/// Candidates sorted by profit, best first
///
/// Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    coins: Vec<CoinProfit>,
}

impl Ranking {
    /// The top-ranked candidate
    pub fn best(&self) -> &CoinProfit {
        &self.coins[0]
    }

    /// All eligible candidates, best first
    pub fn coins(&self) -> &[CoinProfit] {
        &self.coins
    }
}

/// Sorts candidates by profit and applies the policy filter
///
/// The sort is stable: coins with equal profit keep the order in which the
/// feed listed them.
///
/// # Errors
/// `NoEligibleCoin` if the policy leaves no candidate.
pub fn rank(
    mut profits: Vec<CoinProfit>,
    policy: SwitchPolicy,
    bindings: &[CoinBinding],
) -> Result<Ranking, SwitcherError> {
    profits.sort_by(|a, b| b.profit.total_cmp(&a.profit));

    match policy {
        SwitchPolicy::Unrestricted => {}
        SwitchPolicy::NiceHashOnly => profits.retain(|p| p.nicehash),
        SwitchPolicy::ConfiguredFlightSheetsOnly => {
            profits.retain(|p| bindings.iter().any(|b| b.tag == p.coin))
        }
    }

    if profits.is_empty() {
        let reason = match policy {
            SwitchPolicy::Unrestricted => "no profits computed",
            SwitchPolicy::NiceHashOnly => "no NiceHash profits in the feed",
            SwitchPolicy::ConfiguredFlightSheetsOnly => {
                "no profits for any configured flight sheet"
            }
        };
        return Err(SwitcherError::NoEligibleCoin(format!(
            "{} (policy {})",
            reason, policy
        )));
    }

    log::debug!(
        "Ranked {} candidates under {}: {}",
        profits.len(),
        policy,
        profits
            .iter()
            .map(|p| format!("{}={:.2}", p.coin, p.profit))
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(Ranking { coins: profits })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profit(coin: &str, profit: f64) -> CoinProfit {
        CoinProfit {
            coin: coin.into(),
            algorithm: "KAWPOW".into(),
            profit,
            nicehash: coin.starts_with("NICEHASH-"),
        }
    }

    fn binding(tag: &str) -> CoinBinding {
        CoinBinding {
            tag: tag.into(),
            fs: format!("{}-fs", tag),
        }
    }

    fn names(ranking: &Ranking) -> Vec<&str> {
        ranking.coins().iter().map(|p| p.coin.as_str()).collect()
    }

    #[test]
    fn test_ties_keep_feed_order() {
        let ranking = rank(
            vec![profit("A", 5.0), profit("B", 5.0), profit("C", 3.0)],
            SwitchPolicy::Unrestricted,
            &[],
        )
        .unwrap();
        assert_eq!(names(&ranking), ["A", "B", "C"]);
        assert_eq!(ranking.best().coin, "A");
    }

    #[test]
    fn test_sorted_descending() {
        let ranking = rank(
            vec![profit("C", 3.0), profit("A", -1.0), profit("B", 9.5)],
            SwitchPolicy::Unrestricted,
            &[],
        )
        .unwrap();
        assert_eq!(names(&ranking), ["B", "C", "A"]);
    }

    #[test]
    fn test_nicehash_only() {
        let ranking = rank(
            vec![
                profit("ETC", 9.0),
                profit("NICEHASH-ETHASH", 4.0),
                profit("NICEHASH-KAWPOW", 6.0),
            ],
            SwitchPolicy::NiceHashOnly,
            &[],
        )
        .unwrap();
        assert_eq!(names(&ranking), ["NICEHASH-KAWPOW", "NICEHASH-ETHASH"]);
    }

    #[test]
    fn test_nicehash_only_without_nicehash_entries() {
        let result = rank(
            vec![profit("ETC", 9.0), profit("RVN", 4.0)],
            SwitchPolicy::NiceHashOnly,
            &[],
        );
        assert!(matches!(result, Err(SwitcherError::NoEligibleCoin(_))));
    }

    #[test]
    fn test_configured_flight_sheets_only() {
        let bindings = [binding("RVN"), binding("ERG")];
        let ranking = rank(
            vec![profit("ETC", 9.0), profit("RVN", 4.0), profit("ERG", 5.0)],
            SwitchPolicy::ConfiguredFlightSheetsOnly,
            &bindings,
        )
        .unwrap();
        assert_eq!(names(&ranking), ["ERG", "RVN"]);

        let result = rank(
            vec![profit("ETC", 9.0)],
            SwitchPolicy::ConfiguredFlightSheetsOnly,
            &bindings,
        );
        assert!(matches!(result, Err(SwitcherError::NoEligibleCoin(_))));
    }
}
