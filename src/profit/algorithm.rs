// src/profit/algorithm.rs
//! Algorithm to cost-parameter mapping
//!
//! The profitability API prices power per algorithm through `factor[<code>]`
//! query parameters. This table maps the API's algorithm labels onto those
//! codes.

/// Pseudo-ticker under which the profitability feed reports NiceHash entries
pub const NICEHASH_TAG: &str = "NICEHASH";

/// Label of the Ethash algorithm as reported by the feed
pub const ETHASH: &str = "ETHASH";

/// Ethash forks other than mainnet ETH (ETC, UBQ, ...) share this bucket
pub const ETHASH4: &str = "ETHASH4";

/// Name of the electricity price parameter in a cost profile
pub const COST_PARAMETER: &str = "cost";

/// Returns the algorithm label that selects the cost parameter for a coin
///
/// Labels are upper-cased. `ETHASH` reported for any coin other than `ETH`
/// or the NiceHash pseudo-coin becomes [`ETHASH4`].
pub fn effective_algorithm(algorithm: &str, coin: &str) -> String {
    let algorithm = algorithm.trim().to_uppercase();
    if algorithm == ETHASH && coin != "ETH" && coin != NICEHASH_TAG {
        return ETHASH4.to_string();
    }
    algorithm
}

/// Looks up the cost-parameter code for an upper-cased algorithm label
///
/// Returns `None` for algorithms the table does not know; callers must not
/// price such coins.
pub fn cost_key(algorithm: &str) -> Option<&'static str> {
    let key = match algorithm {
        "AUTOLYKOS" => "al_p",
        "BEAMHASHIII" => "eqb_p",
        "CORTEX" => "cx_p",
        "CRYPTONIGHTFASTV2" => "cnf_p",
        "CRYPTONIGHTGPU" => "cng_p",
        "CRYPTONIGHTHAVEN" => "cnh_p",
        "CUCKAROO29S" => "cr29_p",
        "CUCKATOO31" => "ct31_p",
        "CUCKATOO32" => "ct32_p",
        "CUCKOOCYCLE" => "cc_p",
        "EQUIHASH (210,9)" => "eqa_p",
        "EQUIHASHZERO" => "eqz_p",
        "ETCHASH" => "e4g_p",
        "ETHASH" => "eth_p",
        "ETHASH4" => "e4g_p",
        "FIROPOW" => "fpw_p",
        "KAWPOW" => "kpw_p",
        "NEOSCRYPT" => "ns_p",
        "OCTOPUS" => "ops_p",
        "PROGPOW" => "ppw_p",
        "PROGPOWZ" => "ppw_p",
        "RANDOMX" => "rmx_p",
        "UBQHASH" => "e4g_p",
        "VERTHASH" => "vh_p",
        "X25X" => "x25x_p",
        "ZELHASH" => "zlh_p",
        "ZHASH" => "zh_p",
        _ => return None,
    };
    Some(key)
}

/// Resolves a feed entry to its effective algorithm and cost-parameter code
pub fn resolve(algorithm: &str, coin: &str) -> (String, Option<&'static str>) {
    let algorithm = effective_algorithm(algorithm, coin);
    let key = cost_key(&algorithm);
    (algorithm, key)
}

/// Coin identifier used for ranking
///
/// NiceHash entries all share one ticker, so the algorithm is appended to
/// keep them apart (`NICEHASH-KAWPOW`).
pub fn coin_identifier(coin: &str, algorithm: &str) -> String {
    if coin == NICEHASH_TAG {
        format!("{}-{}", NICEHASH_TAG, algorithm)
    } else {
        coin.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ethash_variant_rule() {
        assert_eq!(resolve("Ethash", "ETC"), (ETHASH4.to_string(), Some("e4g_p")));
        assert_eq!(resolve("Ethash", "ETH"), (ETHASH.to_string(), Some("eth_p")));
        assert_eq!(
            resolve("Ethash", NICEHASH_TAG),
            (ETHASH.to_string(), Some("eth_p"))
        );
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        assert_eq!(resolve("KawPow", "RVN").1, Some("kpw_p"));
        assert_eq!(resolve("Equihash (210,9)", "PART").1, Some("eqa_p"));
    }

    #[test]
    fn test_unknown_algorithm_has_no_key() {
        assert_eq!(cost_key("SHA256"), None);
        assert_eq!(resolve("Blake3", "ALPH"), ("BLAKE3".to_string(), None));
    }

    #[test]
    fn test_nicehash_identifiers_are_distinct() {
        let kawpow = coin_identifier(NICEHASH_TAG, "KAWPOW");
        let ethash = coin_identifier(NICEHASH_TAG, "ETHASH");
        assert_eq!(kawpow, "NICEHASH-KAWPOW");
        assert_ne!(kawpow, ethash);
        assert_eq!(coin_identifier("RVN", "KAWPOW"), "RVN");
    }
}
