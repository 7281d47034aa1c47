// src/network/whattomine.rs
//! Profitability API client
//!
//! The feed is a JSON object keyed by coin name. It is decoded into a
//! `Vec` in document order, because ranking ties are broken by the order
//! the feed listed the coins in.

use crate::profit::MarketQuote;
use crate::utils::error::SwitcherError;
use reqwest::Client;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

#[derive(Debug, Deserialize)]
struct FeedResponse {
    coins: OrderedCoins,
}

/// Coin entries in the order they appear in the document
#[derive(Debug)]
struct OrderedCoins(Vec<(String, FeedCoin)>);

impl<'de> Deserialize<'de> for OrderedCoins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedCoinsVisitor;

        impl<'de> Visitor<'de> for OrderedCoinsVisitor {
            type Value = OrderedCoins;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of coin entries")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut coins = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, FeedCoin>()? {
                    coins.push(entry);
                }
                Ok(OrderedCoins(coins))
            }
        }

        deserializer.deserialize_map(OrderedCoinsVisitor)
    }
}

#[derive(Debug, Deserialize)]
struct FeedCoin {
    tag: String,
    algorithm: String,
    #[serde(default)]
    btc_revenue: Option<Revenue>,
}

/// The feed reports revenue as a string; numbers are accepted too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Revenue {
    Number(f64),
    Text(String),
}

impl Revenue {
    fn value(&self) -> Option<f64> {
        let value = match self {
            Revenue::Number(n) => Some(*n),
            Revenue::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|n| n.is_finite())
    }
}

/// Decodes a profitability feed body into quotes, in feed order
///
/// Entries whose revenue is missing, `null` or not numeric are skipped.
///
/// # Errors
/// `MarketDataUnavailable` if the body does not match the feed schema or no
/// entry carries a usable revenue figure.
pub fn parse_quotes(body: &str) -> Result<Vec<MarketQuote>, SwitcherError> {
    let response: FeedResponse = serde_json::from_str(body).map_err(|e| {
        SwitcherError::MarketDataUnavailable(format!("Unexpected profitability feed: {}", e))
    })?;

    let total = response.coins.0.len();
    let quotes: Vec<MarketQuote> = response
        .coins
        .0
        .into_iter()
        .filter_map(|(name, coin)| {
            let Some(btc_revenue) = coin.btc_revenue.as_ref().and_then(Revenue::value) else {
                log::debug!(
                    "Skipping {}: btc_revenue is not a number ({:?})",
                    name,
                    coin.btc_revenue
                );
                return None;
            };

            Some(MarketQuote {
                tag: coin.tag.trim().to_uppercase(),
                algorithm: coin.algorithm.trim().to_uppercase(),
                btc_revenue,
            })
        })
        .collect();

    if quotes.is_empty() {
        return Err(SwitcherError::MarketDataUnavailable(format!(
            "Profitability feed has no usable coins ({} listed)",
            total
        )));
    }

    Ok(quotes)
}

/// Client for the profitability API
pub struct WhatToMineClient {
    client: Client,
}

impl WhatToMineClient {
    /// Creates a client using the shared HTTP client
    pub fn new(client: Client) -> Self {
        WhatToMineClient { client }
    }

    /// Fetches the quotes for a worker's profitability endpoint
    pub async fn quotes(&self, endpoint: &str) -> Result<Vec<MarketQuote>, SwitcherError> {
        let response = self
            .client
            .get(endpoint)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                SwitcherError::MarketDataUnavailable(format!("Profitability request failed: {}", e))
            })?;

        let body = response.text().await.map_err(|e| {
            SwitcherError::MarketDataUnavailable(format!("Profitability body unreadable: {}", e))
        })?;

        parse_quotes(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quotes_keep_document_order() {
        let body = r#"{
            "coins": {
                "Zcash": { "id": 166, "tag": "ZEC", "algorithm": "Equihash", "btc_revenue": "0.0001" },
                "Ravencoin": { "id": 234, "tag": "RVN", "algorithm": "KawPow", "btc_revenue": "0.00021" },
                "Nicehash-Kawpow": { "id": 999, "tag": "NICEHASH", "algorithm": "KawPow", "btc_revenue": 0.0003 },
                "EthereumClassic": { "id": 162, "tag": "ETC", "algorithm": "Etchash", "btc_revenue": "0.00015" }
            }
        }"#;

        let quotes = parse_quotes(body).unwrap();
        let tags: Vec<&str> = quotes.iter().map(|q| q.tag.as_str()).collect();
        assert_eq!(tags, ["ZEC", "RVN", "NICEHASH", "ETC"]);
        assert_eq!(quotes[1].algorithm, "KAWPOW");
        assert_eq!(quotes[1].btc_revenue, 0.00021);
        assert_eq!(quotes[2].btc_revenue, 0.0003);
    }

    #[test]
    fn test_entries_without_numeric_revenue_are_skipped() {
        let body = r#"{
            "coins": {
                "Ravencoin": { "tag": "RVN", "algorithm": "KawPow", "btc_revenue": "n/a" },
                "Zcash": { "tag": "ZEC", "algorithm": "Equihash", "btc_revenue": null },
                "Ergo": { "tag": "ERG", "algorithm": "Autolykos" },
                "EthereumClassic": { "tag": "ETC", "algorithm": "Etchash", "btc_revenue": "0.00015" }
            }
        }"#;
        let quotes = parse_quotes(body).unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].tag, "ETC");

        let body = r#"{ "coins": { "Ravencoin": { "tag": "RVN", "algorithm": "KawPow", "btc_revenue": "n/a" } } }"#;
        assert!(matches!(
            parse_quotes(body),
            Err(SwitcherError::MarketDataUnavailable(_))
        ));
    }

    #[test]
    fn test_empty_or_malformed_feed() {
        assert!(parse_quotes(r#"{ "coins": {} }"#).is_err());
        assert!(parse_quotes(r#"{ "coins": [] }"#).is_err());
        assert!(parse_quotes("<html>").is_err());
    }
}
