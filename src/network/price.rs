// src/network/price.rs
use crate::utils::error::SwitcherError;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct PriceResponse {
    bpi: PriceIndex,
}

#[derive(Debug, Deserialize)]
struct PriceIndex {
    #[serde(rename = "USD")]
    usd: CurrencyRate,
}

#[derive(Debug, Deserialize)]
struct CurrencyRate {
    rate_float: f64,
}

/// Decodes the BTC/USD rate from a spot-price response
///
/// # Errors
/// `MarketDataUnavailable` on a shape mismatch or a non-positive rate.
pub fn parse_btc_usd(body: &str) -> Result<f64, SwitcherError> {
    let response: PriceResponse = serde_json::from_str(body).map_err(|e| {
        SwitcherError::MarketDataUnavailable(format!("Unexpected spot-price response: {}", e))
    })?;

    let rate = response.bpi.usd.rate_float;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(SwitcherError::MarketDataUnavailable(format!(
            "Invalid BTC/USD rate: {}",
            rate
        )));
    }

    Ok(rate)
}

/// Client for the BTC/USD spot-price API
pub struct PriceClient {
    client: Client,
    url: String,
}

impl PriceClient {
    /// Creates a client for the given price URL
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        PriceClient {
            client,
            url: url.into(),
        }
    }

    /// Fetches the current BTC/USD rate
    pub async fn btc_usd(&self) -> Result<f64, SwitcherError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                SwitcherError::MarketDataUnavailable(format!("Spot-price request failed: {}", e))
            })?
            .text()
            .await
            .map_err(|e| {
                SwitcherError::MarketDataUnavailable(format!("Spot-price body unreadable: {}", e))
            })?;

        parse_btc_usd(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate() {
        let body = r#"{
            "time": { "updated": "Oct 19, 2026 10:00:00 UTC" },
            "bpi": {
                "USD": { "code": "USD", "rate": "61,250.5000", "rate_float": 61250.5 },
                "EUR": { "code": "EUR", "rate": "56,000.0000", "rate_float": 56000.0 }
            }
        }"#;
        assert_eq!(parse_btc_usd(body).unwrap(), 61250.5);
    }

    #[test]
    fn test_missing_or_zero_rate() {
        assert!(matches!(
            parse_btc_usd(r#"{ "bpi": { "EUR": { "rate_float": 1.0 } } }"#),
            Err(SwitcherError::MarketDataUnavailable(_))
        ));
        assert!(parse_btc_usd(r#"{ "bpi": { "USD": { "rate_float": 0.0 } } }"#).is_err());
    }
}
