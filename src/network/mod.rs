// src/network/mod.rs
//! Network communication components
//!
//! Thin clients for the three consumed APIs plus the release feed. Each
//! response shape is decoded into typed records; decoding helpers are
//! public so they can be exercised without a network.
//! - `HiveClient`: farm workers, flight sheets and flight-sheet assignment
//! - `WhatToMineClient`: per-worker profitability feed
//! - `PriceClient`: BTC/USD spot price
//! - `ReleaseClient`: newest release tag

/// Farm API client
pub mod hive;

/// Profitability feed client
pub mod whattomine;

/// Spot-price client
pub mod price;

/// Release feed client
pub mod release;

// Re-export main components for cleaner imports
pub use hive::HiveClient;
pub use price::PriceClient;
pub use release::ReleaseClient;
pub use whattomine::WhatToMineClient;

use crate::config::ApiEndpoints;
use crate::profit::MarketQuote;
use crate::switcher::MarketData;
use crate::utils::error::SwitcherError;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client shared by all API clients
///
/// Requests carry no per-client mutable state, so one client can serve
/// concurrent worker evaluations.
pub fn http_client(endpoints: &ApiEndpoints) -> Result<Client, SwitcherError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(endpoints.timeout_secs))
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()?;
    Ok(client)
}

/// Market data source backed by the profitability feed and the spot-price API
pub struct MarketClient {
    whattomine: WhatToMineClient,
    price: PriceClient,
}

impl MarketClient {
    /// Creates the market clients from the configured endpoints
    pub fn new(client: Client, endpoints: &ApiEndpoints) -> Self {
        MarketClient {
            whattomine: WhatToMineClient::new(client.clone()),
            price: PriceClient::new(client, endpoints.btc_price.clone()),
        }
    }
}

impl MarketData for MarketClient {
    async fn btc_usd_rate(&self) -> Result<f64, SwitcherError> {
        self.price.btc_usd().await
    }

    async fn quotes(&self, endpoint: &str) -> Result<Vec<MarketQuote>, SwitcherError> {
        self.whattomine.quotes(endpoint).await
    }
}
