// src/network/hive.rs
use crate::config::Config;
use crate::switcher::FarmApi;
use crate::types::{FlightSheet, WorkerProfile};
use crate::utils::error::SwitcherError;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

/// List responses of the farm API wrap their items in `data`
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: Vec<T>,
}

/// Client for the farm-management API
///
/// All requests are scoped to the configured farm and authenticated with
/// the configured bearer token.
pub struct HiveClient {
    /// Shared HTTP client
    client: Client,
    /// API base URL, without trailing slash
    base_url: String,
    /// Farm identifier
    farm_id: String,
    /// Bearer token
    api_key: String,
}

impl HiveClient {
    /// Creates a new HiveClient for the farm in `config`
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client
    /// * `config` - Configuration holding the base URL, farm id and token
    pub fn new(client: Client, config: &Config) -> Self {
        HiveClient {
            client,
            base_url: config.endpoints.hive_api.trim_end_matches('/').to_string(),
            farm_id: config.farm_id.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Full URL of a farm-scoped path such as `/workers`
    pub fn farm_url(&self, path: &str) -> String {
        format!("{}/farms/{}{}", self.base_url, self.farm_id, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.farm_url(path))
            .bearer_auth(&self.api_key)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, SwitcherError> {
        let body = self
            .request(Method::GET, path)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_list(&body)
    }
}

/// Decodes a `{ "data": [...] }` list response
pub fn parse_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, SwitcherError> {
    let envelope: DataEnvelope<T> = serde_json::from_str(body)?;
    Ok(envelope.data)
}

impl FarmApi for HiveClient {
    async fn list_workers(&self) -> Result<Vec<WorkerProfile>, SwitcherError> {
        self.get_list("/workers").await
    }

    async fn list_flight_sheets(&self) -> Result<Vec<FlightSheet>, SwitcherError> {
        self.get_list("/fs").await
    }

    async fn set_flight_sheet(&self, worker_id: u64, flight_sheet_id: u64) -> Result<(), SwitcherError> {
        let response = self
            .request(Method::PATCH, &format!("/workers/{}", worker_id))
            .json(&json!({ "fs_id": flight_sheet_id }))
            .send()
            .await
            .map_err(|e| {
                SwitcherError::RemoteUpdateFailed(format!("Worker {}: {}", worker_id, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SwitcherError::RemoteUpdateFailed(format!(
                "Worker {}: HTTP {} {}",
                worker_id,
                status,
                body.trim()
            )));
        }

        Ok(())
    }
}
