//! HTTP client for the greenhouse node's REST API.
//!
//! All paths are relative to a single service origin; request and response
//! bodies are JSON. Errors distinguish "node unreachable" from "node
//! answered with an error status", and the latter extracts the server's
//! `error` field when present.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use plantdeck_types::{HistoryRecord, SensorReading};

use crate::error::{Error, Result};
use crate::history::RangeFilter;
use crate::transport::{CameraStartResponse, NodeApi};

/// Default per-request timeout.
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// HTTP client for one greenhouse node.
#[derive(Debug, Clone)]
pub struct NodeClient {
    client: Client,
    base_url: String,
}

/// Envelope for `GET /api/history`.
#[derive(Debug, serde::Deserialize)]
struct HistoryResponse {
    #[serde(default)]
    items: Vec<HistoryRecord>,
}

impl NodeClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Origin of the node, e.g. `http://greenhouse.local:5000`
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = normalize_url(base_url)?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(Error::Http)?;
        Ok(Self { client, base_url })
    }

    /// Create a client with a custom reqwest `Client`.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = normalize_url(base_url)?;
        Ok(Self { client, base_url })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|e| Error::NotReachable {
                    url: url.to_string(),
                    source: e,
                })?;
        handle_response(response).await
    }

    async fn post_json<T: serde::de::DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.to_string(),
                source: e,
            })?;
        handle_response(response).await
    }
}

/// Normalize a base URL: trim the trailing slash, require an http(s) scheme.
fn normalize_url(base_url: &str) -> Result<String> {
    let base_url = base_url.trim_end_matches('/').to_string();
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(Error::InvalidUrl(format!(
            "URL must start with http:// or https://, got: {}",
            base_url
        )));
    }
    Ok(base_url)
}

async fn handle_response<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        response.json().await.map_err(Error::Http)
    } else {
        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or_else(|| status.to_string());
        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl NodeApi for NodeClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn latest_reading(&self) -> Result<SensorReading> {
        let url = format!("{}/api/sensors", self.base_url);
        self.get(&url).await
    }

    async fn history(&self, filter: &RangeFilter) -> Result<Vec<HistoryRecord>> {
        let url = format!("{}/api/history{}", self.base_url, filter.query_string());
        let response: HistoryResponse = self.get(&url).await?;
        Ok(response.items)
    }

    async fn send_control(&self, payload: &Value) -> Result<Value> {
        let url = format!("{}/api/control", self.base_url);
        self.post_json(&url, payload).await
    }

    async fn load_settings(&self) -> Result<Value> {
        let url = format!("{}/api/settings", self.base_url);
        self.get(&url).await
    }

    async fn save_settings(&self, patch: &Value) -> Result<Value> {
        let url = format!("{}/api/settings", self.base_url);
        self.post_json(&url, patch).await
    }

    async fn camera_start(&self) -> Result<CameraStartResponse> {
        let url = format!("{}/camera/start", self.base_url);
        self.get(&url).await
    }

    async fn camera_stop(&self) -> Result<()> {
        let url = format!("{}/camera/stop", self.base_url);
        // Ack body is opaque; only the status matters.
        let _: Value = self.get(&url).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = NodeClient::new("http://greenhouse.local:5000");
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "http://greenhouse.local:5000");
    }

    #[test]
    fn test_client_normalizes_url() {
        let client = NodeClient::new("http://greenhouse.local:5000/").unwrap();
        assert_eq!(client.base_url(), "http://greenhouse.local:5000");
    }

    #[test]
    fn test_client_invalid_url() {
        let result = NodeClient::new("greenhouse.local:5000");
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
