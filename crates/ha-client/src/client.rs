//! HTTP client for the state snapshot endpoint

use async_trait::async_trait;
use ha_core::State;
use reqwest::{header, Client};
use std::time::Duration;
use tracing::debug;

use crate::error::ClientError;

/// Path of the "all current states" endpoint
const STATES_PATH: &str = "/api/states";

/// Anything that can produce a full entity state snapshot
#[async_trait]
pub trait StateSource: Send + Sync {
    /// Fetch every entity state, in the order the source delivers them
    async fn fetch_states(&self) -> Result<Vec<State>, ClientError>;

    /// Short description of where the states come from (for logging)
    fn describe(&self) -> String;
}

/// API client for a Home Assistant instance
#[derive(Clone)]
pub struct HaClient {
    client: Client,
    base_url: String,
    token: String,
}

impl HaClient {
    /// Create a client for `base_url` authenticating with `token`
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Full URL of the states endpoint
    pub fn states_url(&self) -> String {
        format!("{}{}", self.base_url, STATES_PATH)
    }

    /// GET `/api/states` and decode the snapshot
    ///
    /// One request, no retry. Any non-2xx status is an error; the body of a
    /// successful response must be a JSON array of states.
    pub async fn get_states(&self) -> Result<Vec<State>, ClientError> {
        let url = self.states_url();
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status { url, status });
        }

        let raw_body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport {
                url: url.clone(),
                source,
            })?;
        debug!("Received {} bytes from {}", raw_body.len(), url);

        serde_json::from_str(&raw_body).map_err(|source| ClientError::Decode { url, source })
    }
}

#[async_trait]
impl StateSource for HaClient {
    async fn fetch_states(&self) -> Result<Vec<State>, ClientError> {
        self.get_states().await
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
