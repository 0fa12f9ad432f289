//! Blocking PokeAPI client.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::debug;

use dex_core::{Creature, CreatureSource, DexConfig, SourceError};

use crate::error::ApiError;

/// Fetches creatures from `GET {base_url}/pokemon/{id}`.
pub struct PokeApiClient {
    http: Client,
    base_url: String,
}

impl PokeApiClient {
    /// Build a client for `base_url`.
    ///
    /// With `timeout` unset, requests wait as long as the server takes.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(concat!("dex/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Wrap an already configured HTTP client.
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Build a client from the session configuration.
    pub fn from_config(config: &DexConfig) -> Result<Self, ApiError> {
        Self::new(config.api_base_url.clone(), config.request_timeout)
    }

    /// Base URL requests are made against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the record for `id`.
    pub fn endpoint(&self, id: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, id.trim())
    }
}

impl CreatureSource for PokeApiClient {
    fn fetch(&self, id: &str) -> Result<Creature, SourceError> {
        let url = self.endpoint(id);
        debug!(%url, "requesting creature");

        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(SourceError::Transport(format!("{url} returned {status}")));
        }

        let body = response
            .text()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| SourceError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_id() {
        let client = PokeApiClient::new("https://pokeapi.co/api/v2/", None).unwrap();
        assert_eq!(client.base_url(), "https://pokeapi.co/api/v2");
        assert_eq!(client.endpoint("25"), "https://pokeapi.co/api/v2/pokemon/25");
    }

    #[test]
    fn from_config_uses_base_url() {
        let cfg = DexConfig::default()
            .with_api_base_url("http://127.0.0.1:9/api")
            .unwrap();
        let client = PokeApiClient::from_config(&cfg).unwrap();
        assert_eq!(client.endpoint("1"), "http://127.0.0.1:9/api/pokemon/1");
    }
}
