use crate::core::{ConfigProvider, LookupResponse, MovieCatalog, SearchResponse};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// reqwest-backed client for the OMDb API.
#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.api_base_url(), config.api_key())
    }

    async fn get<T: DeserializeOwned>(&self, param: &str, value: &str) -> Result<T> {
        tracing::debug!("OMDb request {}={}", param, value);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), (param, value)])
            .send()
            .await?;

        // OMDb signals failure through the body, even on 4xx.
        tracing::debug!("OMDb response status: {}", response.status());
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MovieCatalog for OmdbClient {
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        self.get("s", query).await
    }

    async fn lookup(&self, id: &str) -> Result<LookupResponse> {
        self.get("i", id).await
    }
}
