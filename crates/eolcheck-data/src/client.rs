//! endoflife.date HTTP client
//!
//! `GET {api_url}/{product}.json` returns the product's cycle list.

use std::time::Duration;

use async_trait::async_trait;
use eolcheck_core::{LifecycleCycle, LifecycleSource};
use reqwest::StatusCode;
use tracing::debug;

use crate::config::DataConfig;
use crate::error::DataError;
use crate::Result;

/// Client for the endoflife.date product API
pub struct EndOfLifeClient {
    api_url: String,
    http_client: reqwest::Client,
}

impl EndOfLifeClient {
    /// Create a client for the API in `config`
    pub fn new(config: &DataConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(format!("eol-check/{}", eolcheck_core::VERSION))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(EndOfLifeClient {
            api_url: config.api_url.clone(),
            http_client,
        })
    }

    /// Create client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(&DataConfig::from_env())
    }

    pub fn product_url(&self, product: &str) -> String {
        format!("{}/{}.json", self.api_url, product)
    }

    /// Fetch the raw JSON for `product`
    pub async fn fetch_raw(&self, product: &str) -> Result<serde_json::Value> {
        let url = self.product_url(product);
        debug!(url = %url, "fetching lifecycle data");

        let response = self.http_client.get(&url).send().await?;
        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(DataError::NotFound(product.to_string())),
            status => Err(DataError::Status {
                product: product.to_string(),
                status: status.as_u16(),
            }),
        }
    }

    /// Fetch and decode the cycle list for `product`
    pub async fn fetch_cycles(&self, product: &str) -> Result<Vec<LifecycleCycle>> {
        let raw = self.fetch_raw(product).await?;
        Ok(serde_json::from_value(raw)?)
    }
}

#[async_trait]
impl LifecycleSource for EndOfLifeClient {
    async fn fetch(&self, product: &str) -> eolcheck_core::Result<Vec<LifecycleCycle>> {
        self.fetch_cycles(product)
            .await
            .map_err(|e| e.into_eol_error(product))
    }
}
