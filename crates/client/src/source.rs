use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use storefront_core::config::CatalogConfig;
use storefront_core::{LoadError, Product};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not build http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

/// Where a visit's product list comes from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Product>, LoadError>;

    fn describe(&self) -> String;
}

#[derive(Clone, Debug)]
pub struct HttpCatalogSource {
    client: Client,
    endpoint: String,
}

impl HttpCatalogSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build().map_err(SourceError::ClientBuild)?;
        Ok(Self { client, endpoint: endpoint.into() })
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, SourceError> {
        Self::new(config.endpoint.clone(), Duration::from_secs(config.timeout_secs))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Vec<Product>, LoadError> {
        debug!(event_name = "catalog.fetch.request", endpoint = %self.endpoint, "requesting catalog");

        let response = self.client.get(&self.endpoint).send().await.map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status { status: status.as_u16() });
        }

        let body = response.bytes().await.map_err(network_error)?;
        let products: Vec<Product> = serde_json::from_slice(&body)
            .map_err(|error| LoadError::Format(error.to_string()))?;

        info!(
            event_name = "catalog.fetch.completed",
            endpoint = %self.endpoint,
            product_count = products.len(),
            "catalog response decoded"
        );
        Ok(products)
    }

    fn describe(&self) -> String {
        format!("GET {}", self.endpoint)
    }
}

fn network_error(error: reqwest::Error) -> LoadError {
    if error.is_timeout() {
        LoadError::Network(format!("request timed out: {error}"))
    } else {
        LoadError::Network(error.to_string())
    }
}

/// A source that answers every fetch with the same prepared result.
#[derive(Clone, Debug)]
pub struct StaticCatalogSource {
    result: Result<Vec<Product>, LoadError>,
}

impl StaticCatalogSource {
    pub fn products(products: Vec<Product>) -> Self {
        Self { result: Ok(products) }
    }

    pub fn failing(error: LoadError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self) -> Result<Vec<Product>, LoadError> {
        self.result.clone()
    }

    fn describe(&self) -> String {
        match &self.result {
            Ok(products) => format!("static catalog ({} products)", products.len()),
            Err(error) => format!("static failure ({})", error.class()),
        }
    }
}
