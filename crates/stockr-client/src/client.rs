//! HTTP client for the inventory backend.
//!
//! Wraps `reqwest` with typed responses for the three endpoints the dashboard
//! consumes: `GET /products`, `GET /analytics/kpis` and `POST /products`.
//! Every non-2xx status surfaces as [`ClientError::UnexpectedStatus`]; nothing
//! is retried.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use stockr_core::{AppConfig, KpiSnapshot, NewProduct, Product};

use crate::error::ClientError;

const PRODUCTS_PATH: &str = "products";
const KPIS_PATH: &str = "analytics/kpis";

/// Client for the inventory backend REST API.
pub struct InventoryClient {
    client: Client,
    base_url: Url,
}

impl InventoryClient {
    /// Creates a client against `base_url` with the given request timeout
    /// and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so `Url::join` appends below any path
        // prefix instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Creates a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// See [`InventoryClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.backend_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches every product, in the order the backend returns them.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or timeout.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ClientError::Deserialize`] if the body is not a product array.
    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        self.get_json(PRODUCTS_PATH).await
    }

    /// Fetches the current KPI snapshot.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or timeout.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ClientError::Deserialize`] if the body is not a KPI snapshot.
    pub async fn get_kpis(&self) -> Result<KpiSnapshot, ClientError> {
        self.get_json(KPIS_PATH).await
    }

    /// Submits a new product. The response body is not inspected; any 2xx
    /// status counts as success.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or timeout.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx response.
    pub async fn create_product(&self, product: &NewProduct) -> Result<(), ClientError> {
        let url = self.endpoint(PRODUCTS_PATH)?;
        tracing::debug!(%url, name = %product.name, "POST product");

        let response = self.client.post(url.clone()).json(product).send().await?;
        Self::check_status(&response, &url)?;

        tracing::info!(name = %product.name, category = %product.category, "product created");
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");

        let response = self.client.get(url.clone()).send().await?;
        Self::check_status(&response, &url)?;

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    fn check_status(response: &reqwest::Response, url: &Url) -> Result<(), ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}
