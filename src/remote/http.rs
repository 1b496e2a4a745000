//! HTTP implementation of the remote store
//!
//! JSON-over-HTTP client for the remote order-management API, built on
//! reqwest with a configured base URL and per-request timeout.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::models::{CreateOrderRequest, Order, Product, UpdateOrderRequest};
use crate::remote::RemoteStore;

// == HTTP Remote Store ==
/// Remote store backed by a real HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    client: Client,
    base_url: String,
}

impl HttpRemoteStore {
    // == Constructor ==
    /// Creates a client for the configured base URL and request timeout.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Joins the base URL with a path, tolerating slashes on either side.
    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Maps a response to the expected JSON body, turning any non-2xx status
    /// into a `Remote` error whose message comes from the response body.
    async fn handle<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response.text().await?));
        }
        response.json().await.map_err(Into::into)
    }

    /// Status check for responses whose body is ignored (DELETE).
    async fn handle_empty(response: reqwest::Response) -> Result<()> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::status_error(status, response.text().await?));
        }
        Ok(())
    }

    fn status_error(status: reqwest::StatusCode, body: String) -> SyncError {
        let message = if body.is_empty() {
            status.to_string()
        } else {
            body
        };
        SyncError::Remote {
            status: Some(status.as_u16()),
            message,
        }
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        debug!("GET /orders");
        let response = self.client.get(self.url("/orders")).send().await?;
        Self::handle(response).await
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        debug!("GET /product");
        let response = self.client.get(self.url("/product")).send().await?;
        Self::handle(response).await
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order> {
        debug!("POST /orders");
        let response = self
            .client
            .post(self.url("/orders"))
            .json(request)
            .send()
            .await?;
        Self::handle(response).await
    }

    async fn update_order(&self, request: &UpdateOrderRequest) -> Result<Order> {
        let id = request.order_data.id;
        debug!(order_id = id, "PUT /orders/{id}");
        let response = self
            .client
            .put(self.url(&format!("/orders/{id}")))
            .json(request)
            .send()
            .await?;
        Self::handle(response).await
    }

    async fn delete_order(&self, id: i64) -> Result<()> {
        debug!(order_id = id, "DELETE /orders/{id}");
        let response = self
            .client
            .delete(self.url(&format!("/orders/{id}")))
            .send()
            .await?;
        Self::handle_empty(response).await
    }
}
