//! HTTP client for the order endpoints.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;

use crate::{
    error::ApiError,
    orders::models::{NewOrder, Order, OrderStatus},
};

#[derive(Debug, Clone)]
pub struct HttpOrdersClient {
    base_url: String,
    http: Client,
}

impl HttpOrdersClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }
}

#[async_trait]
impl OrdersApi for HttpOrdersClient {
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let url = format!("{}/orders", self.base_url);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response, "Failed to fetch orders").await);
        }

        Ok(response.json().await?)
    }

    async fn create_order(&self, draft: &NewOrder) -> Result<Order, ApiError> {
        if draft.for_email.is_empty() {
            return Err(ApiError::Validation("email is required".to_string()));
        }

        let url = format!("{}/orders", self.base_url);

        let response = self.http.post(&url).json(draft).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response, "Failed to create order").await);
        }

        Ok(response.json().await?)
    }

    async fn update_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let url = format!("{}/orders", self.base_url);

        let body = serde_json::json!({ "id": id, "status": status });

        let response = self.http.put(&url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response, "Failed to update order").await);
        }

        Ok(response.json().await?)
    }
}

/// Backend order operations. Status transition rules live server-side;
/// this client is a thin proxy.
#[automock]
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// Fetch all orders, in server-decided recency order.
    async fn list_orders(&self) -> Result<Vec<Order>, ApiError>;

    /// Submit an order draft. Rejects an empty email before any network
    /// traffic.
    async fn create_order(&self, draft: &NewOrder) -> Result<Order, ApiError>;

    /// Move an order to a new status.
    async fn update_order_status(&self, id: i64, status: OrderStatus) -> Result<Order, ApiError>;
}
