//! Menu catalog models and client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Catalog item as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: Decimal,
    pub category: String,
    pub image: String,
}

/// New catalog item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMenuItem {
    pub name: String,
    pub description: String,
    // The write endpoints take cost as a JSON number, unlike the string
    // the read model carries.
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
}

/// Catalog item update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateMenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub cost: Decimal,
}

/// HTTP client for the menu endpoints.
#[derive(Debug, Clone)]
pub struct HttpMenuClient {
    base_url: String,
    http: Client,
}

impl HttpMenuClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }
}

#[async_trait]
impl MenuApi for HttpMenuClient {
    async fn list_items(&self) -> Result<Vec<MenuItem>, ApiError> {
        let url = format!("{}/items", self.base_url);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response, "Failed to fetch items").await);
        }

        Ok(response.json().await?)
    }

    async fn create_item(&self, item: NewMenuItem) -> Result<MenuItem, ApiError> {
        let url = format!("{}/items", self.base_url);

        let response = self.http.post(&url).json(&item).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response, "Failed to create item").await);
        }

        Ok(response.json().await?)
    }

    async fn update_item(&self, item: UpdateMenuItem) -> Result<MenuItem, ApiError> {
        let url = format!("{}/items", self.base_url);

        let response = self.http.put(&url).json(&item).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response, "Failed to update item").await);
        }

        Ok(response.json().await?)
    }

    async fn delete_item(&self, id: &str) -> Result<(), ApiError> {
        let url = format!("{}/items/{id}", self.base_url);

        let response = self.http.delete(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response, "Failed to delete item").await);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait MenuApi: Send + Sync {
    /// Fetch the full catalog.
    async fn list_items(&self) -> Result<Vec<MenuItem>, ApiError>;

    /// Create a catalog item.
    async fn create_item(&self, item: NewMenuItem) -> Result<MenuItem, ApiError>;

    /// Update an existing catalog item.
    async fn update_item(&self, item: UpdateMenuItem) -> Result<MenuItem, ApiError>;

    /// Delete a catalog item.
    async fn delete_item(&self, id: &str) -> Result<(), ApiError>;
}
