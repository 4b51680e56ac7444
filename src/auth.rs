//! Session collaborator: login, logout, and session lookup.
//!
//! Credentials are cookie-based. The backend sets them on login and
//! expects them back on every request, so all clients must share one
//! cookie-carrying HTTP client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ApiError;

/// Profile returned by login and refresh, tokens included.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    pub token: String,
    pub refresh_token: String,
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

/// User attached to the current session.
///
/// The session endpoint marshals its fields in PascalCase, unlike the
/// login response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "Role")]
    pub role: Option<String>,
}

/// HTTP client for the session endpoints.
#[derive(Debug, Clone)]
pub struct HttpSessionClient {
    base_url: String,
    http: Client,
}

impl HttpSessionClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }
}

#[async_trait]
impl SessionApi for HttpSessionClient {
    async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError> {
        let url = format!("{}/login", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({"email": email, "password": password}))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response, "Failed to login").await);
        }

        Ok(response.json().await?)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        let url = format!("{}/revoke", self.base_url);

        let response = self.http.post(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response, "Failed to logout").await);
        }

        Ok(())
    }

    async fn refresh(&self) -> Result<UserProfile, ApiError> {
        let url = format!("{}/refresh", self.base_url);

        let response = self.http.post(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response, "Failed to refresh token").await);
        }

        Ok(response.json().await?)
    }

    async fn session(&self) -> Result<SessionUser, ApiError> {
        let url = format!("{}/session", self.base_url);

        let response = self.http.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response, "Failed to get session").await);
        }

        Ok(response.json().await?)
    }
}

#[automock]
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// Exchange credentials for a session. The backend also sets the
    /// session cookie on the shared client.
    async fn login(&self, email: &str, password: &str) -> Result<UserProfile, ApiError>;

    /// Revoke the current session.
    async fn logout(&self) -> Result<(), ApiError>;

    /// Rotate the session tokens.
    async fn refresh(&self) -> Result<UserProfile, ApiError>;

    /// Fetch the user behind the current session.
    async fn session(&self) -> Result<SessionUser, ApiError>;
}
