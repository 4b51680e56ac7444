//! App Context

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::{
    auth::{HttpSessionClient, SessionApi},
    cart::CartStore,
    config::BackendConfig,
    menu::{HttpMenuClient, MenuApi},
    orders::{HttpOrdersClient, OrdersApi},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),
}

/// Services the application is wired from. Built once at startup and
/// dropped at exit.
#[derive(Clone)]
pub struct AppContext {
    pub menu: Arc<dyn MenuApi>,
    pub orders: Arc<dyn OrdersApi>,
    pub session: Arc<dyn SessionApi>,
    pub cart: Arc<Mutex<CartStore>>,
}

impl AppContext {
    /// Build application context from the backend configuration.
    ///
    /// All services share one HTTP client so the session cookie set on
    /// login rides along on every request.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn from_config(config: &BackendConfig) -> Result<Self, AppInitError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(AppInitError::HttpClient)?;

        Ok(Self {
            menu: Arc::new(HttpMenuClient::new(&config.api_base_url, http.clone())),
            orders: Arc::new(HttpOrdersClient::new(&config.api_base_url, http.clone())),
            session: Arc::new(HttpSessionClient::new(&config.api_base_url, http)),
            cart: Arc::new(Mutex::new(CartStore::new())),
        })
    }
}
