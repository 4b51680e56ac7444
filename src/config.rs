//! Backend endpoint configuration.

use clap::Args;

/// Where the café backend lives.
#[derive(Debug, Clone, Args)]
pub struct BackendConfig {
    /// Base URL for the REST API
    #[arg(
        long,
        env = "CAFE_API_BASE_URL",
        default_value = "http://localhost:8080/api"
    )]
    pub api_base_url: String,

    /// URL for the order push feed
    #[arg(long, env = "CAFE_WS_URL", default_value = "ws://localhost:8080/ws")]
    pub ws_url: String,
}
