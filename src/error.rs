//! Errors shared by the backend clients.

use reqwest::Response;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the café backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input was rejected locally; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,

        /// Human-readable message, taken from the response body when the
        /// backend provided one.
        message: String,
    },

    /// The response body was not the shape the client expected.
    #[error("malformed response body: {0}")]
    Parse(#[source] reqwest::Error),
}

impl ApiError {
    /// Builds the error for a non-success response.
    ///
    /// The backend reports failures as `{"message": "..."}`. When the body
    /// is missing, empty, or not that shape, `fallback` is used instead.
    pub async fn from_response(response: Response, fallback: &str) -> Self {
        let status = response.status().as_u16();

        let message = match response.json::<ErrorBody>().await {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => fallback.to_owned(),
        };

        Self::Api { status, message }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err)
        } else {
            Self::Network(err)
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}
