//! Gateway error types and their HTTP mappings.

use std::net::SocketAddr;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Body written for every 404 the gateway produces itself.
pub const NOT_FOUND_BODY: &str = "404 page not found\n";

/// Errors rendered straight to HTTP clients.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found. The detail is logged, never sent to the client.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(_) => (
                StatusCode::NOT_FOUND,
                [
                    (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
                ],
                NOT_FOUND_BODY,
            )
                .into_response(),
        }
    }
}

impl From<crate::assets::AssetError> for HttpError {
    fn from(err: crate::assets::AssetError) -> Self {
        Self::NotFound(err.to_string())
    }
}

/// Errors crossing the gateway's lifecycle boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The listener could not be bound.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The bound listener did not report its address.
    #[error("Failed to read bound address: {0}")]
    LocalAddr(#[source] std::io::Error),

    /// `listen_and_serve` was called on a gateway that is already serving.
    #[error("Gateway is already listening on {0}")]
    AlreadyListening(SocketAddr),

    /// `listen_and_serve` was called after `stop`.
    #[error("Gateway has been stopped and cannot be restarted")]
    Stopped,

    /// The server did not shut down cleanly.
    #[error("Failed to close server: {0}")]
    Close(String),
}
