//! Web error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("cross-origin request refused: {0}")]
    CrossOrigin(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::UnknownPreset(_) => StatusCode::NOT_FOUND,
            Self::CrossOrigin(_) => StatusCode::FORBIDDEN,
            Self::Bind { .. } | Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}
