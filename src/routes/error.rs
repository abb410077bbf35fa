// Gateway error envelope: stable status + message, never the raw upstream error

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::error::UpstreamError;

pub const MISSING_PUBLIC_KEY: &str = "Missing public key";
pub const INVALID_PUBLIC_KEY: &str = "Invalid public key";
pub const UPSTREAM_UNAVAILABLE: &str = "Upstream RPC unavailable";
pub const UPSTREAM_MALFORMED: &str = "Upstream RPC returned a malformed response";
pub const UPSTREAM_REJECTED: &str = "Upstream RPC rejected the request";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing publicKey query parameter")]
    MissingPublicKey,
    #[error("invalid publicKey: {0}")]
    InvalidPublicKey(#[from] crate::models::PublicKeyError),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingPublicKey | ApiError::InvalidPublicKey(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            ApiError::MissingPublicKey => MISSING_PUBLIC_KEY,
            ApiError::InvalidPublicKey(_) => INVALID_PUBLIC_KEY,
            ApiError::Upstream(UpstreamError::Unavailable(_)) => UPSTREAM_UNAVAILABLE,
            ApiError::Upstream(UpstreamError::Malformed(_)) => UPSTREAM_MALFORMED,
            ApiError::Upstream(UpstreamError::Rejected { .. }) => UPSTREAM_REJECTED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Upstream(e) = &self {
            tracing::warn!(error = %e, kind = e.kind(), "gateway upstream call failed");
        }
        let body = axum::Json(serde_json::json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}
