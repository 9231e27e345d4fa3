//! Proxy error type and its HTTP mapping.
//!
//! | Variant | Status | Body |
//! |---------|--------|------|
//! | Validation | 400 | `{"error": msg}` |
//! | Upstream | upstream status | upstream body, unchanged |
//! | Transport / Malformed | 500 | `{"error": static message}` |

use axum::{
    body::Bytes,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::models::ErrorBody;
use crate::upstream::Endpoint;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Classification service answered with a non-success status
    #[error("{endpoint} answered {status}")]
    Upstream {
        endpoint: Endpoint,
        status: StatusCode,
        content_type: Option<HeaderValue>,
        body: Bytes,
    },

    #[error("{endpoint} unreachable: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned an unreadable body: {source}")]
    Malformed {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Validation(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::Transport { .. } | ProxyError::Malformed { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match self {
            ProxyError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody { error: msg })).into_response()
            }
            ProxyError::Upstream {
                endpoint,
                status,
                content_type,
                body,
            } => {
                warn!(%endpoint, %status, "Classification service rejected request");
                let mut response = (status, body).into_response();
                match content_type {
                    Some(value) => {
                        response.headers_mut().insert(header::CONTENT_TYPE, value);
                    }
                    None => {
                        response.headers_mut().remove(header::CONTENT_TYPE);
                    }
                }
                response
            }
            ProxyError::Transport { endpoint, source } => {
                error!(%endpoint, error = %source, "Error calling classification service");
                generic_failure(endpoint)
            }
            ProxyError::Malformed { endpoint, source } => {
                error!(%endpoint, error = %source, "Classification service sent malformed JSON");
                generic_failure(endpoint)
            }
        }
    }
}

fn generic_failure(endpoint: Endpoint) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: endpoint.failure_message().to_string(),
        }),
    )
        .into_response()
}
