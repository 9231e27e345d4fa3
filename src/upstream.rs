//! Client for the classification service.
//!
//! Every call is a single forward: no retries, no caching. Successful bodies must
//! be JSON and are relayed byte for byte; a body that does not match the
//! contract type is only logged.

use std::fmt;

use axum::{
    body::Bytes,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::error::ProxyError;

/// Classification service endpoints the proxy forwards to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Predict,
    Resolve(i64),
    AreaHealth,
    AdminStats,
    AdminIssues,
    HighPriorityIssues,
    CriticalAreas,
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Predict | Endpoint::Resolve(_) => Method::POST,
            Endpoint::AreaHealth
            | Endpoint::AdminStats
            | Endpoint::AdminIssues
            | Endpoint::HighPriorityIssues
            | Endpoint::CriticalAreas => Method::GET,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::Predict => "/predict".to_string(),
            Endpoint::Resolve(id) => format!("/resolve/{}", id),
            Endpoint::AreaHealth => "/area-health".to_string(),
            Endpoint::AdminStats => "/admin/stats".to_string(),
            Endpoint::AdminIssues => "/admin/issues".to_string(),
            Endpoint::HighPriorityIssues => "/admin/issues/high".to_string(),
            Endpoint::CriticalAreas => "/admin/areas/critical".to_string(),
        }
    }

    /// Static message sent to clients when the call fails below HTTP
    pub fn failure_message(&self) -> &'static str {
        match self {
            Endpoint::Predict => "Failed to process request",
            Endpoint::Resolve(_) => "Failed to resolve issue",
            Endpoint::AreaHealth => "Failed to fetch area health data",
            Endpoint::AdminStats
            | Endpoint::AdminIssues
            | Endpoint::HighPriorityIssues
            | Endpoint::CriticalAreas => "Failed to fetch admin data",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

/// Successful upstream answer, relayed unchanged
#[derive(Debug, Clone)]
pub struct Relayed {
    pub status: StatusCode,
    pub body: Bytes,
}

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

#[derive(Debug, Clone)]
pub struct Classifier {
    http: reqwest::Client,
    base_url: String,
}

impl Classifier {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Forward one call. The success body must be JSON; `T` is only used to flag contract drift.
    pub async fn forward<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        body: Option<serde_json::Value>,
    ) -> Result<Relayed, ProxyError> {
        let url = self.url(endpoint);
        tracing::debug!(%endpoint, %url, "Forwarding to classification service");

        let mut request = self
            .http
            .request(endpoint.method(), &url)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ProxyError::Transport { endpoint, source })?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response
            .bytes()
            .await
            .map_err(|source| ProxyError::Transport { endpoint, source })?;

        if !status.is_success() {
            return Err(ProxyError::Upstream {
                endpoint,
                status,
                content_type,
                body,
            });
        }

        serde_json::from_slice::<IgnoredAny>(&body)
            .map_err(|source| ProxyError::Malformed { endpoint, source })?;

        if let Err(e) = serde_json::from_slice::<T>(&body) {
            tracing::warn!(
                %endpoint,
                error = %e,
                "Upstream body does not match the contract, relaying as-is"
            );
        }

        Ok(Relayed { status, body })
    }
}
