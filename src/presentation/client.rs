//! Browser-side access to the proxy API.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::models::{AdminStatsResponse, AreaHealthItem, PredictRequest, PredictResponse};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("server answered {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Calls the pages make. Implemented over HTTP, and by fakes in tests.
#[async_trait]
pub trait CivicApi: Send + Sync {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, ClientError>;
    async fn resolve(&self, issue_id: i64) -> Result<serde_json::Value, ClientError>;
    async fn area_health(&self) -> Result<Vec<AreaHealthItem>, ClientError>;
    async fn admin_stats(&self) -> Result<AdminStatsResponse, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpCivicApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCivicApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/civic{}", self.base_url, path)
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl CivicApi for HttpCivicApi {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/predict"))
            .json(request)
            .send()
            .await?;
        Self::read(response).await
    }

    async fn resolve(&self, issue_id: i64) -> Result<serde_json::Value, ClientError> {
        let response = self
            .http
            .post(self.url(&format!("/resolve/{}", issue_id)))
            .send()
            .await?;
        Self::read(response).await
    }

    async fn area_health(&self) -> Result<Vec<AreaHealthItem>, ClientError> {
        let response = self.http.get(self.url("/area-health")).send().await?;
        Self::read(response).await
    }

    async fn admin_stats(&self) -> Result<AdminStatsResponse, ClientError> {
        let response = self.http.get(self.url("/admin/stats")).send().await?;
        Self::read(response).await
    }
}
