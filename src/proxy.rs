use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::error::ProxyError;
use crate::models::{
    AdminStatsResponse, AreaHealthItem, HealthResponse, Issue, PingResponse, PredictRequest,
    PredictResponse,
};
use crate::upstream::{Classifier, Endpoint, Relayed};

/// Location sent upstream when the browser supplied none
pub const FALLBACK_LOCATION: &str = "0,0";

/// Pass-through HTTP layer.
/// Holds no state besides configuration; every request is one upstream call.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub classifier: Classifier,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let classifier = Classifier::new(config.classifier_url.clone());
        Self {
            config: Arc::new(config),
            classifier,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let civic = Router::new()
        .route("/predict", post(predict))
        .route("/resolve/:issue_id", post(resolve_issue))
        .route("/area-health", get(area_health))
        .route("/admin/stats", get(admin_stats))
        .route("/admin/issues", get(admin_issues))
        .route("/admin/issues/high", get(high_priority_issues))
        .route("/admin/areas/critical", get(critical_areas));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/ping", get(ping))
        .nest("/api/civic", civic)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    concat!("Swachh Saathi API v", env!("CARGO_PKG_VERSION"))
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

async fn ping(State(state): State<AppState>) -> Json<PingResponse> {
    Json(PingResponse {
        message: state.config.ping_message.clone(),
    })
}

/// Submit a report for classification.
/// Duplicates are detected upstream and signalled through `duplicate`.
/// Any body without usable text is a 400, including unreadable JSON.
async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Relayed, ProxyError> {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable report body");
            return Err(text_required());
        }
    };

    if input.text.trim().is_empty() {
        return Err(text_required());
    }

    let location = if input.location.trim().is_empty() {
        FALLBACK_LOCATION.to_string()
    } else {
        input.location
    };

    let body = serde_json::json!({
        "text": input.text,
        "location": location,
    });

    state
        .classifier
        .forward::<PredictResponse>(Endpoint::Predict, Some(body))
        .await
}

fn text_required() -> ProxyError {
    ProxyError::Validation("Text is required".to_string())
}

async fn resolve_issue(
    State(state): State<AppState>,
    Path(issue_id): Path<i64>,
) -> Result<Relayed, ProxyError> {
    state
        .classifier
        .forward::<serde_json::Value>(Endpoint::Resolve(issue_id), None)
        .await
}

async fn area_health(State(state): State<AppState>) -> Result<Relayed, ProxyError> {
    state
        .classifier
        .forward::<Vec<AreaHealthItem>>(Endpoint::AreaHealth, None)
        .await
}

async fn admin_stats(State(state): State<AppState>) -> Result<Relayed, ProxyError> {
    state
        .classifier
        .forward::<AdminStatsResponse>(Endpoint::AdminStats, None)
        .await
}

async fn admin_issues(State(state): State<AppState>) -> Result<Relayed, ProxyError> {
    state
        .classifier
        .forward::<Vec<Issue>>(Endpoint::AdminIssues, None)
        .await
}

async fn high_priority_issues(State(state): State<AppState>) -> Result<Relayed, ProxyError> {
    state
        .classifier
        .forward::<Vec<Issue>>(Endpoint::HighPriorityIssues, None)
        .await
}

async fn critical_areas(State(state): State<AppState>) -> Result<Relayed, ProxyError> {
    state
        .classifier
        .forward::<Vec<AreaHealthItem>>(Endpoint::CriticalAreas, None)
        .await
}
