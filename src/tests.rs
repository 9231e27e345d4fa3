use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use crate::models::{ErrorBody, PingResponse};
use crate::{router, AppState, Config};

const PREDICT_BODY: &str = r#"{"duplicate": false, "id": 12, "category": "waste",
  "authority": "MCD Sanitation Dept", "priority": "high", "trust_level": "medium",
  "supporters": 1, "actions": ["Avoid burning", "Report to MCD"], "message": "Issue reported"}"#;

const AREA_BODY: &str = r#"[{"area":"Karol Bagh","health_score":85,"color":"green","total_issues":20,"resolved_issues":17},
 {"area":"Rohini","health_score":10,"color":"red","total_issues":10,"resolved_issues":1}]"#;

const RESOLVE_BODY: &str = r#"{"message":"Issue 7 marked as resolved","status":"resolved"}"#;

const STATS_BODY: &str =
    r#"{"total_issues":30,"open_issues":12,"resolved_issues":18,"high_priority_issues":4}"#;

fn json_response(status: StatusCode, body: &'static str) -> axum::response::Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn spawn_stub(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Well-behaved classification service; records every /predict body it receives
async fn healthy_stub() -> (String, Arc<Mutex<Vec<Value>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();

    let app = Router::new()
        .route(
            "/predict",
            post(move |Json(body): Json<Value>| {
                let recorder = recorder.clone();
                async move {
                    recorder.lock().push(body);
                    json_response(StatusCode::OK, PREDICT_BODY)
                }
            }),
        )
        .route(
            "/resolve/:id",
            post(|| async { json_response(StatusCode::OK, RESOLVE_BODY) }),
        )
        .route(
            "/area-health",
            get(|| async { json_response(StatusCode::OK, AREA_BODY) }),
        )
        .route(
            "/admin/stats",
            get(|| async { json_response(StatusCode::OK, STATS_BODY) }),
        );

    (spawn_stub(app).await, seen)
}

fn app_for(classifier_url: &str) -> Router {
    let url = classifier_url.to_string();
    let config = Config::from_lookup(|key| match key {
        "CLASSIFIER_API_URL" => Some(url.clone()),
        "PING_MESSAGE" => Some("pong".to_string()),
        _ => None,
    });
    router(AppState::new(config))
}

/// Address with nothing listening on it
fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_req(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn read_body(response: axum::response::Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_ping_uses_configured_message() {
    let app = app_for(&refused_url());

    let response = app.oneshot(get_req("/api/ping")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let ping: PingResponse = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(ping.message, "pong");
}

#[tokio::test]
async fn test_health_check() {
    let app = app_for(&refused_url());
    let response = app.oneshot(get_req("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_predict_relays_body_byte_for_byte() {
    let (url, seen) = healthy_stub().await;
    let app = app_for(&url);

    let response = app
        .oneshot(post_json(
            "/api/civic/predict",
            serde_json::json!({"text": "garbage burning near park", "location": "28.61,77.2"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await, PREDICT_BODY.as_bytes());

    let seen = seen.lock();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0]["text"], "garbage burning near park");
    assert_eq!(seen[0]["location"], "28.61,77.2");
}

#[tokio::test]
async fn test_predict_defaults_missing_location() {
    let (url, seen) = healthy_stub().await;
    let app = app_for(&url);

    let response = app
        .oneshot(post_json(
            "/api/civic/predict",
            serde_json::json!({"text": "streetlight broken"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(seen.lock()[0]["location"], "0,0");
}

#[tokio::test]
async fn test_predict_rejects_empty_text_without_forwarding() {
    let (url, seen) = healthy_stub().await;

    for text in ["", "   \n\t"] {
        let response = app_for(&url)
            .oneshot(post_json(
                "/api/civic/predict",
                serde_json::json!({"text": text, "location": "28.61,77.2"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: ErrorBody = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(body.error, "Text is required");
    }

    assert!(seen.lock().is_empty());
}

#[tokio::test]
async fn test_upstream_error_status_and_body_relayed() {
    let app = Router::new().route(
        "/predict",
        post(|| async { json_response(StatusCode::CONFLICT, r#"{"error":"dup"}"#) }),
    );
    let url = spawn_stub(app).await;

    let response = app_for(&url)
        .oneshot(post_json(
            "/api/civic/predict",
            serde_json::json!({"text": "water leak", "location": "1,2"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(read_body(response).await, br#"{"error":"dup"}"#);
}

#[tokio::test]
async fn test_transport_failure_collapses_to_500() {
    let url = refused_url();

    let cases = [
        (
            post_json("/api/civic/predict", serde_json::json!({"text": "smoke"})),
            "Failed to process request",
        ),
        (
            post_json("/api/civic/resolve/7", serde_json::json!({})),
            "Failed to resolve issue",
        ),
        (
            get_req("/api/civic/area-health"),
            "Failed to fetch area health data",
        ),
        (get_req("/api/civic/admin/stats"), "Failed to fetch admin data"),
    ];

    for (request, message) in cases {
        let response = app_for(&url).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorBody = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(body.error, message);
    }
}

#[tokio::test]
async fn test_malformed_upstream_json_collapses_to_500() {
    let app = Router::new().route(
        "/area-health",
        get(|| async { json_response(StatusCode::OK, "<html>oops</html>") }),
    );
    let url = spawn_stub(app).await;

    let response = app_for(&url)
        .oneshot(get_req("/api/civic/area-health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorBody = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(body.error, "Failed to fetch area health data");
}

#[tokio::test]
async fn test_resolve_and_area_health_pass_through() {
    let (url, _) = healthy_stub().await;

    let response = app_for(&url)
        .oneshot(post_json("/api/civic/resolve/7", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await, RESOLVE_BODY.as_bytes());

    let response = app_for(&url)
        .oneshot(get_req("/api/civic/area-health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await, AREA_BODY.as_bytes());

    let response = app_for(&url)
        .oneshot(get_req("/api/civic/admin/stats"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await, STATS_BODY.as_bytes());
}

#[tokio::test]
async fn test_resolve_requires_numeric_id() {
    let (url, _) = healthy_stub().await;

    let response = app_for(&url)
        .oneshot(post_json("/api/civic/resolve/abc", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_off_contract_json_still_relayed() {
    const NEW_CATEGORY: &str = r#"{"duplicate":false,"id":3,"category":"traffic","authority":"Traffic Police",
 "priority":"low","trust_level":"low","supporters":1,"actions":[],"message":"ok"}"#;
    const FLOAT_SCORE: &str =
        r#"[{"area":"Saket","health_score":66.7,"color":"yellow","total_issues":3,"resolved_issues":2}]"#;

    let app = Router::new()
        .route(
            "/predict",
            post(|| async { json_response(StatusCode::OK, NEW_CATEGORY) }),
        )
        .route(
            "/area-health",
            get(|| async { json_response(StatusCode::OK, FLOAT_SCORE) }),
        );
    let url = spawn_stub(app).await;

    let response = app_for(&url)
        .oneshot(post_json(
            "/api/civic/predict",
            serde_json::json!({"text": "signal not working", "location": "1,2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await, NEW_CATEGORY.as_bytes());

    let response = app_for(&url)
        .oneshot(get_req("/api/civic/area-health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await, FLOAT_SCORE.as_bytes());
}

#[tokio::test]
async fn test_null_fields_treated_as_missing() {
    let (url, seen) = healthy_stub().await;

    let response = app_for(&url)
        .oneshot(post_json(
            "/api/civic/predict",
            serde_json::json!({"text": null, "location": "1,2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(body.error, "Text is required");
    assert!(seen.lock().is_empty());

    let response = app_for(&url)
        .oneshot(post_json(
            "/api/civic/predict",
            serde_json::json!({"text": "dead trees on footpath", "location": null}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(seen.lock()[0]["location"], "0,0");
}

#[tokio::test]
async fn test_unreadable_report_body_is_400() {
    let (url, seen) = healthy_stub().await;

    let no_content_type = Request::builder()
        .method("POST")
        .uri("/api/civic/predict")
        .body(Body::from(r#"{"text":"smoke"}"#))
        .unwrap();
    let broken_json = Request::builder()
        .method("POST")
        .uri("/api/civic/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    for request in [no_content_type, broken_json] {
        let response = app_for(&url).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: ErrorBody = serde_json::from_slice(&read_body(response).await).unwrap();
        assert_eq!(body.error, "Text is required");
    }
    assert!(seen.lock().is_empty());
}
