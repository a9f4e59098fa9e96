use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use homework_status_bot::error::Error;
use homework_status_bot::services::practicum_service::{HomeworkApi, PracticumService};
use serde_json::json;
use tokio::net::TcpListener;
use url::Url;

#[derive(Clone, Default)]
struct Seen {
    requests: Arc<Mutex<Vec<(Option<String>, Option<String>)>>>,
}

async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{}", addr)
}

fn service(base: &str) -> PracticumService {
    let endpoint = Url::parse(&format!("{}/api/user_api/homework_statuses/", base)).unwrap();
    PracticumService::new(reqwest::Client::new(), endpoint, "practicum-token".to_string())
}

async fn statuses(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    seen.requests
        .lock()
        .unwrap()
        .push((auth, query.get("from_date").cloned()));
    Json(json!({
        "homeworks": [{ "homework_name": "proj1", "status": "reviewing" }],
        "current_date": 1700000600,
    }))
}

#[tokio::test]
async fn sends_oauth_header_and_cursor() {
    let seen = Seen::default();
    let app = Router::new()
        .route("/api/user_api/homework_statuses/", get(statuses))
        .with_state(seen.clone());
    let base = spawn_server(app).await;

    let body = service(&base)
        .get_api_answer(1700000000)
        .await
        .expect("api answer");

    assert_eq!(body["current_date"], json!(1700000600));
    assert_eq!(body["homeworks"][0]["homework_name"], json!("proj1"));

    let requests = seen.requests.lock().unwrap();
    assert_eq!(
        *requests,
        vec![(
            Some("OAuth practicum-token".to_string()),
            Some("1700000000".to_string())
        )]
    );
}

#[tokio::test]
async fn non_ok_status_is_reported_with_code() {
    let app = Router::new().route(
        "/api/user_api/homework_statuses/",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_server(app).await;

    let err = service(&base).get_api_answer(0).await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus { status: 500 }), "{}", err);
}

#[tokio::test]
async fn accepted_status_is_not_ok() {
    let app = Router::new().route(
        "/api/user_api/homework_statuses/",
        get(|| async { (StatusCode::ACCEPTED, Json(json!({}))) }),
    );
    let base = spawn_server(app).await;

    let err = service(&base).get_api_answer(0).await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedStatus { status: 202 }), "{}", err);
}

#[tokio::test]
async fn non_json_body_is_json_error() {
    let app = Router::new().route(
        "/api/user_api/homework_statuses/",
        get(|| async { "<html>maintenance</html>" }),
    );
    let base = spawn_server(app).await;

    let err = service(&base).get_api_answer(0).await.unwrap_err();
    assert!(matches!(err, Error::Json(_)), "{}", err);
}

#[tokio::test]
async fn unreachable_service_is_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = service(&format!("http://{}", addr))
        .get_api_answer(0)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Request(_)), "{}", err);
    assert_eq!(err.kind(), "request");
}
