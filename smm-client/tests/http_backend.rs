use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use reqwest::cookie::CookieStore;
use serde_json::{Value, json};
use smm_client::{ApiErrorKind, ClientConfig, ReqwestTransport, SmmClient, UploadForm};

async fn login() -> impl IntoResponse {
    (
        [(header::SET_COOKIE, "session=abc123; Path=/; HttpOnly")],
        Json(json!({ "message": "Login successful" })),
    )
}

async fn auth_status(headers: HeaderMap) -> Json<Value> {
    let cookie = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    Json(json!({
        "authenticated": cookie.contains("session=abc123"),
        "authorization_header": headers.contains_key(header::AUTHORIZATION)
    }))
}

async fn transcribe(headers: HeaderMap) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    Json(json!({ "content_type": content_type }))
}

async fn top_trends(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!([{
        "id": 1,
        "keyword": "AI Revolution",
        "platform": "twitter",
        "engagement_score": 9.8,
        "volume": params.get("limit").and_then(|limit| limit.parse::<i64>().ok())
    }]))
}

async fn broken() -> impl IntoResponse {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": "Trend not found" })),
    )
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/status", get(auth_status))
        .route("/api/ai/transcribe", post(transcribe))
        .route("/api/trends/top", get(top_trends))
        .route("/api/trends/broken", get(broken));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test backend");
    });

    format!("http://{addr}")
}

fn client_for(base_url: &str) -> (SmmClient, ReqwestTransport) {
    let config = ClientConfig::new(base_url);
    let transport = ReqwestTransport::new(&config).expect("transport must build");
    let client = SmmClient::with_transport(config, Arc::new(transport.clone()));
    (client, transport)
}

#[tokio::test]
async fn session_cookie_survives_login() {
    let base_url = spawn_backend().await;
    let (client, transport) = client_for(&base_url);

    let before = client.auth_status().await.unwrap();
    assert_eq!(before["authenticated"], false);

    let credentials = smm_client::models::Credentials {
        username: "demo".to_string(),
        password: "secret".into(),
    };
    client.login(&credentials).await.unwrap();

    let after = client.auth_status().await.unwrap();
    assert_eq!(after["authenticated"], true);
    assert_eq!(after["authorization_header"], false);

    let url: reqwest::Url = base_url.parse().expect("base url");
    let stored = transport.cookie_jar().cookies(&url);
    assert!(stored.is_some());
}

#[tokio::test]
async fn multipart_reaches_server_with_boundary() {
    let base_url = spawn_backend().await;
    let (client, _) = client_for(&base_url);
    let form = UploadForm::new().file("audio", "clip.wav", Some("audio/wav"), vec![0, 1, 2, 3]);

    let echoed = client.transcribe_audio(form).await.unwrap();

    let content_type = echoed["content_type"].as_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));
}

#[tokio::test]
async fn query_and_errors_over_real_http() {
    let base_url = spawn_backend().await;
    let (client, _) = client_for(&base_url);

    let top = client.top_trends(3).await.unwrap();
    assert_eq!(top[0].volume, Some(3));

    let err = client
        .request("/api/trends/broken", smm_client::RequestConfig::get())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.message(), "Trend not found");

    let missing = client.health().await.unwrap_err();
    assert_eq!(missing.status(), Some(404));
    assert_eq!(missing.message(), "API request failed with status: 404");
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let (client, _) = client_for(&format!("http://{addr}"));

    let err = client.health().await.unwrap_err();

    assert_eq!(err.kind(), ApiErrorKind::Transport);
    assert_eq!(err.status(), None);
}
