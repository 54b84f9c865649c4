use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use lokaly_backend::{
    app,
    config::Config,
    store::{seed::demo_data, Store},
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

#[allow(dead_code)]
pub const PASSWORD: &str = "123456";
#[allow(dead_code)]
pub const TENANT_EMAIL: &str = "locatario@example.com";
#[allow(dead_code)]
pub const LANDLORD_EMAIL: &str = "locador@example.com";

#[allow(dead_code)]
pub const MARIA_EMAIL: &str = "maria@example.com";

/// Full application over freshly seeded demo data.
pub fn test_app() -> Router {
    app(test_state(Config::with_secret("test-secret")))
}

/// Seeded state, for tests that tweak config or collaborators before building the app.
pub fn test_state(config: Config) -> AppState {
    let store = Store::new(demo_data().expect("demo data"));
    AppState::new(store, config)
}

/// Send a request and return (status, JSON body). Non-JSON bodies become `Null`.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read failed");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn builder(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
        None => builder,
    }
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    let request = builder("GET", uri, token).body(Body::empty()).unwrap();
    send(app, request).await
}

#[allow(dead_code)]
pub async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    let request = builder(method, uri, token)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

#[allow(dead_code)]
pub async fn post_json(app: &Router, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    send_json(app, "POST", uri, token, body).await
}

#[allow(dead_code)]
pub async fn put_json(app: &Router, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    send_json(app, "PUT", uri, token, body).await
}

/// POST a single-file multipart form.
#[allow(dead_code)]
pub async fn post_file(
    app: &Router,
    uri: &str,
    token: &str,
    field: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> (StatusCode, Value) {
    let boundary = "lokaly-test-boundary";
    let mut body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = builder("POST", uri, Some(token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

#[allow(dead_code)]
pub async fn login(app: &Router, email: &str, role: &str) -> String {
    let (status, body) = post_json(
        app,
        "/api/v1/auth/login",
        None,
        json!({ "email": email, "password": PASSWORD, "role": role }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["access_token"].as_str().expect("token").to_string()
}

#[allow(dead_code)]
pub async fn tenant_token(app: &Router) -> String {
    login(app, TENANT_EMAIL, "tenant").await
}

#[allow(dead_code)]
pub async fn landlord_token(app: &Router) -> String {
    login(app, LANDLORD_EMAIL, "landlord").await
}
