mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{
    get, landlord_token, post_json, send, tenant_token, test_app, test_state, PASSWORD,
    TENANT_EMAIL,
};
use lokaly_backend::{app, config::Config};
use serde_json::json;

#[tokio::test]
async fn test_health_and_root() {
    let app = test_app();

    let (status, body) = get(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&app, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Lokaly API");
}

#[tokio::test]
async fn test_tenant_login_routes_to_tenant_screens() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": TENANT_EMAIL, "password": PASSWORD, "role": "tenant" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["name"], "João Silva");
    assert_eq!(body["user"]["role"], "tenant");
    assert_eq!(body["home"], "/api/v1/tenant/dashboard");

    let keys: Vec<&str> = body["screens"]
        .as_array()
        .unwrap()
        .iter()
        .map(|screen| screen["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["home", "bills", "complaints", "support", "profile"]);
}

#[tokio::test]
async fn test_landlord_login_routes_to_landlord_screens() {
    let app = test_app();
    let token = landlord_token(&app).await;

    let (status, body) = get(&app, "/api/v1/session", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_authenticated"], true);
    assert_eq!(body["user"]["role"], "landlord");
    assert_eq!(body["home"], "/api/v1/landlord/dashboard");
    assert_eq!(body["screens"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": TENANT_EMAIL, "password": "wrong", "role": "tenant" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");

    // Right password, wrong role.
    let (status, body) = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": TENANT_EMAIL, "password": PASSWORD, "role": "landlord" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");

    let (status, body) = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": "not-an-email", "password": PASSWORD, "role": "tenant" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_anonymous_session_and_protected_routes() {
    let app = test_app();

    let (status, body) = get(&app, "/api/v1/session", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_authenticated"], false);
    assert!(body["user"].is_null());

    let (status, body) = get(&app, "/api/v1/tenant/dashboard", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = get(&app, "/api/v1/tenant/dashboard", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cross_role_access_is_forbidden() {
    let app = test_app();
    let tenant = tenant_token(&app).await;
    let landlord = landlord_token(&app).await;

    let (status, body) = get(&app, "/api/v1/landlord/properties", Some(&tenant)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    let (status, _) = get(&app, "/api/v1/tenant/bills", Some(&landlord)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = get(&app, "/api/v1/landlord/profile", Some(&tenant)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = get(&app, "/api/v1/tenant/profile", Some(&tenant)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let app = test_app();
    let token = tenant_token(&app).await;

    let (status, _) = get(&app, "/api/v1/tenant/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(&app, "/api/v1/auth/logout", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = get(&app, "/api/v1/tenant/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, body) = get(&app, "/api/v1/session", Some(&token)).await;
    assert_eq!(body["is_authenticated"], false);

    // A fresh login works again.
    let token = tenant_token(&app).await;
    let (status, _) = get(&app, "/api/v1/tenant/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_expired_session_rejects_token() {
    let mut config = Config::with_secret("test-secret");
    config.jwt_access_expiry = 0;
    let app = app(test_state(config));

    let token = tenant_token(&app).await;
    let (status, body) = get(&app, "/api/v1/tenant/dashboard", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (_, body) = get(&app, "/api/v1/session", Some(&token)).await;
    assert_eq!(body["is_authenticated"], false);
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (status, body) = post_json(
        &app,
        "/api/v1/auth/login",
        None,
        json!({ "email": TENANT_EMAIL, "password": PASSWORD, "role": "admin" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}
