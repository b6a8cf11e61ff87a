use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tower::ServiceExt;

use snapforge::config::Config;
use snapforge::router::{GatewayState, gateway_router};
use snapforge::session::MemorySessionStore;

fn test_app() -> Router {
    let mut cfg = Config::default();
    cfg.cookie_secret = "auth-route-test-secret".to_string();

    let mut users = HashMap::new();
    users.insert("alice".to_string(), "wonderland".to_string());

    let state = GatewayState::new(cfg, users, Arc::new(MemorySessionStore::new()));
    gateway_router(state)
}

async fn post_login(app: &Router, username: &str, password: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/login")
                .header("content-type", "application/json")
                .body(Body::from(format!(
                    r#"{{"username":"{username}","password":"{password}"}}"#
                )))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed")
}

async fn get_check_auth(app: &Router, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().method("GET").uri("/api/check-auth");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).expect("failed to build request"))
        .await
        .expect("request failed")
}

/// Take the `name=value` pair from the response's Set-Cookie header.
fn session_cookie(resp: &Response) -> String {
    resp.headers()
        .get(header::SET_COOKIE)
        .expect("response carries no Set-Cookie header")
        .to_str()
        .expect("Set-Cookie was not ascii")
        .split(';')
        .next()
        .expect("empty Set-Cookie header")
        .to_string()
}

async fn body_json(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&bytes).expect("response body was not JSON")
}

#[tokio::test]
async fn login_with_wrong_password_returns_401_without_cookie() {
    let app = test_app();

    let resp = post_login(&app, "alice", "not-wonderland").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());

    let body = body_json(resp).await;
    assert_eq!(body["success"], Value::Bool(false));
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn login_with_unknown_user_returns_401() {
    let app = test_app();

    let resp = post_login(&app, "mallory", "wonderland").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn login_issues_cookie_recognized_by_check_auth() {
    let app = test_app();

    let resp = post_login(&app, "alice", "wonderland").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = session_cookie(&resp);

    let body = body_json(resp).await;
    assert_eq!(body["success"], Value::Bool(true));

    let resp = get_check_auth(&app, Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["authenticated"], Value::Bool(true));
    assert_eq!(body["user"], "alice");
}

#[tokio::test]
async fn check_auth_without_cookie_returns_401() {
    let app = test_app();

    let resp = get_check_auth(&app, None).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["authenticated"], Value::Bool(false));
}

#[tokio::test]
async fn garbage_cookie_is_not_authenticated() {
    let app = test_app();

    let resp = get_check_auth(&app, Some("snapforge_session=forged-token")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_invalidates_replayed_cookie() {
    let app = test_app();

    let resp = post_login(&app, "alice", "wonderland").await;
    let cookie = session_cookie(&resp);

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["message"], "Logged out");

    // The old cookie still decrypts, but its server-side session is gone.
    let resp = get_check_auth(&app, Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_session_still_succeeds() {
    let app = test_app();

    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/logout")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}
