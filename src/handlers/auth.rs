use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};
use serde_json::json;
use subtle::ConstantTimeEq;
use time::Duration;
use tracing::info;

use crate::error::GatewayError;
use crate::middleware::auth::current_user;
use crate::router::GatewayState;
use crate::session::{SESSION_COOKIE, new_token};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
struct AuthOutcome {
    success: bool,
    message: &'static str,
}

/// POST /api/login
pub async fn login(
    State(state): State<GatewayState>,
    jar: PrivateCookieJar,
    Json(req): Json<LoginRequest>,
) -> Response {
    let valid = state
        .users
        .get(&req.username)
        .map(|stored| bool::from(stored.as_bytes().ct_eq(req.password.as_bytes())))
        .unwrap_or(false);

    if !valid {
        return GatewayError::InvalidCredentials.into_response();
    }

    // A double-submitted login replaces the previous token instead of
    // leaking an orphan entry in the store.
    if let Some(old) = jar.get(SESSION_COOKIE) {
        state.sessions.delete(old.value());
    }

    let token = new_token();
    state.sessions.set(&token, &req.username);
    info!(user = %req.username, "login successful");

    let jar = jar.add(session_cookie(token));
    (
        jar,
        Json(AuthOutcome {
            success: true,
            message: "Login successful",
        }),
    )
        .into_response()
}

/// POST /api/logout — always succeeds, session or not.
pub async fn logout(State(state): State<GatewayState>, jar: PrivateCookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.delete(cookie.value());
    }
    let jar = jar.remove(clear_cookie());
    (
        jar,
        Json(AuthOutcome {
            success: true,
            message: "Logged out",
        }),
    )
        .into_response()
}

/// GET /api/check-auth
pub async fn check_auth(State(state): State<GatewayState>, jar: PrivateCookieJar) -> Response {
    match current_user(&state, &jar) {
        Some(user) => Json(json!({ "authenticated": true, "user": user })).into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "authenticated": false })),
        )
            .into_response(),
    }
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE.to_string(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(7))
        .build()
}

fn clear_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE.to_string(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
