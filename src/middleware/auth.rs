use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::error::GatewayError;
use crate::router::GatewayState;
use crate::session::SESSION_COOKIE;

/// Resolve the session cookie to an authenticated username, if any.
pub fn current_user(state: &GatewayState, jar: &PrivateCookieJar) -> Option<String> {
    let cookie = jar.get(SESSION_COOKIE)?;
    state.sessions.get(cookie.value())
}

/// Extractor that rejects unauthenticated requests with 401 before the
/// request body is read; no outbound call is made for them.
#[derive(Debug, Clone)]
pub struct SessionAuth(pub String);

impl FromRequestParts<GatewayState> for SessionAuth {
    type Rejection = GatewayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &GatewayState,
    ) -> Result<Self, Self::Rejection> {
        let jar = match PrivateCookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };
        let user = current_user(state, &jar).ok_or(GatewayError::Unauthorized)?;
        Ok(Self(user))
    }
}
