//! Session extractor.
//!
//! Handlers that take a [`CurrentUser`] only run for requests carrying a live
//! session token, either as `Authorization: Bearer <token>` or in the
//! `session_token` cookie.

use crate::{
    api::AppState,
    core::session,
    entities::user,
    errors::Error,
};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use tracing::warn;

/// Cookie that carries the session token.
pub const SESSION_COOKIE: &str = "session_token";

/// The signed-in user of the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Account behind the session
    pub user: user::Model,
    /// Token the request was authenticated with
    pub token: String,
}

impl CurrentUser {
    /// Owner ID to scope every data access with.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.user.id
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
}

/// Session token from the request headers; the bearer header wins over the cookie.
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    bearer_token(headers).or_else(|| cookie_token(headers))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(current) = parts.extensions.get::<Self>() {
            return Ok(current.clone());
        }

        let Some(token) = session_token(&parts.headers) else {
            warn!(uri = %parts.uri, "Request without session token");
            return Err(Error::Unauthorized);
        };

        let user = session::resolve_session(&state.db, &token).await?;
        let current = Self { user, token };
        parts.extensions.insert(current.clone());
        Ok(current)
    }
}
