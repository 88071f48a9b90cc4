//! Session endpoints: who am I, sign out

use crate::{
    api::{ApiResult, AppState, auth::CurrentUser},
    core::session,
    entities::user,
    errors::Result,
};
use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

/// Body of `GET /api/session`
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Signed-in account
    pub user: user::Model,
}

/// GET /api/session
pub async fn current_session(current: CurrentUser) -> ApiResult<SessionResponse> {
    Ok(Json(SessionResponse { user: current.user }))
}

/// DELETE /api/session
pub async fn sign_out(State(state): State<AppState>, current: CurrentUser) -> Result<StatusCode> {
    session::delete_session(&state.db, &current.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
