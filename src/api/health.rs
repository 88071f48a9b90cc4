//! Health check endpoint

use crate::api::AppState;
use axum::{Json, extract::State};

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = match state.db.ping().await {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "Database ping failed");
            "unavailable"
        }
    };

    Json(serde_json::json!({
        "status": "ok",
        "service": "aquatrack",
        "version": env!("CARGO_PKG_VERSION"),
        "database": database,
    }))
}
