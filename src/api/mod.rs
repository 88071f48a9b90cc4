//! HTTP API.
//!
//! Thin axum handlers over [`crate::core`]. Handlers validate the payload,
//! call one core operation with the signed-in user's ID and serialize the result.

pub mod auth;
pub mod customers;
pub mod error;
pub mod extract;
pub mod health;
pub mod orders;
pub mod payments;
pub mod reports;
pub mod session;

use crate::{
    config::AppConfig,
    errors::{Error, Result},
};
use axum::{
    Json, Router,
    routing::{get, patch, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Loaded configuration
    pub config: Arc<AppConfig>,
}

/// Result of a handler that answers with JSON.
pub type ApiResult<T> = Result<Json<T>>;

/// Parses a numeric row ID from a path segment or query value.
pub(crate) fn parse_id(raw: &str) -> Result<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::validation("id", format!("'{raw}' is not a valid ID"))),
    }
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    let customers = Router::new()
        .route(
            "/api/customers",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route(
            "/api/customers/{id}",
            patch(customers::update_customer).delete(customers::delete_customer),
        );

    let orders = Router::new()
        .route(
            "/api/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route(
            "/api/orders/{id}",
            patch(orders::update_order).delete(orders::delete_order),
        );

    let payments = Router::new().route(
        "/api/payments",
        post(payments::record_payment).get(payments::payment_history),
    );

    Router::new()
        .route("/api/health", get(health::health_check))
        .route(
            "/api/session",
            get(session::current_session).delete(session::sign_out),
        )
        .route("/api/reports/monthly", get(reports::monthly_report))
        .merge(customers)
        .merge(orders)
        .merge(payments)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
