//! Payment endpoints

use crate::{
    api::{
        ApiResult, AppState,
        auth::CurrentUser,
        extract::{ApiJson, ApiQuery},
        parse_id,
    },
    core::{
        payment,
        validation::{PaymentInput, validate_payment},
    },
    entities::payment as payment_entity,
    errors::Error,
};
use axum::{
    Json,
    extract::State,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// GET /api/payments?customerId=
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    /// Customer whose payments to list
    pub customer_id: Option<String>,
}

/// Body of `GET /api/payments`
#[derive(Debug, Serialize)]
pub struct PaymentHistory {
    /// Payments, newest first
    pub payments: Vec<payment_entity::Model>,
    /// Sum of all listed amounts
    pub total: Decimal,
}

/// POST /api/payments
pub async fn record_payment(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(input): ApiJson<PaymentInput>,
) -> ApiResult<payment_entity::Model> {
    let valid = validate_payment(&input)?;
    let recorded = payment::record_payment(&state.db, current.id(), valid).await?;
    Ok(Json(recorded))
}

/// GET /api/payments
pub async fn payment_history(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> ApiResult<PaymentHistory> {
    let raw = query
        .customer_id
        .ok_or_else(|| Error::validation("customerId", "is required"))?;
    let customer_id = parse_id(&raw)?;

    let payments = payment::list_payments_for_customer(&state.db, current.id(), customer_id).await?;
    let total = payment::total_amount(&payments);
    Ok(Json(PaymentHistory { payments, total }))
}
