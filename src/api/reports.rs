//! Monthly report endpoint

use crate::{
    api::{ApiResult, AppState, auth::CurrentUser, extract::ApiQuery},
    core::{
        money,
        report::{self, MonthlyReport},
    },
};
use axum::{
    Json,
    extract::State,
};
use chrono::Local;
use serde::Deserialize;
use tracing::info;

/// GET /api/reports/monthly?month=YYYY-MM
#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    /// Month to report on; the current local month when absent
    pub month: Option<String>,
}

/// GET /api/reports/monthly
pub async fn monthly_report(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiQuery(query): ApiQuery<MonthlyQuery>,
) -> ApiResult<MonthlyReport> {
    let reference = match query.month.as_deref().filter(|m| !m.trim().is_empty()) {
        Some(month) => report::parse_month(month)?,
        None => Local::now().date_naive(),
    };

    let report = report::monthly_report(&state.db, current.id(), reference).await?;
    info!(
        owner_id = current.id(),
        month = %report.month,
        pending = %money::format_rupees(report.totals.total_pending_amount),
        collected = %money::format_rupees(report.collected_amount),
        "Served monthly report"
    );
    Ok(Json(report))
}
