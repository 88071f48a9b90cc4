//! Order endpoints

use crate::{
    api::{
        ApiResult, AppState,
        auth::CurrentUser,
        extract::{ApiJson, ApiQuery},
        parse_id,
    },
    core::{
        order::{self, OrderRow},
        pagination::{PageRequest, Pagination},
        validation::{OrderInput, validate_order},
    },
    entities::order as order_entity,
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

/// GET /api/orders?query=&page=
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Customer name or phone fragment
    #[serde(default)]
    pub query: String,
    /// 1-based page
    pub page: Option<String>,
}

/// Body of `GET /api/orders`
#[derive(Debug, Serialize)]
pub struct OrderListing {
    /// Rows of the requested page, newest first
    pub orders: Vec<OrderRow>,
    /// Page position
    pub pagination: Pagination,
}

/// GET /api/orders
pub async fn list_orders(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<OrderListing> {
    let request = PageRequest::from_query(query.page.as_deref(), state.config.server.page_size);
    let page = order::list_orders(&state.db, current.id(), &query.query, request).await?;

    Ok(Json(OrderListing {
        orders: page.items,
        pagination: page.pagination,
    }))
}

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(input): ApiJson<OrderInput>,
) -> ApiResult<order_entity::Model> {
    let valid = validate_order(&input)?;
    let created = order::create_order(&state.db, current.id(), valid).await?;
    Ok(Json(created))
}

/// PATCH /api/orders/{id}
pub async fn update_order(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<OrderInput>,
) -> ApiResult<order_entity::Model> {
    let id = parse_id(&id)?;
    let valid = validate_order(&input)?;
    let updated = order::update_order(&state.db, current.id(), id, valid).await?;
    Ok(Json(updated))
}

/// DELETE /api/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    order::delete_order(&state.db, current.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
