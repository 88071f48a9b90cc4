//! Customer endpoints

use crate::{
    api::{
        ApiResult, AppState,
        auth::CurrentUser,
        extract::{ApiJson, ApiQuery},
        parse_id,
    },
    core::{
        customer::{self, CustomerOption},
        pagination::{PageRequest, Pagination},
        validation::{CustomerInput, validate_customer},
    },
    entities::customer as customer_entity,
    errors::Result,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

/// GET /api/customers?query=&page=&dropdown=
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Name or phone fragment
    #[serde(default)]
    pub query: String,
    /// 1-based page; anything unparsable means page 1
    pub page: Option<String>,
    /// Return every customer as `{id, name}` instead of a page
    #[serde(default)]
    pub dropdown: bool,
}

/// Body of `GET /api/customers`
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CustomerListing {
    /// Paginated table rows
    Page {
        /// Rows of the requested page
        customers: Vec<customer_entity::Model>,
        /// Page position
        pagination: Pagination,
    },
    /// Picker entries
    Options {
        /// All customers, alphabetically
        customers: Vec<CustomerOption>,
    },
}

/// GET /api/customers
pub async fn list_customers(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<CustomerListing> {
    if query.dropdown {
        let customers = customer::list_customer_options(&state.db, current.id()).await?;
        return Ok(Json(CustomerListing::Options { customers }));
    }

    let request = PageRequest::from_query(query.page.as_deref(), state.config.server.page_size);
    let page = customer::list_customers(&state.db, current.id(), &query.query, request).await?;

    Ok(Json(CustomerListing::Page {
        customers: page.items,
        pagination: page.pagination,
    }))
}

/// POST /api/customers
pub async fn create_customer(
    State(state): State<AppState>,
    current: CurrentUser,
    ApiJson(input): ApiJson<CustomerInput>,
) -> ApiResult<customer_entity::Model> {
    let valid = validate_customer(&input)?;
    let created = customer::create_customer(&state.db, current.id(), valid).await?;
    Ok(Json(created))
}

/// PATCH /api/customers/{id}
pub async fn update_customer(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<CustomerInput>,
) -> ApiResult<customer_entity::Model> {
    let id = parse_id(&id)?;
    let valid = validate_customer(&input)?;
    let updated = customer::update_customer(&state.db, current.id(), id, valid).await?;
    Ok(Json(updated))
}

/// DELETE /api/customers/{id}
pub async fn delete_customer(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = parse_id(&id)?;
    customer::delete_customer(&state.db, current.id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
