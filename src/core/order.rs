//! Order business logic - daily jar deliveries.
//!
//! Orders carry no owner column of their own; ownership always goes through the
//! customer, so every query here joins `customers` and filters on its `user_id`.

use crate::{
    core::{
        customer::{get_customer, search_condition},
        money,
        pagination::{Page, PageRequest, Pagination},
        validation::ValidOrder,
    },
    entities::{Customer, Order, customer, order},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, QuerySelect, Select, Set, prelude::*};
use serde::Serialize;
use tracing::{debug, info, warn};

/// An order joined with its customer, as shown in the orders table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    /// Order ID
    pub id: i64,
    /// Customer ID
    pub customer_id: i64,
    /// Customer name
    pub customer_name: String,
    /// Jars delivered
    pub given_jars: i32,
    /// Empties collected
    pub returned_jars: i32,
    /// Delivery date
    pub date: NaiveDate,
    /// `given_jars * price_per_jar`; `None` if the stored price is unreadable
    pub net_amount: Option<Decimal>,
}

impl OrderRow {
    fn from_models(order: order::Model, customer: &customer::Model) -> Self {
        let net_amount = match money::parse_amount("pricePerJar", &customer.price_per_jar) {
            Ok(price) => money::jars_value(i64::from(order.given_jars), price),
            Err(e) => {
                warn!(customer_id = customer.id, error = %e, "Unreadable price per jar");
                None
            }
        };

        Self {
            id: order.id,
            customer_id: order.customer_id,
            customer_name: customer.name.clone(),
            given_jars: order.given_jars,
            returned_jars: order.returned_jars,
            date: order.date,
            net_amount,
        }
    }
}

fn owned_orders(owner_id: &str) -> Select<order::Entity> {
    Order::find()
        .inner_join(Customer)
        .filter(customer::Column::UserId.eq(owner_id))
}

/// Lists one page of the owner's orders, newest first, optionally filtered by
/// customer name or phone.
pub async fn list_orders(
    db: &DatabaseConnection,
    owner_id: &str,
    query: &str,
    page: PageRequest,
) -> Result<Page<OrderRow>> {
    let mut select = owned_orders(owner_id);
    if let Some(condition) = search_condition(query) {
        select = select.filter(condition);
    }

    let total = select.clone().count(db).await?;
    let rows = select
        .order_by_desc(order::Column::Date)
        .order_by_desc(order::Column::Id)
        .offset(page.offset())
        .limit(page.per_page)
        .select_also(Customer)
        .all(db)
        .await?;

    let items = rows
        .into_iter()
        .filter_map(|(order, customer)| {
            customer.map(|customer| OrderRow::from_models(order, &customer))
        })
        .collect();

    debug!(owner_id, query, total, page = page.page, "Listed orders");

    Ok(Page {
        items,
        pagination: Pagination::new(page, total),
    })
}

/// Lists every order of the owner, oldest first.
pub async fn list_all_orders(db: &DatabaseConnection, owner_id: &str) -> Result<Vec<order::Model>> {
    owned_orders(owner_id)
        .order_by_asc(order::Column::Date)
        .order_by_asc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Fetches one of the owner's orders.
///
/// # Errors
/// [`Error::OrderNotFound`] if the order is unknown or its customer belongs to someone else.
pub async fn get_order(db: &DatabaseConnection, owner_id: &str, order_id: i64) -> Result<order::Model> {
    owned_orders(owner_id)
        .filter(order::Column::Id.eq(order_id))
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })
}

/// Records a delivery for one of the owner's customers.
pub async fn create_order(
    db: &DatabaseConnection,
    owner_id: &str,
    input: ValidOrder,
) -> Result<order::Model> {
    let customer = get_customer(db, owner_id, input.customer_id).await?;

    let order = order::ActiveModel {
        customer_id: Set(customer.id),
        given_jars: Set(input.given_jars),
        returned_jars: Set(input.returned_jars),
        date: Set(input.date),
        ..Default::default()
    };

    let result = order.insert(db).await?;
    info!(owner_id, order_id = result.id, customer_id = customer.id, "Created order");
    Ok(result)
}

/// Rewrites one of the owner's orders; the new customer must also be the owner's.
pub async fn update_order(
    db: &DatabaseConnection,
    owner_id: &str,
    order_id: i64,
    input: ValidOrder,
) -> Result<order::Model> {
    let existing = get_order(db, owner_id, order_id).await?;
    let customer = get_customer(db, owner_id, input.customer_id).await?;

    let mut active_model: order::ActiveModel = existing.into();
    active_model.customer_id = Set(customer.id);
    active_model.given_jars = Set(input.given_jars);
    active_model.returned_jars = Set(input.returned_jars);
    active_model.date = Set(input.date);

    let result = active_model.update(db).await?;
    info!(owner_id, order_id, "Updated order");
    Ok(result)
}

/// Deletes one of the owner's orders.
pub async fn delete_order(db: &DatabaseConnection, owner_id: &str, order_id: i64) -> Result<()> {
    let existing = get_order(db, owner_id, order_id).await?;
    Order::delete_by_id(existing.id).exec(db).await?;

    info!(owner_id, order_id, "Deleted order");
    Ok(())
}
