//! Shared test utilities for `AquaTrack`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        customer, money, order, payment, session,
        validation::{ValidCustomer, ValidOrder, ValidPayment, parse_date},
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_PHONE: AtomicU32 = AtomicU32::new(0);

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a user with the given email and a generated ID.
pub async fn create_test_user(db: &DatabaseConnection, email: &str) -> Result<entities::user::Model> {
    session::create_user(db, Some(email.to_string()), Some("Test Supplier".to_string())).await
}

/// Fresh database with one owner account.
pub async fn setup_with_owner() -> Result<(DatabaseConnection, entities::user::Model)> {
    let db = setup_test_db().await?;
    let owner = create_test_user(&db, "owner@example.com").await?;
    Ok((db, owner))
}

/// Fresh database with one owner and one customer priced at 10.
pub async fn setup_with_customer() -> Result<(
    DatabaseConnection,
    entities::user::Model,
    entities::customer::Model,
)> {
    let (db, owner) = setup_with_owner().await?;
    let customer = create_test_customer(&db, &owner.id, "Test Customer").await?;
    Ok((db, owner, customer))
}

/// Creates a customer with sensible defaults.
///
/// # Defaults
/// * phone: a unique valid mobile number
/// * address: None
/// * `price_per_jar`: 10
pub async fn create_test_customer(
    db: &DatabaseConnection,
    owner_id: &str,
    name: &str,
) -> Result<entities::customer::Model> {
    let phone = format!("98{:08}", NEXT_PHONE.fetch_add(1, Ordering::Relaxed));
    create_custom_customer(db, owner_id, name, &phone, "10").await
}

/// Creates a customer with a specific phone and price.
pub async fn create_custom_customer(
    db: &DatabaseConnection,
    owner_id: &str,
    name: &str,
    phone: &str,
    price: &str,
) -> Result<entities::customer::Model> {
    customer::create_customer(
        db,
        owner_id,
        ValidCustomer {
            name: name.to_string(),
            phone: phone.to_string(),
            address: None,
            price_per_jar: money::parse_amount("pricePerJar", price)?,
        },
    )
    .await
}

/// Creates an order of 2 jars given, 1 returned on `date` (`YYYY-MM-DD`).
pub async fn create_test_order(
    db: &DatabaseConnection,
    owner_id: &str,
    customer_id: i64,
    date: &str,
) -> Result<entities::order::Model> {
    create_custom_order(db, owner_id, customer_id, 2, 1, date).await
}

/// Creates an order with specific jar counts.
pub async fn create_custom_order(
    db: &DatabaseConnection,
    owner_id: &str,
    customer_id: i64,
    given_jars: i32,
    returned_jars: i32,
    date: &str,
) -> Result<entities::order::Model> {
    order::create_order(
        db,
        owner_id,
        ValidOrder {
            customer_id,
            given_jars,
            returned_jars,
            date: parse_date("date", date)?,
        },
    )
    .await
}

/// Records a payment of `amount` on `date`.
pub async fn create_test_payment(
    db: &DatabaseConnection,
    owner_id: &str,
    customer_id: i64,
    amount: &str,
    date: &str,
) -> Result<entities::payment::Model> {
    payment::record_payment(
        db,
        owner_id,
        ValidPayment {
            customer_id,
            amount: money::parse_amount("amount", amount)?,
            date: parse_date("date", date)?,
            note: None,
        },
    )
    .await
}
