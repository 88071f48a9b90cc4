//! Customer business logic - Handles all customer-related operations.
//!
//! Every function takes the owning user's ID explicitly. A customer that exists
//! but belongs to another user is reported exactly like a missing one.

use crate::{
    core::{
        money,
        pagination::{Page, PageRequest, Pagination},
        validation::ValidCustomer,
    },
    entities::{Customer, Order, Payment, customer, order, payment},
    errors::{Error, Result},
};
use sea_orm::{
    Condition, FromQueryResult, QueryOrder, QuerySelect, Set, TransactionTrait,
    prelude::*,
    sea_query::{Expr, Func},
};
use serde::Serialize;
use tracing::{debug, info};

/// Minimal customer projection for pickers.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult, Serialize)]
pub struct CustomerOption {
    /// Customer ID
    pub id: i64,
    /// Customer name
    pub name: String,
}

/// Case-insensitive match on customer name, or substring match on phone.
///
/// Returns `None` for a blank query so callers can skip filtering.
pub(crate) fn search_condition(query: &str) -> Option<Condition> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let name = Expr::expr(Func::lower(Expr::col((customer::Entity, customer::Column::Name))))
        .like(format!("%{}%", query.to_lowercase()));
    let phone = Expr::col((customer::Entity, customer::Column::Phone)).like(format!("%{query}%"));

    Some(Condition::any().add(name).add(phone))
}

/// Lists one page of the owner's customers, optionally filtered by name or phone.
pub async fn list_customers(
    db: &DatabaseConnection,
    owner_id: &str,
    query: &str,
    page: PageRequest,
) -> Result<Page<customer::Model>> {
    let mut select = Customer::find().filter(customer::Column::UserId.eq(owner_id));
    if let Some(condition) = search_condition(query) {
        select = select.filter(condition);
    }

    let total = select.clone().count(db).await?;
    let items = select
        .order_by_asc(customer::Column::Id)
        .offset(page.offset())
        .limit(page.per_page)
        .all(db)
        .await?;

    debug!(owner_id, query, total, page = page.page, "Listed customers");

    Ok(Page {
        items,
        pagination: Pagination::new(page, total),
    })
}

/// Lists `{id, name}` for every customer of the owner, alphabetically.
pub async fn list_customer_options(
    db: &DatabaseConnection,
    owner_id: &str,
) -> Result<Vec<CustomerOption>> {
    Customer::find()
        .select_only()
        .column(customer::Column::Id)
        .column(customer::Column::Name)
        .filter(customer::Column::UserId.eq(owner_id))
        .order_by_asc(customer::Column::Name)
        .into_model::<CustomerOption>()
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists every customer of the owner in creation order.
pub async fn list_all_customers(
    db: &DatabaseConnection,
    owner_id: &str,
) -> Result<Vec<customer::Model>> {
    Customer::find()
        .filter(customer::Column::UserId.eq(owner_id))
        .order_by_asc(customer::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Fetches one of the owner's customers.
///
/// # Errors
/// [`Error::CustomerNotFound`] if the ID is unknown or owned by someone else.
pub async fn get_customer<C>(db: &C, owner_id: &str, customer_id: i64) -> Result<customer::Model>
where
    C: ConnectionTrait,
{
    Customer::find_by_id(customer_id)
        .filter(customer::Column::UserId.eq(owner_id))
        .one(db)
        .await?
        .ok_or(Error::CustomerNotFound { id: customer_id })
}

async fn ensure_phone_available(
    db: &DatabaseConnection,
    owner_id: &str,
    phone: &str,
    except_id: Option<i64>,
) -> Result<()> {
    let mut select = Customer::find()
        .filter(customer::Column::UserId.eq(owner_id))
        .filter(customer::Column::Phone.eq(phone));
    if let Some(id) = except_id {
        select = select.filter(customer::Column::Id.ne(id));
    }

    if select.count(db).await? > 0 {
        return Err(Error::Conflict {
            message: format!("a customer with phone {phone} already exists"),
        });
    }
    Ok(())
}

/// Creates a customer for the owner.
///
/// # Errors
/// [`Error::Conflict`] if the owner already has a customer with this phone number.
pub async fn create_customer(
    db: &DatabaseConnection,
    owner_id: &str,
    input: ValidCustomer,
) -> Result<customer::Model> {
    ensure_phone_available(db, owner_id, &input.phone, None).await?;

    let customer = customer::ActiveModel {
        name: Set(input.name),
        phone: Set(input.phone),
        address: Set(input.address),
        price_per_jar: Set(money::to_storage(input.price_per_jar)),
        user_id: Set(owner_id.to_string()),
        ..Default::default()
    };

    let result = customer.insert(db).await?;
    info!(owner_id, customer_id = result.id, "Created customer");
    Ok(result)
}

/// Replaces the editable fields of one of the owner's customers.
pub async fn update_customer(
    db: &DatabaseConnection,
    owner_id: &str,
    customer_id: i64,
    input: ValidCustomer,
) -> Result<customer::Model> {
    let existing = get_customer(db, owner_id, customer_id).await?;
    ensure_phone_available(db, owner_id, &input.phone, Some(customer_id)).await?;

    let mut active_model: customer::ActiveModel = existing.into();
    active_model.name = Set(input.name);
    active_model.phone = Set(input.phone);
    active_model.address = Set(input.address);
    active_model.price_per_jar = Set(money::to_storage(input.price_per_jar));

    let result = active_model.update(db).await?;
    info!(owner_id, customer_id, "Updated customer");
    Ok(result)
}

/// Deletes one of the owner's customers together with its orders and payments.
pub async fn delete_customer(db: &DatabaseConnection, owner_id: &str, customer_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let existing = get_customer(&txn, owner_id, customer_id).await?;

    Order::delete_many()
        .filter(order::Column::CustomerId.eq(existing.id))
        .exec(&txn)
        .await?;
    Payment::delete_many()
        .filter(payment::Column::CustomerId.eq(existing.id))
        .exec(&txn)
        .await?;
    Customer::delete_by_id(existing.id).exec(&txn).await?;

    txn.commit().await?;

    info!(owner_id, customer_id, "Deleted customer");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_create_customer_stores_two_decimal_price() -> Result<()> {
        let (db, owner) = setup_with_owner().await?;

        let customer = create_custom_customer(&db, &owner.id, "Asha", "9876543210", "12.5").await?;
        assert_eq!(customer.price_per_jar, "12.50");
        assert_eq!(customer.user_id, owner.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_phone_is_conflict_within_owner_only() -> Result<()> {
        let (db, owner) = setup_with_owner().await?;
        let other = create_test_user(&db, "other@example.com").await?;

        create_custom_customer(&db, &owner.id, "Asha", "9876543210", "10").await?;
        let duplicate = create_custom_customer(&db, &owner.id, "Bela", "9876543210", "10").await;
        assert!(matches!(duplicate, Err(Error::Conflict { .. })));

        // Same number under another supplier is fine
        create_custom_customer(&db, &other.id, "Bela", "9876543210", "10").await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_list_customers_searches_name_and_phone() -> Result<()> {
        let (db, owner) = setup_with_owner().await?;
        create_custom_customer(&db, &owner.id, "Ravi Kumar", "9876543210", "10").await?;
        create_custom_customer(&db, &owner.id, "Sita Devi", "9123456789", "10").await?;

        let by_name = list_customers(&db, &owner.id, "RAVI", PageRequest::new(1, 10)).await?;
        assert_eq!(by_name.items.len(), 1);
        assert_eq!(by_name.items[0].name, "Ravi Kumar");

        let by_phone = list_customers(&db, &owner.id, "23456", PageRequest::new(1, 10)).await?;
        assert_eq!(by_phone.items.len(), 1);
        assert_eq!(by_phone.items[0].name, "Sita Devi");

        let all = list_customers(&db, &owner.id, "", PageRequest::new(1, 10)).await?;
        assert_eq!(all.pagination.total, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_customers_paginates() -> Result<()> {
        let (db, owner) = setup_with_owner().await?;
        for i in 0..12 {
            create_custom_customer(
                &db,
                &owner.id,
                &format!("Customer {i}"),
                &format!("98765432{i:02}"),
                "10",
            )
            .await?;
        }

        let second = list_customers(&db, &owner.id, "", PageRequest::new(2, 10)).await?;
        assert_eq!(second.items.len(), 2);
        assert_eq!(second.pagination.total, 12);
        assert_eq!(second.pagination.page_count, 2);
        assert_eq!(second.pagination.current_page, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_customers_are_scoped_to_owner() -> Result<()> {
        let (db, owner) = setup_with_owner().await?;
        let other = create_test_user(&db, "other@example.com").await?;
        let theirs = create_test_customer(&db, &other.id, "Theirs").await?;

        assert!(list_all_customers(&db, &owner.id).await?.is_empty());
        assert!(matches!(
            get_customer(&db, &owner.id, theirs.id).await,
            Err(Error::CustomerNotFound { .. })
        ));
        assert!(matches!(
            delete_customer(&db, &owner.id, theirs.id).await,
            Err(Error::CustomerNotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_customer() -> Result<()> {
        let (db, owner) = setup_with_owner().await?;
        let customer = create_test_customer(&db, &owner.id, "Asha").await?;

        let updated = update_customer(
            &db,
            &owner.id,
            customer.id,
            ValidCustomer {
                name: "Asha R".to_string(),
                phone: customer.phone.clone(),
                address: Some("12 Lake Road".to_string()),
                price_per_jar: Decimal::from(15),
            },
        )
        .await?;

        assert_eq!(updated.name, "Asha R");
        assert_eq!(updated.address.as_deref(), Some("12 Lake Road"));
        assert_eq!(updated.price_per_jar, "15.00");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_customer_removes_orders() -> Result<()> {
        let (db, owner, customer) = setup_with_customer().await?;
        create_test_order(&db, &owner.id, customer.id, "2026-10-01").await?;

        delete_customer(&db, &owner.id, customer.id).await?;

        assert!(list_all_customers(&db, &owner.id).await?.is_empty());
        assert_eq!(Order::find().count(&db).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_customer_options_sorted_by_name() -> Result<()> {
        let (db, owner) = setup_with_owner().await?;
        create_custom_customer(&db, &owner.id, "Zoya", "9876543210", "10").await?;
        create_custom_customer(&db, &owner.id, "Arun", "9876543211", "10").await?;

        let options = list_customer_options(&db, &owner.id).await?;
        let names: Vec<&str> = options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Arun", "Zoya"]);
        Ok(())
    }
}
