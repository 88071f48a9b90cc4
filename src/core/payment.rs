//! Payment business logic - the collections ledger.
//!
//! Recording a payment never touches orders. Callers that display the monthly
//! report must reload it after a payment is recorded.

use crate::{
    core::{customer::get_customer, money, validation::ValidPayment},
    entities::{Payment, payment},
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, warn};

/// Records money received from one of the owner's customers.
///
/// # Errors
/// [`crate::errors::Error::CustomerNotFound`] if the customer is not the owner's.
pub async fn record_payment(
    db: &DatabaseConnection,
    owner_id: &str,
    input: ValidPayment,
) -> Result<payment::Model> {
    let customer = get_customer(db, owner_id, input.customer_id).await?;

    let payment = payment::ActiveModel {
        customer_id: Set(customer.id),
        amount: Set(money::to_storage(input.amount)),
        date: Set(input.date),
        note: Set(input.note),
        user_id: Set(owner_id.to_string()),
        ..Default::default()
    };

    let result = payment.insert(db).await?;
    info!(
        owner_id,
        customer_id = customer.id,
        payment_id = result.id,
        amount = %result.amount,
        "Recorded payment"
    );
    Ok(result)
}

/// Payment history of one of the owner's customers, newest first.
pub async fn list_payments_for_customer(
    db: &DatabaseConnection,
    owner_id: &str,
    customer_id: i64,
) -> Result<Vec<payment::Model>> {
    let customer = get_customer(db, owner_id, customer_id).await?;

    Payment::find()
        .filter(payment::Column::CustomerId.eq(customer.id))
        .order_by_desc(payment::Column::Date)
        .order_by_desc(payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Payments recorded by the owner with `start <= date < end`.
pub async fn list_payments_between(
    db: &DatabaseConnection,
    owner_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<payment::Model>> {
    Payment::find()
        .filter(payment::Column::UserId.eq(owner_id))
        .filter(payment::Column::Date.gte(start))
        .filter(payment::Column::Date.lt(end))
        .order_by_asc(payment::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sums stored payment amounts, skipping (and logging) unreadable ones.
///
/// A sum too large to represent saturates at [`Decimal::MAX`].
#[must_use]
pub fn total_amount(payments: &[payment::Model]) -> Decimal {
    let amounts = payments
        .iter()
        .filter_map(|p| match money::parse_amount("amount", &p.amount) {
            Ok(amount) => Some(amount),
            Err(e) => {
                warn!(payment_id = p.id, error = %e, "Skipping unreadable payment amount");
                None
            }
        });

    money::checked_sum(amounts).unwrap_or_else(|| {
        warn!("Payment total overflowed");
        Decimal::MAX
    })
}
