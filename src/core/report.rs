//! Monthly reconciliation report.
//!
//! For every customer the report sums, over the orders dated in the reference
//! month, the value of the jars delivered and the jars still out (given minus
//! returned). The aggregation functions are pure: they take snapshots of the
//! owner's customers and orders and hold no state between calls, so the report
//! is simply recomputed whenever the underlying data changes.
//!
//! Payments are not subtracted from the pending amount. The month's collections
//! are reported next to it as a separate figure.

use crate::{
    core::{customer, money, order, payment},
    entities::{customer as customer_entity, order as order_entity},
    errors::{Error, Result},
};
use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Per-customer figures for one month. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    /// Customer ID
    pub id: i64,
    /// Customer name
    pub name: String,
    /// Sum of `given_jars * price_per_jar` over the month's orders
    pub total_amount: Decimal,
    /// Sum of `given_jars - returned_jars`; negative when more came back than went out
    pub pending_jars: i64,
    /// The stored price could not be read; `total_amount` counts it as zero
    pub price_error: bool,
}

impl CustomerSummary {
    /// Whether money is owed or the jar balance is off zero in either direction.
    #[must_use]
    pub fn has_outstanding_balance(&self) -> bool {
        self.total_amount > Decimal::ZERO || self.pending_jars != 0
    }
}

/// Dashboard tiles computed from all summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    /// Sum of every `total_amount`
    pub total_pending_amount: Decimal,
    /// Sum of every `pending_jars`
    pub total_pending_jars: i64,
    /// Customers with a positive `total_amount`
    pub active_customer_count: usize,
}

/// Everything the reports page shows for one month.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    /// `YYYY-MM`
    pub month: String,
    /// Human-readable month, e.g. `October 2026`
    pub month_label: String,
    /// Customers with something outstanding, in customer order
    pub customers: Vec<CustomerSummary>,
    /// Tiles over all customers, including settled ones
    pub totals: ReportTotals,
    /// Payments dated in the month; informational, not netted
    pub collected_amount: Decimal,
}

/// Whether `date` lies in the same calendar month and year as `reference`.
#[must_use]
pub fn same_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

/// First day of the reference month and first day of the following month.
pub fn month_bounds(reference: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let start = reference
        .with_day(1)
        .ok_or_else(|| Error::validation("month", "no first day for month"))?;
    let end = start
        .checked_add_months(Months::new(1))
        .ok_or_else(|| Error::validation("month", "month is out of range"))?;
    Ok((start, end))
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .map_err(|_| Error::validation("month", format!("'{trimmed}' is not a month (YYYY-MM)")))
}

/// Builds one summary per customer from the orders in the reference month.
///
/// Customers without orders in the month appear with zero totals. Output order
/// follows `customers`. A customer whose price cannot be parsed, or whose
/// amount would overflow, is kept with `total_amount` zero and `price_error` set.
#[must_use]
pub fn summarize_month(
    customers: &[customer_entity::Model],
    orders: &[order_entity::Model],
    reference: NaiveDate,
) -> Vec<CustomerSummary> {
    // customer_id -> (jars given, jars pending)
    let mut jars: HashMap<i64, (i64, i64)> = HashMap::new();
    for order in orders.iter().filter(|o| same_month(o.date, reference)) {
        let entry = jars.entry(order.customer_id).or_default();
        entry.0 += i64::from(order.given_jars);
        entry.1 += i64::from(order.given_jars) - i64::from(order.returned_jars);
    }

    customers
        .iter()
        .map(|customer| {
            let (given, pending_jars) = jars.get(&customer.id).copied().unwrap_or_default();
            let value = match money::parse_amount("pricePerJar", &customer.price_per_jar) {
                Ok(price) => money::jars_value(given, price),
                Err(e) => {
                    warn!(customer_id = customer.id, error = %e, "Counting unreadable price as zero");
                    None
                }
            };
            let (total_amount, price_error) = match value {
                Some(amount) => (amount, false),
                None => (Decimal::ZERO, true),
            };

            CustomerSummary {
                id: customer.id,
                name: customer.name.clone(),
                total_amount,
                pending_jars,
                price_error,
            }
        })
        .collect()
}

/// Reduces summaries to the three dashboard figures.
///
/// Totals too large to represent saturate instead of failing the report.
#[must_use]
pub fn compose_totals(summaries: &[CustomerSummary]) -> ReportTotals {
    ReportTotals {
        total_pending_amount: money::checked_sum(summaries.iter().map(|s| s.total_amount))
            .unwrap_or_else(|| {
                warn!("Pending amount total overflowed");
                Decimal::MAX
            }),
        total_pending_jars: summaries
            .iter()
            .fold(0_i64, |sum, s| sum.saturating_add(s.pending_jars)),
        active_customer_count: summaries
            .iter()
            .filter(|s| s.total_amount > Decimal::ZERO)
            .count(),
    }
}

/// Summaries worth a row in the report table; fully settled customers are hidden.
///
/// A negative jar balance (more returned than given) keeps the row visible.
#[must_use]
pub fn outstanding(summaries: &[CustomerSummary]) -> Vec<&CustomerSummary> {
    summaries
        .iter()
        .filter(|s| s.has_outstanding_balance())
        .collect()
}

/// Loads the owner's customers, orders and the month's payments, then builds the report.
pub async fn monthly_report(
    db: &DatabaseConnection,
    owner_id: &str,
    reference: NaiveDate,
) -> Result<MonthlyReport> {
    let (start, end) = month_bounds(reference)?;

    let customers = customer::list_all_customers(db, owner_id).await?;
    let orders = order::list_all_orders(db, owner_id).await?;
    let payments = payment::list_payments_between(db, owner_id, start, end).await?;

    let summaries = summarize_month(&customers, &orders, reference);
    let totals = compose_totals(&summaries);

    debug!(
        owner_id,
        month = %start.format("%Y-%m"),
        customers = customers.len(),
        orders = orders.len(),
        "Built monthly report"
    );

    Ok(MonthlyReport {
        month: start.format("%Y-%m").to_string(),
        month_label: start.format("%B %Y").to_string(),
        customers: outstanding(&summaries).into_iter().cloned().collect(),
        totals,
        collected_amount: payment::total_amount(&payments),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn customer(id: i64, price: &str) -> customer_entity::Model {
        customer_entity::Model {
            id,
            name: format!("Customer {id}"),
            phone: format!("98765432{id:02}"),
            address: None,
            price_per_jar: price.to_string(),
            user_id: "owner".to_string(),
        }
    }

    fn order(id: i64, customer_id: i64, given: i32, returned: i32, on: NaiveDate) -> order_entity::Model {
        order_entity::Model {
            id,
            customer_id,
            given_jars: given,
            returned_jars: returned,
            date: on,
        }
    }

    fn summary(total: i64, pending: i64) -> CustomerSummary {
        CustomerSummary {
            id: 1,
            name: "c".to_string(),
            total_amount: Decimal::from(total),
            pending_jars: pending,
            price_error: false,
        }
    }

    #[test]
    fn test_customer_without_orders_has_zero_totals() {
        let summaries = summarize_month(&[customer(1, "10.00")], &[], date(2026, 10, 18));

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_amount, Decimal::ZERO);
        assert_eq!(summaries[0].pending_jars, 0);
    }

    #[test]
    fn test_month_boundaries() {
        let reference = date(2026, 10, 18);
        let orders = vec![
            order(1, 1, 7, 0, date(2026, 9, 30)),  // last day of previous month
            order(2, 1, 2, 1, date(2026, 10, 1)),  // first day of current month
            order(3, 1, 4, 0, date(2025, 10, 15)), // same month, previous year
            order(4, 1, 9, 0, date(2026, 11, 1)),  // next month
        ];

        let summaries = summarize_month(&[customer(1, "10.00")], &orders, reference);
        assert_eq!(summaries[0].total_amount, Decimal::from(20));
        assert_eq!(summaries[0].pending_jars, 1);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let customers = vec![customer(1, "10.00"), customer(2, "7.50")];
        let orders = vec![
            order(1, 1, 5, 2, date(2026, 10, 2)),
            order(2, 2, 3, 0, date(2026, 10, 3)),
        ];
        let reference = date(2026, 10, 18);

        let first = summarize_month(&customers, &orders, reference);
        let second = summarize_month(&customers, &orders, reference);
        assert_eq!(first, second);
    }

    #[test]
    fn test_worked_example() {
        let orders = vec![
            order(1, 1, 5, 2, date(2026, 10, 4)),
            order(2, 1, 3, 3, date(2026, 10, 9)),
        ];

        let summaries = summarize_month(&[customer(1, "10.00")], &orders, date(2026, 10, 18));
        assert_eq!(summaries[0].total_amount, Decimal::from(80));
        assert_eq!(summaries[0].pending_jars, 3);
        assert!(!summaries[0].price_error);
    }

    #[test]
    fn test_compose_totals() {
        let totals = compose_totals(&[summary(80, 3), summary(0, 0)]);

        assert_eq!(totals.total_pending_amount, Decimal::from(80));
        assert_eq!(totals.total_pending_jars, 3);
        assert_eq!(totals.active_customer_count, 1);
    }

    #[test]
    fn test_outstanding_hides_settled_and_keeps_negative_balance() {
        let summaries = vec![summary(0, 0), summary(0, -1), summary(30, 0)];

        let shown = outstanding(&summaries);
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].pending_jars, -1);
        assert_eq!(shown[1].total_amount, Decimal::from(30));
    }

    #[test]
    fn test_output_follows_customer_order() {
        let customers = vec![customer(3, "5"), customer(1, "5"), customer(2, "5")];
        let ids: Vec<i64> = summarize_month(&customers, &[], date(2026, 10, 1))
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_malformed_price_is_flagged_not_fatal() {
        let customers = vec![customer(1, "ten"), customer(2, "10.00")];
        let orders = vec![
            order(1, 1, 4, 1, date(2026, 10, 2)),
            order(2, 2, 1, 0, date(2026, 10, 2)),
        ];

        let summaries = summarize_month(&customers, &orders, date(2026, 10, 18));
        assert!(summaries[0].price_error);
        assert_eq!(summaries[0].total_amount, Decimal::ZERO);
        assert_eq!(summaries[0].pending_jars, 3);
        assert!(!summaries[1].price_error);
        assert_eq!(summaries[1].total_amount, Decimal::from(10));
    }

    #[test]
    fn test_oversized_stored_price_is_flagged() {
        // Written before the amount cap existed, or by another tool
        let customers = vec![customer(1, "79228162514264337593543950335"), customer(2, "10")];
        let orders = vec![
            order(1, 1, 2, 0, date(2026, 10, 2)),
            order(2, 2, 1, 0, date(2026, 10, 2)),
        ];

        let summaries = summarize_month(&customers, &orders, date(2026, 10, 18));
        assert!(summaries[0].price_error);
        assert_eq!(summaries[0].total_amount, Decimal::ZERO);
        assert_eq!(summaries[0].pending_jars, 2);
        assert_eq!(summaries[1].total_amount, Decimal::from(10));

        let totals = compose_totals(&summaries);
        assert_eq!(totals.total_pending_amount, Decimal::from(10));
        assert_eq!(totals.total_pending_jars, 3);
    }

    #[test]
    fn test_compose_totals_saturates_on_overflow() {
        let mut huge = summary(0, 1);
        huge.total_amount = Decimal::MAX;

        let totals = compose_totals(&[huge.clone(), huge]);
        assert_eq!(totals.total_pending_amount, Decimal::MAX);
        assert_eq!(totals.active_customer_count, 2);
    }

    #[test]
    fn test_decimal_prices_do_not_drift() {
        // 0.10 * 3 jars, accumulated across three orders
        let orders = vec![
            order(1, 1, 1, 0, date(2026, 10, 1)),
            order(2, 1, 1, 0, date(2026, 10, 2)),
            order(3, 1, 1, 0, date(2026, 10, 3)),
        ];
        let summaries = summarize_month(&[customer(1, "0.10")], &orders, date(2026, 10, 5));
        assert_eq!(summaries[0].total_amount, Decimal::new(30, 2));
    }

    #[test]
    fn test_month_helpers() {
        assert_eq!(
            month_bounds(date(2026, 12, 25)).unwrap(),
            (date(2026, 12, 1), date(2027, 1, 1))
        );
        assert_eq!(parse_month("2026-02").unwrap(), date(2026, 2, 1));
        assert!(parse_month("2026-13").is_err());
        assert!(parse_month("Oct").is_err());
    }

    #[tokio::test]
    async fn test_monthly_report_does_not_net_payments() -> Result<()> {
        let (db, owner, customer) = setup_with_customer().await?;
        create_custom_order(&db, &owner.id, customer.id, 8, 8, "2026-10-02").await?;
        // Paid in full, yet the pending amount still shows the full value
        create_test_payment(&db, &owner.id, customer.id, "80", "2026-10-10").await?;

        let report = monthly_report(&db, &owner.id, date(2026, 10, 18)).await?;

        assert_eq!(report.month, "2026-10");
        assert_eq!(report.month_label, "October 2026");
        assert_eq!(report.customers.len(), 1);
        assert_eq!(report.customers[0].total_amount, Decimal::from(80));
        assert_eq!(report.totals.total_pending_amount, Decimal::from(80));
        assert_eq!(report.collected_amount, Decimal::from(80));
        Ok(())
    }

    #[tokio::test]
    async fn test_monthly_report_is_scoped_to_owner() -> Result<()> {
        let (db, owner, customer) = setup_with_customer().await?;
        create_custom_order(&db, &owner.id, customer.id, 2, 0, "2026-10-02").await?;
        let other = create_test_user(&db, "other@example.com").await?;

        let report = monthly_report(&db, &other.id, date(2026, 10, 18)).await?;
        assert!(report.customers.is_empty());
        assert_eq!(report.totals.total_pending_jars, 0);
        assert_eq!(report.collected_amount, Decimal::ZERO);
        Ok(())
    }

    #[tokio::test]
    async fn test_monthly_report_reflects_new_orders() -> Result<()> {
        let (db, owner, customer) = setup_with_customer().await?;
        let reference = date(2026, 10, 18);

        let before = monthly_report(&db, &owner.id, reference).await?;
        assert!(before.customers.is_empty());

        create_custom_order(&db, &owner.id, customer.id, 3, 1, "2026-10-17").await?;
        let after = monthly_report(&db, &owner.id, reference).await?;
        assert_eq!(after.customers.len(), 1);
        assert_eq!(after.totals.total_pending_jars, 2);
        Ok(())
    }
}
