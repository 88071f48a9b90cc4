//! Input validation - turns raw request payloads into typed, checked values.
//!
//! Browser forms post numbers as strings, so numeric fields accept either a JSON
//! number or a numeric string. Nothing that fails here ever reaches the database
//! or the report aggregation.

use crate::{
    core::money,
    errors::{Error, Result},
};
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::LazyLock;

/// Longest accepted customer name.
pub const MAX_NAME_LEN: usize = 100;
/// Longest accepted normalized phone number.
pub const MAX_PHONE_LEN: usize = 15;
/// Longest accepted address or payment note.
pub const MAX_TEXT_LEN: usize = 255;

// Indian mobile numbers, optionally prefixed with +91, 0 or 91.
#[allow(clippy::expect_used)] // Static pattern, checked by tests
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+91[\-\s]?)?0?(91)?[6789]\d{9}$").expect("phone pattern is valid")
});

/// A field that may arrive as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    /// JSON number
    Number(serde_json::Number),
    /// JSON string
    Text(String),
}

impl NumberOrText {
    fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }
}

impl From<i64> for NumberOrText {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for NumberOrText {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Raw customer payload (create and update share one shape).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    /// Customer name
    pub name: String,
    /// Mobile number as typed
    pub phone: String,
    /// Optional delivery address
    #[serde(default)]
    pub address: Option<String>,
    /// Price per jar
    pub price_per_jar: NumberOrText,
}

/// Checked customer fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCustomer {
    /// Trimmed name
    pub name: String,
    /// Phone with spaces and hyphens removed
    pub phone: String,
    /// Trimmed address, `None` when blank
    pub address: Option<String>,
    /// Price per jar
    pub price_per_jar: Decimal,
}

/// Raw order payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    /// Customer receiving the jars
    pub customer_id: NumberOrText,
    /// Jars delivered
    pub given_jars: NumberOrText,
    /// Empties collected
    pub returned_jars: NumberOrText,
    /// Delivery date
    pub date: String,
}

/// Checked order fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidOrder {
    /// Customer receiving the jars
    pub customer_id: i64,
    /// Jars delivered
    pub given_jars: i32,
    /// Empties collected
    pub returned_jars: i32,
    /// Delivery date
    pub date: NaiveDate,
}

/// Raw payment payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    /// Paying customer
    pub customer_id: NumberOrText,
    /// Amount received
    pub amount: NumberOrText,
    /// Date received
    pub date: String,
    /// Optional remark
    #[serde(default)]
    pub note: Option<String>,
}

/// Checked payment fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPayment {
    /// Paying customer
    pub customer_id: i64,
    /// Amount received, greater than zero
    pub amount: Decimal,
    /// Date received
    pub date: NaiveDate,
    /// Trimmed remark, `None` when blank
    pub note: Option<String>,
}

fn optional_text(field: &str, value: Option<&str>) -> Result<Option<String>> {
    let Some(text) = value.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(Error::validation(
            field,
            format!("must be at most {MAX_TEXT_LEN} characters"),
        ));
    }
    Ok(Some(text.to_string()))
}

fn parse_id(field: &str, value: &NumberOrText) -> Result<i64> {
    let text = value.as_text();
    match text.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::validation(field, format!("'{text}' is not a valid ID"))),
    }
}

fn parse_jars(field: &str, value: &NumberOrText) -> Result<i32> {
    let text = value.as_text();
    let jars = text
        .parse::<i32>()
        .map_err(|_| Error::validation(field, format!("'{text}' is not a whole number")))?;
    if jars < 0 {
        return Err(Error::validation(field, "must not be negative"));
    }
    Ok(jars)
}

/// Parses `YYYY-MM-DD`, or the calendar date of an RFC 3339 timestamp.
///
/// The date part of a timestamp is taken as written; no timezone conversion is applied.
pub fn parse_date(field: &str, text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| Error::validation(field, format!("'{trimmed}' is not a date (YYYY-MM-DD)")))
}

/// Checks and normalizes a mobile number.
pub fn normalize_phone(phone: &str) -> Result<String> {
    let trimmed = phone.trim();
    if !PHONE_PATTERN.is_match(trimmed) {
        return Err(Error::validation("phone", "invalid Indian phone number format"));
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if cleaned.len() > MAX_PHONE_LEN {
        return Err(Error::validation(
            "phone",
            format!("must be at most {MAX_PHONE_LEN} characters"),
        ));
    }
    Ok(cleaned)
}

/// Validates a customer payload.
pub fn validate_customer(input: &CustomerInput) -> Result<ValidCustomer> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(Error::validation("name", "must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(Error::validation(
            "name",
            format!("must be at most {MAX_NAME_LEN} characters"),
        ));
    }

    Ok(ValidCustomer {
        name: name.to_string(),
        phone: normalize_phone(&input.phone)?,
        address: optional_text("address", input.address.as_deref())?,
        price_per_jar: money::parse_amount("pricePerJar", &input.price_per_jar.as_text())?,
    })
}

/// Validates an order payload.
///
/// Returning more jars than were given is allowed; the resulting negative
/// balance is reported as-is.
pub fn validate_order(input: &OrderInput) -> Result<ValidOrder> {
    Ok(ValidOrder {
        customer_id: parse_id("customerId", &input.customer_id)?,
        given_jars: parse_jars("givenJars", &input.given_jars)?,
        returned_jars: parse_jars("returnedJars", &input.returned_jars)?,
        date: parse_date("date", &input.date)?,
    })
}

/// Validates a payment payload.
pub fn validate_payment(input: &PaymentInput) -> Result<ValidPayment> {
    let amount = money::parse_amount("amount", &input.amount.as_text())?;
    if amount.is_zero() {
        return Err(Error::validation("amount", "must be greater than zero"));
    }

    Ok(ValidPayment {
        customer_id: parse_id("customerId", &input.customer_id)?,
        amount,
        date: parse_date("date", &input.date)?,
        note: optional_text("note", input.note.as_deref())?,
    })
}
