//! Per-record validation and type coercion
//!
//! Deliberately minimal policy: only the presence of the required
//! fields is checked, and only the amount is coerced. Everything else
//! passes through untouched.

use bigdecimal::BigDecimal;
use serde_json::Value;
use std::str::FromStr;
use thiserror::Error;

use crate::types::{Invoice, RawRecord, FIELD_AMOUNT, FIELD_CUSTOMER, FIELD_ID, FIELD_ISSUED_AT};

/// Fields every raw record must carry
pub const REQUIRED_FIELDS: [&str; 4] = [FIELD_ID, FIELD_CUSTOMER, FIELD_AMOUNT, FIELD_ISSUED_AT];

/// Why a record was rejected
///
/// Rejections are returned, not logged here; the caller owns the
/// logging context (which object the record came from).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("missing required field `{field}` (id: {})", .identifier.as_deref().unwrap_or("unknown"))]
    MissingField {
        field: &'static str,
        /// The record's id, when present, for offline remediation
        identifier: Option<String>,
    },

    #[error("amount is not numeric (id: {identifier}): {given}")]
    BadAmount { identifier: String, given: String },
}

/// Check a raw record and produce a normalized invoice
///
/// Pure function; no side effects.
pub fn validate(raw: &RawRecord) -> Result<Invoice, Rejection> {
    let id = match raw.get(FIELD_ID) {
        Some(value) => coerce_string(value),
        None => {
            return Err(Rejection::MissingField {
                field: FIELD_ID,
                identifier: None,
            })
        }
    };

    for field in [FIELD_CUSTOMER, FIELD_AMOUNT, FIELD_ISSUED_AT] {
        if !raw.contains_key(field) {
            return Err(Rejection::MissingField {
                field,
                identifier: Some(id),
            });
        }
    }

    let amount = decimal_amount(&raw[FIELD_AMOUNT]).map_err(|given| Rejection::BadAmount {
        identifier: id.clone(),
        given,
    })?;

    let extra = raw
        .iter()
        .filter(|(key, _)| !REQUIRED_FIELDS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(Invoice {
        customer: coerce_string(&raw[FIELD_CUSTOMER]),
        issued_at: coerce_string(&raw[FIELD_ISSUED_AT]),
        id,
        amount,
        extra,
    })
}

/// Convert the decoded amount to an exact decimal
///
/// The conversion routes through the value's textual form so the
/// decimal never inherits binary floating-point rounding error
/// (a JSON `19.99` must become exactly `19.99`, not
/// `19.990000000000002`). Numeric strings are accepted too.
fn decimal_amount(value: &Value) -> Result<BigDecimal, String> {
    match value {
        Value::Number(number) => {
            let text = number.to_string();
            BigDecimal::from_str(&text).map_err(|_| text)
        }
        Value::String(text) => BigDecimal::from_str(text.trim()).map_err(|_| text.clone()),
        other => Err(other.to_string()),
    }
}

/// Render a field as a string without type-checking it
///
/// Scalar strings pass through; any other JSON value keeps its JSON
/// text. Presence is the only requirement on non-amount fields.
fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
