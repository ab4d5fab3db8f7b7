use std::collections::HashMap;

use bson::Bson;
use serde::{Deserialize, Serialize};

/// Declared type of a filterable field. Fields without a declaration are strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    String,
    Number,
    Date,
    Boolean,
}

/// Field name → declared type.
pub type FieldTypes = HashMap<String, FieldType>;

/// Cast one raw filter value to the field's declared type.
///
/// Casting never fails: a number that does not parse becomes `NaN` (which
/// compares unequal to everything) and a date that does not parse stays a
/// string.
pub fn cast(raw: &str, field_type: Option<FieldType>) -> Bson {
    match field_type {
        Some(FieldType::Number) => cast_number(raw),
        Some(FieldType::Date) => cast_date(raw),
        Some(FieldType::Boolean) => Bson::Boolean(raw == "true"),
        Some(FieldType::String) | None => Bson::String(raw.to_string()),
    }
}

fn cast_number(raw: &str) -> Bson {
    let raw = raw.trim();
    if raw.is_empty() {
        return Bson::Int64(0);
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Bson::Int64(n);
    }
    match raw.parse::<f64>() {
        Ok(f) => Bson::Double(f),
        Err(_) => Bson::Double(f64::NAN),
    }
}

fn cast_date(raw: &str) -> Bson {
    let raw = raw.trim();
    // Values arrive lower-cased; RFC 3339 separators are restored first.
    let upper = raw.to_ascii_uppercase();
    if let Ok(dt) = bson::DateTime::parse_rfc3339_str(&upper) {
        return Bson::DateTime(dt);
    }
    // Plain calendar dates are taken as UTC midnight.
    match bson::DateTime::parse_rfc3339_str(format!("{upper}T00:00:00Z")) {
        Ok(dt) => Bson::DateTime(dt),
        Err(_) => Bson::String(raw.to_string()),
    }
}
