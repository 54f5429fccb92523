//! Literal formatting.

use chrono::{DateTime, Utc};

use crate::config::SearchField;
use crate::layer::{FieldMetadata, FieldType};
use crate::normalize::{format_number, NormalizedValue, Scalar};
use super::Operator;

/// Formats a normalized value as the right-hand side of a predicate on `field`.
///
/// Dates, date ranges and number ranges have fixed formats. Everything else is
/// quoted when the field holds text (`'%v%'` under `LIKE`), plain otherwise;
/// item selections become comma-separated lists.
pub fn format_value(value: &NormalizedValue, search_field: &SearchField, field: &FieldMetadata) -> String {
    match value {
        NormalizedValue::DateRange { start, end } => format_date_range(start, end),
        NormalizedValue::Date(date) => format_date(date),
        NormalizedValue::NumberRange { low, high } => format_number_range(*low, *high),
        NormalizedValue::Boolean(checked) => {
            let flag = Scalar::Integer(i64::from(*checked));
            format_scalar(&flag, search_field.operator, field.field_type)
        }
        NormalizedValue::Scalar(scalar) => format_scalar(scalar, search_field.operator, field.field_type),
        NormalizedValue::Items(items) => items
            .iter()
            .map(|item| format_item(item, field.field_type))
            .collect::<Vec<_>>()
            .join(","),
    }
}

/// `DATE 'YYYY-MM-DD' AND DATE 'YYYY-MM-DD'`, truncated to the UTC day.
pub fn format_date_range(start: &DateTime<Utc>, end: &DateTime<Utc>) -> String {
    format!(
        "DATE '{}' AND DATE '{}'",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
}

/// `TIMESTAMP 'YYYY-MM-DD HH:MM:SS'` in UTC, second precision.
pub fn format_date(date: &DateTime<Utc>) -> String {
    format!("TIMESTAMP '{}'", date.format("%Y-%m-%d %H:%M:%S"))
}

/// `<low> AND <high>`, never quoted.
pub fn format_number_range(low: f64, high: f64) -> String {
    format!("{} AND {}", format_number(low), format_number(high))
}

fn format_scalar(value: &Scalar, operator: Operator, field_type: FieldType) -> String {
    if !field_type.is_text() {
        return value.to_string();
    }
    match operator {
        Operator::Like => format!("'%{}%'", value),
        _ => format!("'{}'", value),
    }
}

fn format_item(value: &Scalar, field_type: FieldType) -> String {
    if field_type.is_text() {
        format!("'{}'", value)
    } else {
        value.to_string()
    }
}
