//! Raw element values as the host reports them.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::FormItem;

/// The value held by a form element.
///
/// The shape depends on the element kind. Geometry captures, file uploads and
/// document scans are carried so they can be reported, but never reach SQL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ElementValue {
    Boolean(bool),
    Text(String),
    Number(f64),
    /// Low and high bound of a range slider.
    NumberRange(f64, f64),
    DateTime(DateTime<Utc>),
    DateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Selected items of a pick-list element.
    Items(Vec<FormItem>),
    Geometry(serde_json::Value),
    Files(Vec<String>),
    Scan(serde_json::Value),
}

impl ElementValue {
    /// A date/time in any zone, stored as UTC.
    pub fn date_time<Tz: TimeZone>(value: DateTime<Tz>) -> Self {
        ElementValue::DateTime(value.with_timezone(&Utc))
    }

    /// A date range in any zone, stored as UTC.
    pub fn date_range<Tz: TimeZone>(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        ElementValue::DateRange {
            start: start.with_timezone(&Utc),
            end: end.with_timezone(&Utc),
        }
    }

    /// Selected item values.
    pub fn items<I>(values: I) -> Self
    where
        I: IntoIterator<Item = serde_json::Value>,
    {
        ElementValue::Items(
            values
                .into_iter()
                .map(|value| FormItem::new("", label_for(&value), value))
                .collect(),
        )
    }

    /// Converts a configured literal into an element value.
    ///
    /// Arrays become item selections; `null` and objects have no element value.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(ElementValue::Boolean(*b)),
            serde_json::Value::Number(n) => n.as_f64().map(ElementValue::Number),
            serde_json::Value::String(s) => Some(ElementValue::Text(s.clone())),
            serde_json::Value::Array(values) => Some(ElementValue::items(values.iter().cloned())),
            serde_json::Value::Null | serde_json::Value::Object(_) => None,
        }
    }

    /// Name of the value shape, used in error reports.
    pub fn shape(&self) -> &'static str {
        match self {
            ElementValue::Boolean(_) => "boolean",
            ElementValue::Text(_) => "text",
            ElementValue::Number(_) => "number",
            ElementValue::NumberRange(..) => "numberRange",
            ElementValue::DateTime(_) => "dateTime",
            ElementValue::DateRange { .. } => "dateRange",
            ElementValue::Items(_) => "items",
            ElementValue::Geometry(_) => "geometry",
            ElementValue::Files(_) => "files",
            ElementValue::Scan(_) => "scan",
        }
    }

    /// Whether the value counts as entered.
    ///
    /// Zero is a value. Empty text, `false`, `NaN` and an empty selection are not.
    pub fn is_present(&self) -> bool {
        match self {
            ElementValue::Boolean(b) => *b,
            ElementValue::Text(s) => !s.is_empty(),
            ElementValue::Number(n) => !n.is_nan(),
            ElementValue::Items(items) => !items.is_empty(),
            ElementValue::NumberRange(..)
            | ElementValue::DateTime(_)
            | ElementValue::DateRange { .. }
            | ElementValue::Geometry(_)
            | ElementValue::Files(_)
            | ElementValue::Scan(_) => true,
        }
    }

    /// The plain value(s) used to match items: item values for a selection,
    /// the scalar itself otherwise.
    pub fn item_values(&self) -> Vec<serde_json::Value> {
        match self {
            ElementValue::Items(items) => items.iter().map(|i| i.value.clone()).collect(),
            ElementValue::Boolean(b) => vec![serde_json::Value::Bool(*b)],
            ElementValue::Text(s) => vec![serde_json::Value::String(s.clone())],
            ElementValue::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .into_iter()
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Display label for a bare item value.
pub(crate) fn label_for(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use serde_json::json;

    #[test]
    fn test_presence() {
        assert!(ElementValue::Number(0.0).is_present());
        assert!(!ElementValue::Number(f64::NAN).is_present());
        assert!(!ElementValue::Text(String::new()).is_present());
        assert!(!ElementValue::Boolean(false).is_present());
        assert!(!ElementValue::Items(vec![]).is_present());
        assert!(ElementValue::Files(vec![]).is_present());
    }

    #[test]
    fn test_from_json() {
        assert_eq!(ElementValue::from_json(&json!("Active")), Some(ElementValue::Text("Active".into())));
        assert_eq!(ElementValue::from_json(&json!(0)), Some(ElementValue::Number(0.0)));
        assert_eq!(ElementValue::from_json(&json!(null)), None);

        let Some(ElementValue::Items(items)) = ElementValue::from_json(&json!([1, "two"])) else {
            panic!("expected items");
        };
        assert_eq!(items[0].label, "1");
        assert_eq!(items[1].value, json!("two"));
    }

    #[test]
    fn test_date_time_converts_to_utc() {
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = zone.with_ymd_and_hms(2024, 3, 1, 1, 30, 0).unwrap();
        let ElementValue::DateTime(utc) = ElementValue::date_time(local) else {
            panic!("expected date time");
        };
        assert_eq!(utc.to_rfc3339(), "2024-02-29T23:30:00+00:00");
    }

    #[test]
    fn test_tagged_json() {
        let value: ElementValue = serde_json::from_str(r#"{ "type": "numberRange", "value": [1, 5] }"#).unwrap();
        assert_eq!(value, ElementValue::NumberRange(1.0, 5.0));
        assert_eq!(value.shape(), "numberRange");
    }
}
