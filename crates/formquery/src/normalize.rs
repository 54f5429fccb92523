//! Value normalization.
//!
//! Turns an element's raw, shape-polymorphic value into one of a closed set
//! of shapes the SQL formatter understands. This is the only place that
//! inspects raw element values.

use std::fmt;
use chrono::{DateTime, Utc};

use crate::config::SearchField;
use crate::diagnostic::{QueryError, Result};
use crate::form::{ElementType, ElementValue, FormElement};

/// A single text or numeric value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    /// An integral item value, kept exact beyond `f64` precision.
    Integer(i64),
    Number(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

impl Scalar {
    /// Converts an item value. `null` has no scalar form.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(Scalar::Text(s.clone())),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Scalar::Integer(i)),
                None => n.as_f64().map(Scalar::Number),
            },
            other => Some(Scalar::Text(other.to_string())),
        }
    }
}

/// The canonical shapes a search value can take.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedValue {
    /// A checkbox state, written as `1` or `0`.
    Boolean(bool),
    Scalar(Scalar),
    Date(DateTime<Utc>),
    DateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    NumberRange {
        low: f64,
        high: f64,
    },
    /// Selected item values of a multi-choice element.
    Items(Vec<Scalar>),
}

/// Normalizes the value of `element`, the form input for `search_field`.
///
/// Returns `Ok(None)` when the element holds no usable value. A checked
/// checkbox is `true`; an unchecked one is `false` only when the element
/// carries an explicit value, otherwise it has no value.
///
/// # Errors
///
/// [`QueryError::UnsupportedValue`] for geometry, file and scan values.
pub fn normalize(element: &FormElement, search_field: &SearchField) -> Result<Option<NormalizedValue>> {
    if element.element_type == ElementType::CheckBox {
        let checked = element
            .checked
            .unwrap_or(matches!(element.value, Some(ElementValue::Boolean(true))));
        return Ok(if checked {
            Some(NormalizedValue::Boolean(true))
        } else if element.has_value() {
            Some(NormalizedValue::Boolean(false))
        } else {
            None
        });
    }

    let Some(value) = element.value.as_ref().filter(|v| v.is_present()) else {
        return Ok(None);
    };

    let normalized = match value {
        ElementValue::Boolean(b) => NormalizedValue::Boolean(*b),
        ElementValue::Text(s) => NormalizedValue::Scalar(Scalar::Text(s.clone())),
        ElementValue::Number(n) => NormalizedValue::Scalar(Scalar::Number(*n)),
        ElementValue::NumberRange(low, high) => NormalizedValue::NumberRange {
            low: *low,
            high: *high,
        },
        ElementValue::DateTime(dt) => NormalizedValue::Date(*dt),
        ElementValue::DateRange { start, end } => NormalizedValue::DateRange {
            start: *start,
            end: *end,
        },
        ElementValue::Items(items) => {
            let values: Vec<Scalar> = items.iter().filter_map(|i| Scalar::from_json(&i.value)).collect();
            if values.is_empty() {
                return Ok(None);
            }
            NormalizedValue::Items(values)
        }
        ElementValue::Geometry(_) | ElementValue::Files(_) | ElementValue::Scan(_) => {
            return Err(QueryError::UnsupportedValue {
                field: search_field.field.clone(),
                shape: value.shape().to_string(),
            });
        }
    };

    Ok(Some(normalized))
}

/// Renders a number the way the host prints it: integral values carry no
/// fractional part.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FormItem;
    use crate::sql::Operator;
    use chrono::TimeZone;
    use serde_json::json;

    fn field(element_type: ElementType) -> SearchField {
        SearchField::new("Status", Operator::Eq, element_type)
    }

    fn normalize_value(element_type: ElementType, value: ElementValue) -> Result<Option<NormalizedValue>> {
        let element = FormElement::new(element_type.clone()).with_value(value);
        normalize(&element, &field(element_type))
    }

    #[test]
    fn test_zero_is_a_value() {
        let value = normalize_value(ElementType::Number, ElementValue::Number(0.0)).unwrap();
        assert_eq!(value, Some(NormalizedValue::Scalar(Scalar::Number(0.0))));
    }

    #[test]
    fn test_missing_and_empty_values() {
        let element = FormElement::new(ElementType::TextBox);
        assert_eq!(normalize(&element, &field(ElementType::TextBox)).unwrap(), None);
        assert_eq!(normalize_value(ElementType::TextBox, ElementValue::Text(String::new())).unwrap(), None);
        assert_eq!(normalize_value(ElementType::ListBox, ElementValue::Items(vec![])).unwrap(), None);
    }

    #[test]
    fn test_checkbox_rules() {
        let search_field = field(ElementType::CheckBox);

        let checked = FormElement::new(ElementType::CheckBox).with_checked(true);
        assert_eq!(normalize(&checked, &search_field).unwrap(), Some(NormalizedValue::Boolean(true)));

        let unchecked = FormElement::new(ElementType::CheckBox).with_checked(false);
        assert_eq!(normalize(&unchecked, &search_field).unwrap(), None);

        let unchecked_with_default = FormElement::new(ElementType::CheckBox)
            .with_checked(false)
            .with_value(ElementValue::Number(0.0));
        assert_eq!(normalize(&unchecked_with_default, &search_field).unwrap(), Some(NormalizedValue::Boolean(false)));

        let value_only = FormElement::new(ElementType::CheckBox).with_value(ElementValue::Boolean(true));
        assert_eq!(normalize(&value_only, &search_field).unwrap(), Some(NormalizedValue::Boolean(true)));
    }

    #[test]
    fn test_shapes() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        assert_eq!(
            normalize_value(ElementType::DateRangePicker, ElementValue::DateRange { start, end }).unwrap(),
            Some(NormalizedValue::DateRange { start, end })
        );
        assert_eq!(
            normalize_value(ElementType::NumberRangeSlider, ElementValue::NumberRange(1.0, 9.5)).unwrap(),
            Some(NormalizedValue::NumberRange { low: 1.0, high: 9.5 })
        );

        let items = ElementValue::Items(vec![
            FormItem::new("a", "Ten", json!(10)),
            FormItem::new("b", "None", json!(null)),
            FormItem::new("c", "Open", json!("open")),
        ]);
        assert_eq!(
            normalize_value(ElementType::CheckGroup, items).unwrap(),
            Some(NormalizedValue::Items(vec![Scalar::Integer(10), Scalar::Text("open".into())]))
        );
    }

    #[test]
    fn test_unsupported_shapes() {
        for value in [
            ElementValue::Geometry(json!({ "x": 1, "y": 2 })),
            ElementValue::Files(vec!["a.pdf".into()]),
            ElementValue::Scan(json!({})),
        ] {
            let shape = value.shape();
            let err = normalize_value(ElementType::TextBox, value).unwrap_err();
            match err {
                QueryError::UnsupportedValue { field, shape: reported } => {
                    assert_eq!(field, "Status");
                    assert_eq!(reported, shape);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn test_large_integer_items_stay_exact() {
        let items = ElementValue::Items(vec![
            FormItem::new("a", "Big", json!(9007199254740993i64)),
            FormItem::new("b", "Half", json!(2.5)),
        ]);
        let value = normalize_value(ElementType::ListBox, items).unwrap().unwrap();
        let NormalizedValue::Items(values) = value else {
            panic!("expected items");
        };
        assert_eq!(values[0], Scalar::Integer(9007199254740993));
        assert_eq!(values[0].to_string(), "9007199254740993");
        assert_eq!(values[1].to_string(), "2.5");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.0), "0");
    }
}
