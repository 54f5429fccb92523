//! Field descriptors.

use serde::{Deserialize, Serialize};

use super::Domain;

/// SQL type of a layer field.
///
/// Accepts both the short JavaScript API names (`"string"`) and the REST names
/// (`"esriFieldTypeString"`). Anything else is kept as [`FieldType::Other`],
/// which formats like a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Oid,
    String,
    Integer,
    SmallInteger,
    Double,
    Date,
    Guid,
    GlobalId,
    Other,
}

impl FieldType {
    /// Parse a field type name.
    pub fn parse(s: &str) -> Self {
        match s {
            "oid" | "esriFieldTypeOID" => FieldType::Oid,
            "string" | "esriFieldTypeString" => FieldType::String,
            "integer" | "esriFieldTypeInteger" => FieldType::Integer,
            "small-integer" | "esriFieldTypeSmallInteger" => FieldType::SmallInteger,
            "double" | "esriFieldTypeDouble" => FieldType::Double,
            "date" | "esriFieldTypeDate" => FieldType::Date,
            "guid" | "esriFieldTypeGUID" => FieldType::Guid,
            "global-id" | "esriFieldTypeGlobalID" => FieldType::GlobalId,
            _ => FieldType::Other,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Oid => "oid",
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::SmallInteger => "small-integer",
            FieldType::Double => "double",
            FieldType::Date => "date",
            FieldType::Guid => "guid",
            FieldType::GlobalId => "global-id",
            FieldType::Other => "other",
        }
    }

    /// Values of this type are written as quoted string literals.
    pub fn is_text(&self) -> bool {
        matches!(self, FieldType::String | FieldType::Guid | FieldType::GlobalId)
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        FieldType::parse(&s)
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        t.as_str().to_string()
    }
}

/// A field of a layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMetadata {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: FieldType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Field-level domain. `null` in layer JSON when the field has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,
}

impl FieldMetadata {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            alias: None,
            domain: None,
        }
    }

    pub fn with_domain(mut self, domain: Domain) -> Self {
        self.domain = Some(domain);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_and_short_names() {
        assert_eq!(FieldType::parse("esriFieldTypeGlobalID"), FieldType::GlobalId);
        assert_eq!(FieldType::parse("small-integer"), FieldType::SmallInteger);
        assert_eq!(FieldType::parse("esriFieldTypeGeometry"), FieldType::Other);
    }

    #[test]
    fn test_text_types() {
        assert!(FieldType::Guid.is_text());
        assert!(FieldType::String.is_text());
        assert!(!FieldType::Date.is_text());
        assert!(!FieldType::Double.is_text());
    }

    #[test]
    fn test_field_json() {
        let field: FieldMetadata = serde_json::from_str(
            r#"{ "name": "Status", "type": "esriFieldTypeString", "alias": "Status", "domain": null }"#,
        )
        .unwrap();
        assert_eq!(field.field_type, FieldType::String);
        assert!(field.domain.is_none());
    }
}
