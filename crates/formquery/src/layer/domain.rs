//! Coded-value domains and the subtype/type entries that override them.

use std::collections::BTreeMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A domain entry mapping a stored code to a label.
///
/// Codes are integers on integer fields, text on text fields and fractional
/// on double fields, so the code keeps its JSON form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodedValue {
    pub code: Value,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_retired: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependent_coded_values: Option<BTreeMap<String, String>>,
}

impl CodedValue {
    pub fn new(code: impl Into<Value>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            is_retired: None,
            dependent_coded_values: None,
        }
    }
}

/// A field domain, or a subtype/type override of one.
///
/// Range and inherited domains carry no `codedValues`; resolvers skip them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    #[serde(rename = "type", default)]
    pub domain_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coded_values: Option<Vec<CodedValue>>,
}

impl Domain {
    /// Builds a coded-value domain.
    pub fn coded(name: impl Into<String>, coded_values: Vec<CodedValue>) -> Self {
        Self {
            domain_type: "codedValue".to_string(),
            name: name.into(),
            description: None,
            coded_values: Some(coded_values),
        }
    }

    /// Builds an inherited domain marker (defers to the field domain).
    pub fn inherited() -> Self {
        Self {
            domain_type: "inherited".to_string(),
            name: String::new(),
            description: None,
            coded_values: None,
        }
    }
}

/// A subtype definition (subtype-aware layers key these by `code`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtype {
    pub code: i64,
    pub name: String,
    /// Field name to domain override.
    #[serde(default, deserialize_with = "null_as_default")]
    pub domains: BTreeMap<String, Domain>,
}

impl Subtype {
    pub fn new(code: i64, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
            domains: BTreeMap::new(),
        }
    }

    pub fn with_domain(mut self, field: impl Into<String>, domain: Domain) -> Self {
        self.domains.insert(field.into(), domain);
        self
    }
}

/// A feature type definition (type-aware layers key these by `id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureType {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domains: BTreeMap<String, Domain>,
}

impl FeatureType {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            domains: BTreeMap::new(),
        }
    }

    pub fn with_domain(mut self, field: impl Into<String>, domain: Domain) -> Self {
        self.domains.insert(field.into(), domain);
        self
    }
}

/// Deserializes `null` as the type's default (layer JSON emits `null` for
/// empty lists and maps).
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
