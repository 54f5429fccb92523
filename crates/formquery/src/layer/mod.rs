//! Layer metadata.
//!
//! A query targets one of four layer shapes. Plain feature layers, subtype
//! group layers and map-image sublayers own their metadata. A subtype
//! sublayer is a view of its parent bound to one subtype code: it owns no field
//! list and no definition expression, everything is read through the parent.

mod domain;
mod field;

pub use domain::{CodedValue, Domain, FeatureType, Subtype};
pub use field::{FieldMetadata, FieldType};

use std::path::Path;
use std::sync::Arc;
use serde::{Deserialize, Serialize};

use crate::diagnostic::{QueryError, Result};
use domain::null_as_default;

/// Metadata of a feature-bearing layer, in the layer JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Layer (table) name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<FieldMetadata>,

    /// Field holding the subtype discriminator, if the layer has subtypes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype_field: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub subtypes: Vec<Subtype>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<FeatureType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition_expression: Option<String>,
}

impl LayerInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Parses layer metadata from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| QueryError::Config {
            path: "<layer json>".into(),
            message: format!("Failed to parse layer metadata: {}", e),
        })
    }

    /// Loads layer metadata from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| QueryError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| QueryError::Config {
            path: path.to_path_buf(),
            message: format!("Failed to parse layer metadata: {}", e),
        })
    }

    pub fn with_field(mut self, field: FieldMetadata) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_subtypes(mut self, subtype_field: impl Into<String>, subtypes: Vec<Subtype>) -> Self {
        self.subtype_field = Some(subtype_field.into());
        self.subtypes = subtypes;
        self
    }

    pub fn with_types(mut self, types: Vec<FeatureType>) -> Self {
        self.types = types;
        self
    }

    pub fn with_definition_expression(mut self, expression: impl Into<String>) -> Self {
        self.definition_expression = Some(expression.into());
        self
    }

    /// Finds a field by exact name.
    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The definition expression, with empty strings treated as absent.
    pub fn definition_expression(&self) -> Option<&str> {
        self.definition_expression
            .as_deref()
            .filter(|expr| !expr.is_empty())
    }
}

/// A subtype-bound view of a parent layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtypeSublayer {
    parent: Arc<LayerInfo>,
    subtype_code: i64,
    subtype_field: String,
}

impl SubtypeSublayer {
    /// Binds a view of `parent` to `subtype_code`.
    ///
    /// The parent must declare a subtype field; every query against the view
    /// is scoped by it.
    pub fn new(parent: Arc<LayerInfo>, subtype_code: i64) -> Result<Self> {
        let subtype_field = parent
            .subtype_field
            .clone()
            .filter(|f| !f.is_empty())
            .ok_or(QueryError::InvalidSublayer { subtype_code })?;

        Ok(Self {
            parent,
            subtype_code,
            subtype_field,
        })
    }

    pub fn parent(&self) -> &LayerInfo {
        &self.parent
    }

    pub fn subtype_code(&self) -> i64 {
        self.subtype_code
    }

    /// The parent's subtype field.
    pub fn subtype_field(&self) -> &str {
        &self.subtype_field
    }
}

/// A query target.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// A flat feature layer.
    Feature(LayerInfo),
    /// A layer partitioned into subtypes with per-subtype domain overrides.
    SubtypeGroup(LayerInfo),
    /// A map-image sublayer.
    Sublayer(LayerInfo),
    /// A view of a subtype group layer bound to one subtype code.
    SubtypeSublayer(SubtypeSublayer),
}

impl Layer {
    /// The layer kind as reported by the host.
    pub fn kind(&self) -> &'static str {
        match self {
            Layer::Feature(_) => "feature",
            Layer::SubtypeGroup(_) => "subtype-group",
            Layer::Sublayer(_) => "sublayer",
            Layer::SubtypeSublayer(_) => "subtype-sublayer",
        }
    }

    /// The metadata authoritative for fields, domains and subtypes.
    pub fn metadata(&self) -> &LayerInfo {
        match self {
            Layer::Feature(info) | Layer::SubtypeGroup(info) | Layer::Sublayer(info) => info,
            Layer::SubtypeSublayer(sublayer) => sublayer.parent(),
        }
    }

    /// The layer that receives feature queries.
    pub fn query_target(&self) -> &LayerInfo {
        self.metadata()
    }

    pub fn fields(&self) -> &[FieldMetadata] {
        &self.metadata().fields
    }

    pub fn subtype_field(&self) -> Option<&str> {
        match self {
            Layer::SubtypeSublayer(sublayer) => Some(sublayer.subtype_field()),
            _ => self.metadata().subtype_field.as_deref(),
        }
    }

    /// The subtype code a sublayer is bound to.
    pub fn bound_subtype_code(&self) -> Option<i64> {
        match self {
            Layer::SubtypeSublayer(sublayer) => Some(sublayer.subtype_code()),
            _ => None,
        }
    }
}
