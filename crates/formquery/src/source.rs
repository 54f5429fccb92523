//! Feature query contract.
//!
//! Populating pick-list choices runs a distinct-values query against the
//! layer. The transport (REST service, local replica) sits behind
//! [`FeatureSource`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::diagnostic::Result;
use crate::layer::LayerInfo;

/// Attribute name to value mapping of one feature.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// A feature query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureQuery {
    #[serde(rename = "where")]
    pub where_clause: String,
    pub out_fields: Vec<String>,
    /// Deduplicate on `out_fields`.
    pub return_distinct_values: bool,
    pub return_geometry: bool,
}

impl FeatureQuery {
    pub fn new(where_clause: impl Into<String>, out_fields: Vec<String>) -> Self {
        Self {
            where_clause: where_clause.into(),
            out_fields,
            return_distinct_values: false,
            return_geometry: false,
        }
    }

    pub fn distinct(mut self) -> Self {
        self.return_distinct_values = true;
        self
    }
}

/// Result of a feature query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    /// Names of the returned fields, in `out_fields` order.
    pub fields: Vec<String>,
    pub features: Vec<Attributes>,
}

impl FeatureSet {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Executes feature queries against a layer.
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Queries `target` (the layer that owns the features; a subtype sublayer
    /// is queried through its parent).
    async fn query_features(&self, target: &LayerInfo, query: &FeatureQuery) -> Result<FeatureSet>;
}
