//! # formquery
//!
//! Builds SQL where clauses from query forms and populates the choices of
//! those forms from layer data. A query form is a set of search fields, each
//! pairing a layer field with an operator and the UI element that collects
//! its value.
//!
//! ## Architecture
//!
//! ```text
//! QueryConfig (search fields)        Layer (fields, domains, subtypes)
//!        │                                   │
//!        ▼                                   ▼
//! ┌──────────────┐                   ┌──────────────┐
//! │     Form     │  element values   │   Resolve    │  coded values,
//! │ (FormState)  │                   │              │  definition expression
//! └──────┬───────┘                   └──────┬───────┘
//!        │                                  │
//!        ▼                                  │
//! ┌──────────────┐                          │
//! │  Normalize   │  raw value → closed shape│
//! └──────┬───────┘                          │
//!        │                                  │
//!        ▼                                  ▼
//! ┌─────────────────────────────────────────────┐
//! │  SQL: format_value → WhereClause → generate │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The [`activities`] wrap this pipeline for a workflow host: generating a
//! clause, looking up coded values, and adding query elements to a form.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formquery::{GenerateWhereClause, GenerateWhereClauseInputs, Layer, LayerInfo, QueryConfig};
//!
//! let config = QueryConfig::load("queries/assets.json".as_ref())?;
//! let layer = Layer::Feature(LayerInfo::load("layers/assets.json".as_ref())?);
//!
//! let clause = GenerateWhereClause.execute(GenerateWhereClauseInputs {
//!     layer: Some(&layer),
//!     target_form: Some(form.state()),
//!     query_fields: Some(config.search_fields.as_slice()),
//!     where_clause: config.where_clause.as_deref(),
//! })?;
//! ```

pub mod activities;
pub mod config;
pub mod diagnostic;
pub mod form;
pub mod layer;
pub mod normalize;
pub mod resolve;
pub mod source;
pub mod sql;
pub mod text;

pub use activities::{
    AddQueryElements, AddQueryElementsInputs, GenerateWhereClause, GenerateWhereClauseInputs,
    GetLayerCodedValues, GetLayerCodedValuesInputs,
};
pub use config::{Cascade, FieldEvents, QueryConfig, SearchField};
pub use diagnostic::{QueryError, Result};
pub use form::{ElementType, ElementValue, Form, FormElement, FormEvent, FormHost, FormItem, FormState};
pub use layer::{CodedValue, Domain, FieldMetadata, FieldType, Layer, LayerInfo, SubtypeSublayer};
pub use source::{Attributes, FeatureQuery, FeatureSet, FeatureSource};
pub use sql::{generate, Operator, WhereClause};
