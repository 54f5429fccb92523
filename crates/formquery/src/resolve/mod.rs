//! Per-layer metadata resolution.
//!
//! - [`get_coded_values`]: the coded-value domain that applies to a field,
//!   honoring subtype and feature-type overrides.
//! - [`get_definition_expression`]: the filter a layer (or subtype view)
//!   already applies to every query.

mod coded_values;
mod definition;

pub use coded_values::{get_coded_values, get_domain, get_field_domain};
pub use definition::get_definition_expression;
