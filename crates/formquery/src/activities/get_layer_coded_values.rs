//! Coded values of a layer field.

use crate::diagnostic::{QueryError, Result};
use crate::layer::{CodedValue, Layer};
use crate::resolve::get_coded_values;

/// Inputs of [`GetLayerCodedValues`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GetLayerCodedValuesInputs<'a> {
    pub layer: Option<&'a Layer>,
    /// Field whose domain is looked up.
    pub field: Option<&'a str>,
    /// Subtype or feature type code; ignored for a subtype sublayer.
    pub type_code: Option<i64>,
}

/// Gets the coded-value domain of a layer field.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetLayerCodedValues;

impl GetLayerCodedValues {
    /// Returns `None` when the field has no coded-value domain.
    pub fn execute(&self, inputs: GetLayerCodedValuesInputs<'_>) -> Result<Option<Vec<CodedValue>>> {
        let layer = inputs.layer.ok_or_else(|| QueryError::missing("layer"))?;
        let field = inputs
            .field
            .filter(|f| !f.is_empty())
            .ok_or_else(|| QueryError::missing("field"))?;

        Ok(get_coded_values(layer, field, inputs.type_code))
    }
}
