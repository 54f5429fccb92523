//! Where clause from a query form.

use tracing::info;

use crate::config::SearchField;
use crate::diagnostic::{QueryError, Result};
use crate::form::FormState;
use crate::layer::Layer;
use crate::sql::generate;

/// Inputs of [`GenerateWhereClause`].
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateWhereClauseInputs<'a> {
    /// Layer the clause is applied to.
    pub layer: Option<&'a Layer>,
    /// Form used to collect the query inputs.
    pub target_form: Option<&'a FormState>,
    /// Field and form element names must match.
    pub query_fields: Option<&'a [SearchField]>,
    /// Existing clause the generated predicates are appended to.
    pub where_clause: Option<&'a str>,
}

/// Creates a where clause from a query form.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateWhereClause;

impl GenerateWhereClause {
    pub fn execute(&self, inputs: GenerateWhereClauseInputs<'_>) -> Result<String> {
        let layer = inputs.layer.ok_or_else(|| QueryError::missing("layer"))?;
        let form = inputs.target_form.ok_or_else(|| QueryError::missing("targetForm"))?;
        let query_fields = inputs.query_fields.ok_or_else(|| QueryError::missing("queryFields"))?;

        let clause = generate(layer, form, query_fields, inputs.where_clause)?;
        info!(layer = layer.kind(), length = clause.len(), "generated where clause");
        Ok(clause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{ElementType, ElementValue, FormElement};
    use crate::layer::{FieldMetadata, FieldType, LayerInfo};
    use crate::sql::Operator;

    #[test]
    fn test_requires_inputs() {
        let layer = Layer::Feature(LayerInfo::new("Assets"));
        let form = FormState::new();
        let no_fields: Vec<SearchField> = Vec::new();

        let err = GenerateWhereClause
            .execute(GenerateWhereClauseInputs::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "layer is required");

        let err = GenerateWhereClause
            .execute(GenerateWhereClauseInputs {
                layer: Some(&layer),
                query_fields: Some(no_fields.as_slice()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "targetForm is required");

        let err = GenerateWhereClause
            .execute(GenerateWhereClauseInputs {
                layer: Some(&layer),
                target_form: Some(&form),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "queryFields is required");
    }

    #[test]
    fn test_appends_to_existing_clause() {
        let layer = Layer::Feature(
            LayerInfo::new("Assets").with_field(FieldMetadata::new("Status", FieldType::String)),
        );
        let form: FormState = [(
            "Status",
            FormElement::new(ElementType::TextBox).with_value(ElementValue::Text("Active".into())),
        )]
        .into_iter()
        .collect();
        let fields = [SearchField::new("Status", Operator::Eq, ElementType::TextBox)];

        let clause = GenerateWhereClause
            .execute(GenerateWhereClauseInputs {
                layer: Some(&layer),
                target_form: Some(&form),
                query_fields: Some(&fields[..]),
                where_clause: Some("Owner = 'City'"),
            })
            .unwrap();
        assert_eq!(clause, "Owner = 'City' AND Status = 'Active'");
    }
}
