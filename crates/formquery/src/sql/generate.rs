//! Where-clause orchestration over a form's state.

use tracing::{debug, trace};

use crate::config::SearchField;
use crate::diagnostic::Result;
use crate::form::FormState;
use crate::layer::Layer;
use crate::normalize::normalize;
use crate::resolve::get_definition_expression;
use super::{format_value, WhereClause};

/// Builds the where clause for `layer` from the current state of a form.
///
/// Starts from `existing_where` (or `1=1`), conjoins the layer's definition
/// expression, then one predicate per form element that has a value, a field
/// of the same name on the layer and a search field configured for it.
/// Predicates follow the form's element order.
///
/// # Errors
///
/// Fails without a partial clause when an element holds a value that cannot
/// be expressed in SQL.
pub fn generate(
    layer: &Layer,
    form: &FormState,
    search_fields: &[SearchField],
    existing_where: Option<&str>,
) -> Result<String> {
    let mut clause = WhereClause::new(existing_where);
    if let Some(definition_expression) = get_definition_expression(layer) {
        clause.and(&definition_expression);
    }

    let fields = layer.fields();
    for (name, element) in form.iter() {
        let Some(field) = fields.iter().find(|f| f.name == name) else {
            trace!(element = name, "skipped: no layer field");
            continue;
        };
        let Some(search_field) = search_fields.iter().find(|s| s.field == name) else {
            trace!(element = name, "skipped: no search field");
            continue;
        };
        let Some(value) = normalize(element, search_field)? else {
            trace!(element = name, "skipped: no value");
            continue;
        };

        let formatted = format_value(&value, search_field, field);
        clause.push_predicate(&search_field.field, search_field.operator, &formatted);
        debug!(field = name, operator = %search_field.operator, "appended predicate");
    }

    Ok(clause.into_string())
}
