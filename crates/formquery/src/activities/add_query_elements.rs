//! Query form construction.
//!
//! Adds one element per search field to a form, then fills the choices of
//! pick-list elements from the layer: the coded-value domain of the field when
//! it has one, otherwise the distinct values found in the data.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{QueryConfig, SearchField};
use crate::diagnostic::{QueryError, Result};
use crate::form::{label_for, ElementType, ElementValue, FormElement, FormHost, FormItem, FormState, SelectionMode};
use crate::layer::{CodedValue, Layer};
use crate::resolve::{get_coded_values, get_definition_expression};
use crate::source::{FeatureQuery, FeatureSet, FeatureSource};
use crate::sql::{generate, WhereClause};
use crate::text::json_get_ignoring_case;

/// Name of the section element the query inputs are placed in.
pub const QUERY_SECTION: &str = "querySection";

/// Row of the first query input; rows above it belong to the section header.
const FIRST_ROW: u32 = 3;

/// Inputs of [`AddQueryElements`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AddQueryElementsInputs<'a> {
    pub search_fields: Option<&'a [SearchField]>,
    /// Layer the query runs against.
    pub layer: Option<&'a Layer>,
    /// Title of the query section.
    pub title: Option<&'a str>,
    pub description: Option<&'a str>,
    /// Clause the choice queries start from.
    pub where_clause: Option<&'a str>,
}

impl<'a> AddQueryElementsInputs<'a> {
    /// Inputs for a configured query form.
    pub fn from_config(config: &'a QueryConfig, layer: &'a Layer) -> Self {
        Self {
            search_fields: Some(config.search_fields.as_slice()),
            layer: Some(layer),
            title: Some(config.title.as_str()),
            description: config.description.as_deref(),
            where_clause: config.where_clause.as_deref(),
        }
    }
}

/// Creates query form elements and injects them into a form.
pub struct AddQueryElements<'s, S: ?Sized> {
    source: &'s S,
}

impl<'s, S> AddQueryElements<'s, S>
where
    S: FeatureSource + ?Sized,
{
    /// Creates the activity; choices are queried from `source`.
    pub fn new(source: &'s S) -> Self {
        Self { source }
    }

    pub async fn execute<F>(&self, inputs: AddQueryElementsInputs<'_>, form: Option<&mut F>) -> Result<()>
    where
        F: FormHost + ?Sized,
    {
        let layer = inputs.layer.ok_or_else(|| QueryError::missing("layer"))?;
        let search_fields = inputs
            .search_fields
            .ok_or_else(|| QueryError::missing("searchFields"))?;
        let form = form.ok_or_else(|| QueryError::missing("targetForm"))?;
        let title = inputs
            .title
            .filter(|t| !t.is_empty())
            .ok_or_else(|| QueryError::missing("title"))?;

        if !form.state().contains(QUERY_SECTION) {
            let mut section = FormElement::new(ElementType::Section);
            section.title = Some(title.to_string());
            section.description = inputs.description.map(str::to_string);
            form.add_element(QUERY_SECTION, section).await?;
        }

        let mut previous: Option<&SearchField> = None;
        for (index, search_field) in search_fields.iter().enumerate() {
            if !search_field.element_type.is_search_input() {
                return Err(QueryError::UnsupportedElementType {
                    element_type: search_field.element_type.to_string(),
                });
            }

            let depends_on = search_field.depends_on(previous);
            let preset = search_field.value.as_ref().and_then(ElementValue::from_json);

            let mut element = search_field.element.clone().unwrap_or_else(default_element);
            element.element_type = search_field.element_type.clone();
            element.row_number = Some(index as u32 + FIRST_ROW);
            element.section = Some(QUERY_SECTION.to_string());
            element.depends_on = depends_on.clone();
            element.title = Some(search_field.title.clone());
            element.description = search_field.description.clone();
            element.value = preset.clone();
            form.add_element(&search_field.field, element).await?;

            if has_elements_to_set(search_field, depends_on.as_deref(), form.state()) {
                let query = choices_query(
                    layer,
                    search_field,
                    search_fields,
                    depends_on.is_some(),
                    inputs.where_clause,
                    form.state(),
                )?;
                let results = self.source.query_features(layer.query_target(), &query).await?;
                if results.is_empty() {
                    warn!(field = %search_field.field, "choice query returned no features");
                }

                let items = element_items(layer, search_field, &results);
                debug!(field = %search_field.field, items = items.len(), "populated choices");
                if !items.is_empty() {
                    form.set_element_items(&search_field.field, items).await?;
                }

                if search_field.has_preset_value() {
                    form.set_element_value(&search_field.field, preset).await?;
                    set_item_state(&mut *form, search_field).await?;
                    form.request_route();
                }
            }

            if let Some(events) = &search_field.events {
                for (event, target) in events.iter() {
                    form.set_element_event(&search_field.field, event, target).await?;
                }
            }

            previous = Some(search_field);
        }

        info!(elements = search_fields.len(), "added query elements");
        Ok(())
    }
}

fn default_element() -> FormElement {
    FormElement {
        selection_mode: Some(SelectionMode::Multiple),
        ..FormElement::default()
    }
}

/// Whether `search_field` presents choices that can be populated now: it is
/// a pick-list and the element it depends on (if any) has a value.
fn has_elements_to_set(search_field: &SearchField, depends_on: Option<&str>, state: &FormState) -> bool {
    if !search_field.element_type.has_items() {
        return false;
    }
    match depends_on {
        None => true,
        Some(name) => state.get(name).is_some_and(FormElement::has_value),
    }
}

/// The distinct-values query that populates the choices of `search_field`.
///
/// A cascading or preset field is filtered by the values of the other search
/// fields; any other field only by the base clause and the layer's
/// definition expression.
fn choices_query(
    layer: &Layer,
    search_field: &SearchField,
    search_fields: &[SearchField],
    cascades: bool,
    where_clause: Option<&str>,
    state: &FormState,
) -> Result<FeatureQuery> {
    let mut out_fields = vec![search_field.field.clone()];
    if let Some(subtype_field) = layer.subtype_field() {
        if subtype_field != search_field.field {
            out_fields.push(subtype_field.to_string());
        }
    }

    let clause = if cascades || search_field.has_preset_value() {
        let others: Vec<SearchField> = search_fields
            .iter()
            .filter(|s| s.field != search_field.field)
            .cloned()
            .collect();
        generate(layer, state, &others, where_clause)?
    } else {
        let mut clause = WhereClause::new(where_clause);
        if let Some(definition_expression) = get_definition_expression(layer) {
            clause.and(&definition_expression);
        }
        clause.into_string()
    };

    Ok(FeatureQuery::new(clause, out_fields).distinct())
}

/// Builds the choices of `search_field` from a distinct-values query result.
fn element_items(layer: &Layer, search_field: &SearchField, results: &FeatureSet) -> Vec<FormItem> {
    let type_code = results
        .fields
        .iter()
        .find(|name| **name != search_field.field)
        .zip(results.features.first())
        .and_then(|(name, attributes)| json_get_ignoring_case(name, attributes))
        .and_then(Value::as_i64);

    match get_coded_values(layer, &search_field.field, type_code) {
        Some(coded_values) => coded_value_items(&coded_values),
        None => distinct_value_items(&search_field.field, results),
    }
}

fn coded_value_items(coded_values: &[CodedValue]) -> Vec<FormItem> {
    coded_values
        .iter()
        .enumerate()
        .map(|(i, cv)| FormItem::new(format!("item-{}", i + 1), cv.name.clone(), cv.code.clone()))
        .collect()
}

/// One item per distinct non-null value of `field`, in first-occurrence order.
fn distinct_value_items(field: &str, results: &FeatureSet) -> Vec<FormItem> {
    let mut values: Vec<&Value> = Vec::new();
    for attributes in &results.features {
        if let Some(value) = json_get_ignoring_case(field, attributes) {
            if !value.is_null() && !values.contains(&value) {
                values.push(value);
            }
        }
    }

    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| FormItem::new(format!("item-{}", i + 1), label_for(value), value.clone()))
        .collect()
}

/// Marks the items matching the preset value: every listed value is checked
/// for a sequence, a scalar becomes the current item.
async fn set_item_state<F>(form: &mut F, search_field: &SearchField) -> Result<()>
where
    F: FormHost + ?Sized,
{
    let Some(preset) = search_field.value.as_ref() else {
        return Ok(());
    };
    let Some(element) = form.state().get(&search_field.field) else {
        return Ok(());
    };
    if element.items.is_empty() {
        return Ok(());
    }

    match preset {
        Value::Array(values) => {
            let keys: Vec<String> = values
                .iter()
                .filter_map(|value| element.items.iter().find(|item| item.value == *value))
                .map(|item| item.key.clone())
                .collect();
            for key in keys {
                form.set_item_property(&search_field.field, &key, "checked", Value::Bool(true))
                    .await?;
            }
        }
        scalar => {
            if element.items.iter().any(|item| item.value == *scalar) {
                form.set_current_item(&search_field.field, scalar).await?;
            } else {
                debug!(field = %search_field.field, "preset value matches no item");
            }
        }
    }
    Ok(())
}
