//! In-memory form host.

use async_trait::async_trait;

use crate::diagnostic::{QueryError, Result};
use super::{ElementValue, FormElement, FormEvent, FormHost, FormItem, FormState};

/// A form held in memory.
///
/// Used by tests and by hosts that build a form definition up front and hand it
/// to the renderer afterwards.
#[derive(Debug, Clone, Default)]
pub struct Form {
    state: FormState,
    route_requested: bool,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: FormState) -> Self {
        Self {
            state,
            route_requested: false,
        }
    }

    pub fn state_mut(&mut self) -> &mut FormState {
        &mut self.state
    }

    pub fn into_state(self) -> FormState {
        self.state
    }

    /// Whether a re-route was requested since the form was created.
    pub fn route_requested(&self) -> bool {
        self.route_requested
    }

    fn element_mut(&mut self, name: &str) -> Result<&mut FormElement> {
        self.state
            .get_mut(name)
            .ok_or_else(|| QueryError::form(name, "no such element"))
    }
}

#[async_trait]
impl FormHost for Form {
    fn state(&self) -> &FormState {
        &self.state
    }

    async fn add_element(&mut self, name: &str, element: FormElement) -> Result<()> {
        self.state.insert(name, element);
        Ok(())
    }

    async fn set_element_items(&mut self, name: &str, items: Vec<FormItem>) -> Result<()> {
        self.element_mut(name)?.items = items;
        Ok(())
    }

    async fn set_element_value(&mut self, name: &str, value: Option<ElementValue>) -> Result<()> {
        self.element_mut(name)?.value = value;
        Ok(())
    }

    async fn set_current_item(&mut self, name: &str, value: &serde_json::Value) -> Result<()> {
        let element = self.element_mut(name)?;
        let position = element
            .items
            .iter()
            .position(|item| item.value == *value)
            .ok_or_else(|| QueryError::form(name, format!("no item with value {}", value)))?;

        for (i, item) in element.items.iter_mut().enumerate() {
            item.is_checked = i == position;
        }
        element.value = Some(ElementValue::Items(vec![element.items[position].clone()]));
        Ok(())
    }

    async fn set_item_property(
        &mut self,
        name: &str,
        item_key: &str,
        property: &str,
        value: serde_json::Value,
    ) -> Result<()> {
        let element = self.element_mut(name)?;
        let item = element
            .items
            .iter_mut()
            .find(|item| item.key == item_key)
            .ok_or_else(|| QueryError::form(name, format!("no item with key '{}'", item_key)))?;

        match (property, value) {
            ("checked", serde_json::Value::Bool(checked)) => item.is_checked = checked,
            ("label", serde_json::Value::String(label)) => item.label = label,
            (property, value) => {
                return Err(QueryError::form(
                    name,
                    format!("cannot set item property '{}' to {}", property, value),
                ));
            }
        }
        Ok(())
    }

    async fn set_element_event(&mut self, name: &str, event: FormEvent, target_activity: &str) -> Result<()> {
        self.element_mut(name)?
            .events
            .insert(event, target_activity.to_string());
        Ok(())
    }

    fn request_route(&mut self) {
        self.route_requested = true;
    }
}
