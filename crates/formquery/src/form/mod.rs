//! Form state and the host form contract.
//!
//! The host workflow engine renders forms and owns their state. This crate
//! reads element state when building a where clause and asks the host to
//! mutate the form (add elements, set items, wire events) through
//! [`FormHost`]. [`Form`] is an in-memory host.

mod element;
mod host;
mod value;

pub use element::{ElementType, FormElement, FormEvent, FormItem, SelectionMode};
pub use host::Form;
pub use value::ElementValue;

pub(crate) use value::label_for;

use async_trait::async_trait;

use crate::diagnostic::Result;

/// Element states of a form, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    elements: Vec<(String, FormElement)>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an element, replacing (in place) one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, element: FormElement) {
        let name = name.into();
        match self.elements.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = element,
            None => self.elements.push((name, element)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FormElement> {
        self.elements.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FormElement> {
        self.elements.iter_mut().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Element names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormElement)> {
        self.elements.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, FormElement)> for FormState {
    fn from_iter<I: IntoIterator<Item = (S, FormElement)>>(iter: I) -> Self {
        let mut state = FormState::new();
        for (name, element) in iter {
            state.insert(name, element);
        }
        state
    }
}

/// Mutation access to a live form.
///
/// Mutations are suspension points: a host may round-trip to its UI before
/// the call returns.
#[async_trait]
pub trait FormHost: Send {
    /// Current element states.
    fn state(&self) -> &FormState;

    /// Adds (or replaces) an element.
    async fn add_element(&mut self, name: &str, element: FormElement) -> Result<()>;

    /// Replaces the items of a pick-list element.
    async fn set_element_items(&mut self, name: &str, items: Vec<FormItem>) -> Result<()>;

    /// Sets (or clears) an element's value.
    async fn set_element_value(&mut self, name: &str, value: Option<ElementValue>) -> Result<()>;

    /// Makes the item whose value equals `value` the current selection.
    async fn set_current_item(&mut self, name: &str, value: &serde_json::Value) -> Result<()>;

    /// Sets a property (`checked`, `label`) of one item.
    async fn set_item_property(
        &mut self,
        name: &str,
        item_key: &str,
        property: &str,
        value: serde_json::Value,
    ) -> Result<()>;

    /// Routes an element event to a workflow activity.
    async fn set_element_event(&mut self, name: &str, event: FormEvent, target_activity: &str) -> Result<()>;

    /// Asks the host to re-run the form's event routing after programmatic changes.
    fn request_route(&mut self);
}
