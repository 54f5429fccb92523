//! Form element state.

use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};

use super::ElementValue;

/// UI element kinds.
///
/// The first sixteen kinds can back a search field. `Section` and any other
/// host kind are carried through but rejected as search inputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementType {
    AutoComplete,
    CheckBox,
    CheckGroup,
    DatePicker,
    DateRangePicker,
    DateTimePicker,
    DropDownList,
    ItemPicker,
    ListBox,
    Number,
    NumberRangeSlider,
    NumberSlider,
    RadioGroup,
    TextArea,
    #[default]
    TextBox,
    TimePicker,
    Section,
    Other(String),
}

impl ElementType {
    /// Parse an element type from its host name.
    pub fn parse(s: &str) -> Self {
        match s {
            "AutoComplete" => ElementType::AutoComplete,
            "CheckBox" => ElementType::CheckBox,
            "CheckGroup" => ElementType::CheckGroup,
            "DatePicker" => ElementType::DatePicker,
            "DateRangePicker" => ElementType::DateRangePicker,
            "DateTimePicker" => ElementType::DateTimePicker,
            "DropDownList" => ElementType::DropDownList,
            "ItemPicker" => ElementType::ItemPicker,
            "ListBox" => ElementType::ListBox,
            "Number" => ElementType::Number,
            "NumberRangeSlider" => ElementType::NumberRangeSlider,
            "NumberSlider" => ElementType::NumberSlider,
            "RadioGroup" => ElementType::RadioGroup,
            "TextArea" => ElementType::TextArea,
            "TextBox" => ElementType::TextBox,
            "TimePicker" => ElementType::TimePicker,
            "Section" => ElementType::Section,
            other => ElementType::Other(other.to_string()),
        }
    }

    /// Convert to the host name.
    pub fn as_str(&self) -> &str {
        match self {
            ElementType::AutoComplete => "AutoComplete",
            ElementType::CheckBox => "CheckBox",
            ElementType::CheckGroup => "CheckGroup",
            ElementType::DatePicker => "DatePicker",
            ElementType::DateRangePicker => "DateRangePicker",
            ElementType::DateTimePicker => "DateTimePicker",
            ElementType::DropDownList => "DropDownList",
            ElementType::ItemPicker => "ItemPicker",
            ElementType::ListBox => "ListBox",
            ElementType::Number => "Number",
            ElementType::NumberRangeSlider => "NumberRangeSlider",
            ElementType::NumberSlider => "NumberSlider",
            ElementType::RadioGroup => "RadioGroup",
            ElementType::TextArea => "TextArea",
            ElementType::TextBox => "TextBox",
            ElementType::TimePicker => "TimePicker",
            ElementType::Section => "Section",
            ElementType::Other(name) => name,
        }
    }

    /// Whether this kind can back a search field.
    pub fn is_search_input(&self) -> bool {
        !matches!(self, ElementType::Section | ElementType::Other(_))
    }

    /// Whether this kind presents a list of items to pick from.
    pub fn has_items(&self) -> bool {
        matches!(
            self,
            ElementType::CheckGroup
                | ElementType::DropDownList
                | ElementType::ItemPicker
                | ElementType::ListBox
                | ElementType::RadioGroup
        )
    }
}

impl From<String> for ElementType {
    fn from(s: String) -> Self {
        ElementType::parse(&s)
    }
}

impl From<ElementType> for String {
    fn from(t: ElementType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Element events a workflow can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormEvent {
    Changed,
    Clicked,
    Populate,
    Suggest,
    Validate,
}

impl FormEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormEvent::Changed => "changed",
            FormEvent::Clicked => "clicked",
            FormEvent::Populate => "populate",
            FormEvent::Suggest => "suggest",
            FormEvent::Validate => "validate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    Single,
    #[default]
    Multiple,
}

/// A selectable item of a pick-list element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormItem {
    #[serde(default)]
    pub key: String,
    pub label: String,
    pub value: serde_json::Value,
    #[serde(default)]
    pub is_checked: bool,
}

impl FormItem {
    pub fn new(key: impl Into<String>, label: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value,
            is_checked: false,
        }
    }
}

/// Current state of one rendered element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormElement {
    #[serde(rename = "type", default)]
    pub element_type: ElementType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ElementValue>,

    /// Check state of a CheckBox.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<FormItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_number: Option<u32>,

    /// Name of the section element this element is placed in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Name of the element whose value filters this element's items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_mode: Option<SelectionMode>,

    /// Event to target activity id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub events: BTreeMap<FormEvent, String>,
}

impl FormElement {
    pub fn new(element_type: ElementType) -> Self {
        Self {
            element_type,
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: ElementValue) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = Some(checked);
        self
    }

    /// Whether the element currently holds a value (zero counts).
    pub fn has_value(&self) -> bool {
        self.value.as_ref().is_some_and(ElementValue::is_present)
    }
}
