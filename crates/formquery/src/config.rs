//! Query configuration.
//!
//! A query form is described by a list of [`SearchField`]s: which layer field
//! each input targets, the comparison operator and the UI element used to
//! collect it. Configurations are usually authored as JSON.

use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::diagnostic::{QueryError, Result};
use crate::form::{ElementType, FormElement, FormEvent};
use crate::sql::Operator;

/// Dependency of a search field's choices on another field's selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cascade {
    /// `true` cascades from the preceding search field.
    Enabled(bool),
    /// Cascades from the named field.
    Field(String),
}

impl Default for Cascade {
    fn default() -> Self {
        Cascade::Enabled(false)
    }
}

/// Workflow activities to run on element events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEvents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clicked: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub populate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validate: Option<String>,
}

impl FieldEvents {
    /// Configured events with their target activity.
    pub fn iter(&self) -> impl Iterator<Item = (FormEvent, &str)> {
        [
            (FormEvent::Changed, &self.changed),
            (FormEvent::Clicked, &self.clicked),
            (FormEvent::Populate, &self.populate),
            (FormEvent::Suggest, &self.suggest),
            (FormEvent::Validate, &self.validate),
        ]
        .into_iter()
        .filter_map(|(event, target)| {
            target
                .as_deref()
                .filter(|t| !t.is_empty())
                .map(|t| (event, t))
        })
    }
}

/// Configuration of one query input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchField {
    /// Target layer field; also the form element name.
    pub field: String,

    pub operator: Operator,

    #[serde(rename = "type")]
    pub element_type: ElementType,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub cascade: Cascade,

    /// Value preset on the element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<FieldEvents>,

    /// Element template used instead of the default element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<FormElement>,
}

impl SearchField {
    pub fn new(field: impl Into<String>, operator: Operator, element_type: ElementType) -> Self {
        let field = field.into();
        Self {
            title: field.clone(),
            field,
            operator,
            element_type,
            description: None,
            cascade: Cascade::default(),
            value: None,
            events: None,
            element: None,
        }
    }

    pub fn with_value(mut self, value: serde_json::Value) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_cascade(mut self, cascade: Cascade) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn with_events(mut self, events: FieldEvents) -> Self {
        self.events = Some(events);
        self
    }

    /// Whether a non-null value is preset.
    pub fn has_preset_value(&self) -> bool {
        self.value.as_ref().is_some_and(|v| !v.is_null())
    }

    /// Name of the field this one cascades from.
    ///
    /// `previous` is the search field configured just before this one.
    pub fn depends_on(&self, previous: Option<&SearchField>) -> Option<String> {
        match &self.cascade {
            Cascade::Enabled(true) => previous.map(|p| p.field.clone()),
            Cascade::Enabled(false) => None,
            Cascade::Field(name) if name.is_empty() => None,
            Cascade::Field(name) => Some(name.clone()),
        }
    }
}

/// A complete query form configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryConfig {
    /// Title of the query section.
    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Clause every generated query starts from.
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<String>,

    #[serde(default)]
    pub search_fields: Vec<SearchField>,
}

impl QueryConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| QueryError::Config {
            path: "<query json>".into(),
            message: format!("Failed to parse query configuration: {}", e),
        })
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| QueryError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| QueryError::Config {
            path: path.to_path_buf(),
            message: format!("Failed to parse query configuration: {}", e),
        })
    }

    /// Saves the configuration as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| QueryError::Config {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| QueryError::Config {
            path: path.to_path_buf(),
            message: format!("Failed to serialize query configuration: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| QueryError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
