//! Query error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, QueryError>;

/// Errors that can occur while building query forms and where clauses.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum QueryError {
    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("{input} is required")]
    #[diagnostic(code(formquery::input::missing_required))]
    MissingRequiredInput {
        input: String,
    },

    #[error("Unsupported Form Element: {element_type}")]
    #[diagnostic(
        code(formquery::input::unsupported_element_type),
        help("Search fields support: AutoComplete, CheckBox, CheckGroup, DatePicker, DateRangePicker, DateTimePicker, DropDownList, ItemPicker, ListBox, Number, NumberRangeSlider, NumberSlider, RadioGroup, TextArea, TextBox, TimePicker")
    )]
    UnsupportedElementType {
        element_type: String,
    },

    #[error("Unsupported operator: {operator}")]
    #[diagnostic(
        code(formquery::input::unsupported_operator),
        help("Operators are one of: =, <>, <, <=, >, >=, LIKE, IN, BETWEEN")
    )]
    UnsupportedOperator {
        operator: String,
    },

    // =========================================================================
    // Value Errors
    // =========================================================================
    #[error("Unsupported form element value: {field}: {shape}")]
    #[diagnostic(
        code(formquery::value::unsupported),
        help("Geometry, file and scan values cannot be expressed in a where clause")
    )]
    UnsupportedValue {
        field: String,
        shape: String,
    },

    // =========================================================================
    // Layer Errors
    // =========================================================================
    #[error("Subtype sublayer {subtype_code} has a parent without a subtype field")]
    #[diagnostic(code(formquery::layer::invalid_sublayer))]
    InvalidSublayer {
        subtype_code: i64,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Failed to load '{}': {message}", path.display())]
    #[diagnostic(code(formquery::config::load_failed))]
    Config {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Collaborator Errors
    // =========================================================================
    #[error("Feature query failed: {message}")]
    #[diagnostic(code(formquery::source::query_failed))]
    Query {
        message: String,
    },

    #[error("Form element '{element}': {message}")]
    #[diagnostic(code(formquery::form::mutation_failed))]
    Form {
        element: String,
        message: String,
    },
}

impl QueryError {
    /// Creates a missing-input error.
    pub fn missing(input: impl Into<String>) -> Self {
        Self::MissingRequiredInput {
            input: input.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a feature query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Creates a form mutation error.
    pub fn form(element: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Form {
            element: element.into(),
            message: message.into(),
        }
    }
}
