//! # Layer Tables
//!
//! Maps layer metadata onto SQLite tables. Dates are stored as text in
//! [`DATE_FORMAT`] so the string literals produced from `DATE`/`TIMESTAMP`
//! literals compare correctly.

use formquery::{FieldType, LayerInfo};

use crate::{Error, Result};

/// Storage format of date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The table holding a layer's features: the layer name.
pub fn table_name(info: &LayerInfo) -> Result<&str> {
    let name = info
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::Schema("layer has no name".to_string()))?;
    Ok(name)
}

/// SQLite column type of a layer field type.
pub fn column_type(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Oid => "INTEGER PRIMARY KEY",
        FieldType::Integer | FieldType::SmallInteger => "INTEGER",
        FieldType::Double => "REAL",
        FieldType::String | FieldType::Guid | FieldType::GlobalId | FieldType::Date => "TEXT",
        FieldType::Other => "BLOB",
    }
}

/// `CREATE TABLE IF NOT EXISTS` for a layer.
pub fn create_table_sql(info: &LayerInfo) -> Result<String> {
    let table = table_name(info)?;
    if info.fields.is_empty() {
        return Err(Error::Schema(format!("layer '{}' has no fields", table)));
    }

    let columns = info
        .fields
        .iter()
        .map(|f| format!("    {} {}", quote_ident(&f.name), column_type(f.field_type)))
        .collect::<Vec<_>>()
        .join(",\n");

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n)",
        quote_ident(table),
        columns
    ))
}

pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
