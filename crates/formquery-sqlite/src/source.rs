//! # SQLite Feature Source
//!
//! Runs feature queries against layer tables. SQLite calls are blocking, so
//! the [`FeatureSource`] implementation moves them onto tokio's blocking pool
//! and shares the connection behind a mutex.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::DateTime;
use formquery::text::FoldedKey;
use formquery::{Attributes, FeatureQuery, FeatureSet, FeatureSource, FieldType, LayerInfo};
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection, OptionalExtension};
use serde_json::Value;
use tracing::{debug, info};

use crate::literal::rewrite_typed_literals;
use crate::schema::{create_table_sql, quote_ident, table_name, DATE_FORMAT};
use crate::{Error, Result};

/// Feature source over a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteFeatureSource {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteFeatureSource {
    /// Opens (or creates) a database file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "opening feature database");

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL")?;
        conn.execute_batch("PRAGMA synchronous = NORMAL")?;
        Ok(Self::from_connection(conn))
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        debug!("opening in-memory feature database");
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| Error::LockPoisoned)
    }

    /// Creates the table of a layer if it does not exist.
    pub fn create_layer_table(&self, info: &LayerInfo) -> Result<()> {
        let sql = create_table_sql(info)?;
        self.lock()?.execute_batch(&sql)?;
        debug!(table = table_name(info)?, "created layer table");
        Ok(())
    }

    /// Inserts features in one transaction. Attributes that are not layer
    /// fields are ignored; missing ones are stored as NULL.
    pub fn insert_features(&self, info: &LayerInfo, features: &[Attributes]) -> Result<usize> {
        let table = table_name(info)?;
        let columns: Vec<String> = info.fields.iter().map(|f| quote_ident(&f.name)).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote_ident(table),
            columns.join(", "),
            placeholders.join(", ")
        );

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for attributes in features {
                let values = info
                    .fields
                    .iter()
                    .map(|f| to_sql_value(attributes.get(&f.name), f.field_type));
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;

        debug!(table, count = features.len(), "inserted features");
        Ok(features.len())
    }

    /// Runs a feature query on the calling thread.
    pub fn select(&self, target: &LayerInfo, query: &FeatureQuery) -> Result<FeatureSet> {
        let conn = self.lock()?;
        run_query(&conn, target, query)
    }
}

#[async_trait]
impl FeatureSource for SqliteFeatureSource {
    async fn query_features(&self, target: &LayerInfo, query: &FeatureQuery) -> formquery::Result<FeatureSet> {
        let conn = Arc::clone(&self.conn);
        let target = target.clone();
        let query = query.clone();

        let result = tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| Error::LockPoisoned)?;
            run_query(&conn, &target, &query)
        })
        .await
        .map_err(Error::from)?;

        Ok(result?)
    }
}

fn run_query(conn: &Connection, target: &LayerInfo, query: &FeatureQuery) -> Result<FeatureSet> {
    let table = table_name(target)?;
    let exists = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |_| Ok(()),
        )
        .optional()?;
    if exists.is_none() {
        return Err(Error::UnknownLayer(table.to_string()));
    }

    let fields = resolve_out_fields(target, &query.out_fields)?;
    let columns: Vec<String> = fields.iter().map(|f| quote_ident(f)).collect();
    let sql = format!(
        "SELECT {}{} FROM {} WHERE {}",
        if query.return_distinct_values { "DISTINCT " } else { "" },
        columns.join(", "),
        quote_ident(table),
        rewrite_typed_literals(&query.where_clause)
    );
    debug!(table, fields = fields.len(), distinct = query.return_distinct_values, "running feature query");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        let mut attributes = Attributes::new();
        for (i, name) in fields.iter().enumerate() {
            attributes.insert(name.clone(), to_json(row.get_ref(i)?));
        }
        Ok(attributes)
    })?;

    let features = rows.collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(FeatureSet { fields, features })
}

/// Maps requested out fields onto the layer's field names; `*` or no fields
/// select every field.
fn resolve_out_fields(target: &LayerInfo, out_fields: &[String]) -> Result<Vec<String>> {
    if out_fields.is_empty() || out_fields.iter().any(|f| f == "*") {
        return Ok(target.fields.iter().map(|f| f.name.clone()).collect());
    }

    out_fields
        .iter()
        .map(|requested| {
            let key = FoldedKey::new(requested);
            target
                .fields
                .iter()
                .find(|f| key.matches(&f.name))
                .map(|f| f.name.clone())
                .ok_or_else(|| Error::Schema(format!("unknown field '{}'", requested)))
        })
        .collect()
}

fn to_sql_value(value: Option<&Value>, field_type: FieldType) -> SqlValue {
    match value {
        None | Some(Value::Null) => SqlValue::Null,
        Some(Value::Bool(b)) => SqlValue::Integer(i64::from(*b)),
        Some(Value::Number(n)) if field_type == FieldType::Date => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| SqlValue::Text(dt.format(DATE_FORMAT).to_string()))
            .unwrap_or(SqlValue::Null),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => n.as_f64().map(SqlValue::Real).unwrap_or(SqlValue::Null),
        },
        Some(Value::String(s)) => SqlValue::Text(s.clone()),
        Some(other) => SqlValue::Text(other.to_string()),
    }
}

fn to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
    }
}
