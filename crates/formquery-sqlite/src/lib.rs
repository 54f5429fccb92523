//! # formquery-sqlite
//!
//! A [`FeatureSource`](formquery::FeatureSource) over a local SQLite database.
//! Each layer is one table named after the layer, with one column per layer
//! field. Generated where clauses run against it unchanged apart from ANSI
//! `DATE`/`TIMESTAMP` literals, which SQLite does not understand and which are
//! rewritten to the string literals dates are stored as.
//!
//! ```rust,ignore
//! use formquery_sqlite::SqliteFeatureSource;
//!
//! let source = SqliteFeatureSource::open("replica.db")?;
//! source.create_layer_table(&layer_info)?;
//! source.insert_features(&layer_info, &features)?;
//!
//! let results = source.query_features(&layer_info, &query).await?;
//! ```

mod error;
mod literal;
mod schema;
mod source;

pub use error::{Error, Result};
pub use literal::rewrite_typed_literals;
pub use schema::{column_type, create_table_sql, table_name, DATE_FORMAT};
pub use source::SqliteFeatureSource;
