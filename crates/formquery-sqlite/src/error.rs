//! Error types for the SQLite feature source.

use formquery::QueryError;
use thiserror::Error;

/// Errors raised by [`SqliteFeatureSource`](crate::SqliteFeatureSource).
#[derive(Debug, Error)]
pub enum Error {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A layer cannot be mapped to a table, or a query names a field the
    /// table lacks.
    #[error("schema error: {0}")]
    Schema(String),

    #[error("no table for layer '{0}'")]
    UnknownLayer(String),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("connection lock poisoned")]
    LockPoisoned,
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for QueryError {
    fn from(err: Error) -> Self {
        QueryError::query(err.to_string())
    }
}
