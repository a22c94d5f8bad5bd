//! Error type for `roster-store-sqlite`.

use roster_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A stored row could not be decoded into a person.
  #[error("failed to scan person: {0}")]
  Scan(String),

  #[error("person not found: {0}")]
  NotFound(uuid::Uuid),
}

impl Error {
  /// Classify a failure from a row-reading `call`. Values that cannot be read
  /// as the column's Rust type are scan errors; anything else is the
  /// database's.
  pub(crate) fn reading(e: tokio_rusqlite::Error) -> Self {
    use rusqlite::Error as Sql;
    match e {
      tokio_rusqlite::Error::Rusqlite(
        e @ (Sql::InvalidColumnType(..)
        | Sql::FromSqlConversionFailure(..)
        | Sql::IntegralValueOutOfRange(..)),
      ) => Error::Scan(e.to_string()),
      other => Error::Database(other),
    }
  }
}

impl StoreError for Error {
  fn is_not_found(&self) -> bool { matches!(self, Error::NotFound(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
