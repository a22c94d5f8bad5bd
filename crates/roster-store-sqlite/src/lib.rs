//! SQLite backend for the Roster person store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Dynamic statements are assembled by
//! the [`query`] module and always bind values positionally.

mod encode;
mod schema;
mod store;

pub mod error;
pub mod query;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
