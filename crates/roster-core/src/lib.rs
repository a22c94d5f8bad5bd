//! Core types and trait definitions for the Roster person store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it.

pub mod error;
pub mod filter;
pub mod person;
pub mod store;

pub use error::{Error, Result};
