//! Error types for `roster-core`.

use thiserror::Error;

/// Caller input that can never be stored or queried as given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("{field} is required")]
  EmptyField { field: &'static str },

  #[error("age_min ({min}) cannot be greater than age_max ({max})")]
  InvalidAgeRange { min: u32, max: u32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
