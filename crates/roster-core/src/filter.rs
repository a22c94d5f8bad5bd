//! Search filters for [`PersonStore::search`](crate::store::PersonStore::search).

use crate::{Error, Result};

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_OFFSET: i64 = 0;
pub const DEFAULT_AGE_MIN: u32 = 0;
pub const DEFAULT_AGE_MAX: u32 = 200;

/// Parameters for a filtered, paginated person search.
///
/// Every field is optional. Text filters that are `None` or empty impose no
/// constraint. Out-of-range pagination falls back to the defaults instead of
/// being rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonFilter {
  pub limit:       Option<i64>,
  pub offset:      Option<i64>,
  pub age_min:     Option<u32>,
  pub age_max:     Option<u32>,
  /// Case-insensitive substring match.
  pub name:        Option<String>,
  /// Case-insensitive substring match.
  pub surname:     Option<String>,
  /// Exact match.
  pub gender:      Option<String>,
  /// Exact match.
  pub nationality: Option<String>,
}

impl PersonFilter {
  /// Inclusive age bounds, defaulting to `0..=200`.
  pub fn age_range(&self) -> (u32, u32) {
    (
      self.age_min.unwrap_or(DEFAULT_AGE_MIN),
      self.age_max.unwrap_or(DEFAULT_AGE_MAX),
    )
  }

  pub fn effective_limit(&self) -> i64 {
    self.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIMIT)
  }

  pub fn effective_offset(&self) -> i64 {
    self.offset.filter(|o| *o >= 0).unwrap_or(DEFAULT_OFFSET)
  }

  /// Must be called before the filter reaches a query builder.
  pub fn validate(&self) -> Result<()> {
    let (min, max) = self.age_range();
    if min > max {
      return Err(Error::InvalidAgeRange { min, max });
    }
    Ok(())
  }
}

/// Returns the value only if it is present and non-empty.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
  value.as_deref().filter(|v| !v.is_empty())
}
