//! Person records and the drafts and patches that produce them.
//!
//! Optional attributes use `Option<T>` throughout: `None` is "absent" (not yet
//! enriched, withheld, or untouched by a patch) and is kept distinct from an
//! empty string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Person ──────────────────────────────────────────────────────────────────

/// A stored person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:          Uuid,
  pub name:        String,
  pub surname:     String,
  pub patronymic:  Option<String>,
  pub age:         Option<u32>,
  pub gender:      Option<String>,
  pub nationality: Option<String>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

// ─── Draft ───────────────────────────────────────────────────────────────────

/// A person that has not been stored yet. The store assigns the identifier
/// and both timestamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPerson {
  pub name:        String,
  pub surname:     String,
  pub patronymic:  Option<String>,
  pub age:         Option<u32>,
  pub gender:      Option<String>,
  pub nationality: Option<String>,
}

impl NewPerson {
  /// A draft with only the identifying names set.
  pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      surname: surname.into(),
      ..Self::default()
    }
  }

  pub fn with_patronymic(mut self, patronymic: impl Into<String>) -> Self {
    self.patronymic = Some(patronymic.into());
    self
  }

  /// Reject drafts that would violate the non-empty name invariant.
  pub fn validate(&self) -> Result<()> {
    require_non_empty("name", &self.name)?;
    require_non_empty("surname", &self.surname)
  }
}

// ─── Sparse patch ────────────────────────────────────────────────────────────

/// A sparse update: `Some` fields are assigned, `None` fields are left as
/// stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonPatch {
  pub name:        Option<String>,
  pub surname:     Option<String>,
  pub patronymic:  Option<String>,
  pub age:         Option<u32>,
  pub gender:      Option<String>,
  pub nationality: Option<String>,
}

impl PersonPatch {
  /// Names may be omitted, but a supplied name must not blank the record.
  pub fn validate(&self) -> Result<()> {
    if let Some(name) = &self.name {
      require_non_empty("name", name)?;
    }
    if let Some(surname) = &self.surname {
      require_non_empty("surname", surname)?;
    }
    Ok(())
  }

  /// `true` when the patch would only bump `updated_at`.
  pub fn is_empty(&self) -> bool { *self == Self::default() }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    Err(Error::EmptyField { field })
  } else {
    Ok(())
  }
}
