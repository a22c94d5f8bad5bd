//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed microsecond width
//! so that `ORDER BY created_at` sorts chronologically. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use roster_core::person::Person;
use uuid::Uuid;

use crate::{Error, Result};

/// Column list shared by every `SELECT` that yields a [`RawPerson`].
pub const PERSON_COLUMNS: &str =
  "id, name, surname, patronymic, age, gender, nationality, created_at, updated_at";

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> {
  Uuid::parse_str(s).map_err(|e| Error::Scan(format!("id {s:?}: {e}")))
}

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

/// Current time at the precision the store keeps.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Scan(format!("timestamp {s:?}: {e}")))
}

// ─── Raw row ──────────────────────────────────────────────────────────────────

/// A `persons` row exactly as SQLite hands it back, before validation.
pub struct RawPerson {
  pub id:          String,
  pub name:        String,
  pub surname:     String,
  pub patronymic:  Option<String>,
  pub age:         Option<i64>,
  pub gender:      Option<String>,
  pub nationality: Option<String>,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawPerson {
  /// Read a row selected with [`PERSON_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      name:        row.get(1)?,
      surname:     row.get(2)?,
      patronymic:  row.get(3)?,
      age:         row.get(4)?,
      gender:      row.get(5)?,
      nationality: row.get(6)?,
      created_at:  row.get(7)?,
      updated_at:  row.get(8)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    let age = self
      .age
      .map(u32::try_from)
      .transpose()
      .map_err(|e| Error::Scan(format!("age: {e}")))?;

    Ok(Person {
      id: decode_uuid(&self.id)?,
      name: self.name,
      surname: self.surname,
      patronymic: self.patronymic,
      age,
      gender: self.gender,
      nationality: self.nationality,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
