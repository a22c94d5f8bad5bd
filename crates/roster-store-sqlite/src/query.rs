//! Dynamic statement construction for search and sparse update.
//!
//! Only column names and operators are ever written into the SQL text.
//! Every caller-supplied value travels through [`Statement::args`] and is
//! bound to a `?n` placeholder, where `n` is its 1-based position in that
//! list.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use roster_core::{
  filter::{PersonFilter, non_empty},
  person::PersonPatch,
};
use rusqlite::types::Value;
use uuid::Uuid;

use crate::encode::{PERSON_COLUMNS, encode_dt, encode_uuid};

// ─── Statement ───────────────────────────────────────────────────────────────

/// Rendered SQL plus its positional arguments, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
  pub sql:  String,
  pub args: Vec<Value>,
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Appends `(fragment, argument)` pairs and numbers placeholders as it goes,
/// so the text and the argument list cannot drift apart.
#[derive(Debug, Default)]
pub struct SqlBuilder {
  sql:  String,
  args: Vec<Value>,
}

impl SqlBuilder {
  pub fn new(head: &str) -> Self {
    Self { sql: head.to_owned(), args: Vec::new() }
  }

  /// Append static SQL text.
  pub fn push(&mut self, fragment: &str) -> &mut Self {
    self.sql.push_str(fragment);
    self
  }

  /// Append `fragment` followed by the placeholder for `value`.
  pub fn push_bind(&mut self, fragment: &str, value: Value) -> &mut Self {
    self.args.push(value);
    // Writing to a String cannot fail.
    let _ = write!(self.sql, "{fragment}?{}", self.args.len());
    self
  }

  pub fn build(self) -> Statement {
    Statement { sql: self.sql, args: self.args }
  }
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// Build the filtered, paginated person search.
///
/// The age range is always bound first, then each non-empty text filter in
/// the order name, surname, gender, nationality, then limit and offset.
/// Assumes `filter` has passed [`PersonFilter::validate`].
pub fn build_search(filter: &PersonFilter) -> Statement {
  let (age_min, age_max) = filter.age_range();

  let mut b = SqlBuilder::new(&format!("SELECT {PERSON_COLUMNS} FROM persons WHERE "));
  b.push_bind("age BETWEEN ", Value::Integer(age_min.into()))
    .push_bind(" AND ", Value::Integer(age_max.into()));

  for (column, value) in [("name", &filter.name), ("surname", &filter.surname)] {
    if let Some(v) = non_empty(value) {
      let pattern = format!("%{}%", escape_like(v));
      b.push_bind(&format!(" AND {column} LIKE "), Value::Text(pattern))
        .push(" ESCAPE '\\'");
    }
  }

  for (column, value) in [("gender", &filter.gender), ("nationality", &filter.nationality)] {
    if let Some(v) = non_empty(value) {
      b.push_bind(&format!(" AND {column} = "), Value::Text(v.to_owned()));
    }
  }

  b.push(" ORDER BY created_at DESC")
    .push_bind(" LIMIT ", Value::Integer(filter.effective_limit()))
    .push_bind(" OFFSET ", Value::Integer(filter.effective_offset()));

  b.build()
}

/// Make `%`, `_` and `\` match literally under `ESCAPE '\'`.
fn escape_like(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  for c in value.chars() {
    if matches!(c, '%' | '_' | '\\') {
      out.push('\\');
    }
    out.push(c);
  }
  out
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// Build the sparse update for `id`.
///
/// Only present patch fields become assignments. `updated_at = now` is always
/// the last assignment, so an empty patch still touches the row.
pub fn build_update(id: Uuid, patch: &PersonPatch, now: DateTime<Utc>) -> Statement {
  let text = |v: &Option<String>| v.clone().map(Value::Text);

  let assignments = [
    ("name", text(&patch.name)),
    ("surname", text(&patch.surname)),
    ("patronymic", text(&patch.patronymic)),
    ("age", patch.age.map(|a| Value::Integer(a.into()))),
    ("gender", text(&patch.gender)),
    ("nationality", text(&patch.nationality)),
    ("updated_at", Some(Value::Text(encode_dt(now)))),
  ];

  let mut b = SqlBuilder::new("UPDATE persons SET ");
  let mut sep = "";
  for (column, value) in assignments {
    if let Some(value) = value {
      b.push_bind(&format!("{sep}{column} = "), value);
      sep = ", ";
    }
  }
  b.push_bind(" WHERE id = ", Value::Text(encode_uuid(id)));

  b.build()
}
