//! The `Lookup` trait and the values it produces.

use std::{fmt, future::Future};

use crate::error::LookupError;

/// The demographic attribute a lookup infers from a given name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
  Age,
  Gender,
  Nationality,
}

impl AttributeKind {
  pub fn as_str(self) -> &'static str {
    match self {
      AttributeKind::Age => "age",
      AttributeKind::Gender => "gender",
      AttributeKind::Nationality => "nationality",
    }
  }
}

impl fmt::Display for AttributeKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One inferred attribute. Transient: only ever folded into a draft person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupValue {
  Age(u32),
  Gender(String),
  /// Country code of the most likely nationality; empty when the service
  /// had no candidates.
  Nationality(String),
}

impl LookupValue {
  pub fn kind(&self) -> AttributeKind {
    match self {
      LookupValue::Age(_) => AttributeKind::Age,
      LookupValue::Gender(_) => AttributeKind::Gender,
      LookupValue::Nationality(_) => AttributeKind::Nationality,
    }
  }
}

/// A source of inferred attributes.
///
/// One call is one attempt: implementations do not retry. Dropping the
/// returned future abandons the request.
pub trait Lookup: Send + Sync {
  fn fetch<'a>(
    &'a self,
    kind: AttributeKind,
    name: &'a str,
  ) -> impl Future<Output = Result<LookupValue, LookupError>> + Send + 'a;
}
