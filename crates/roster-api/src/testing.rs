//! Test fixtures shared by the service and router tests.

use std::sync::Mutex;

use roster_enrich::{AttributeKind, Enricher, Lookup, LookupError, LookupValue};
use roster_store_sqlite::SqliteStore;

use crate::service::PeopleService;

/// Answers age 30, "female", "US" for every name, optionally failing one
/// attribute, and records the attributes it was asked for.
#[derive(Default)]
pub struct FixedLookup {
  fail_on: Option<AttributeKind>,
  calls:   Mutex<Vec<AttributeKind>>,
}

impl FixedLookup {
  pub fn failing_on(kind: AttributeKind) -> Self {
    Self { fail_on: Some(kind), ..Default::default() }
  }

  pub fn calls(&self) -> Vec<AttributeKind> { self.calls.lock().unwrap().clone() }
}

impl Lookup for FixedLookup {
  async fn fetch(&self, kind: AttributeKind, _name: &str) -> Result<LookupValue, LookupError> {
    self.calls.lock().unwrap().push(kind);
    if self.fail_on == Some(kind) {
      return Err(LookupError::Upstream { kind, status: 503 });
    }
    Ok(match kind {
      AttributeKind::Age => LookupValue::Age(30),
      AttributeKind::Gender => LookupValue::Gender("female".into()),
      AttributeKind::Nationality => LookupValue::Nationality("US".into()),
    })
  }
}

pub async fn service_with(lookup: FixedLookup) -> PeopleService<SqliteStore, FixedLookup> {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  PeopleService::new(store, Enricher::new(lookup))
}

pub async fn service() -> PeopleService<SqliteStore, FixedLookup> {
  service_with(FixedLookup::default()).await
}
