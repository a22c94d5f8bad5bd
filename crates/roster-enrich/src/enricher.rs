//! The enrichment pipeline: age, then gender, then nationality.

use roster_core::person::NewPerson;

use crate::{
  error::EnrichError,
  lookup::{AttributeKind, Lookup, LookupValue},
};

/// Steps run in this order. The first failure stops the pipeline.
pub const STEPS: [AttributeKind; 3] = [
  AttributeKind::Age,
  AttributeKind::Gender,
  AttributeKind::Nationality,
];

/// The three inferred attributes for one name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
  pub age:         u32,
  pub gender:      String,
  pub nationality: String,
}

impl Enrichment {
  fn absorb(&mut self, value: LookupValue) {
    match value {
      LookupValue::Age(age) => self.age = age,
      LookupValue::Gender(gender) => self.gender = gender,
      LookupValue::Nationality(nationality) => self.nationality = nationality,
    }
  }

  /// Overwrite the draft's enrichment fields, whatever they held before.
  pub fn apply(self, draft: &mut NewPerson) {
    draft.age = Some(self.age);
    draft.gender = Some(self.gender);
    draft.nationality = Some(self.nationality);
  }
}

/// Runs every [`STEPS`] lookup for a name, one after another.
#[derive(Debug, Clone)]
pub struct Enricher<L> {
  lookup: L,
}

impl<L: Lookup> Enricher<L> {
  pub fn new(lookup: L) -> Self { Self { lookup } }

  pub fn lookup(&self) -> &L { &self.lookup }

  /// Resolve all three attributes for `name`, or none of them.
  pub async fn enrich(&self, name: &str) -> Result<Enrichment, EnrichError> {
    let mut enrichment = Enrichment::default();

    for attribute in STEPS {
      let value = match self.lookup.fetch(attribute, name).await {
        Ok(value) => value,
        Err(source) => {
          tracing::warn!(%attribute, name, error = %source, "enrichment step failed");
          return Err(EnrichError::Failed { attribute, source });
        }
      };

      if value.kind() != attribute {
        let actual = value.kind();
        tracing::warn!(%attribute, %actual, name, "enrichment step answered the wrong attribute");
        return Err(EnrichError::Mismatch { expected: attribute, actual });
      }
      enrichment.absorb(value);
    }

    tracing::debug!(name, ?enrichment, "enrichment complete");
    Ok(enrichment)
  }
}

#[cfg(test)]
mod tests {
  use std::{
    io,
    sync::{Arc, Mutex},
  };

  use super::*;
  use crate::error::LookupError;

  /// Answers from a fixed script and records which attributes were asked.
  #[derive(Default)]
  struct Scripted {
    fail_on: Option<AttributeKind>,
    calls:   Mutex<Vec<AttributeKind>>,
  }

  impl Scripted {
    fn failing_on(kind: AttributeKind) -> Self {
      Self { fail_on: Some(kind), ..Default::default() }
    }

    fn calls(&self) -> Vec<AttributeKind> { self.calls.lock().unwrap().clone() }
  }

  impl Lookup for Scripted {
    async fn fetch(&self, kind: AttributeKind, _name: &str) -> Result<LookupValue, LookupError> {
      self.calls.lock().unwrap().push(kind);
      if self.fail_on == Some(kind) {
        return Err(LookupError::Upstream { kind, status: 500 });
      }
      Ok(match kind {
        AttributeKind::Age => LookupValue::Age(30),
        AttributeKind::Gender => LookupValue::Gender("female".into()),
        AttributeKind::Nationality => LookupValue::Nationality("US".into()),
      })
    }
  }

  /// Always answers with an age, whatever was asked.
  struct AlwaysAge;

  impl Lookup for AlwaysAge {
    async fn fetch(&self, _kind: AttributeKind, _name: &str) -> Result<LookupValue, LookupError> {
      Ok(LookupValue::Age(1))
    }
  }

  #[tokio::test]
  async fn runs_all_steps_in_order() {
    let enricher = Enricher::new(Scripted::default());
    let got = enricher.enrich("Alice").await.unwrap();

    assert_eq!(got, Enrichment { age: 30, gender: "female".into(), nationality: "US".into() });
    assert_eq!(enricher.lookup().calls(), STEPS);
  }

  #[tokio::test]
  async fn first_failure_stops_the_pipeline() {
    let enricher = Enricher::new(Scripted::failing_on(AttributeKind::Gender));
    let err = enricher.enrich("Alice").await.unwrap_err();

    assert!(matches!(
      err,
      EnrichError::Failed { attribute: AttributeKind::Gender, source: LookupError::Upstream { .. } }
    ));
    assert_eq!(err.attribute(), AttributeKind::Gender);
    assert!(err.to_string().contains("failed to enrich gender"));
    assert_eq!(enricher.lookup().calls(), [AttributeKind::Age, AttributeKind::Gender]);
  }

  #[tokio::test]
  async fn age_failure_makes_no_further_calls() {
    let enricher = Enricher::new(Scripted::failing_on(AttributeKind::Age));
    let err = enricher.enrich("Alice").await.unwrap_err();

    assert_eq!(err.attribute(), AttributeKind::Age);
    assert_eq!(enricher.lookup().calls(), [AttributeKind::Age]);
  }

  /// Collects formatted log output in memory.
  #[derive(Clone, Default)]
  struct Captured(Arc<Mutex<Vec<u8>>>);

  impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      self.0.lock().unwrap().extend_from_slice(buf);
      Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
  }

  impl Captured {
    fn text(&self) -> String { String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned() }
  }

  #[tokio::test]
  async fn wrong_kind_of_answer_is_rejected_and_logged() {
    let logs = Captured::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
      .with_ansi(false)
      .with_writer(move || writer.clone())
      .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let err = Enricher::new(AlwaysAge).enrich("Alice").await.unwrap_err();
    assert!(matches!(
      err,
      EnrichError::Mismatch { expected: AttributeKind::Gender, actual: AttributeKind::Age }
    ));

    let text = logs.text();
    assert!(text.contains("WARN"), "{text}");
    assert!(text.contains("answered the wrong attribute"), "{text}");
    assert!(text.contains("attribute=gender"), "{text}");
  }

  #[test]
  fn apply_overwrites_preset_fields() {
    let mut draft = NewPerson {
      age: Some(99),
      gender: Some("preset".into()),
      ..NewPerson::new("Alice", "Smith")
    };
    Enrichment { age: 30, gender: "female".into(), nationality: String::new() }.apply(&mut draft);

    assert_eq!(draft.age, Some(30));
    assert_eq!(draft.gender.as_deref(), Some("female"));
    assert_eq!(draft.nationality.as_deref(), Some(""));
    assert_eq!(draft.name, "Alice");
  }
}
