//! Error types for `roster-enrich`.

use thiserror::Error;

use crate::lookup::AttributeKind;

/// A single lookup call that did not produce a value.
#[derive(Debug, Error)]
pub enum LookupError {
  #[error("{kind} lookup returned HTTP {status}")]
  Upstream { kind: AttributeKind, status: u16 },

  /// Transport failure or an unreadable response body.
  #[error("{kind} lookup failed: {cause}")]
  Failed {
    kind:  AttributeKind,
    #[source]
    cause: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl LookupError {
  pub fn failed(
    kind: AttributeKind,
    cause: impl Into<Box<dyn std::error::Error + Send + Sync>>,
  ) -> Self {
    Self::Failed { kind, cause: cause.into() }
  }

  pub fn kind(&self) -> AttributeKind {
    match self {
      Self::Upstream { kind, .. } | Self::Failed { kind, .. } => *kind,
    }
  }
}

/// The enrichment pipeline stopped; nothing may be stored.
#[derive(Debug, Error)]
pub enum EnrichError {
  #[error("failed to enrich {attribute}: {source}")]
  Failed {
    attribute: AttributeKind,
    #[source]
    source:    LookupError,
  },

  #[error("{expected} lookup answered with a {actual} value")]
  Mismatch {
    expected: AttributeKind,
    actual:   AttributeKind,
  },
}

impl EnrichError {
  /// The attribute whose step stopped the pipeline.
  pub fn attribute(&self) -> AttributeKind {
    match self {
      Self::Failed { attribute, .. } => *attribute,
      Self::Mismatch { expected, .. } => *expected,
    }
  }
}
