//! The `PersonStore` trait.
//!
//! Implemented by storage backends (e.g. `roster-store-sqlite`). Higher
//! layers (`roster-api`) depend on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  filter::PersonFilter,
  person::{NewPerson, Person, PersonPatch},
};

/// Backend errors must say whether they mean "no such record", so callers
/// can tell an expected miss from a storage failure.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn is_not_found(&self) -> bool;
}

/// Abstraction over a person store backend.
///
/// Each method issues a single statement. Callers validate drafts, patches,
/// and filters before handing them over.
pub trait PersonStore: Send + Sync {
  type Error: StoreError;

  /// Persist a new person. The store assigns `id`, `created_at` and
  /// `updated_at`.
  fn create(
    &self,
    person: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Fetch one person. A missing id is a not-found error.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Filtered search, newest first.
  fn search<'a>(
    &'a self,
    filter: &'a PersonFilter,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + 'a;

  /// Apply a sparse patch. Zero affected rows is a not-found error.
  fn update<'a>(
    &'a self,
    id: Uuid,
    patch: &'a PersonPatch,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Delete by id. Zero affected rows is a not-found error.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
