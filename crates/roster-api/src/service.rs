//! [`PeopleService`]: validation, enrichment and storage for one request.
//!
//! Every caller path goes through here, so input is validated before it
//! reaches a query builder and a draft is stored only after every lookup has
//! succeeded.

use roster_core::{
  filter::PersonFilter,
  person::{NewPerson, Person, PersonPatch},
  store::{PersonStore, StoreError},
};
use roster_enrich::{Enricher, Lookup};
use uuid::Uuid;

use crate::error::ApiError;

pub struct PeopleService<S, L> {
  store:    S,
  enricher: Enricher<L>,
}

impl<S, L> PeopleService<S, L>
where
  S: PersonStore,
  L: Lookup,
{
  pub fn new(store: S, enricher: Enricher<L>) -> Self { Self { store, enricher } }

  pub fn store(&self) -> &S { &self.store }

  /// Enrich `draft` from its given name, then insert it.
  pub async fn create(&self, mut draft: NewPerson) -> Result<Person, ApiError> {
    draft.validate()?;

    let enrichment = self.enricher.enrich(&draft.name).await?;
    enrichment.apply(&mut draft);

    let person = self
      .store
      .create(draft)
      .await
      .map_err(|e| ApiError::store("failed to save person", e))?;

    tracing::info!(id = %person.id, name = %person.name, "person created");
    Ok(person)
  }

  pub async fn search(&self, filter: &PersonFilter) -> Result<Vec<Person>, ApiError> {
    filter.validate()?;
    let persons = self
      .store
      .search(filter)
      .await
      .map_err(|e| ApiError::store("failed to retrieve persons", e))?;

    tracing::info!(
      count = persons.len(),
      limit = filter.effective_limit(),
      offset = filter.effective_offset(),
      "retrieved persons"
    );
    Ok(persons)
  }

  pub async fn get(&self, id: Uuid) -> Result<Person, ApiError> {
    self.store.get(id).await.map_err(|e| store_error("failed to retrieve person", e))
  }

  pub async fn update(&self, id: Uuid, patch: &PersonPatch) -> Result<(), ApiError> {
    patch.validate()?;
    self.store.update(id, patch).await.map_err(|e| store_error("failed to update person", e))?;
    tracing::info!(%id, "person updated");
    Ok(())
  }

  pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
    self.store.delete(id).await.map_err(|e| store_error("failed to delete person", e))?;
    tracing::info!(%id, "person deleted");
    Ok(())
  }
}

fn store_error<E: StoreError>(message: &'static str, e: E) -> ApiError {
  if e.is_not_found() {
    ApiError::NotFound("person not found".to_owned())
  } else {
    ApiError::store(message, e)
  }
}
