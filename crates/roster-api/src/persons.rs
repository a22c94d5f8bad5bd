//! Handlers for the person endpoints.
//!
//! | Method   | Path           | Notes |
//! |----------|----------------|-------|
//! | `POST`   | `/person`      | Body: `{"name","surname","patronymic"?}`; enriched, returns 201 |
//! | `GET`    | `/persons`     | Optional `limit`, `offset`, `age_min`, `age_max`, `name`, `surname`, `gender`, `nationality` |
//! | `GET`    | `/person/{id}` | 404 if not found |
//! | `PUT`    | `/person/{id}` | Body: name, surname, and any optional fields to change |
//! | `DELETE` | `/person/{id}` | 404 if not found |

use std::{str::FromStr, sync::Arc};

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::{StatusCode, Uri},
};
use roster_core::{
  filter::PersonFilter,
  person::{NewPerson, Person, PersonPatch},
  store::PersonStore,
};
use roster_enrich::Lookup;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  envelope::Envelope,
  error::{ApiError, AtPath, Failure},
  service::PeopleService,
};

type Service<S, L> = State<Arc<PeopleService<S, L>>>;

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
  Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest("invalid UUID format for id".to_owned()))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
  payload
    .map(|Json(t)| t)
    .map_err(|e| ApiError::BadRequest(format!("failed to decode request body: {}", e.body_text())))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// Enrichment fields are not accepted here; they are always looked up.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  #[serde(default)]
  pub name:       String,
  #[serde(default)]
  pub surname:    String,
  pub patronymic: Option<String>,
}

impl From<CreateBody> for NewPerson {
  fn from(b: CreateBody) -> Self {
    NewPerson {
      patronymic: b.patronymic,
      ..NewPerson::new(b.name, b.surname)
    }
  }
}

/// `POST /person`
pub async fn create<S, L>(
  State(svc): Service<S, L>,
  uri: Uri,
  payload: Result<Json<CreateBody>, JsonRejection>,
) -> Result<Envelope<Person>, Failure>
where
  S: PersonStore + 'static,
  L: Lookup + 'static,
{
  let draft = NewPerson::from(body(payload).at(&uri)?);
  tracing::debug!(?draft, "received person payload");

  let person = svc.create(draft).await.at(&uri)?;
  Ok(Envelope::with_data(StatusCode::CREATED, "Successfully created", person))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// Raw query parameters. Numbers that do not parse are ignored, like any
/// other out-of-range value.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
  pub limit:       Option<String>,
  pub offset:      Option<String>,
  pub age_min:     Option<String>,
  pub age_max:     Option<String>,
  pub name:        Option<String>,
  pub surname:     Option<String>,
  pub gender:      Option<String>,
  pub nationality: Option<String>,
}

fn lenient<T: FromStr>(raw: Option<&str>) -> Option<T> {
  raw?.trim().parse().ok()
}

impl From<SearchParams> for PersonFilter {
  fn from(p: SearchParams) -> Self {
    PersonFilter {
      limit:       lenient(p.limit.as_deref()),
      offset:      lenient(p.offset.as_deref()),
      age_min:     lenient(p.age_min.as_deref()),
      age_max:     lenient(p.age_max.as_deref()),
      name:        p.name,
      surname:     p.surname,
      gender:      p.gender,
      nationality: p.nationality,
    }
  }
}

/// `GET /persons[?limit=..][&offset=..][&age_min=..][&age_max=..][&name=..]...`
pub async fn list<S, L>(
  State(svc): Service<S, L>,
  uri: Uri,
  Query(params): Query<SearchParams>,
) -> Result<Envelope<Vec<Person>>, Failure>
where
  S: PersonStore + 'static,
  L: Lookup + 'static,
{
  let filter = PersonFilter::from(params);
  tracing::debug!(?filter, "search request");

  let persons = svc.search(&filter).await.at(&uri)?;
  Ok(Envelope::with_data(StatusCode::OK, "Successfully retrieved", persons))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /person/{id}`
pub async fn get_one<S, L>(
  State(svc): Service<S, L>,
  uri: Uri,
  Path(id): Path<String>,
) -> Result<Envelope<Person>, Failure>
where
  S: PersonStore + 'static,
  L: Lookup + 'static,
{
  let id = parse_id(&id).at(&uri)?;
  let person = svc.get(id).await.at(&uri)?;
  Ok(Envelope::with_data(StatusCode::OK, "Successfully retrieved", person))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// Name and surname are required; every other field is applied only when
/// present.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  #[serde(default)]
  pub name:        String,
  #[serde(default)]
  pub surname:     String,
  pub patronymic:  Option<String>,
  pub age:         Option<u32>,
  pub gender:      Option<String>,
  pub nationality: Option<String>,
}

impl From<UpdateBody> for PersonPatch {
  fn from(b: UpdateBody) -> Self {
    PersonPatch {
      name:        Some(b.name),
      surname:     Some(b.surname),
      patronymic:  b.patronymic,
      age:         b.age,
      gender:      b.gender,
      nationality: b.nationality,
    }
  }
}

/// `PUT /person/{id}`
pub async fn update_one<S, L>(
  State(svc): Service<S, L>,
  uri: Uri,
  Path(id): Path<String>,
  payload: Result<Json<UpdateBody>, JsonRejection>,
) -> Result<Envelope<()>, Failure>
where
  S: PersonStore + 'static,
  L: Lookup + 'static,
{
  let id = parse_id(&id).at(&uri)?;
  let patch = PersonPatch::from(body(payload).at(&uri)?);

  svc.update(id, &patch).await.at(&uri)?;
  Ok(Envelope::message(StatusCode::OK, "Successfully updated"))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /person/{id}`
pub async fn delete_one<S, L>(
  State(svc): Service<S, L>,
  uri: Uri,
  Path(id): Path<String>,
) -> Result<Envelope<()>, Failure>
where
  S: PersonStore + 'static,
  L: Lookup + 'static,
{
  let id = parse_id(&id).at(&uri)?;
  svc.delete(id).await.at(&uri)?;
  Ok(Envelope::message(StatusCode::OK, "Successfully deleted"))
}
