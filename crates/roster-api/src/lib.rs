//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any
//! [`PersonStore`](roster_core::store::PersonStore) and any
//! [`Lookup`](roster_enrich::Lookup). Transport setup (binding, shutdown) is
//! the caller's responsibility.

pub mod envelope;
pub mod error;
pub mod persons;
pub mod service;

#[cfg(test)]
mod testing;

use std::{sync::Arc, time::Duration};

use axum::{
  Router,
  http::{HeaderName, Method, header},
  routing::{get, post},
};
use roster_core::store::PersonStore;
use roster_enrich::Lookup;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

pub use error::{ApiError, Failure};
pub use service::PeopleService;

/// Build the API router for `service`.
///
/// The returned `Router<()>` can be served directly or nested into any parent
/// router regardless of its own state type.
pub fn api_router<S, L>(service: Arc<PeopleService<S, L>>) -> Router<()>
where
  S: PersonStore + 'static,
  L: Lookup + 'static,
{
  Router::new()
    .route("/person", post(persons::create::<S, L>))
    .route("/persons", get(persons::list::<S, L>))
    .route(
      "/person/{id}",
      get(persons::get_one::<S, L>)
        .put(persons::update_one::<S, L>)
        .delete(persons::delete_one::<S, L>),
    )
    .with_state(service)
    .layer(cors())
    .layer(TraceLayer::new_for_http())
}

fn cors() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
    .allow_headers([
      header::ACCEPT,
      header::AUTHORIZATION,
      header::CONTENT_TYPE,
      HeaderName::from_static("x-csrf-token"),
    ])
    .expose_headers([header::LINK])
    .max_age(Duration::from_secs(300))
}

// ─── Integration tests ────────────────────────────────────────────────────────
