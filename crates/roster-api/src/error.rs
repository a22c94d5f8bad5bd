//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Handlers produce an [`ApiError`] and attach the request path with
//! [`AtPath::at`]; the resulting [`Failure`] renders as
//! `{"code", "message", "resource"}`.

use axum::{
  Json,
  http::{StatusCode, Uri},
  response::{IntoResponse, Response},
};
use roster_enrich::EnrichError;
use serde::Serialize;
use thiserror::Error;

/// An error returned by the service layer or a handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  Invalid(#[from] roster_core::Error),

  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  NotFound(String),

  #[error(transparent)]
  Enrichment(#[from] EnrichError),

  /// `message` is what the client sees; the backend error stays in logs.
  #[error("{message}")]
  Store {
    message: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  pub fn store(message: &'static str, source: impl std::error::Error + Send + Sync + 'static) -> Self {
    ApiError::Store { message, source: Box::new(source) }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::Invalid(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Enrichment(_) => StatusCode::BAD_GATEWAY,
      ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

// ─── Failure ─────────────────────────────────────────────────────────────────

/// Error body shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
  pub code:     u16,
  pub message:  String,
  pub resource: String,
}

/// An [`ApiError`] bound to the request path that produced it.
#[derive(Debug)]
pub struct Failure {
  pub error:    ApiError,
  pub resource: String,
}

impl IntoResponse for Failure {
  fn into_response(self) -> Response {
    let status = self.error.status();
    let message = self.error.to_string();

    if status.is_server_error() {
      tracing::error!(code = status.as_u16(), url = %self.resource, error = ?self.error, "{message}");
    } else {
      tracing::warn!(code = status.as_u16(), url = %self.resource, "{message}");
    }

    let body = ErrorBody { code: status.as_u16(), message, resource: self.resource };
    (status, Json(body)).into_response()
  }
}

/// Attach a request path to an error result.
pub trait AtPath<T> {
  fn at(self, uri: &Uri) -> Result<T, Failure>;
}

impl<T, E: Into<ApiError>> AtPath<T> for Result<T, E> {
  fn at(self, uri: &Uri) -> Result<T, Failure> {
    self.map_err(|e| Failure { error: e.into(), resource: uri.path().to_owned() })
  }
}
