//! Success envelope: `{"code", "message"}` plus `data` on reads and creates.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
  pub code:    u16,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data:    Option<T>,
}

impl<T> Envelope<T> {
  pub fn with_data(status: StatusCode, message: impl Into<String>, data: T) -> Self {
    Self { code: status.as_u16(), message: message.into(), data: Some(data) }
  }
}

impl Envelope<()> {
  pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
    Self { code: status.as_u16(), message: message.into(), data: None }
  }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
  fn into_response(self) -> Response {
    let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::OK);
    (status, Json(self)).into_response()
  }
}
