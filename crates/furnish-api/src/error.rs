//! API error type, the shared JSON envelope, and the
//! [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::QueryRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Body of every error response, and of the order-intake responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
  /// The HTTP status code, as a string.
  pub status:  String,
  pub message: String,
}

impl Envelope {
  pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
    Self { status: status.as_u16().to_string(), message: message.into() }
  }
}

pub(crate) fn envelope(status: StatusCode, message: impl Into<String>) -> Response {
  (status, Json(Envelope::new(status, message))).into_response()
}

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request body was not well-formed JSON of the expected shape.
  #[error("invalid request body: {0}")]
  Decode(String),

  /// The `id` query parameter was missing or not a valid identifier.
  #[error("malformed identifier: {0:?}")]
  MalformedId(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  pub fn status(&self) -> StatusCode {
    match self {
      Self::Decode(_) | Self::MalformedId(_) => StatusCode::BAD_REQUEST,
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl From<furnish_core::Error> for ApiError {
  fn from(e: furnish_core::Error) -> Self {
    match e {
      furnish_core::Error::MalformedId(raw) => Self::MalformedId(raw),
    }
  }
}

impl From<QueryRejection> for ApiError {
  fn from(e: QueryRejection) -> Self { Self::MalformedId(e.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    if let Self::Store(e) = &self {
      tracing::error!(error = %e, "store operation failed");
    }
    envelope(self.status(), self.to_string())
  }
}

/// Decode a JSON request body, mapping any failure to [`ApiError::Decode`].
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
  serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}
