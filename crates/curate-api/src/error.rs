//! API error type and [`axum::response::IntoResponse`] implementation.

use std::fmt::Display;

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use curate_core::Errors;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// One or more field rules failed; rendered as `{"errors": {...}}`.
  #[error("unprocessable: {0}")]
  Unprocessable(Errors),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn not_found(entity: &str, id: impl Display) -> Self {
    ApiError::NotFound(format!("{entity} {id} not found"))
  }

  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(e))
  }
}

impl From<Errors> for ApiError {
  fn from(errors: Errors) -> Self { ApiError::Unprocessable(errors) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::NotFound(m) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": m }))).into_response()
      }
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": m }))).into_response()
      }
      ApiError::Unprocessable(errors) => {
        tracing::info!(%errors, "rejected invalid record");
        (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "errors": errors })))
          .into_response()
      }
      // Details go to the log, not to the client.
      ApiError::Store(e) => {
        tracing::error!(error = %e, "datastore failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": "internal server error" })),
        )
          .into_response()
      }
    }
  }
}
