//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  /// The sheet of record could not be reached; the user may retry.
  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("export failed: {0}")]
  Export(#[from] inci_xlsx::Error),
}

impl<E> From<inci_core::Error<E>> for ApiError
where
  E: std::error::Error + Send + Sync + 'static,
{
  fn from(e: inci_core::Error<E>) -> Self {
    match e {
      inci_core::Error::StoreUnavailable(e) => ApiError::StoreUnavailable(Box::new(e)),
      e @ inci_core::Error::EmptySchema => ApiError::Conflict(e.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
