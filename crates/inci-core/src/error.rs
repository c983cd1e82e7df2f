//! Error types for `inci-core`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failure that aborts a whole core operation.
///
/// `E` is the error type of the injected [`RowStore`](crate::store::RowStore).
#[derive(Debug, Error)]
pub enum Error<E> {
  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] E),

  #[error("the worksheet has no header row")]
  EmptySchema,
}

pub type Result<T, E> = std::result::Result<T, Error<E>>;

/// Why a single row (or cell) of a reconciliation could not be written.
///
/// These never abort an apply pass; they are collected into the
/// [`ApplyReport`](crate::reconcile::ApplyReport).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FailureReason {
  /// The row key did not resolve in the fresh snapshot of the store.
  RowNotFound,
  /// The store's header has no column with this name.
  ColumnNotFound(String),
  /// The store rejected the cell write.
  StoreWrite(String),
}

impl std::fmt::Display for FailureReason {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FailureReason::RowNotFound => f.write_str("row not found"),
      FailureReason::ColumnNotFound(c) => write!(f, "column not found: {c}"),
      FailureReason::StoreWrite(m) => write!(f, "store write failed: {m}"),
    }
  }
}
