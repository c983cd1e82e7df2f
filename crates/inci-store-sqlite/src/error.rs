//! Error type for `inci-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// Row and column numbers are 1-based.
  #[error("invalid cell address: row {row}, column {col}")]
  InvalidCell { row: u32, col: u32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
