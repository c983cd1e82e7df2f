//! The `RowStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `inci-store-sqlite`).
//! Higher layers (`inci-api`, `inci-server`) depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::table::Table;

/// Abstraction over a row-oriented sheet of record.
///
/// Row and column numbers are 1-based and the header occupies row 1, so the
/// first data row is row 2. None of the operations is atomic with respect to
/// the others; callers get no transactional guarantees across calls.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RowStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the header and every data row, in column order.
  fn get_all_records(
    &self,
  ) -> impl Future<Output = Result<Table, Self::Error>> + Send + '_;

  /// Append `values` after the last data row.
  fn append_row(
    &self,
    values: Vec<String>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Overwrite a single cell.
  fn update_cell(
    &self,
    row: u32,
    col: u32,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Replace the whole worksheet with `header` followed by `rows`.
  fn clear_and_rewrite(
    &self,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
