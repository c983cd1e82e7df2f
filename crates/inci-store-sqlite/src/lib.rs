//! SQLite backend for the inci sheet of record.
//!
//! Models a worksheet as a sparse grid of cells, the way a spreadsheet service
//! exposes it: row 1 is the header, blank cells are simply absent. Wraps
//! [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteSheetStore;

#[cfg(test)]
mod tests;
