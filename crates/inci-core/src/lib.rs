//! Core types and operations for the inci ticket tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! sheet of record is reached only through the [`store::RowStore`] trait,
//! which callers inject into every operation that touches it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod code;
pub mod display;
pub mod error;
pub mod listing;
pub mod reconcile;
pub mod schema;
pub mod store;
pub mod table;
pub mod ticket;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
