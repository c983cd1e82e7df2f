//! JSON API for the inci ticket tracker.
//!
//! Exposes an axum [`Router`] backed by any [`inci_core::store::RowStore`].
//! This is the surface the form and grid talk to; auth, TLS, and static
//! assets are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", inci_api::api_router(state))
//! ```

pub mod error;
pub mod export;
pub mod grid;
pub mod options;
pub mod tickets;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use inci_core::{schema::Schema, store::RowStore};

pub use error::ApiError;

/// Shared state threaded through all handlers.
#[derive(Clone)]
pub struct AppState<S: RowStore> {
  pub store:  Arc<S>,
  pub schema: Arc<Schema>,
}

impl<S: RowStore> AppState<S> {
  pub fn new(store: S, schema: Schema) -> Self {
    Self {
      store:  Arc::new(store),
      schema: Arc::new(schema),
    }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: RowStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Listing and creation
    .route(
      "/tickets",
      get(tickets::list::<S>)
        .post(tickets::create::<S>)
        .put(grid::save_all::<S>),
    )
    // Grid saves
    .route("/tickets/diff", post(grid::preview::<S>))
    .route("/tickets/reconcile", post(grid::reconcile::<S>))
    // Export
    .route("/tickets/export.xlsx", get(export::handler::<S>))
    .route("/options", get(options::handler))
    .with_state(state)
}
