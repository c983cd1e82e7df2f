//! Handlers for saving edits made in the grid.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/tickets/diff` | Body: [`GridEdit`]; returns the cell changes without writing |
//! | `POST` | `/tickets/reconcile` | Body: [`GridEdit`]; writes the changes, returns an [`ApplyReport`] |
//! | `PUT`  | `/tickets` | Body: [`Table`]; replaces the whole worksheet |
//!
//! Rows that fail during a reconcile are part of a 200 response; the client
//! is expected to reload the listing afterwards.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
};
use chrono::Local;
use inci_core::{
  reconcile::{self, ApplyReport, CellChange},
  store::RowStore,
  table::Table,
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

/// The table the grid was loaded with and the table the user saved.
#[derive(Debug, Deserialize)]
pub struct GridEdit {
  pub original: Table,
  pub edited:   Table,
}

/// `POST /tickets/diff`
pub async fn preview<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<GridEdit>,
) -> Json<Vec<CellChange>>
where
  S: RowStore,
{
  Json(reconcile::diff(&body.original, &body.edited, &state.schema))
}

/// `POST /tickets/reconcile`
pub async fn reconcile<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<GridEdit>,
) -> Result<Json<ApplyReport>, ApiError>
where
  S: RowStore,
{
  let now = Local::now().naive_local();
  let report = reconcile::reconcile(
    &*state.store,
    &state.schema,
    &body.original,
    &body.edited,
    now,
  )
  .await?;
  Ok(Json(report))
}

/// `PUT /tickets`: whole-table save. Decorative columns are dropped.
pub async fn save_all<S>(
  State(state): State<AppState<S>>,
  Json(table): Json<Table>,
) -> Result<StatusCode, ApiError>
where
  S: RowStore,
{
  if table.columns.is_empty() {
    return Err(ApiError::BadRequest("table has no columns".into()));
  }
  reconcile::rewrite(&*state.store, &state.schema, &table).await?;
  Ok(StatusCode::NO_CONTENT)
}
