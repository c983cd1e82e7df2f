//! Handler for `GET /tickets/export.xlsx`.
//!
//! Accepts the same query parameters as the listing, so the download matches
//! what the grid shows.

use axum::{
  extract::{Query, State},
  http::header,
  response::IntoResponse,
};
use inci_core::{display::strip_decorative, store::RowStore};
use inci_xlsx::{CONTENT_TYPE, DEFAULT_FILE_NAME, to_xlsx};

use crate::{AppState, error::ApiError, tickets::{ListParams, read_listing}};

/// Worksheet name inside the exported workbook.
const EXPORT_SHEET: &str = "Incidencias";

/// `GET /tickets/export.xlsx[?state=..][&priority=..][&code=..][&sort=..]`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RowStore,
{
  let table = read_listing(&state, params).await?;
  let bytes = to_xlsx(&strip_decorative(&table, &state.schema), EXPORT_SHEET)?;
  tracing::info!(rows = table.len(), bytes = bytes.len(), "exported listing");

  Ok((
    [
      (header::CONTENT_TYPE, CONTENT_TYPE.to_string()),
      (
        header::CONTENT_DISPOSITION,
        format!("attachment; filename=\"{DEFAULT_FILE_NAME}\""),
      ),
    ],
    bytes,
  ))
}
