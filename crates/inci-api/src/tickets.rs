//! Handlers for `/tickets` listing and creation.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/tickets` | Optional `state`, `priority` (comma-separated), `code`, `sort`, `desc` |
//! | `POST` | `/tickets` | Body: [`NewTicket`]; returns 201 + the created [`Ticket`] |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::Local;
use inci_core::{
  display::with_indicator,
  listing::{ListingQuery, list as filter_and_sort},
  store::RowStore,
  table::Table,
  ticket::{NewTicket, Ticket, create_ticket},
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// Comma-separated states to keep, e.g. `Abierta,En proceso`.
  pub state:    Option<String>,
  /// Comma-separated priorities to keep.
  pub priority: Option<String>,
  /// Case-insensitive fragment of the ticket code.
  pub code:     Option<String>,
  /// Column to sort by.
  pub sort:     Option<String>,
  #[serde(default)]
  pub desc:     bool,
}

impl From<ListParams> for ListingQuery {
  fn from(p: ListParams) -> Self {
    ListingQuery {
      states:     p.state.as_deref().map(split_set),
      priorities: p.priority.as_deref().map(split_set),
      code:       p.code,
      sort_by:    p.sort,
      descending: p.desc,
    }
  }
}

fn split_set(s: &str) -> Vec<String> {
  s.split(',')
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_owned)
    .collect()
}

/// Read the sheet and apply the listing filters.
pub(crate) async fn read_listing<S: RowStore>(
  state: &AppState<S>,
  params: ListParams,
) -> Result<Table, ApiError> {
  let table = state
    .store
    .get_all_records()
    .await
    .map_err(|e| ApiError::StoreUnavailable(Box::new(e)))?;
  Ok(filter_and_sort(&table, &state.schema, &params.into()))
}

/// `GET /tickets[?state=..][&priority=..][&code=..][&sort=..][&desc=true]`
///
/// The returned table carries the display-only indicator column.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Table>, ApiError>
where
  S: RowStore,
{
  let table = read_listing(&state, params).await?;
  Ok(Json(with_indicator(&table, &state.schema)))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /tickets`: returns 201 + the stored [`Ticket`].
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewTicket>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RowStore,
{
  let now = Local::now().naive_local();
  let ticket: Ticket =
    create_ticket(&*state.store, &state.schema, body, now).await?;
  Ok((StatusCode::CREATED, Json(ticket)))
}
