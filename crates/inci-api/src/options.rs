//! Handler for `GET /options`: the values the form and grid selectors offer.

use axum::Json;
use inci_core::schema::{Priority, TicketState};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Options {
  pub states:     Vec<String>,
  pub priorities: Vec<String>,
}

/// `GET /options`
pub async fn handler() -> Json<Options> {
  Json(Options {
    states:     TicketState::all_values(),
    priorities: Priority::all_values(),
  })
}
