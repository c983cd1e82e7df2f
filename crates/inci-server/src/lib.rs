//! HTTP server for the inci ticket tracker.
//!
//! Wires a [`SqliteSheetStore`] worksheet into the JSON API under `/api`.

use std::path::{Path, PathBuf};

use axum::Router;
use inci_api::{AppState, api_router};
use inci_core::{schema::Schema, store::RowStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

pub const DEFAULT_WORKSHEET: &str = "Incidencias";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `INCI_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  /// Worksheet inside the store that holds the tickets.
  #[serde(default = "default_worksheet")]
  pub worksheet:  String,
  /// Column names; anything omitted keeps its default.
  #[serde(default)]
  pub schema:     Schema,
}

fn default_worksheet() -> String { DEFAULT_WORKSHEET.to_string() }

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the API nested under `/api`, with request tracing.
pub fn app<S>(state: AppState<S>) -> Router
where
  S: RowStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use inci_store_sqlite::SqliteSheetStore;
  use tower::ServiceExt as _;

  use super::*;

  #[test]
  fn minimal_config_uses_defaults() {
    let cfg: ServerConfig = serde_json::from_str(
      r#"{"host":"0.0.0.0","port":8080,"store_path":"inci.db"}"#,
    )
    .unwrap();
    assert_eq!(cfg.worksheet, "Incidencias");
    assert_eq!(cfg.schema, Schema::default());
    assert_eq!(cfg.address(), "0.0.0.0:8080");
  }

  #[test]
  fn schema_columns_can_be_renamed() {
    let cfg: ServerConfig = serde_json::from_str(
      r#"{"host":"h","port":1,"store_path":"x","schema":{"state":"Status"}}"#,
    )
    .unwrap();
    assert_eq!(cfg.schema.state, "Status");
    assert_eq!(cfg.schema.code, "Código");
  }

  #[test]
  fn tilde_is_expanded_only_at_the_start() {
    let plain = Path::new("/var/lib/inci.db");
    assert_eq!(expand_tilde(plain), plain);
    let odd = Path::new("data/~/inci.db");
    assert_eq!(expand_tilde(odd), odd);
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let store = SqliteSheetStore::open_in_memory(DEFAULT_WORKSHEET)
      .await
      .unwrap();
    let state = AppState::new(store, Schema::default());

    let req = Request::get("/api/options").body(Body::empty()).unwrap();
    let resp = app(state.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::get("/options").body(Body::empty()).unwrap();
    let resp = app(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
