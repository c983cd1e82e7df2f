//! inci server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `INCI_*`
//! environment overrides, opens the SQLite sheet, makes sure the worksheet
//! has a header, and serves the API over HTTP.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use inci_api::AppState;
use inci_server::{ServerConfig, app, expand_tilde};
use inci_store_sqlite::SqliteSheetStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "inci incident ticket server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration; environment variables override the file.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("INCI"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteSheetStore::open(&store_path, server_cfg.worksheet.clone())
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // A fresh worksheet gets the default header.
  let header = server_cfg.schema.default_header();
  if store
    .ensure_header(&header)
    .await
    .context("failed to initialise worksheet header")?
  {
    tracing::info!(worksheet = %server_cfg.worksheet, "created worksheet header");
  }

  // Build application state.
  let state = AppState::new(store, server_cfg.schema.clone());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app(state))
    .await
    .context("server error")?;

  Ok(())
}
