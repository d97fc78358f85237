//! roster server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! configured store, imports seed people if asked to, and serves the JSON API
//! over HTTP.

mod seed;
mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use roster_core::{Directory, memory::MemoryStore, store::PersonStore};
use roster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{Backend, ServerConfig};

#[derive(Parser)]
#[command(author, version, about = "roster person directory server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config).context("failed to read configuration")?;

  match server_cfg.backend {
    Backend::Memory => serve(MemoryStore::new(), &server_cfg).await,
    Backend::Sqlite => {
      let store = SqliteStore::open(&server_cfg.store_path)
        .await
        .with_context(|| format!("failed to open store at {:?}", server_cfg.store_path))?;
      serve(store, &server_cfg).await
    }
  }
}

async fn serve<S>(store: S, server_cfg: &ServerConfig) -> anyhow::Result<()>
where
  S: PersonStore + 'static,
{
  let directory = Arc::new(Directory::new(store));

  if let Some(seed_path) = &server_cfg.seed_path {
    seed::import(&*directory, seed_path).await?;
  }

  let app = roster_api::api_router(directory).layer(TraceLayer::new_for_http());
  let address = server_cfg.bind_addr();

  tracing::info!(backend = ?server_cfg.backend, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
