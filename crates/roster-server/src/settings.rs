//! Runtime server configuration.
//!
//! Layers an optional TOML file under `ROSTER_*` environment variables, e.g.
//! `ROSTER_PORT=8080` or `ROSTER_BACKEND=sqlite`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Which [`PersonStore`](roster_core::store::PersonStore) backs the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  /// Records live in process memory and vanish on exit.
  #[default]
  Memory,
  /// Records persist in the SQLite file at `store_path`.
  Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default)]
  pub backend:    Backend,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  /// JSON array of people imported at startup into an empty store.
  #[serde(default)]
  pub seed_path:  Option<PathBuf>,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 3000 }

fn default_store_path() -> PathBuf { PathBuf::from("roster.db") }

impl ServerConfig {
  /// Read `path` (if it exists) and the environment, then expand `~` in the
  /// configured paths.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    let mut cfg: Self = config::Config::builder()
      .add_source(config::File::from(path.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("ROSTER").try_parsing(true))
      .build()?
      .try_deserialize()?;

    cfg.store_path = expand_tilde(&cfg.store_path);
    cfg.seed_path = cfg.seed_path.as_deref().map(expand_tilde);
    Ok(cfg)
  }

  pub fn bind_addr(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
