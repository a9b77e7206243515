//! Curate HTTP server: configuration and application assembly.
//!
//! The binary in `main.rs` only wires these pieces to a TCP listener.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use curate_core::store::CatalogStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CURATE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
}

impl ServerConfig {
  /// Layer defaults, the optional TOML file at `path`, and the environment,
  /// in increasing order of precedence.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3000_i64)?
      .set_default("database_path", "curate.db")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("CURATE"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
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

// ─── Application ──────────────────────────────────────────────────────────────

/// The full application: API routes plus per-request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: CatalogStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  curate_api::api_router(store).layer(TraceLayer::new_for_http())
}
