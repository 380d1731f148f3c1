//! JSON listing API for the roster.
//!
//! Exposes an axum [`Router`] backed by any [`PlayerSource`]. Transport and
//! tracing layers are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = roster_api::api_router(Arc::new(store));
//! ```

pub mod countries;
pub mod error;
pub mod players;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use roster_core::source::PlayerSource;
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  /// SQLite file; `:memory:` keeps everything in RAM.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8000 }

fn default_store_path() -> PathBuf { PathBuf::from("roster.db") }

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `source`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(source: Arc<S>) -> Router<()>
where
  S: PlayerSource + 'static,
{
  Router::new()
    .route("/players", get(players::list::<S>))
    .route("/player", get(players::search::<S>))
    .route("/nationality", get(countries::list::<S>))
    .with_state(source)
}
