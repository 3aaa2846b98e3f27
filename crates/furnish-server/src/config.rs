//! Layered server configuration: built-in defaults, then an optional TOML
//! file, then `FURNISH_*` environment variables (`__` separates nested keys,
//! e.g. `FURNISH_STORE__URI`).

use std::path::{Path, PathBuf};

use config::{ConfigError, Environment, File};
use furnish_store_mongo::StoreConfig;
use serde::Deserialize;

/// Which [`UserStore`](furnish_core::store::UserStore) implementation backs
/// the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  Mongo,
  /// Throwaway in-process store; everything is lost on exit.
  Memory,
}

/// Runtime server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Directory served for any path no API route claims.
  pub static_dir: PathBuf,
  pub backend:    Backend,
  pub store:      StoreConfig,
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Load configuration, reading `path` if it exists.
pub fn load(path: &Path) -> Result<ServerConfig, ConfigError> {
  let store = StoreConfig::default();

  config::Config::builder()
    .set_default("host", "0.0.0.0")?
    .set_default("port", 8080_i64)?
    .set_default("static_dir", ".")?
    .set_default("backend", "mongo")?
    .set_default("store.uri", store.uri)?
    .set_default("store.database", store.database)?
    .set_default("store.collection", store.collection)?
    .set_default("store.connect_timeout_secs", store.connect_timeout_secs as i64)?
    .add_source(File::from(path.to_path_buf()).required(false))
    .add_source(
      Environment::with_prefix("FURNISH")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()?
    .try_deserialize()
}
