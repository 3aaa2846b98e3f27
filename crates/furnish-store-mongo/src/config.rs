//! Connection settings for [`MongoStore`](crate::MongoStore).

use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "furnitureShopDB";
pub const DEFAULT_COLLECTION: &str = "users";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
  pub uri:                  String,
  pub database:             String,
  pub collection:           String,
  pub connect_timeout_secs: u64,
}

impl StoreConfig {
  pub fn connect_timeout(&self) -> Duration { Duration::from_secs(self.connect_timeout_secs) }
}

impl Default for StoreConfig {
  fn default() -> Self {
    Self {
      uri:                  DEFAULT_URI.to_owned(),
      database:             DEFAULT_DATABASE.to_owned(),
      collection:           DEFAULT_COLLECTION.to_owned(),
      connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
    }
  }
}
