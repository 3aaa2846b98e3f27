//! Error type for `furnish-store-mongo`.

use mongodb::bson::document::ValueAccessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The server could not be reached or did not answer a ping in time.
  #[error("could not connect to the document store: {0}")]
  Connection(#[source] mongodb::error::Error),

  #[error("database error: {0}")]
  Database(#[from] mongodb::error::Error),

  #[error("field access error: {0}")]
  Field(#[from] ValueAccessError),

  #[error("document decode error: {0}")]
  Decode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
