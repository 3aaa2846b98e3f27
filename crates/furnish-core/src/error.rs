//! Error types for `furnish-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The input was not a 24-character hexadecimal object identifier.
  #[error("malformed identifier: {0:?}")]
  MalformedId(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
