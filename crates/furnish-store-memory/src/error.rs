//! Error type for `furnish-store-memory`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The store was switched into failure mode with
  /// [`MemoryStore::set_unavailable`](crate::MemoryStore::set_unavailable).
  #[error("store unavailable")]
  Unavailable,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
