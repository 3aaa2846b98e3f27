//! The `UserStore` trait and supporting outcome types.
//!
//! The trait is implemented by storage backends (`furnish-store-mongo`,
//! `furnish-store-memory`). The HTTP layer and the migration pipeline depend
//! on this abstraction, never on a concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  id::UserId,
  user::{Insertion, NewUser, User},
};

// ─── Outcomes ────────────────────────────────────────────────────────────────

/// Result of a single-document write that targets an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
  /// A document matched the identifier and the write was applied.
  Applied,
  /// No document matched the identifier; nothing was written.
  NoMatch,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the user-document collection.
///
/// Every method is a single storage call: no transactions, no retries. A
/// lookup distinguishes "found" (`Ok(Some)`), "not found" (`Ok(None)`) and a
/// store failure (`Err`); writes report [`WriteOutcome`] the same way.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait UserStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new document. The store assigns the identifier.
  fn insert(
    &self,
    user: NewUser,
  ) -> impl Future<Output = Result<Insertion, Self::Error>> + Send + '_;

  /// Set `name` and `updated_at` on one document. No other field is touched.
  fn rename(
    &self,
    id: UserId,
    name: String,
    updated_at: DateTime<Utc>,
  ) -> impl Future<Output = Result<WriteOutcome, Self::Error>> + Send + '_;

  /// Hard-delete one document.
  fn delete(
    &self,
    id: UserId,
  ) -> impl Future<Output = Result<WriteOutcome, Self::Error>> + Send + '_;

  /// Set `age` on every document in the collection, overwriting any existing
  /// value. Returns the number of documents matched.
  fn backfill_age(
    &self,
    age: i64,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve one document by identifier. Returns `None` if not found.
  fn get(
    &self,
    id: UserId,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Every document in the store's natural order. Documents that cannot be
  /// decoded are left out rather than failing the listing.
  fn list(&self) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  /// Number of documents in the collection.
  fn count(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
