//! [`MemoryStore`] — the in-process implementation of [`UserStore`].

use std::sync::{
  Arc,
  atomic::{AtomicBool, Ordering},
};

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use furnish_core::{
  id::UserId,
  store::{UserStore, WriteOutcome},
  user::{Insertion, NewUser, User},
};

use crate::{Error, Result};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A user store held entirely in memory.
///
/// Cloning is cheap — clones share the same documents.
#[derive(Clone, Default)]
pub struct MemoryStore {
  users:       Arc<RwLock<Vec<User>>>,
  unavailable: Arc<AtomicBool>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Make every subsequent call fail with [`Error::Unavailable`] (or succeed
  /// again with `false`). Lets callers exercise their store-failure paths.
  pub fn set_unavailable(&self, unavailable: bool) {
    self.unavailable.store(unavailable, Ordering::SeqCst);
  }

  /// Insert a fully formed document as-is, bypassing identifier assignment.
  /// Used to stage documents that predate a schema change.
  pub async fn put_raw(&self, user: User) {
    self.users.write().await.push(user);
  }

  fn check(&self) -> Result<()> {
    if self.unavailable.load(Ordering::SeqCst) {
      return Err(Error::Unavailable);
    }
    Ok(())
  }
}

// ─── UserStore impl ──────────────────────────────────────────────────────────

impl UserStore for MemoryStore {
  type Error = Error;

  async fn insert(&self, user: NewUser) -> Result<Insertion> {
    self.check()?;
    let id = UserId::generate();
    self.users.write().await.push(user.into_user(id));
    Ok(Insertion { inserted_id: id })
  }

  async fn rename(
    &self,
    id:         UserId,
    name:       String,
    updated_at: DateTime<Utc>,
  ) -> Result<WriteOutcome> {
    self.check()?;
    let mut users = self.users.write().await;
    match users.iter_mut().find(|u| u.id == id) {
      Some(user) => {
        user.name = name;
        user.updated_at = updated_at;
        Ok(WriteOutcome::Applied)
      }
      None => Ok(WriteOutcome::NoMatch),
    }
  }

  async fn delete(&self, id: UserId) -> Result<WriteOutcome> {
    self.check()?;
    let mut users = self.users.write().await;
    match users.iter().position(|u| u.id == id) {
      Some(index) => {
        users.remove(index);
        Ok(WriteOutcome::Applied)
      }
      None => Ok(WriteOutcome::NoMatch),
    }
  }

  async fn backfill_age(&self, age: i64) -> Result<u64> {
    self.check()?;
    let mut users = self.users.write().await;
    for user in users.iter_mut() {
      user.age = age;
    }
    Ok(users.len() as u64)
  }

  async fn get(&self, id: UserId) -> Result<Option<User>> {
    self.check()?;
    Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
  }

  async fn list(&self) -> Result<Vec<User>> {
    self.check()?;
    Ok(self.users.read().await.clone())
  }

  async fn count(&self) -> Result<u64> {
    self.check()?;
    Ok(self.users.read().await.len() as u64)
  }
}
