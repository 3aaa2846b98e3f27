//! The user document and the shapes used to create it.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// Version stamped on every newly created document. Nothing reads it back.
pub const INITIAL_VERSION: i32 = 1;

/// Current time truncated to the millisecond precision a document store keeps.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(3) }

/// A persisted user document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub id:         UserId,
  pub name:       String,
  pub email:      String,
  /// Documents written before the age field existed decode as `0`.
  #[serde(default)]
  pub age:        i64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub version:    i32,
}

/// A user document that has not been persisted yet. The identifier is
/// assigned by the store on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
  pub name:       String,
  pub email:      String,
  pub age:        i64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub version:    i32,
}

impl NewUser {
  /// Build a document stamped at `at`: both timestamps equal, version 1.
  pub fn stamped(
    name: impl Into<String>,
    email: impl Into<String>,
    age: i64,
    at: DateTime<Utc>,
  ) -> Self {
    Self {
      name: name.into(),
      email: email.into(),
      age,
      created_at: at,
      updated_at: at,
      version: INITIAL_VERSION,
    }
  }

  pub fn into_user(self, id: UserId) -> User {
    User {
      id,
      name:       self.name,
      email:      self.email,
      age:        self.age,
      created_at: self.created_at,
      updated_at: self.updated_at,
      version:    self.version,
    }
  }
}

/// Acknowledgment returned by an insert: the identifier the store assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insertion {
  pub inserted_id: UserId,
}
