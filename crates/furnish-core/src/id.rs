//! `UserId` — the 12-byte, store-assigned document identifier.
//!
//! Layout and text form match a document-store object id: a 4-byte
//! big-endian creation second, 5 random bytes, and a 3-byte counter, rendered
//! as 24 lowercase hex characters.

use std::{
  fmt,
  str::FromStr,
  sync::atomic::{AtomicU32, Ordering},
};

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::Error;

static COUNTER: AtomicU32 = AtomicU32::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId([u8; 12]);

impl UserId {
  /// Generate a fresh identifier. Only `furnish-store-memory` calls this; the
  /// MongoDB backend always takes the `_id` the server assigns on insert.
  pub fn generate() -> Self {
    let secs = Utc::now().timestamp() as u32;
    let random = Uuid::new_v4();
    let count = COUNTER.fetch_add(1, Ordering::Relaxed).to_be_bytes();

    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    bytes[4..9].copy_from_slice(&random.as_bytes()[..5]);
    bytes[9..].copy_from_slice(&count[1..]);
    Self(bytes)
  }

  pub const fn from_bytes(bytes: [u8; 12]) -> Self { Self(bytes) }

  pub const fn bytes(&self) -> [u8; 12] { self.0 }

  pub fn to_hex(&self) -> String { hex::encode(self.0) }
}

impl FromStr for UserId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut bytes = [0u8; 12];
    hex::decode_to_slice(s, &mut bytes)
      .map_err(|_| Error::MalformedId(s.to_owned()))?;
    Ok(Self(bytes))
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.to_hex())
  }
}

impl Serialize for UserId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.to_hex())
  }
}

impl<'de> Deserialize<'de> for UserId {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(serde::de::Error::custom)
  }
}
