//! Encoding and decoding between domain types and BSON documents.
//!
//! Timestamps are stored as BSON datetimes (millisecond precision).
//! Identifiers map one-to-one onto `ObjectId` bytes. Integer fields are
//! accepted as either int32 or int64 on the way in.

use chrono::{DateTime, Utc};
use furnish_core::{
  id::UserId,
  user::{NewUser, User},
};
use mongodb::bson::{self, Bson, Document, doc, oid::ObjectId};

use crate::{Error, Result};

// ─── Identifier ───────────────────────────────────────────────────────────────

pub fn encode_id(id: UserId) -> ObjectId { ObjectId::from_bytes(id.bytes()) }

pub fn decode_id(oid: ObjectId) -> UserId { UserId::from_bytes(oid.bytes()) }

pub fn id_filter(id: UserId) -> Document { doc! { "_id": encode_id(id) } }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> bson::DateTime {
  bson::DateTime::from_millis(dt.timestamp_millis())
}

pub fn decode_dt(dt: bson::DateTime) -> Result<DateTime<Utc>> {
  DateTime::from_timestamp_millis(dt.timestamp_millis())
    .ok_or_else(|| Error::Decode(format!("datetime out of range: {dt}")))
}

// ─── Integers ─────────────────────────────────────────────────────────────────

fn decode_i64(field: &str, value: &Bson) -> Result<i64> {
  match value {
    Bson::Int32(n) => Ok(i64::from(*n)),
    Bson::Int64(n) => Ok(*n),
    other => Err(Error::Decode(format!("{field}: expected integer, got {other}"))),
  }
}

// ─── User ─────────────────────────────────────────────────────────────────────

/// Document for a not-yet-inserted user. `_id` is left for the server.
pub fn encode_new_user(user: &NewUser) -> Document {
  doc! {
    "name":       user.name.as_str(),
    "email":      user.email.as_str(),
    "age":        user.age,
    "created_at": encode_dt(user.created_at),
    "updated_at": encode_dt(user.updated_at),
    "version":    user.version,
  }
}

pub fn decode_user(doc: &Document) -> Result<User> {
  // Documents written before the age field existed have no `age`.
  let age = match doc.get("age") {
    None | Some(Bson::Null) => 0,
    Some(value) => decode_i64("age", value)?,
  };
  let version = match doc.get("version") {
    None | Some(Bson::Null) => 0,
    Some(value) => i32::try_from(decode_i64("version", value)?)
      .map_err(|e| Error::Decode(format!("version: {e}")))?,
  };

  Ok(User {
    id: decode_id(doc.get_object_id("_id")?),
    name: doc.get_str("name")?.to_owned(),
    email: doc.get_str("email")?.to_owned(),
    age,
    created_at: decode_dt(*doc.get_datetime("created_at")?)?,
    updated_at: decode_dt(*doc.get_datetime("updated_at")?)?,
    version,
  })
}

/// Decode a batch of documents, leaving out any that fail to decode.
pub fn decode_users(docs: impl IntoIterator<Item = Document>) -> Vec<User> {
  docs
    .into_iter()
    .filter_map(|doc| match decode_user(&doc) {
      Ok(user) => Some(user),
      Err(e) => {
        tracing::warn!(id = ?doc.get("_id"), error = %e, "skipping undecodable user document");
        None
      }
    })
    .collect()
}
