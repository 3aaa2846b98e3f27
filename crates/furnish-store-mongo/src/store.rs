//! [`MongoStore`] — the MongoDB implementation of [`UserStore`].

use chrono::{DateTime, Utc};
use futures::TryStreamExt as _;
use mongodb::{
  Client, Collection, Database,
  bson::{Document, doc},
  options::ClientOptions,
};

use furnish_core::{
  id::UserId,
  store::{UserStore, WriteOutcome},
  user::{Insertion, NewUser, User},
};

use crate::{
  Error, Result, StoreConfig,
  encode::{decode_id, decode_user, decode_users, encode_dt, encode_new_user, id_filter},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A user store backed by one collection in a MongoDB database.
///
/// Cloning is cheap — the driver's client is reference-counted and pools its
/// own connections, so one instance is shared by every request.
#[derive(Clone)]
pub struct MongoStore {
  database:   Database,
  collection: String,
}

impl MongoStore {
  /// Connect and ping the server. Fails with [`Error::Connection`] if the
  /// server is unreachable within `config.connect_timeout_secs`.
  pub async fn connect(config: &StoreConfig) -> Result<Self> {
    let mut options = ClientOptions::parse(&config.uri)
      .await
      .map_err(Error::Connection)?;
    options.connect_timeout = Some(config.connect_timeout());
    options.server_selection_timeout = Some(config.connect_timeout());
    options.app_name = Some("furnish".to_owned());

    let client = Client::with_options(options).map_err(Error::Connection)?;
    client
      .database("admin")
      .run_command(doc! { "ping": 1 })
      .await
      .map_err(Error::Connection)?;

    tracing::info!(database = %config.database, "connected to document store");

    Ok(Self {
      database:   client.database(&config.database),
      collection: config.collection.clone(),
    })
  }

  /// Handle to a named collection in the connected database. Cheap and free
  /// of side effects; the collection is created lazily by the server.
  pub fn collection(&self, name: &str) -> Collection<Document> {
    self.database.collection(name)
  }

  fn users(&self) -> Collection<Document> { self.collection(&self.collection) }
}

// ─── UserStore impl ──────────────────────────────────────────────────────────

impl UserStore for MongoStore {
  type Error = Error;

  async fn insert(&self, user: NewUser) -> Result<Insertion> {
    let result = self.users().insert_one(encode_new_user(&user)).await?;
    let oid = result.inserted_id.as_object_id().ok_or_else(|| {
      Error::Decode(format!("inserted id is not an ObjectId: {}", result.inserted_id))
    })?;
    Ok(Insertion { inserted_id: decode_id(oid) })
  }

  async fn rename(
    &self,
    id:         UserId,
    name:       String,
    updated_at: DateTime<Utc>,
  ) -> Result<WriteOutcome> {
    let result = self
      .users()
      .update_one(
        id_filter(id),
        doc! { "$set": { "name": name, "updated_at": encode_dt(updated_at) } },
      )
      .await?;
    Ok(if result.matched_count == 0 { WriteOutcome::NoMatch } else { WriteOutcome::Applied })
  }

  async fn delete(&self, id: UserId) -> Result<WriteOutcome> {
    let result = self.users().delete_one(id_filter(id)).await?;
    Ok(if result.deleted_count == 0 { WriteOutcome::NoMatch } else { WriteOutcome::Applied })
  }

  async fn backfill_age(&self, age: i64) -> Result<u64> {
    let result = self
      .users()
      .update_many(doc! {}, doc! { "$set": { "age": age } })
      .await?;
    Ok(result.matched_count)
  }

  async fn get(&self, id: UserId) -> Result<Option<User>> {
    self
      .users()
      .find_one(id_filter(id))
      .await?
      .as_ref()
      .map(decode_user)
      .transpose()
  }

  async fn list(&self) -> Result<Vec<User>> {
    let mut cursor = self.users().find(doc! {}).await?;

    let mut docs = Vec::new();
    loop {
      match cursor.try_next().await {
        Ok(Some(doc)) => docs.push(doc),
        Ok(None) => break,
        Err(e) => {
          tracing::warn!(error = %e, returned = docs.len(), "cursor failed mid-listing");
          break;
        }
      }
    }
    Ok(decode_users(docs))
  }

  async fn count(&self) -> Result<u64> {
    Ok(self.users().count_documents(doc! {}).await?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn unreachable(uri: &str) -> StoreConfig {
    StoreConfig {
      uri:                  uri.to_owned(),
      connect_timeout_secs: 1,
      ..StoreConfig::default()
    }
  }

  #[tokio::test]
  async fn connect_rejects_malformed_uri() {
    let result = MongoStore::connect(&unreachable("postgres://localhost")).await;
    assert!(matches!(result, Err(Error::Connection(_))));
  }

  #[tokio::test]
  async fn connect_fails_when_nothing_answers_the_ping() {
    // Port 1 on loopback has no listener; the ping times out.
    let config = unreachable("mongodb://127.0.0.1:1/?directConnection=true");
    let result = MongoStore::connect(&config).await;
    assert!(matches!(result, Err(Error::Connection(_))));
  }
}
