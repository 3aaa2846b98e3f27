//! Handlers for the user resource.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/createUser` | Body: `{"name","email","age"?}`; returns the insertion ack |
//! | `GET`  | `/getUser?id=<hex>` | 404 if not found |
//! | `PUT`, `POST` | `/updateUser?id=<hex>` | Body: `{"name"}`; 204, or 404 if not found |
//! | `DELETE`, `POST` | `/deleteUser?id=<hex>` | 204 whether or not a document matched |
//! | `GET`  | `/getAllUsers` | Every decodable document |
//!
//! A missing or unparseable `id` is rejected with 400 before the store is
//! touched.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State, rejection::QueryRejection},
  http::StatusCode,
};
use bytes::Bytes;
use furnish_core::{
  id::UserId,
  store::{UserStore, WriteOutcome},
  user::{self, Insertion, NewUser, User},
};
use serde::Deserialize;

use crate::error::{ApiError, decode};

// ─── Identifier ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IdParams {
  pub id: Option<String>,
}

impl IdParams {
  /// Resolve the identifier from an extracted query, mapping an unparseable
  /// query string (e.g. a repeated `id`) to [`ApiError::MalformedId`].
  fn user_id(query: Result<Query<Self>, QueryRejection>) -> Result<UserId, ApiError> {
    let Query(params) = query?;
    match params.id.as_deref() {
      Some(raw) => Ok(raw.trim().parse()?),
      None => Err(ApiError::MalformedId(String::new())),
    }
  }
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /createUser`. Unknown fields, including any
/// caller-supplied timestamps, are ignored. An absent or `null` age is 0.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name:  String,
  pub email: String,
  pub age:   Option<i64>,
}

/// `POST /createUser` — returns 200 + `{"inserted_id": "<hex>"}`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Bytes,
) -> Result<Json<Insertion>, ApiError>
where
  S: UserStore,
{
  let body: CreateBody = decode(&body)?;
  let age = body.age.unwrap_or_default();
  let new_user = NewUser::stamped(body.name, body.email, age, user::now());

  let ack = store.insert(new_user).await.map_err(ApiError::store)?;
  tracing::debug!(id = %ack.inserted_id, "created user");
  Ok(Json(ack))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /getUser?id=<hex>`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  query: Result<Query<IdParams>, QueryRejection>,
) -> Result<Json<User>, ApiError>
where
  S: UserStore,
{
  let id = IdParams::user_id(query)?;
  let user = store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;
  Ok(Json(user))
}

// ─── Update ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RenameBody {
  pub name: String,
}

/// `PUT /updateUser?id=<hex>` — body: `{"name":"..."}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  query: Result<Query<IdParams>, QueryRejection>,
  body: Bytes,
) -> Result<StatusCode, ApiError>
where
  S: UserStore,
{
  let id = IdParams::user_id(query)?;
  let body: RenameBody = decode(&body)?;

  match store.rename(id, body.name, user::now()).await.map_err(ApiError::store)? {
    WriteOutcome::Applied => Ok(StatusCode::NO_CONTENT),
    WriteOutcome::NoMatch => Err(ApiError::NotFound(format!("user {id} not found"))),
  }
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /deleteUser?id=<hex>`
///
/// Deleting an identifier that matches nothing still answers 204.
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  query: Result<Query<IdParams>, QueryRejection>,
) -> Result<StatusCode, ApiError>
where
  S: UserStore,
{
  let id = IdParams::user_id(query)?;
  if store.delete(id).await.map_err(ApiError::store)? == WriteOutcome::NoMatch {
    tracing::debug!(%id, "delete matched no document");
  }
  Ok(StatusCode::NO_CONTENT)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /getAllUsers`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<User>>, ApiError>
where
  S: UserStore,
{
  let users = store.list().await.map_err(ApiError::store)?;
  Ok(Json(users))
}
