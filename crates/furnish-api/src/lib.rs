//! JSON HTTP API for Furnish.
//!
//! Exposes an axum [`Router`] with the catalog, order-intake and user
//! resource endpoints, backed by any [`furnish_core::store::UserStore`].
//! Static files, tracing layers and transport are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = furnish_api::api_router(store.clone())
//!   .fallback_service(ServeDir::new("."));
//! ```

pub mod catalog;
pub mod error;
pub mod orders;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use furnish_core::store::UserStore;

pub use error::{ApiError, Envelope};

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: UserStore + 'static,
{
  Router::new()
    // Catalog & intake
    .route("/getFurniture", get(catalog::list))
    .route("/submitOrder", post(orders::submit))
    // Users
    .route("/createUser", post(users::create::<S>))
    .route("/getUser", get(users::get_one::<S>))
    .route("/updateUser", put(users::update::<S>).post(users::update::<S>))
    .route("/deleteUser", delete(users::delete::<S>).post(users::delete::<S>))
    .route("/getAllUsers", get(users::list::<S>))
    .with_state(store)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use std::time::Duration;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use furnish_core::{
    id::UserId,
    user::{self, User},
  };
  use furnish_store_memory::MemoryStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  fn app(store: &MemoryStore) -> Router { api_router(Arc::new(store.clone())) }

  async fn send(
    store:  &MemoryStore,
    method: &str,
    uri:    &str,
    body:   &str,
  ) -> (StatusCode, Vec<u8>) {
    let req = Request::builder()
      .method(method)
      .uri(uri)
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(body.to_owned()))
      .unwrap();
    let resp = app(store).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
  }

  fn envelope(bytes: &[u8]) -> Envelope { serde_json::from_slice(bytes).unwrap() }

  async fn create(store: &MemoryStore, body: Value) -> UserId {
    let (status, bytes) = send(store, "POST", "/createUser", &body.to_string()).await;
    assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&bytes));
    let ack: Value = serde_json::from_slice(&bytes).unwrap();
    ack["inserted_id"].as_str().unwrap().parse().unwrap()
  }

  async fn fetch(store: &MemoryStore, id: UserId) -> User {
    let (status, bytes) = send(store, "GET", &format!("/getUser?id={id}"), "").await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&bytes).unwrap()
  }

  // ── Catalog & intake ───────────────────────────────────────────────────────

  #[tokio::test]
  async fn furniture_catalog_is_static() {
    let store = MemoryStore::new();
    let (status, bytes) = send(&store, "GET", "/getFurniture", "").await;
    assert_eq!(status, StatusCode::OK);
    let items: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
      items,
      json!([
        { "id": 1, "name": "Chair", "description": "Comfortable chair", "price": 49.99 },
        { "id": 2, "name": "Table", "description": "Sturdy table", "price": 99.99 },
      ])
    );
  }

  #[tokio::test]
  async fn order_intake_accepts_any_object() {
    let store = MemoryStore::new();
    let (status, bytes) =
      send(&store, "POST", "/submitOrder", r#"{"item":2,"qty":3,"note":{"gift":true}}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope(&bytes), Envelope {
      status:  "200".into(),
      message: "Order received successfully".into(),
    });
  }

  #[tokio::test]
  async fn order_intake_rejects_malformed_json() {
    let store = MemoryStore::new();
    for body in ["{not json", "[1,2]", ""] {
      let (status, bytes) = send(&store, "POST", "/submitOrder", body).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{body:?}");
      assert_eq!(envelope(&bytes), Envelope {
        status:  "400".into(),
        message: "Invalid JSON-message".into(),
      });
    }
  }

  // ── Create ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_stamps_equal_timestamps_after_receipt() {
    let store = MemoryStore::new();
    let receipt = user::now();

    let id = create(&store, json!({ "name": "Ann", "email": "ann@x.com", "age": 30 })).await;

    let stored = store.get(id).await.unwrap().unwrap();
    assert_eq!(stored.created_at, stored.updated_at);
    assert!(stored.created_at >= receipt);
    assert_eq!(stored.age, 30);
    assert_eq!(stored.version, 1);
  }

  #[tokio::test]
  async fn create_ignores_caller_timestamps_and_version() {
    let store = MemoryStore::new();
    let receipt = user::now();
    let id = create(
      &store,
      json!({
        "name": "Ann",
        "email": "ann@x.com",
        "created_at": "1999-01-01T00:00:00Z",
        "updated_at": "1999-01-01T00:00:00Z",
        "version": 9,
      }),
    )
    .await;

    let stored = store.get(id).await.unwrap().unwrap();
    assert!(stored.created_at >= receipt);
    assert_eq!(stored.version, 1);
  }

  #[tokio::test]
  async fn create_treats_null_age_as_zero() {
    let store = MemoryStore::new();
    let id = create(&store, json!({ "name": "Ann", "email": "ann@x.com", "age": null })).await;
    assert_eq!(store.get(id).await.unwrap().unwrap().age, 0);
  }

  #[tokio::test]
  async fn create_rejects_malformed_or_incomplete_body() {
    let store = MemoryStore::new();
    for body in ["{", r#"{"name":"Ann"}"#, r#"{"name":1,"email":"a@b"}"#] {
      let (status, bytes) = send(&store, "POST", "/createUser", body).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{body:?}");
      assert_eq!(envelope(&bytes).status, "400");
    }
    assert_eq!(store.count().await.unwrap(), 0);
  }

  #[tokio::test]
  async fn create_store_failure_is_500() {
    let store = MemoryStore::new();
    store.set_unavailable(true);
    let (status, bytes) =
      send(&store, "POST", "/createUser", r#"{"name":"Ann","email":"ann@x.com"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(envelope(&bytes).status, "500");
  }

  // ── Read ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_read_roundtrips_fields() {
    let store = MemoryStore::new();
    let id = create(&store, json!({ "name": "Bo", "email": "bo@x.com", "age": 44 })).await;

    let user = fetch(&store, id).await;
    assert_eq!(user.id, id);
    assert_eq!(user.name, "Bo");
    assert_eq!(user.email, "bo@x.com");
    assert_eq!(user.age, 44);
  }

  #[tokio::test]
  async fn read_unknown_id_is_404() {
    let store = MemoryStore::new();
    let (status, bytes) =
      send(&store, "GET", &format!("/getUser?id={}", UserId::generate()), "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(envelope(&bytes).status, "404");
  }

  #[tokio::test]
  async fn malformed_or_missing_id_is_400_before_store() {
    let store = MemoryStore::new();
    // An unavailable store would answer 500 if it were reached.
    store.set_unavailable(true);

    for uri in ["/getUser?id=nothex", "/getUser?id=", "/getUser"] {
      let (status, _) = send(&store, "GET", uri, "").await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
    let (status, _) = send(&store, "PUT", "/updateUser?id=123", r#"{"name":"x"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&store, "DELETE", "/deleteUser?id=123", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn repeated_id_parameter_is_400_envelope() {
    let store = MemoryStore::new();
    let id = create(&store, json!({ "name": "Ann", "email": "ann@x.com" })).await;

    let cases = [
      ("GET", "/getUser?id=a&id=b".to_owned()),
      ("DELETE", format!("/deleteUser?id={id}&id={id}")),
      ("PUT", format!("/updateUser?id={id}&id={id}")),
    ];
    for (method, uri) in cases {
      let (status, bytes) = send(&store, method, &uri, r#"{"name":"x"}"#).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{method} {uri}");
      assert_eq!(envelope(&bytes).status, "400", "{method} {uri}");
    }
    assert_eq!(fetch(&store, id).await.name, "Ann");
  }

  #[tokio::test]
  async fn read_store_failure_is_500_not_404() {
    let store = MemoryStore::new();
    let id = create(&store, json!({ "name": "Ann", "email": "ann@x.com" })).await;
    store.set_unavailable(true);
    let (status, _) = send(&store, "GET", &format!("/getUser?id={id}"), "").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  }

  // ── Update ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_is_idempotent_on_name_and_advances_updated_at() {
    let store = MemoryStore::new();
    let id = create(&store, json!({ "name": "Ann", "email": "ann@x.com" })).await;
    let created = fetch(&store, id).await;
    let uri = format!("/updateUser?id={id}");

    tokio::time::sleep(Duration::from_millis(5)).await;
    let (status, bytes) = send(&store, "PUT", &uri, r#"{"name":"Anne"}"#).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(bytes.is_empty());
    let first = fetch(&store, id).await;

    tokio::time::sleep(Duration::from_millis(5)).await;
    let (status, _) = send(&store, "POST", &uri, r#"{"name":"Anne"}"#).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let second = fetch(&store, id).await;

    assert_eq!(first.name, "Anne");
    assert_eq!(second.name, "Anne");
    assert!(first.updated_at > created.updated_at);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(second.created_at, created.created_at);
    assert_eq!(second.email, created.email);
    assert_eq!(second.version, created.version);
  }

  #[tokio::test]
  async fn update_rejects_malformed_body() {
    let store = MemoryStore::new();
    let id = create(&store, json!({ "name": "Ann", "email": "ann@x.com" })).await;
    let (status, _) = send(&store, "PUT", &format!("/updateUser?id={id}"), "{\"name\":").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(fetch(&store, id).await.name, "Ann");
  }

  #[tokio::test]
  async fn update_and_delete_of_unknown_id_differ() {
    let store = MemoryStore::new();
    let id = UserId::generate();

    let (status, _) = send(&store, "PUT", &format!("/updateUser?id={id}"), r#"{"name":"x"}"#).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleting nothing is not reported as an error.
    let (status, _) = send(&store, "DELETE", &format!("/deleteUser?id={id}"), "").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
  }

  #[tokio::test]
  async fn update_and_delete_store_failures_are_500() {
    let store = MemoryStore::new();
    let id = create(&store, json!({ "name": "Ann", "email": "ann@x.com" })).await;
    store.set_unavailable(true);

    let (status, _) = send(&store, "PUT", &format!("/updateUser?id={id}"), r#"{"name":"x"}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let (status, _) = send(&store, "POST", &format!("/deleteUser?id={id}"), "").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  }

  // ── List ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_empty_collection_is_empty_array() {
    let store = MemoryStore::new();
    let (status, bytes) = send(&store, "GET", "/getAllUsers", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), json!([]));
  }

  #[tokio::test]
  async fn list_returns_every_user() {
    let store = MemoryStore::new();
    create(&store, json!({ "name": "Ann", "email": "ann@x.com" })).await;
    create(&store, json!({ "name": "Bo", "email": "bo@x.com" })).await;

    let (status, bytes) = send(&store, "GET", "/getAllUsers", "").await;
    assert_eq!(status, StatusCode::OK);
    let users: Vec<User> = serde_json::from_slice(&bytes).unwrap();
    let mut names: Vec<_> = users.into_iter().map(|u| u.name).collect();
    names.sort();
    assert_eq!(names, vec!["Ann", "Bo"]);
  }

  #[tokio::test]
  async fn list_store_failure_is_500() {
    let store = MemoryStore::new();
    store.set_unavailable(true);
    let (status, _) = send(&store, "GET", "/getAllUsers", "").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
  }

  // ── Full lifecycle ─────────────────────────────────────────────────────────

  #[tokio::test]
  async fn ann_lifecycle() {
    let store = MemoryStore::new();

    let id = create(&store, json!({ "name": "Ann", "email": "ann@x.com" })).await;

    let user = fetch(&store, id).await;
    assert_eq!(user.name, "Ann");
    assert_eq!(user.age, 0);

    let (status, _) =
      send(&store, "PUT", &format!("/updateUser?id={id}"), r#"{"name":"Anne"}"#).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(fetch(&store, id).await.name, "Anne");

    let (status, _) = send(&store, "DELETE", &format!("/deleteUser?id={id}"), "").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&store, "GET", &format!("/getUser?id={id}"), "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }
}
