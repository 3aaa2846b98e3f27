//! Handler for `POST /submitOrder`.
//!
//! Orders are accepted as any JSON object and logged; nothing is persisted.

use axum::{http::StatusCode, response::Response};
use bytes::Bytes;
use serde_json::{Map, Value};

use crate::error::envelope;

pub const RECEIVED: &str = "Order received successfully";
pub const INVALID: &str = "Invalid JSON-message";

/// `POST /submitOrder` — body: any JSON object.
pub async fn submit(body: Bytes) -> Response {
  match serde_json::from_slice::<Map<String, Value>>(&body) {
    Ok(order) => {
      let order = Value::Object(order);
      tracing::info!(order = %order, "received order");
      envelope(StatusCode::OK, RECEIVED)
    }
    Err(e) => {
      tracing::debug!(error = %e, "rejected order body");
      envelope(StatusCode::BAD_REQUEST, INVALID)
    }
  }
}
