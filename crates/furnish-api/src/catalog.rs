//! Handler for `GET /getFurniture` — a fixed, read-only catalog.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Furniture {
  pub id:          u32,
  pub name:        &'static str,
  pub description: &'static str,
  pub price:       f64,
}

pub static INVENTORY: [Furniture; 2] = [
  Furniture { id: 1, name: "Chair", description: "Comfortable chair", price: 49.99 },
  Furniture { id: 2, name: "Table", description: "Sturdy table", price: 99.99 },
];

/// `GET /getFurniture`
pub async fn list() -> Json<&'static [Furniture]> { Json(&INVENTORY[..]) }
