//! In-process backend for the Furnish user store.
//!
//! Documents live in a `Vec` behind a [`tokio::sync::RwLock`], in insertion
//! order. Nothing is persisted; intended for tests and local development.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryStore;
