//! MongoDB backend for the Furnish user store.
//!
//! [`MongoStore`] is the storage gateway: it opens one client at startup,
//! verifies the server answers a ping, and hands out collection handles that
//! every request shares. The driver owns pooling and wire concerns.

mod encode;
mod store;

pub mod config;
pub mod error;

pub use config::StoreConfig;
pub use error::{Error, Result};
pub use store::MongoStore;
