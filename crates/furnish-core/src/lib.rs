//! Core types and trait definitions for the Furnish user store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::UserStore`]; the HTTP layer and the
//! schema evolution pipeline only ever talk to that trait.

pub mod error;
pub mod id;
pub mod migrate;
pub mod store;
pub mod user;

pub use error::{Error, Result};
