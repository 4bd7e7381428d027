//! # charbook-store
//!
//! Local persistence for the charbook word-collection service, backed by
//! SQLite.
//!
//! The crate exposes a synchronous [`Database`] handle that wraps a
//! `rusqlite::Connection` and provides typed CRUD helpers for the two
//! domain models: users and the words they own.

pub mod database;
pub mod migrations;
pub mod models;
pub mod users;
pub mod words;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use models::*;
