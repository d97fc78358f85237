//! SQLite document-store backend for the roster person directory.
//!
//! Each person is kept as a JSON document; the case-folded name pair is
//! mirrored into indexed columns so the database itself enforces uniqueness.
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
