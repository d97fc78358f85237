//! Error type for `roster-store-sqlite`.

use roster_core::store::StoreFailure;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// The `(lastname, firstname)` unique index rejected the write.
  #[error("duplicate key: {firstname} {lastname}")]
  DuplicateKey { lastname: String, firstname: String },
}

impl StoreFailure for Error {
  fn is_duplicate_key(&self) -> bool { matches!(self, Self::DuplicateKey { .. }) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
