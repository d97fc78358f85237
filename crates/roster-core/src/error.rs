//! Error types for `roster-core`.
//!
//! Every [`Directory`](crate::Directory) operation resolves to a value or
//! exactly one of these kinds. Store failures never cross the boundary
//! unclassified.

use thiserror::Error;

use crate::person::PersonId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("person not found: {0}")]
  NotFound(PersonId),

  #[error("a person named {firstname} {lastname} already exists")]
  Conflict { lastname: String, firstname: String },

  #[error("invalid {field}: {reason}")]
  ValidationFailed { field: &'static str, reason: String },

  #[error("store unavailable: {0}")]
  StoreUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
    Self::ValidationFailed { field, reason: reason.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
