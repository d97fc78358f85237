//! The `PersonStore` trait.
//!
//! The trait is implemented by storage backends (the in-process
//! [`MemoryStore`](crate::memory::MemoryStore) and `roster-store-sqlite`).
//! The [`Directory`](crate::Directory) depends on this abstraction, never on a
//! concrete backend.

use std::future::Future;

use crate::person::{NewPerson, Person, PersonId, PersonPatch};

// ─── Failure classification ──────────────────────────────────────────────────

/// A backend error, classified just enough for the directory to tell a
/// store-side unique-index rejection apart from everything else.
pub trait StoreFailure: std::error::Error + Send + Sync + 'static {
  /// `true` when the store refused a write because another record already
  /// holds the same name pair.
  fn is_duplicate_key(&self) -> bool;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the authoritative person collection.
///
/// "Absent" results (`None`, `false`) are ordinary outcomes, not errors; the
/// caller decides what they mean.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: StoreFailure;

  /// Every record currently held, in insertion order. Empty is valid.
  fn list_all(&self) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Retrieve a record by identifier. Returns `None` if not found.
  fn get_by_id(
    &self,
    id: PersonId,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Assign an identifier, persist, and return the stored record.
  ///
  /// Fails with a duplicate-key error if the store enforces name-pair
  /// uniqueness and the candidate violates it.
  fn insert(
    &self,
    candidate: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Merge `patch` onto the record with `id`. Returns `None` if no such
  /// record exists. Duplicate-key failures as for [`PersonStore::insert`].
  fn update_by_id(
    &self,
    id: PersonId,
    patch: PersonPatch,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Remove the record with `id`. Returns whether a record was removed.
  fn remove_by_id(&self, id: PersonId) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
