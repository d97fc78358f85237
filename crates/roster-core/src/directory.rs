//! [`Directory`] — the person-directory service.
//!
//! Each operation is a short linear pipeline over a [`PersonStore`]:
//! snapshot → guard → normalize → mutate. A [`Error::Conflict`] from the
//! guard short-circuits before the store is ever asked to write.

use rand::Rng;

use crate::{
  Error, Result, guard, normalize,
  person::{CreatePersonRequest, Person, PersonId, UpdatePersonRequest},
  store::{PersonStore, StoreFailure},
};

/// The directory service, generic over its backing store.
///
/// Safe to share between concurrent callers (wrap in an `Arc`); all
/// coordination is delegated to the store.
pub struct Directory<S> {
  store: S,
}

impl<S: PersonStore> Directory<S> {
  pub fn new(store: S) -> Self { Self { store } }

  /// Every record, or `None` when the directory is empty.
  pub async fn list_all(&self) -> Result<Option<Vec<Person>>> {
    let people = self.store.list_all().await.map_err(unavailable)?;
    Ok((!people.is_empty()).then_some(people))
  }

  /// One record chosen uniformly at random, or `None` when empty.
  pub async fn random(&self) -> Result<Option<Person>> {
    let people = self.store.list_all().await.map_err(unavailable)?;
    let mut rng = rand::thread_rng();
    Ok(pick(people, &mut rng))
  }

  /// As [`Directory::random`], drawing from a caller-supplied source.
  pub async fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Option<Person>> {
    let people = self.store.list_all().await.map_err(unavailable)?;
    Ok(pick(people, rng))
  }

  pub async fn get_by_id(&self, id: PersonId) -> Result<Person> {
    self
      .store
      .get_by_id(id.clone())
      .await
      .map_err(unavailable)?
      .ok_or(Error::NotFound(id))
  }

  /// Create a record after checking its name pair against every stored
  /// record. Returns the stored record with its assigned identifier.
  pub async fn create(&self, input: CreatePersonRequest) -> Result<Person> {
    let existing = self.store.list_all().await.map_err(unavailable)?;
    guard::assert_no_conflict(&input.lastname, &input.firstname, None, &existing)?;

    let candidate = normalize::prepare_for_create(input)?;
    let (lastname, firstname) = (candidate.lastname.clone(), candidate.firstname.clone());

    self
      .store
      .insert(candidate)
      .await
      .map_err(|e| rejected(e, lastname, firstname))
  }

  /// Merge `input` onto the record with `id`.
  ///
  /// The candidate name pair is the request's names falling back to the
  /// record's current ones; the record itself is excluded from the check.
  pub async fn update(&self, id: PersonId, input: UpdatePersonRequest) -> Result<Person> {
    let existing = self.store.list_all().await.map_err(unavailable)?;
    let Some(target) = existing.iter().find(|p| p.id == id) else {
      return Err(Error::NotFound(id));
    };

    let lastname = input.lastname.as_deref().unwrap_or(&target.lastname);
    let firstname = input.firstname.as_deref().unwrap_or(&target.firstname);
    guard::assert_no_conflict(lastname, firstname, Some(&id), &existing)?;
    let (lastname, firstname) = (lastname.to_owned(), firstname.to_owned());

    let patch = normalize::prepare_for_update(input)?;

    self
      .store
      .update_by_id(id.clone(), patch)
      .await
      .map_err(|e| rejected(e, lastname, firstname))?
      .ok_or(Error::NotFound(id))
  }

  pub async fn delete(&self, id: PersonId) -> Result<()> {
    if self.store.remove_by_id(id.clone()).await.map_err(unavailable)? {
      Ok(())
    } else {
      Err(Error::NotFound(id))
    }
  }
}

/// Uniform pick from a single snapshot; the index is always in `0..len`.
fn pick<R: Rng + ?Sized>(mut people: Vec<Person>, rng: &mut R) -> Option<Person> {
  if people.is_empty() {
    return None;
  }
  let index = rng.gen_range(0..people.len());
  Some(people.swap_remove(index))
}

fn unavailable<E: StoreFailure>(e: E) -> Error { Error::StoreUnavailable(Box::new(e)) }

/// A write refused by the store's own unique index is the same conflict the
/// guard would have reported.
fn rejected<E: StoreFailure>(e: E, lastname: String, firstname: String) -> Error {
  if e.is_duplicate_key() {
    Error::Conflict { lastname, firstname }
  } else {
    unavailable(e)
  }
}
