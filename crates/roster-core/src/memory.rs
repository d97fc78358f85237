//! [`MemoryStore`] — the in-process implementation of [`PersonStore`].

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::{
  person::{NewPerson, Person, PersonId, PersonPatch},
  store::{PersonStore, StoreFailure},
};

#[derive(Debug, Error)]
pub enum Error {
  #[error("duplicate key: {firstname} {lastname}")]
  DuplicateKey { lastname: String, firstname: String },
}

impl StoreFailure for Error {
  fn is_duplicate_key(&self) -> bool { matches!(self, Self::DuplicateKey { .. }) }
}

/// An insertion-ordered person list held in process memory.
///
/// Reads share a read lock and return a snapshot; inserts, updates and
/// removals hold the write lock for their whole read-modify-write. The name
/// pair is re-checked under the write lock, so two racing creates cannot both
/// land.
///
/// Cloning is cheap — clones share the same list.
#[derive(Clone, Default)]
pub struct MemoryStore {
  people: Arc<RwLock<Vec<Person>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// A store pre-populated with `people`, identifiers kept as given.
  pub fn with_people(people: Vec<Person>) -> Self {
    Self { people: Arc::new(RwLock::new(people)) }
  }
}

fn duplicate(lastname: &str, firstname: &str) -> Error {
  Error::DuplicateKey {
    lastname:  lastname.to_owned(),
    firstname: firstname.to_owned(),
  }
}

impl PersonStore for MemoryStore {
  type Error = Error;

  async fn list_all(&self) -> Result<Vec<Person>, Error> { Ok(self.people.read().await.clone()) }

  async fn get_by_id(&self, id: PersonId) -> Result<Option<Person>, Error> {
    Ok(self.people.read().await.iter().find(|p| p.id == id).cloned())
  }

  async fn insert(&self, candidate: NewPerson) -> Result<Person, Error> {
    let mut people = self.people.write().await;

    let key = candidate.name_key();
    if people.iter().any(|p| p.name_key() == key) {
      return Err(duplicate(&candidate.lastname, &candidate.firstname));
    }

    let person = candidate.with_id(PersonId::generate());
    people.push(person.clone());
    Ok(person)
  }

  async fn update_by_id(&self, id: PersonId, patch: PersonPatch) -> Result<Option<Person>, Error> {
    let mut people = self.people.write().await;

    let Some(index) = people.iter().position(|p| p.id == id) else {
      return Ok(None);
    };

    let mut updated = people[index].clone();
    updated.apply(patch);

    let key = updated.name_key();
    if people.iter().any(|p| p.id != id && p.name_key() == key) {
      return Err(duplicate(&updated.lastname, &updated.firstname));
    }

    people[index] = updated.clone();
    Ok(Some(updated))
  }

  async fn remove_by_id(&self, id: PersonId) -> Result<bool, Error> {
    let mut people = self.people.write().await;
    match people.iter().position(|p| p.id == id) {
      Some(index) => {
        people.remove(index);
        Ok(true)
      }
      None => Ok(false),
    }
  }
}
