//! Name-pair uniqueness guard.
//!
//! No two records may share a `(lastname, firstname)` pair under
//! case-insensitive comparison. A record being updated may keep its own pair.

use crate::{
  Error, Result,
  person::{NameKey, Person, PersonId},
};

/// Scan `existing` for a record other than `exclude` whose name pair matches
/// the candidate. The first match is reported as [`Error::Conflict`] carrying
/// that record's pair.
pub fn assert_no_conflict(
  lastname: &str,
  firstname: &str,
  exclude: Option<&PersonId>,
  existing: &[Person],
) -> Result<()> {
  let candidate = NameKey::new(lastname, firstname);

  match existing
    .iter()
    .filter(|p| Some(&p.id) != exclude)
    .find(|p| p.name_key() == candidate)
  {
    Some(p) => Err(Error::Conflict {
      lastname:  p.lastname.clone(),
      firstname: p.firstname.clone(),
    }),
    None => Ok(()),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::Map;

  use super::*;

  fn person(id: &str, firstname: &str, lastname: &str) -> Person {
    Person {
      id: id.into(),
      firstname: firstname.into(),
      lastname: lastname.into(),
      birth_date: 0,
      photo: String::new(),
      extra: Map::new(),
    }
  }

  #[test]
  fn empty_set_never_conflicts() {
    assert!(assert_no_conflict("Doe", "John", None, &[]).is_ok());
  }

  #[test]
  fn detects_case_insensitive_match() {
    let existing = [person("1", "John", "Doe"), person("2", "Jane", "Doe")];
    let err = assert_no_conflict("DOE", "john", None, &existing).unwrap_err();
    assert!(matches!(
      err,
      Error::Conflict { ref lastname, ref firstname } if lastname == "Doe" && firstname == "John"
    ));
  }

  #[test]
  fn swapped_names_are_a_different_pair() {
    let existing = [person("1", "John", "Doe")];
    assert!(assert_no_conflict("John", "Doe", None, &existing).is_ok());
  }

  #[test]
  fn excluded_record_may_keep_its_pair() {
    let existing = [person("1", "John", "Doe")];
    let own = PersonId::from("1");
    assert!(assert_no_conflict("Doe", "John", Some(&own), &existing).is_ok());

    let other = PersonId::from("2");
    assert!(assert_no_conflict("Doe", "John", Some(&other), &existing).is_err());
  }
}
