//! Person types — the single record kind held by the directory.
//!
//! A person has a handful of fields the core understands (names, birth date,
//! photo) and an open set of descriptive attributes that are carried through
//! untouched.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ─── Identifier ──────────────────────────────────────────────────────────────

/// Opaque identifier assigned by the store on insert; never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
  /// A fresh random identifier, as assigned by the bundled stores.
  pub fn generate() -> Self { Self(uuid::Uuid::new_v4().hyphenated().to_string()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for PersonId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for PersonId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for PersonId {
  fn from(s: String) -> Self { Self(s) }
}

// ─── Name key ────────────────────────────────────────────────────────────────

/// The case-folded `(lastname, firstname)` pair that must be unique across
/// the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameKey {
  pub lastname:  String,
  pub firstname: String,
}

impl NameKey {
  pub fn new(lastname: &str, firstname: &str) -> Self {
    Self {
      lastname:  lastname.to_lowercase(),
      firstname: firstname.to_lowercase(),
    }
  }
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// A stored person record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  pub id:         PersonId,
  pub firstname:  String,
  pub lastname:   String,
  /// Milliseconds since the Unix epoch, midnight UTC of the birth day.
  pub birth_date: i64,
  pub photo:      String,
  /// Descriptive attributes (city, email, manager, …) the core never
  /// interprets.
  #[serde(flatten)]
  pub extra:      Map<String, Value>,
}

impl Person {
  pub fn name_key(&self) -> NameKey { NameKey::new(&self.lastname, &self.firstname) }

  /// Merge `patch` onto this record. The identifier is never touched.
  pub fn apply(&mut self, patch: PersonPatch) {
    if let Some(firstname) = patch.firstname {
      self.firstname = firstname;
    }
    if let Some(lastname) = patch.lastname {
      self.lastname = lastname;
    }
    if let Some(birth_date) = patch.birth_date {
      self.birth_date = birth_date;
    }
    if let Some(photo) = patch.photo {
      self.photo = photo;
    }
    for (key, value) in patch.extra {
      if value.is_null() {
        self.extra.remove(&key);
      } else {
        self.extra.insert(key, value);
      }
    }
  }
}

// ─── NewPerson ───────────────────────────────────────────────────────────────

/// A normalized record awaiting an identifier. Input to
/// [`crate::store::PersonStore::insert`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewPerson {
  pub firstname:  String,
  pub lastname:   String,
  pub birth_date: i64,
  pub photo:      String,
  pub extra:      Map<String, Value>,
}

impl NewPerson {
  pub fn name_key(&self) -> NameKey { NameKey::new(&self.lastname, &self.firstname) }

  pub fn with_id(self, id: PersonId) -> Person {
    Person {
      id,
      firstname: self.firstname,
      lastname: self.lastname,
      birth_date: self.birth_date,
      photo: self.photo,
      extra: self.extra,
    }
  }
}

// ─── PersonPatch ─────────────────────────────────────────────────────────────

/// A normalized partial update. Input to
/// [`crate::store::PersonStore::update_by_id`].
///
/// A `null` value in `extra` removes that attribute from the record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonPatch {
  pub firstname:  Option<String>,
  pub lastname:   Option<String>,
  pub birth_date: Option<i64>,
  pub photo:      Option<String>,
  pub extra:      Map<String, Value>,
}

// ─── Requests ────────────────────────────────────────────────────────────────

/// Inbound shape for creating a person. `birthDate` is `dd/mm/yyyy` text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
  pub firstname:  String,
  pub lastname:   String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub birth_date: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub photo:      Option<String>,
  #[serde(flatten)]
  pub extra:      Map<String, Value>,
}

impl CreatePersonRequest {
  pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
    Self {
      firstname: firstname.into(),
      lastname: lastname.into(),
      ..Default::default()
    }
  }
}

/// Inbound shape for updating a person; every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub firstname:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lastname:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub birth_date: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub photo:      Option<String>,
  #[serde(flatten)]
  pub extra:      Map<String, Value>,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn john() -> Person {
    let mut extra = Map::new();
    extra.insert("city".into(), json!("Lyon"));
    Person {
      id: "1".into(),
      firstname: "John".into(),
      lastname: "Doe".into(),
      birth_date: 0,
      photo: "p.jpg".into(),
      extra,
    }
  }

  #[test]
  fn name_key_is_case_folded() {
    assert_eq!(john().name_key(), NameKey::new("DOE", "john"));
  }

  #[test]
  fn person_wire_shape_flattens_extra() {
    let value = serde_json::to_value(john()).unwrap();
    assert_eq!(
      value,
      json!({
        "id": "1",
        "firstname": "John",
        "lastname": "Doe",
        "birthDate": 0,
        "photo": "p.jpg",
        "city": "Lyon",
      })
    );
  }

  #[test]
  fn apply_merges_and_keeps_id() {
    let mut person = john();
    let mut extra = Map::new();
    extra.insert("city".into(), Value::Null);
    extra.insert("email".into(), json!("john@example.com"));

    person.apply(PersonPatch {
      firstname: Some("Johnny".into()),
      extra,
      ..Default::default()
    });

    assert_eq!(person.id, PersonId::from("1"));
    assert_eq!(person.firstname, "Johnny");
    assert_eq!(person.lastname, "Doe");
    assert!(!person.extra.contains_key("city"));
    assert_eq!(person.extra["email"], json!("john@example.com"));
  }

  #[test]
  fn create_request_captures_unknown_fields() {
    let req: CreatePersonRequest = serde_json::from_value(json!({
      "firstname": "Ada",
      "lastname": "Lovelace",
      "birthDate": "10/12/1815",
      "entity": "Analytical",
    }))
    .unwrap();

    assert_eq!(req.birth_date.as_deref(), Some("10/12/1815"));
    assert!(req.photo.is_none());
    assert_eq!(req.extra["entity"], json!("Analytical"));
    assert!(!req.extra.contains_key("birthDate"));
  }
}
