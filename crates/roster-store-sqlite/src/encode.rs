//! Encoding and decoding between [`Person`] and the plain-text columns stored
//! in SQLite.
//!
//! The whole record, identifier included, is stored as compact JSON in
//! `document`. The key columns are derived from it and never read back.

use roster_core::person::{NameKey, Person};

/// Column values for one `people` row.
pub struct Row {
  pub id:            String,
  pub lastname_key:  String,
  pub firstname_key: String,
  pub document:      String,
}

pub fn encode_person(person: &Person) -> serde_json::Result<Row> {
  let NameKey { lastname, firstname } = person.name_key();
  Ok(Row {
    id:            person.id.to_string(),
    lastname_key:  lastname,
    firstname_key: firstname,
    document:      serde_json::to_string(person)?,
  })
}

pub fn decode_person(document: &str) -> serde_json::Result<Person> {
  serde_json::from_str(document)
}

/// Lift a JSON failure raised inside a connection closure into the
/// connection's error type.
pub fn json_in_call(e: serde_json::Error) -> tokio_rusqlite::Error {
  tokio_rusqlite::Error::Other(Box::new(e))
}
