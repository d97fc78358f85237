//! Input normalization: birth-date parsing and the defaults applied to new
//! records.
//!
//! Everything here is pure; identical input always yields identical output.

use chrono::{NaiveDate, NaiveTime};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
  Error, Result,
  person::{CreatePersonRequest, NewPerson, PersonPatch, UpdatePersonRequest},
};

/// Photo used when a new record does not supply one.
pub const DEFAULT_PHOTO: &str = "https://randomuser.me/api/portraits/lego/6.jpg";

/// Birth date used when a new record does not supply one.
pub const DEFAULT_BIRTH_DATE: &str = "01/01/1970";

/// The text could not be read as a `dd/mm/yyyy` calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a dd/mm/yyyy date, got {0:?}")]
pub struct InvalidDate(pub String);

impl From<InvalidDate> for Error {
  fn from(e: InvalidDate) -> Self { Error::validation("birthDate", e.to_string()) }
}

/// Parse a `dd/mm/yyyy` date into epoch milliseconds at midnight UTC.
pub fn parse_birth_date(text: &str) -> Result<i64, InvalidDate> {
  let invalid = || InvalidDate(text.to_owned());

  let parts: Vec<&str> = text.split('/').map(str::trim).collect();
  let [day, month, year] = parts.as_slice() else {
    return Err(invalid());
  };

  let date = NaiveDate::parse_from_str(&format!("{year}/{month}/{day}"), "%Y/%m/%d")
    .map_err(|_| invalid())?;

  Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp_millis())
}

/// Reject names that are empty once surrounding whitespace is removed.
pub fn validate_name(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::validation(field, "must not be empty"));
  }
  Ok(())
}

/// Shape a create request into a record ready for insertion: names checked,
/// birth date parsed (or [`DEFAULT_BIRTH_DATE`]), photo defaulted to
/// [`DEFAULT_PHOTO`].
pub fn prepare_for_create(input: CreatePersonRequest) -> Result<NewPerson> {
  validate_name("firstname", &input.firstname)?;
  validate_name("lastname", &input.lastname)?;

  let birth_date =
    parse_birth_date(input.birth_date.as_deref().unwrap_or(DEFAULT_BIRTH_DATE))?;

  Ok(NewPerson {
    firstname: input.firstname,
    lastname: input.lastname,
    birth_date,
    photo: input.photo.unwrap_or_else(|| DEFAULT_PHOTO.to_owned()),
    extra: strip_reserved(input.extra),
  })
}

/// Shape an update request into a patch. Only supplied fields are checked.
pub fn prepare_for_update(input: UpdatePersonRequest) -> Result<PersonPatch> {
  if let Some(firstname) = &input.firstname {
    validate_name("firstname", firstname)?;
  }
  if let Some(lastname) = &input.lastname {
    validate_name("lastname", lastname)?;
  }

  let birth_date = input.birth_date.as_deref().map(parse_birth_date).transpose()?;

  Ok(PersonPatch {
    firstname: input.firstname,
    lastname: input.lastname,
    birth_date,
    photo: input.photo,
    extra: strip_reserved(input.extra),
  })
}

/// Identifiers are store-assigned; a client-sent `id` never reaches a record.
fn strip_reserved(mut extra: Map<String, Value>) -> Map<String, Value> {
  extra.remove("id");
  extra
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn parses_day_first() {
    // 5 June 1985, not 6 May.
    assert_eq!(parse_birth_date("05/06/1985"), Ok(486_777_600_000));
  }

  #[test]
  fn parses_dates_before_the_epoch() {
    assert_eq!(parse_birth_date("10/12/1815"), Ok(-4_861_728_000_000));
  }

  #[test]
  fn accepts_leap_day_and_padding() {
    assert_eq!(parse_birth_date(" 29 / 02 / 2000 "), Ok(951_782_400_000));
  }

  #[test]
  fn rejects_malformed_dates() {
    for text in ["1985/06/05", "31/13/1985", "30/02/2001", "05/06", "05/06/1985/1", "", "a/b/c"] {
      assert_eq!(
        parse_birth_date(text),
        Err(InvalidDate(text.to_owned())),
        "{text:?} should be rejected"
      );
    }
  }

  #[test]
  fn create_applies_defaults() {
    let person = prepare_for_create(CreatePersonRequest::new("Ada", "Lovelace")).unwrap();
    assert_eq!(person.photo, DEFAULT_PHOTO);
    assert_eq!(person.birth_date, 0);
  }

  #[test]
  fn create_keeps_supplied_fields_and_drops_client_id() {
    let mut input = CreatePersonRequest::new("Ada", "Lovelace");
    input.birth_date = Some("10/12/1815".into());
    input.photo = Some("ada.png".into());
    input.extra.insert("id".into(), json!("forged"));
    input.extra.insert("city".into(), json!("London"));

    let person = prepare_for_create(input).unwrap();
    assert_eq!(person.birth_date, -4_861_728_000_000);
    assert_eq!(person.photo, "ada.png");
    assert!(!person.extra.contains_key("id"));
    assert_eq!(person.extra["city"], json!("London"));
  }

  #[test]
  fn create_is_deterministic() {
    let input = CreatePersonRequest::new("Ada", "Lovelace");
    assert_eq!(
      prepare_for_create(input.clone()).unwrap(),
      prepare_for_create(input).unwrap()
    );
  }

  #[test]
  fn create_rejects_blank_names_and_bad_dates() {
    let err = prepare_for_create(CreatePersonRequest::new("  ", "Lovelace")).unwrap_err();
    assert!(matches!(err, Error::ValidationFailed { field: "firstname", .. }));

    let mut input = CreatePersonRequest::new("Ada", "Lovelace");
    input.birth_date = Some("1815-12-10".into());
    let err = prepare_for_create(input).unwrap_err();
    assert!(matches!(err, Error::ValidationFailed { field: "birthDate", .. }));
  }

  #[test]
  fn update_only_touches_supplied_fields() {
    let patch = prepare_for_update(UpdatePersonRequest {
      birth_date: Some("05/06/1985".into()),
      ..Default::default()
    })
    .unwrap();

    assert_eq!(patch.birth_date, Some(486_777_600_000));
    assert!(patch.firstname.is_none());
    assert!(patch.photo.is_none());
  }

  #[test]
  fn update_rejects_blank_lastname() {
    let err = prepare_for_update(UpdatePersonRequest {
      lastname: Some(String::new()),
      ..Default::default()
    })
    .unwrap_err();
    assert!(matches!(err, Error::ValidationFailed { field: "lastname", .. }));
  }
}
