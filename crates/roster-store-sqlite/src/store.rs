//! [`SqliteStore`] — the SQLite implementation of [`PersonStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use roster_core::{
  person::{NewPerson, Person, PersonId, PersonPatch},
  store::PersonStore,
};

use crate::{
  Error, Result,
  encode::{decode_person, encode_person, json_in_call},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person directory backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// `true` for a UNIQUE / PRIMARY KEY rejection.
fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(f, _) if f.code == rusqlite::ErrorCode::ConstraintViolation
  )
}

/// Outcome of the read-merge-write performed by `update_by_id`.
enum Updated {
  Missing,
  Stored(Person),
  Duplicate { lastname: String, firstname: String },
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = Error;

  async fn list_all(&self) -> Result<Vec<Person>> {
    let documents: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT document FROM people ORDER BY rowid")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    documents
      .iter()
      .map(|d| decode_person(d).map_err(Error::Json))
      .collect()
  }

  async fn get_by_id(&self, id: PersonId) -> Result<Option<Person>> {
    let id_str = id.to_string();

    let document: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT document FROM people WHERE id = ?1",
            rusqlite::params![id_str],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;

    Ok(document.as_deref().map(decode_person).transpose()?)
  }

  async fn insert(&self, candidate: NewPerson) -> Result<Person> {
    let person = candidate.with_id(PersonId::generate());
    let row = encode_person(&person)?;

    let written = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (id, lastname_key, firstname_key, document)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![row.id, row.lastname_key, row.firstname_key, row.document],
        )?;
        Ok(())
      })
      .await;

    match written {
      Ok(()) => Ok(person),
      Err(tokio_rusqlite::Error::Rusqlite(e)) if is_unique_violation(&e) => {
        Err(Error::DuplicateKey {
          lastname:  person.lastname,
          firstname: person.firstname,
        })
      }
      Err(e) => Err(Error::Database(e)),
    }
  }

  async fn update_by_id(&self, id: PersonId, patch: PersonPatch) -> Result<Option<Person>> {
    let id_str = id.to_string();

    // Read, merge and rewrite inside one transaction so a concurrent writer
    // cannot interleave.
    let updated = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let current: Option<String> = tx
          .query_row(
            "SELECT document FROM people WHERE id = ?1",
            rusqlite::params![id_str],
            |row| row.get(0),
          )
          .optional()?;
        let Some(current) = current else {
          return Ok(Updated::Missing);
        };

        let mut person = decode_person(&current).map_err(json_in_call)?;
        person.apply(patch);
        let row = encode_person(&person).map_err(json_in_call)?;

        let written = tx.execute(
          "UPDATE people
           SET lastname_key = ?2, firstname_key = ?3, document = ?4
           WHERE id = ?1",
          rusqlite::params![row.id, row.lastname_key, row.firstname_key, row.document],
        );
        match written {
          Ok(_) => {}
          Err(e) if is_unique_violation(&e) => {
            return Ok(Updated::Duplicate {
              lastname:  person.lastname,
              firstname: person.firstname,
            });
          }
          Err(e) => return Err(e.into()),
        }

        tx.commit()?;
        Ok(Updated::Stored(person))
      })
      .await?;

    match updated {
      Updated::Missing => Ok(None),
      Updated::Stored(person) => Ok(Some(person)),
      Updated::Duplicate { lastname, firstname } => {
        Err(Error::DuplicateKey { lastname, firstname })
      }
    }
  }

  async fn remove_by_id(&self, id: PersonId) -> Result<bool> {
    let id_str = id.to_string();

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM people WHERE id = ?1", rusqlite::params![id_str])?)
      })
      .await?;

    Ok(removed > 0)
  }
}
