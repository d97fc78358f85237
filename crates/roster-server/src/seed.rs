//! Startup import of seed people.
//!
//! Seeds go through [`Directory::create`], so they are normalized and checked
//! for name-pair conflicts exactly like API writes.

use std::path::Path;

use anyhow::Context as _;
use roster_core::{Directory, Error, person::CreatePersonRequest, store::PersonStore};

/// Import the JSON array at `path` into `directory` if it is empty. Returns
/// how many people were created.
///
/// Entries that conflict or fail validation are skipped with a warning; a
/// store failure aborts the import.
pub async fn import<S: PersonStore>(directory: &Directory<S>, path: &Path) -> anyhow::Result<usize> {
  if directory.list_all().await?.is_some() {
    tracing::info!(path = %path.display(), "store already populated; skipping seed import");
    return Ok(0);
  }

  let text = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read seed file {path:?}"))?;
  let requests: Vec<CreatePersonRequest> =
    serde_json::from_str(&text).with_context(|| format!("failed to parse seed file {path:?}"))?;

  let mut imported = 0;
  for request in requests {
    let name = format!("{} {}", request.firstname, request.lastname);
    match directory.create(request).await {
      Ok(person) => {
        tracing::debug!(id = %person.id, %name, "seeded");
        imported += 1;
      }
      Err(e @ (Error::Conflict { .. } | Error::ValidationFailed { .. })) => {
        tracing::warn!(%name, error = %e, "skipping seed entry");
      }
      Err(e) => return Err(e).context("seed import failed"),
    }
  }

  tracing::info!(imported, path = %path.display(), "seed import complete");
  Ok(imported)
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use roster_core::memory::MemoryStore;
  use serde_json::json;

  use super::*;

  fn seed_file(name: &str, people: serde_json::Value) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("roster-seed-{}-{name}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("people.json");
    std::fs::write(&path, people.to_string()).unwrap();
    path
  }

  #[tokio::test]
  async fn imports_into_empty_store_and_skips_bad_entries() {
    let path = seed_file(
      "mixed",
      json!([
        { "firstname": "John", "lastname": "Doe", "birthDate": "05/06/1985", "city": "Lyon" },
        { "firstname": "JOHN", "lastname": "doe" },
        { "firstname": "Ada", "lastname": "Lovelace", "birthDate": "31/13/1815" },
        { "firstname": "Grace", "lastname": "Hopper" },
      ]),
    );
    let d = Directory::new(MemoryStore::new());

    assert_eq!(import(&d, &path).await.unwrap(), 2);

    let people = d.list_all().await.unwrap().unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people[0].birth_date, 486_777_600_000);
    assert_eq!(people[0].extra["city"], json!("Lyon"));
  }

  #[tokio::test]
  async fn populated_store_is_left_alone() {
    let path = seed_file("populated", json!([{ "firstname": "Grace", "lastname": "Hopper" }]));
    let d = Directory::new(MemoryStore::new());
    d.create(CreatePersonRequest::new("Ada", "Lovelace")).await.unwrap();

    assert_eq!(import(&d, &path).await.unwrap(), 0);
    assert_eq!(d.list_all().await.unwrap().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn unreadable_seed_is_an_error() {
    let d = Directory::new(MemoryStore::new());
    assert!(import(&d, Path::new("/nonexistent/people.json")).await.is_err());
  }
}
