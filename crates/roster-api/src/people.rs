//! Handlers for `/people` endpoints.
//!
//! | Method   | Path             | Notes |
//! |----------|------------------|-------|
//! | `GET`    | `/people`        | 204 when the directory is empty |
//! | `GET`    | `/people/random` | 204 when the directory is empty |
//! | `GET`    | `/people/:id`    | 404 if not found |
//! | `POST`   | `/people`        | Body: [`CreatePersonRequest`]; returns 201 + stored person |
//! | `PUT`    | `/people/:id`    | Body: [`UpdatePersonRequest`]; returns the merged person |
//! | `DELETE` | `/people/:id`    | 204 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::{
  Directory,
  person::{CreatePersonRequest, Person, UpdatePersonRequest},
  store::PersonStore,
};

use crate::error::ApiError;

// ─── Reads ────────────────────────────────────────────────────────────────────

/// `GET /people`
pub async fn list<S>(State(directory): State<Arc<Directory<S>>>) -> Result<Response, ApiError>
where
  S: PersonStore,
{
  Ok(match directory.list_all().await? {
    Some(people) => Json(people).into_response(),
    None => StatusCode::NO_CONTENT.into_response(),
  })
}

/// `GET /people/random`
pub async fn random<S>(State(directory): State<Arc<Directory<S>>>) -> Result<Response, ApiError>
where
  S: PersonStore,
{
  Ok(match directory.random().await? {
    Some(person) => Json(person).into_response(),
    None => StatusCode::NO_CONTENT.into_response(),
  })
}

/// `GET /people/:id`
pub async fn get_one<S>(
  State(directory): State<Arc<Directory<S>>>,
  Path(id): Path<String>,
) -> Result<Json<Person>, ApiError>
where
  S: PersonStore,
{
  Ok(Json(directory.get_by_id(id.into()).await?))
}

// ─── Writes ───────────────────────────────────────────────────────────────────

/// `POST /people` — returns 201 + the stored [`Person`].
pub async fn create<S>(
  State(directory): State<Arc<Directory<S>>>,
  Json(body): Json<CreatePersonRequest>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore,
{
  let person = directory.create(body).await?;
  Ok((StatusCode::CREATED, Json(person)))
}

/// `PUT /people/:id` — body fields are merged onto the stored record.
pub async fn update<S>(
  State(directory): State<Arc<Directory<S>>>,
  Path(id): Path<String>,
  Json(body): Json<UpdatePersonRequest>,
) -> Result<Json<Person>, ApiError>
where
  S: PersonStore,
{
  Ok(Json(directory.update(id.into(), body).await?))
}

/// `DELETE /people/:id`
pub async fn delete_one<S>(
  State(directory): State<Arc<Directory<S>>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: PersonStore,
{
  directory.delete(id.into()).await?;
  Ok(StatusCode::NO_CONTENT)
}
