//! Handlers for `/authors` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/authors` | Creation order |
//! | `POST`   | `/authors` | Body: `{"first","last"}`, optionally under `"author"`; 201 or 422 |
//! | `GET`    | `/authors/:id` | 404 if not found |
//! | `PATCH`/`PUT` | `/authors/:id` | Partial body; 200, 404 or 422 |
//! | `DELETE` | `/authors/:id` | 204 or 404 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use curate_core::{
  Validate,
  author::{Author, AuthorParams, NewAuthor},
  store::CatalogStore,
};
use serde_json::Value;

use crate::{
  error::ApiError,
  params::{permit, record_id},
};

async fn find<S: CatalogStore>(store: &S, raw_id: &str) -> Result<Author, ApiError> {
  let id = record_id("author", raw_id)?;
  store
    .get_author(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("author", id))
}

/// `GET /authors`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Author>>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let authors = store.list_authors().await.map_err(ApiError::store)?;
  Ok(Json(authors))
}

/// `GET /authors/:id`
pub async fn show<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Author>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(find(&*store, &id).await?))
}

/// `POST /authors`: returns 201 + the stored author.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = NewAuthor::from(permit::<AuthorParams>("author", body)?);
  input.validate().into_result()?;

  let author = store.insert_author(input).await.map_err(ApiError::store)?;
  tracing::info!(id = author.id, "created author");
  Ok((StatusCode::CREATED, Json(author)))
}

/// `PATCH /authors/:id` and `PUT /authors/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<Value>,
) -> Result<Json<Author>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut author = find(&*store, &id).await?;
  author.apply(permit("author", body)?);
  author.validate().into_result()?;

  let author_id = author.id;
  let author = store
    .update_author(author)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("author", author_id))?;
  tracing::info!(id = author.id, "updated author");
  Ok(Json(author))
}

/// `DELETE /authors/:id`: 204 on success.
pub async fn destroy<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = record_id("author", &id)?;
  if !store.delete_author(id).await.map_err(ApiError::store)? {
    return Err(ApiError::not_found("author", id));
  }
  tracing::info!(id, "deleted author");
  Ok(StatusCode::NO_CONTENT)
}
