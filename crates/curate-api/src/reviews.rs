//! Handlers for `/reviews` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/reviews` | Creation order |
//! | `POST`   | `/reviews` | Body: `{"resource_id","comment"}`; the resource must exist |
//! | `GET`    | `/reviews/:id` | 404 if not found |
//! | `PATCH`/`PUT` | `/reviews/:id` | Partial body |
//! | `DELETE` | `/reviews/:id` | Also removes the review's ratings |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use curate_core::{
  Validate,
  review::{NewReview, Review, ReviewParams},
  rules,
  store::CatalogStore,
};
use serde_json::Value;

use crate::{
  error::ApiError,
  params::{permit, record_id},
};

pub(crate) async fn find<S: CatalogStore>(
  store: &S,
  raw_id: &str,
) -> Result<Review, ApiError> {
  let id = record_id("review", raw_id)?;
  store
    .get_review(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("review", id))
}

/// `GET /reviews`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Review>>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let reviews = store.list_reviews().await.map_err(ApiError::store)?;
  Ok(Json(reviews))
}

/// `GET /reviews/:id`
pub async fn show<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Review>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(find(&*store, &id).await?))
}

/// `POST /reviews`: returns 201 + the stored review.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = NewReview::from(permit::<ReviewParams>("review", body)?);
  let mut errors = input.validate();
  rules::resource_exists(&*store, input.resource_id, &mut errors)
    .await
    .map_err(ApiError::store)?;
  errors.into_result()?;

  let review = store.insert_review(input).await.map_err(ApiError::store)?;
  tracing::info!(id = review.id, resource_id = review.resource_id, "created review");
  Ok((StatusCode::CREATED, Json(review)))
}

/// `PATCH /reviews/:id` and `PUT /reviews/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<Value>,
) -> Result<Json<Review>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut review = find(&*store, &id).await?;
  let params: ReviewParams = permit("review", body)?;
  let moved_to = params.resource_id;
  review.apply(params);

  let mut errors = review.validate();
  if moved_to.is_some() {
    rules::resource_exists(&*store, moved_to, &mut errors)
      .await
      .map_err(ApiError::store)?;
  }
  errors.into_result()?;

  let review_id = review.id;
  let review = store
    .update_review(review)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("review", review_id))?;
  tracing::info!(id = review.id, "updated review");
  Ok(Json(review))
}

/// `DELETE /reviews/:id`: 204 on success.
pub async fn destroy<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = record_id("review", &id)?;
  if !store.delete_review(id).await.map_err(ApiError::store)? {
    return Err(ApiError::not_found("review", id));
  }
  tracing::info!(id, "deleted review");
  Ok(StatusCode::NO_CONTENT)
}
