//! Handlers for `/resources` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/resources` | Creation order |
//! | `POST`   | `/resources` | Body: `{"name","description","resource_type_id"?}`; 201 or 422 |
//! | `GET`    | `/resources/:id` | 404 if not found |
//! | `PATCH`/`PUT` | `/resources/:id` | Partial body; 200, 404 or 422 |
//! | `DELETE` | `/resources/:id` | 204, 404, or 422 while reviews remain |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use curate_core::{
  Errors, Validate,
  resource::{NewResource, Resource, ResourceParams},
  rules,
  store::CatalogStore,
};
use serde_json::Value;

use crate::{
  error::ApiError,
  params::{permit, record_id},
};

async fn find<S: CatalogStore>(store: &S, raw_id: &str) -> Result<Resource, ApiError> {
  let id = record_id("resource", raw_id)?;
  store
    .get_resource(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("resource", id))
}

/// `GET /resources`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Resource>>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let resources = store.list_resources().await.map_err(ApiError::store)?;
  Ok(Json(resources))
}

/// `GET /resources/:id`
pub async fn show<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Resource>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(find(&*store, &id).await?))
}

/// `POST /resources`: returns 201 + the stored resource.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = NewResource::from(permit::<ResourceParams>("resource", body)?);
  let mut errors = input.validate();
  rules::resource_type_exists(&*store, input.resource_type_id, &mut errors)
    .await
    .map_err(ApiError::store)?;
  errors.into_result()?;

  let resource = store.insert_resource(input).await.map_err(ApiError::store)?;
  tracing::info!(id = resource.id, "created resource");
  Ok((StatusCode::CREATED, Json(resource)))
}

/// `PATCH /resources/:id` and `PUT /resources/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<Value>,
) -> Result<Json<Resource>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut resource = find(&*store, &id).await?;
  let params: ResourceParams = permit("resource", body)?;
  let retyped = params.resource_type_id.flatten();
  resource.apply(params);

  let mut errors = resource.validate();
  rules::resource_type_exists(&*store, retyped, &mut errors)
    .await
    .map_err(ApiError::store)?;
  errors.into_result()?;

  let resource_id = resource.id;
  let resource = store
    .update_resource(resource)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("resource", resource_id))?;
  tracing::info!(id = resource.id, "updated resource");
  Ok(Json(resource))
}

/// `DELETE /resources/:id`: refused while reviews still point at it.
pub async fn destroy<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let resource = find(&*store, &id).await?;

  let mut errors = Errors::new();
  let reviews = store
    .count_reviews_for(resource.id)
    .await
    .map_err(ApiError::store)?;
  rules::restrict_dependents(&mut errors, reviews, "reviews");
  errors.into_result()?;

  if !store.delete_resource(resource.id).await.map_err(ApiError::store)? {
    return Err(ApiError::not_found("resource", resource.id));
  }
  tracing::info!(id = resource.id, "deleted resource");
  Ok(StatusCode::NO_CONTENT)
}
