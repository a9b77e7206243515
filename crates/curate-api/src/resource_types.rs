//! Handlers for `/resource_types` endpoints.
//!
//! Same shape as `/resources`; `resource_type` must be unique, and a type
//! that still classifies resources cannot be deleted.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use curate_core::{
  Errors, Validate,
  resource_type::{NewResourceType, ResourceType, ResourceTypeParams},
  rules,
  store::CatalogStore,
};
use serde_json::Value;

use crate::{
  error::ApiError,
  params::{permit, record_id},
};

async fn find<S: CatalogStore>(
  store: &S,
  raw_id: &str,
) -> Result<ResourceType, ApiError> {
  let id = record_id("resource type", raw_id)?;
  store
    .get_resource_type(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("resource type", id))
}

/// `GET /resource_types`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<ResourceType>>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let types = store.list_resource_types().await.map_err(ApiError::store)?;
  Ok(Json(types))
}

/// `GET /resource_types/:id`
pub async fn show<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<ResourceType>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Ok(Json(find(&*store, &id).await?))
}

/// `POST /resource_types`: body: `{"resource_type":"video"}`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input =
    NewResourceType::from(permit::<ResourceTypeParams>("resource_type", body)?);
  let mut errors = input.validate();
  rules::unique_resource_type(&*store, &input.resource_type, None, &mut errors)
    .await
    .map_err(ApiError::store)?;
  errors.into_result()?;

  let created = store
    .insert_resource_type(input)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id = created.id, "created resource type");
  Ok((StatusCode::CREATED, Json(created)))
}

/// `PATCH /resource_types/:id` and `PUT /resource_types/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  Json(body): Json<Value>,
) -> Result<Json<ResourceType>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let mut resource_type = find(&*store, &id).await?;
  resource_type.apply(permit("resource_type", body)?);

  let mut errors = resource_type.validate();
  rules::unique_resource_type(
    &*store,
    &resource_type.resource_type,
    Some(resource_type.id),
    &mut errors,
  )
  .await
  .map_err(ApiError::store)?;
  errors.into_result()?;

  let type_id = resource_type.id;
  let updated = store
    .update_resource_type(resource_type)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::not_found("resource type", type_id))?;
  tracing::info!(id = updated.id, "updated resource type");
  Ok(Json(updated))
}

/// `DELETE /resource_types/:id`: refused while resources are classified by it.
pub async fn destroy<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let resource_type = find(&*store, &id).await?;

  let mut errors = Errors::new();
  let dependents = store
    .count_resources_of_type(resource_type.id)
    .await
    .map_err(ApiError::store)?;
  rules::restrict_dependents(&mut errors, dependents, "resources");
  errors.into_result()?;

  if !store
    .delete_resource_type(resource_type.id)
    .await
    .map_err(ApiError::store)?
  {
    return Err(ApiError::not_found("resource type", resource_type.id));
  }
  tracing::info!(id = resource_type.id, "deleted resource type");
  Ok(StatusCode::NO_CONTENT)
}
