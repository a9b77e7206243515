//! Handlers for ratings.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/ratings` | Body: `{"stars":4,"rateable":{"kind":"review","id":1}}` |
//! | `GET`  | `/reviews/:id/ratings` | 404 if the review does not exist |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use curate_core::{
  Errors, Validate,
  rating::{self, NewRating, Rateable, Rating},
  rules,
  store::CatalogStore,
  validation::BLANK,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{error::ApiError, params::permit, reviews};

/// JSON body accepted by `POST /ratings`.
#[derive(Debug, Deserialize)]
pub struct RatingParams {
  pub stars:    Option<i64>,
  pub rateable: Option<Rateable>,
}

/// `POST /ratings`: returns 201 + the stored rating.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let params: RatingParams = permit("rating", body)?;

  let mut errors = Errors::new();
  let stars = match params.stars {
    Some(raw) => rating::checked_stars(raw, &mut errors),
    None => {
      errors.add("stars", BLANK);
      None
    }
  };
  match params.rateable {
    Some(rateable) => rules::rateable_exists(&*store, rateable, &mut errors)
      .await
      .map_err(ApiError::store)?,
    None => errors.add("rateable", BLANK),
  }
  let (Some(stars), Some(rateable)) = (stars, params.rateable) else {
    return Err(errors.into());
  };

  let input = NewRating { stars, rateable };
  errors.merge(input.validate());
  errors.into_result()?;

  let rating = store.insert_rating(input).await.map_err(ApiError::store)?;
  tracing::info!(id = rating.id, kind = rateable.kind(), target = rateable.id(), "created rating");
  Ok((StatusCode::CREATED, Json(rating)))
}

/// `GET /reviews/:id/ratings`
pub async fn list_for_review<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Vec<Rating>>, ApiError>
where
  S: CatalogStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let review = reviews::find(&*store, &id).await?;
  let ratings = store
    .list_ratings(Rateable::Review(review.id))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(ratings))
}
