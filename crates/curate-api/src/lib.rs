//! JSON REST API for Curate.
//!
//! Exposes an axum [`Router`] backed by any [`curate_core::store::CatalogStore`].
//! Every handler follows the same round trip: permit the request attributes,
//! validate the candidate record, persist it, and answer with the record or an
//! `{"errors": {...}}` map.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = curate_api::api_router(Arc::new(store));
//! ```

pub mod authors;
pub mod error;
pub mod params;
pub mod ratings;
pub mod resource_types;
pub mod resources;
pub mod reviews;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use curate_core::store::CatalogStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Authors
    .route("/authors", get(authors::list::<S>).post(authors::create::<S>))
    .route(
      "/authors/{id}",
      get(authors::show::<S>)
        .patch(authors::update::<S>)
        .put(authors::update::<S>)
        .delete(authors::destroy::<S>),
    )
    // Resources
    .route("/resources", get(resources::list::<S>).post(resources::create::<S>))
    .route(
      "/resources/{id}",
      get(resources::show::<S>)
        .patch(resources::update::<S>)
        .put(resources::update::<S>)
        .delete(resources::destroy::<S>),
    )
    // Resource types
    .route(
      "/resource_types",
      get(resource_types::list::<S>).post(resource_types::create::<S>),
    )
    .route(
      "/resource_types/{id}",
      get(resource_types::show::<S>)
        .patch(resource_types::update::<S>)
        .put(resource_types::update::<S>)
        .delete(resource_types::destroy::<S>),
    )
    // Reviews
    .route("/reviews", get(reviews::list::<S>).post(reviews::create::<S>))
    .route(
      "/reviews/{id}",
      get(reviews::show::<S>)
        .patch(reviews::update::<S>)
        .put(reviews::update::<S>)
        .delete(reviews::destroy::<S>),
    )
    .route("/reviews/{id}/ratings", get(ratings::list_for_review::<S>))
    // Ratings
    .route("/ratings", post(ratings::create::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests;
