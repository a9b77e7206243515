//! The `CatalogStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `curate-store-sqlite`).
//! Request handlers depend on this abstraction, not on any concrete backend.
//! Stores do not validate: callers run [`crate::Validate`] and
//! [`crate::rules`] first and only hand over candidates that passed.

use std::future::Future;

use crate::{
  author::{Author, NewAuthor},
  rating::{NewRating, Rateable, Rating},
  resource::{NewResource, Resource},
  resource_type::{NewResourceType, ResourceType},
  review::{NewReview, Review},
};

/// Abstraction over a Curate datastore backend.
///
/// Identifiers are assigned by the store, strictly increasing, and never
/// reused. `list_*` methods return rows in creation order. `update_*` returns
/// `None` and `delete_*` returns `false` when the row does not exist.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Authors ───────────────────────────────────────────────────────────

  fn list_authors(
    &self,
  ) -> impl Future<Output = Result<Vec<Author>, Self::Error>> + Send + '_;

  fn get_author(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Author>, Self::Error>> + Send + '_;

  fn insert_author(
    &self,
    input: NewAuthor,
  ) -> impl Future<Output = Result<Author, Self::Error>> + Send + '_;

  /// Persist every attribute of `author` and return the stored row.
  fn update_author(
    &self,
    author: Author,
  ) -> impl Future<Output = Result<Option<Author>, Self::Error>> + Send + '_;

  fn delete_author(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Resource types ────────────────────────────────────────────────────

  fn list_resource_types(
    &self,
  ) -> impl Future<Output = Result<Vec<ResourceType>, Self::Error>> + Send + '_;

  fn get_resource_type(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<ResourceType>, Self::Error>> + Send + '_;

  fn insert_resource_type(
    &self,
    input: NewResourceType,
  ) -> impl Future<Output = Result<ResourceType, Self::Error>> + Send + '_;

  fn update_resource_type(
    &self,
    resource_type: ResourceType,
  ) -> impl Future<Output = Result<Option<ResourceType>, Self::Error>> + Send + '_;

  fn delete_resource_type(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Whether a row other than `except` already holds `value`.
  fn resource_type_taken(
    &self,
    value: String,
    except: Option<i64>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Resources ─────────────────────────────────────────────────────────

  fn list_resources(
    &self,
  ) -> impl Future<Output = Result<Vec<Resource>, Self::Error>> + Send + '_;

  fn get_resource(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Resource>, Self::Error>> + Send + '_;

  fn insert_resource(
    &self,
    input: NewResource,
  ) -> impl Future<Output = Result<Resource, Self::Error>> + Send + '_;

  fn update_resource(
    &self,
    resource: Resource,
  ) -> impl Future<Output = Result<Option<Resource>, Self::Error>> + Send + '_;

  fn delete_resource(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Number of resources classified by resource type `type_id`.
  fn count_resources_of_type(
    &self,
    type_id: i64,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Reviews ───────────────────────────────────────────────────────────

  fn list_reviews(
    &self,
  ) -> impl Future<Output = Result<Vec<Review>, Self::Error>> + Send + '_;

  fn get_review(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Review>, Self::Error>> + Send + '_;

  fn insert_review(
    &self,
    input: NewReview,
  ) -> impl Future<Output = Result<Review, Self::Error>> + Send + '_;

  fn update_review(
    &self,
    review: Review,
  ) -> impl Future<Output = Result<Option<Review>, Self::Error>> + Send + '_;

  /// Delete a review together with every rating that targets it.
  fn delete_review(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Number of reviews attached to resource `resource_id`.
  fn count_reviews_for(
    &self,
    resource_id: i64,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Ratings ───────────────────────────────────────────────────────────

  fn insert_rating(
    &self,
    input: NewRating,
  ) -> impl Future<Output = Result<Rating, Self::Error>> + Send + '_;

  /// All ratings of `rateable`, oldest first.
  fn list_ratings(
    &self,
    rateable: Rateable,
  ) -> impl Future<Output = Result<Vec<Rating>, Self::Error>> + Send + '_;
}
