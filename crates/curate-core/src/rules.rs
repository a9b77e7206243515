//! Validation rules that have to consult the datastore.
//!
//! Each rule appends to an existing [`Errors`] map so callers can combine them
//! with the intrinsic [`Validate`](crate::Validate) result and report every
//! violation in one response.

use crate::{
  rating::Rateable,
  store::CatalogStore,
  validation::{BASE, Errors, MUST_EXIST, TAKEN, is_blank},
};

/// `resource_type` must not be held by any other row. Blank values are left to
/// the presence rule.
pub async fn unique_resource_type<S: CatalogStore>(
  store: &S,
  value: &str,
  except: Option<i64>,
  errors: &mut Errors,
) -> Result<(), S::Error> {
  if is_blank(Some(value)) {
    return Ok(());
  }
  if store.resource_type_taken(value.to_owned(), except).await? {
    errors.add("resource_type", TAKEN);
  }
  Ok(())
}

/// A review must point at an existing resource.
pub async fn resource_exists<S: CatalogStore>(
  store: &S,
  resource_id: Option<i64>,
  errors: &mut Errors,
) -> Result<(), S::Error> {
  let found = match resource_id {
    Some(id) => store.get_resource(id).await?.is_some(),
    None => false,
  };
  if !found {
    errors.add("resource", MUST_EXIST);
  }
  Ok(())
}

/// A resource may be unclassified, but a classification it names must exist.
pub async fn resource_type_exists<S: CatalogStore>(
  store: &S,
  type_id: Option<i64>,
  errors: &mut Errors,
) -> Result<(), S::Error> {
  if let Some(id) = type_id
    && store.get_resource_type(id).await?.is_none()
  {
    errors.add("resource_type", MUST_EXIST);
  }
  Ok(())
}

pub async fn rateable_exists<S: CatalogStore>(
  store: &S,
  rateable: Rateable,
  errors: &mut Errors,
) -> Result<(), S::Error> {
  let found = match rateable {
    Rateable::Review(id) => store.get_review(id).await?.is_some(),
  };
  if !found {
    errors.add("rateable", MUST_EXIST);
  }
  Ok(())
}

/// Refuse to delete a row that still has `count` dependents.
pub fn restrict_dependents(errors: &mut Errors, count: u64, dependents: &str) {
  if count > 0 {
    errors.add(
      BASE,
      format!("Cannot delete record because dependent {dependents} exist"),
    );
  }
}
