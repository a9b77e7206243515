//! Resources, optionally classified by a [`ResourceType`](crate::resource_type::ResourceType).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{Errors, Validate, presence};

/// A persisted resource. Serialises as `{"id", "name", "description"}`, plus
/// `resource_type_id` when the resource is classified.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
  pub id:               i64,
  pub name:             String,
  pub description:      String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub resource_type_id: Option<i64>,
  #[serde(skip)]
  pub created_at:       DateTime<Utc>,
  #[serde(skip)]
  pub updated_at:       DateTime<Utc>,
}

impl Resource {
  pub fn apply(&mut self, params: ResourceParams) {
    if let Some(name) = params.name {
      self.name = name;
    }
    if let Some(description) = params.description {
      self.description = description;
    }
    if let Some(type_id) = params.resource_type_id {
      self.resource_type_id = type_id;
    }
  }
}

/// Both `name` and `description` are required on every write, so an update
/// that only touches `name` passes on the strength of the stored description.
impl Validate for Resource {
  fn validate(&self) -> Errors { rules(&self.name, &self.description) }
}

/// Input to [`crate::store::CatalogStore::insert_resource`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewResource {
  pub name:             String,
  pub description:      String,
  pub resource_type_id: Option<i64>,
}

impl Validate for NewResource {
  fn validate(&self) -> Errors { rules(&self.name, &self.description) }
}

/// Permitted request attributes for create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceParams {
  pub name:             Option<String>,
  pub description:      Option<String>,
  /// `Some(None)` unclassifies the resource.
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub resource_type_id: Option<Option<i64>>,
}

impl From<ResourceParams> for NewResource {
  fn from(p: ResourceParams) -> Self {
    NewResource {
      name:             p.name.unwrap_or_default(),
      description:      p.description.unwrap_or_default(),
      resource_type_id: p.resource_type_id.flatten(),
    }
  }
}

fn rules(name: &str, description: &str) -> Errors {
  let mut errors = Errors::new();
  presence(&mut errors, "name", Some(name));
  presence(&mut errors, "description", Some(description));
  errors
}
