//! Resource types: a named classification shared by many resources.
//!
//! `resource_type` is unique across all rows; that rule needs the datastore
//! and is enforced by [`crate::rules::unique_resource_type`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{Errors, Validate, presence};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceType {
  pub id:            i64,
  pub resource_type: String,
  #[serde(skip)]
  pub created_at:    DateTime<Utc>,
  #[serde(skip)]
  pub updated_at:    DateTime<Utc>,
}

impl ResourceType {
  pub fn apply(&mut self, params: ResourceTypeParams) {
    if let Some(value) = params.resource_type {
      self.resource_type = value;
    }
  }
}

impl Validate for ResourceType {
  fn validate(&self) -> Errors { rules(&self.resource_type) }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewResourceType {
  pub resource_type: String,
}

impl Validate for NewResourceType {
  fn validate(&self) -> Errors { rules(&self.resource_type) }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceTypeParams {
  pub resource_type: Option<String>,
}

impl From<ResourceTypeParams> for NewResourceType {
  fn from(p: ResourceTypeParams) -> Self {
    NewResourceType { resource_type: p.resource_type.unwrap_or_default() }
  }
}

fn rules(resource_type: &str) -> Errors {
  let mut errors = Errors::new();
  presence(&mut errors, "resource_type", Some(resource_type));
  errors
}
