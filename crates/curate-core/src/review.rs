//! Reviews. Each review belongs to exactly one resource and may collect
//! [`Rating`](crate::rating::Rating)s.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{Errors, Validate, presence};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
  pub id:          i64,
  pub resource_id: i64,
  pub comment:     String,
  #[serde(skip)]
  pub created_at:  DateTime<Utc>,
  #[serde(skip)]
  pub updated_at:  DateTime<Utc>,
}

impl Review {
  pub fn apply(&mut self, params: ReviewParams) {
    if let Some(resource_id) = params.resource_id {
      self.resource_id = resource_id;
    }
    if let Some(comment) = params.comment {
      self.comment = comment;
    }
  }
}

impl Validate for Review {
  fn validate(&self) -> Errors { rules(&self.comment) }
}

/// Input to [`crate::store::CatalogStore::insert_review`].
///
/// `resource_id` stays optional until the candidate has passed
/// [`crate::rules::resource_exists`]; the store refuses a review without one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
  pub resource_id: Option<i64>,
  pub comment:     String,
}

impl Validate for NewReview {
  fn validate(&self) -> Errors { rules(&self.comment) }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewParams {
  pub resource_id: Option<i64>,
  pub comment:     Option<String>,
}

impl From<ReviewParams> for NewReview {
  fn from(p: ReviewParams) -> Self {
    NewReview {
      resource_id: p.resource_id,
      comment:     p.comment.unwrap_or_default(),
    }
  }
}

fn rules(comment: &str) -> Errors {
  let mut errors = Errors::new();
  presence(&mut errors, "comment", Some(comment));
  errors
}
