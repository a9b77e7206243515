//! Authors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{Errors, Validate, presence};

/// A persisted author. Serialises as `{"id", "first", "last"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
  pub id:         i64,
  pub first:      String,
  pub last:       Option<String>,
  #[serde(skip)]
  pub created_at: DateTime<Utc>,
  #[serde(skip)]
  pub updated_at: DateTime<Utc>,
}

impl Author {
  /// Overwrite every attribute present in `params`; absent ones are kept.
  /// An explicit `null` clears `last`.
  pub fn apply(&mut self, params: AuthorParams) {
    if let Some(first) = params.first {
      self.first = first;
    }
    if let Some(last) = params.last {
      self.last = last;
    }
  }
}

impl Validate for Author {
  fn validate(&self) -> Errors { rules(&self.first) }
}

/// Input to [`crate::store::CatalogStore::insert_author`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewAuthor {
  pub first: String,
  pub last:  Option<String>,
}

impl Validate for NewAuthor {
  fn validate(&self) -> Errors { rules(&self.first) }
}

/// Permitted request attributes for create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorParams {
  pub first: Option<String>,
  #[serde(default, deserialize_with = "crate::patch::nullable")]
  pub last:  Option<Option<String>>,
}

impl From<AuthorParams> for NewAuthor {
  fn from(p: AuthorParams) -> Self {
    NewAuthor {
      first: p.first.unwrap_or_default(),
      last:  p.last.flatten(),
    }
  }
}

fn rules(first: &str) -> Errors {
  let mut errors = Errors::new();
  presence(&mut errors, "first", Some(first));
  errors
}
