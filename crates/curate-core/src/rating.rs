//! Ratings and the polymorphic reference to whatever they rate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  validation::{Errors, Validate},
};

pub const STARS_OUT_OF_RANGE: &str = "must be between 1 and 5";

// ─── Rateable ────────────────────────────────────────────────────────────────

/// A reference to a rateable record. The variant name is the `kind`
/// discriminant stored next to the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Rateable {
  Review(i64),
}

impl Rateable {
  /// Must match the `rename_all = "snake_case"` serde tags above.
  pub fn kind(&self) -> &'static str {
    match self {
      Self::Review(_) => "review",
    }
  }

  pub fn id(&self) -> i64 {
    match self {
      Self::Review(id) => *id,
    }
  }

  /// Rebuild from the `(kind, id)` column pair.
  pub fn from_parts(kind: &str, id: i64) -> Result<Self> {
    match kind {
      "review" => Ok(Self::Review(id)),
      other => Err(Error::UnknownRateableKind(other.to_owned())),
    }
  }
}

// ─── Rating ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
  pub id:         i64,
  pub stars:      u8,
  pub rateable:   Rateable,
  #[serde(skip)]
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRating {
  pub stars:    u8,
  pub rateable: Rateable,
}

impl Validate for NewRating {
  fn validate(&self) -> Errors {
    let mut errors = Errors::new();
    if !STARS.contains(&self.stars) {
      errors.add("stars", STARS_OUT_OF_RANGE);
    }
    errors
  }
}

const STARS: std::ops::RangeInclusive<u8> = 1..=5;

/// Narrow a raw request value to a star count. Anything outside `1..=5`,
/// including values that do not fit a `u8`, records [`STARS_OUT_OF_RANGE`].
pub fn checked_stars(raw: i64, errors: &mut Errors) -> Option<u8> {
  match u8::try_from(raw) {
    Ok(stars) if STARS.contains(&stars) => Some(stars),
    _ => {
      errors.add("stars", STARS_OUT_OF_RANGE);
      None
    }
  }
}
