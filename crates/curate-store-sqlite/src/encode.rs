//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Ids are SQLite rowids.

use chrono::{DateTime, Utc};
use curate_core::{
  author::Author,
  rating::{Rateable, Rating},
  resource::Resource,
  resource_type::ResourceType,
  review::Review,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────
//
// Each `Raw*` struct holds a row exactly as read; the `from_row` constructors
// expect the column order of the matching `*_COLUMNS` constant.

pub const AUTHOR_COLUMNS: &str = "id, first, last, created_at, updated_at";

pub struct RawAuthor {
  pub id:         i64,
  pub first:      String,
  pub last:       Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

impl RawAuthor {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      first:      row.get(1)?,
      last:       row.get(2)?,
      created_at: row.get(3)?,
      updated_at: row.get(4)?,
    })
  }

  pub fn into_author(self) -> Result<Author> {
    Ok(Author {
      id:         self.id,
      first:      self.first,
      last:       self.last,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

pub const RESOURCE_TYPE_COLUMNS: &str = "id, resource_type, created_at, updated_at";

pub struct RawResourceType {
  pub id:            i64,
  pub resource_type: String,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawResourceType {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      resource_type: row.get(1)?,
      created_at:    row.get(2)?,
      updated_at:    row.get(3)?,
    })
  }

  pub fn into_resource_type(self) -> Result<ResourceType> {
    Ok(ResourceType {
      id:            self.id,
      resource_type: self.resource_type,
      created_at:    decode_dt(&self.created_at)?,
      updated_at:    decode_dt(&self.updated_at)?,
    })
  }
}

pub const RESOURCE_COLUMNS: &str =
  "id, name, description, resource_type_id, created_at, updated_at";

pub struct RawResource {
  pub id:               i64,
  pub name:             String,
  pub description:      String,
  pub resource_type_id: Option<i64>,
  pub created_at:       String,
  pub updated_at:       String,
}

impl RawResource {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      name:             row.get(1)?,
      description:      row.get(2)?,
      resource_type_id: row.get(3)?,
      created_at:       row.get(4)?,
      updated_at:       row.get(5)?,
    })
  }

  pub fn into_resource(self) -> Result<Resource> {
    Ok(Resource {
      id:               self.id,
      name:             self.name,
      description:      self.description,
      resource_type_id: self.resource_type_id,
      created_at:       decode_dt(&self.created_at)?,
      updated_at:       decode_dt(&self.updated_at)?,
    })
  }
}

pub const REVIEW_COLUMNS: &str = "id, resource_id, comment, created_at, updated_at";

pub struct RawReview {
  pub id:          i64,
  pub resource_id: i64,
  pub comment:     String,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawReview {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      resource_id: row.get(1)?,
      comment:     row.get(2)?,
      created_at:  row.get(3)?,
      updated_at:  row.get(4)?,
    })
  }

  pub fn into_review(self) -> Result<Review> {
    Ok(Review {
      id:          self.id,
      resource_id: self.resource_id,
      comment:     self.comment,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

pub const RATING_COLUMNS: &str = "id, stars, rateable_kind, rateable_id, created_at";

pub struct RawRating {
  pub id:            i64,
  pub stars:         u8,
  pub rateable_kind: String,
  pub rateable_id:   i64,
  pub created_at:    String,
}

impl RawRating {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      stars:         row.get(1)?,
      rateable_kind: row.get(2)?,
      rateable_id:   row.get(3)?,
      created_at:    row.get(4)?,
    })
  }

  pub fn into_rating(self) -> Result<Rating> {
    Ok(Rating {
      id:         self.id,
      stars:      self.stars,
      rateable:   Rateable::from_parts(&self.rateable_kind, self.rateable_id)?,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
