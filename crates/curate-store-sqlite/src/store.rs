//! [`SqliteStore`]: the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use curate_core::{
  author::{Author, NewAuthor},
  rating::{NewRating, Rateable, Rating},
  resource::{NewResource, Resource},
  resource_type::{NewResourceType, ResourceType},
  review::{NewReview, Review},
  store::CatalogStore,
};

use crate::{
  Error, Result,
  encode::{
    AUTHOR_COLUMNS, RATING_COLUMNS, RESOURCE_COLUMNS, RESOURCE_TYPE_COLUMNS,
    REVIEW_COLUMNS, RawAuthor, RawRating, RawResource, RawResourceType,
    RawReview, encode_dt,
  },
  schema::SCHEMA,
};

type FromRow<R> = fn(&rusqlite::Row<'_>) -> rusqlite::Result<R>;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Curate catalogue backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    tracing::debug!(path = %path.as_ref().display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store: useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Every row of `table` in id order.
  async fn select_all<R: Send + 'static>(
    &self,
    table:    &'static str,
    columns:  &'static str,
    from_row: FromRow<R>,
  ) -> Result<Vec<R>> {
    let sql = format!("SELECT {columns} FROM {table} ORDER BY id");
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }

  async fn select_by_id<R: Send + 'static>(
    &self,
    table:    &'static str,
    columns:  &'static str,
    id:       i64,
    from_row: FromRow<R>,
  ) -> Result<Option<R>> {
    let sql = format!("SELECT {columns} FROM {table} WHERE id = ?1");
    let row = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id], from_row)
            .optional()?,
        )
      })
      .await?;
    Ok(row)
  }

  async fn delete_by_id(&self, table: &'static str, id: i64) -> Result<bool> {
    let sql = format!("DELETE FROM {table} WHERE id = ?1");
    let changed = self
      .conn
      .call(move |conn| Ok(conn.execute(&sql, rusqlite::params![id])?))
      .await?;
    Ok(changed > 0)
  }

  async fn count_where(
    &self,
    table:  &'static str,
    column: &'static str,
    value:  i64,
  ) -> Result<u64> {
    let sql = format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1");
    let n: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&sql, rusqlite::params![value], |r| r.get(0))?)
      })
      .await?;
    Ok(n.max(0) as u64)
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Authors ───────────────────────────────────────────────────────────────

  async fn list_authors(&self) -> Result<Vec<Author>> {
    self
      .select_all("authors", AUTHOR_COLUMNS, RawAuthor::from_row)
      .await?
      .into_iter()
      .map(RawAuthor::into_author)
      .collect()
  }

  async fn get_author(&self, id: i64) -> Result<Option<Author>> {
    self
      .select_by_id("authors", AUTHOR_COLUMNS, id, RawAuthor::from_row)
      .await?
      .map(RawAuthor::into_author)
      .transpose()
  }

  async fn insert_author(&self, input: NewAuthor) -> Result<Author> {
    let now    = Utc::now();
    let at_str = encode_dt(now);
    let first  = input.first.clone();
    let last   = input.last.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO authors (first, last, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?3)",
          rusqlite::params![first, last, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Author {
      id,
      first:      input.first,
      last:       input.last,
      created_at: now,
      updated_at: now,
    })
  }

  async fn update_author(&self, mut author: Author) -> Result<Option<Author>> {
    author.updated_at = Utc::now();
    let id     = author.id;
    let first  = author.first.clone();
    let last   = author.last.clone();
    let at_str = encode_dt(author.updated_at);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE authors SET first = ?1, last = ?2, updated_at = ?3 WHERE id = ?4",
          rusqlite::params![first, last, at_str, id],
        )?)
      })
      .await?;

    Ok((changed > 0).then_some(author))
  }

  async fn delete_author(&self, id: i64) -> Result<bool> {
    self.delete_by_id("authors", id).await
  }

  // ── Resource types ────────────────────────────────────────────────────────

  async fn list_resource_types(&self) -> Result<Vec<ResourceType>> {
    self
      .select_all("resource_types", RESOURCE_TYPE_COLUMNS, RawResourceType::from_row)
      .await?
      .into_iter()
      .map(RawResourceType::into_resource_type)
      .collect()
  }

  async fn get_resource_type(&self, id: i64) -> Result<Option<ResourceType>> {
    self
      .select_by_id(
        "resource_types",
        RESOURCE_TYPE_COLUMNS,
        id,
        RawResourceType::from_row,
      )
      .await?
      .map(RawResourceType::into_resource_type)
      .transpose()
  }

  async fn insert_resource_type(&self, input: NewResourceType) -> Result<ResourceType> {
    let now    = Utc::now();
    let at_str = encode_dt(now);
    let value  = input.resource_type.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO resource_types (resource_type, created_at, updated_at)
           VALUES (?1, ?2, ?2)",
          rusqlite::params![value, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(ResourceType {
      id,
      resource_type: input.resource_type,
      created_at:    now,
      updated_at:    now,
    })
  }

  async fn update_resource_type(
    &self,
    mut resource_type: ResourceType,
  ) -> Result<Option<ResourceType>> {
    resource_type.updated_at = Utc::now();
    let id     = resource_type.id;
    let value  = resource_type.resource_type.clone();
    let at_str = encode_dt(resource_type.updated_at);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE resource_types SET resource_type = ?1, updated_at = ?2 WHERE id = ?3",
          rusqlite::params![value, at_str, id],
        )?)
      })
      .await?;

    Ok((changed > 0).then_some(resource_type))
  }

  async fn delete_resource_type(&self, id: i64) -> Result<bool> {
    self.delete_by_id("resource_types", id).await
  }

  async fn resource_type_taken(&self, value: String, except: Option<i64>) -> Result<bool> {
    let taken: bool = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT EXISTS(
             SELECT 1 FROM resource_types
             WHERE resource_type = ?1 AND (?2 IS NULL OR id != ?2)
           )",
          rusqlite::params![value, except],
          |r| r.get(0),
        )?)
      })
      .await?;
    Ok(taken)
  }

  // ── Resources ─────────────────────────────────────────────────────────────

  async fn list_resources(&self) -> Result<Vec<Resource>> {
    self
      .select_all("resources", RESOURCE_COLUMNS, RawResource::from_row)
      .await?
      .into_iter()
      .map(RawResource::into_resource)
      .collect()
  }

  async fn get_resource(&self, id: i64) -> Result<Option<Resource>> {
    self
      .select_by_id("resources", RESOURCE_COLUMNS, id, RawResource::from_row)
      .await?
      .map(RawResource::into_resource)
      .transpose()
  }

  async fn insert_resource(&self, input: NewResource) -> Result<Resource> {
    let now         = Utc::now();
    let at_str      = encode_dt(now);
    let name        = input.name.clone();
    let description = input.description.clone();
    let type_id     = input.resource_type_id;

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO resources (name, description, resource_type_id, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?4)",
          rusqlite::params![name, description, type_id, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Resource {
      id,
      name:             input.name,
      description:      input.description,
      resource_type_id: input.resource_type_id,
      created_at:       now,
      updated_at:       now,
    })
  }

  async fn update_resource(&self, mut resource: Resource) -> Result<Option<Resource>> {
    resource.updated_at = Utc::now();
    let id          = resource.id;
    let name        = resource.name.clone();
    let description = resource.description.clone();
    let type_id     = resource.resource_type_id;
    let at_str      = encode_dt(resource.updated_at);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE resources
           SET name = ?1, description = ?2, resource_type_id = ?3, updated_at = ?4
           WHERE id = ?5",
          rusqlite::params![name, description, type_id, at_str, id],
        )?)
      })
      .await?;

    Ok((changed > 0).then_some(resource))
  }

  async fn delete_resource(&self, id: i64) -> Result<bool> {
    self.delete_by_id("resources", id).await
  }

  async fn count_resources_of_type(&self, type_id: i64) -> Result<u64> {
    self.count_where("resources", "resource_type_id", type_id).await
  }

  // ── Reviews ───────────────────────────────────────────────────────────────

  async fn list_reviews(&self) -> Result<Vec<Review>> {
    self
      .select_all("reviews", REVIEW_COLUMNS, RawReview::from_row)
      .await?
      .into_iter()
      .map(RawReview::into_review)
      .collect()
  }

  async fn get_review(&self, id: i64) -> Result<Option<Review>> {
    self
      .select_by_id("reviews", REVIEW_COLUMNS, id, RawReview::from_row)
      .await?
      .map(RawReview::into_review)
      .transpose()
  }

  async fn insert_review(&self, input: NewReview) -> Result<Review> {
    let resource_id = input.resource_id.ok_or(Error::MissingResource)?;
    let now         = Utc::now();
    let at_str      = encode_dt(now);
    let comment     = input.comment.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO reviews (resource_id, comment, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?3)",
          rusqlite::params![resource_id, comment, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Review {
      id,
      resource_id,
      comment:    input.comment,
      created_at: now,
      updated_at: now,
    })
  }

  async fn update_review(&self, mut review: Review) -> Result<Option<Review>> {
    review.updated_at = Utc::now();
    let id          = review.id;
    let resource_id = review.resource_id;
    let comment     = review.comment.clone();
    let at_str      = encode_dt(review.updated_at);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE reviews SET resource_id = ?1, comment = ?2, updated_at = ?3 WHERE id = ?4",
          rusqlite::params![resource_id, comment, at_str, id],
        )?)
      })
      .await?;

    Ok((changed > 0).then_some(review))
  }

  async fn delete_review(&self, id: i64) -> Result<bool> {
    let kind = Rateable::Review(id).kind();

    let deleted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM ratings WHERE rateable_kind = ?1 AND rateable_id = ?2",
          rusqlite::params![kind, id],
        )?;
        let changed =
          tx.execute("DELETE FROM reviews WHERE id = ?1", rusqlite::params![id])?;
        tx.commit()?;
        Ok(changed > 0)
      })
      .await?;

    Ok(deleted)
  }

  async fn count_reviews_for(&self, resource_id: i64) -> Result<u64> {
    self.count_where("reviews", "resource_id", resource_id).await
  }

  // ── Ratings ───────────────────────────────────────────────────────────────

  async fn insert_rating(&self, input: NewRating) -> Result<Rating> {
    let now    = Utc::now();
    let at_str = encode_dt(now);
    let kind   = input.rateable.kind();
    let target = input.rateable.id();
    let stars  = input.stars;

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO ratings (rateable_kind, rateable_id, stars, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![kind, target, stars, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Rating {
      id,
      stars:      input.stars,
      rateable:   input.rateable,
      created_at: now,
    })
  }

  async fn list_ratings(&self, rateable: Rateable) -> Result<Vec<Rating>> {
    let sql = format!(
      "SELECT {RATING_COLUMNS} FROM ratings
       WHERE rateable_kind = ?1 AND rateable_id = ?2
       ORDER BY id"
    );
    let kind   = rateable.kind();
    let target = rateable.id();

    let raws: Vec<RawRating> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![kind, target], RawRating::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRating::into_rating).collect()
  }
}
