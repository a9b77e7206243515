//! Error type for `curate-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] curate_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A review reached the store without a `resource_id`.
  #[error("review has no resource")]
  MissingResource,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
