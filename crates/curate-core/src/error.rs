//! Error types for `curate-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown rateable kind: {0:?}")]
  UnknownRateableKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
