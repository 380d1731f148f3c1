//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("page size must be at least 1")]
  ZeroPageSize,

  #[error("page numbers start at 1")]
  ZeroPage,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
