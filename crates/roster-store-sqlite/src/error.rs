//! Error type for `roster-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("page numbers start at 1")]
  ZeroPage,

  #[error("page {page} of size {page_size} is past the addressable range")]
  WindowTooLarge { page: u32, page_size: u32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
