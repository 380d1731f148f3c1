//! The `PlayerSource` trait: the listing/search capabilities the browser
//! consumes.
//!
//! Implemented by the SQLite reference store (`roster-store-sqlite`) and by
//! the HTTP client in `roster-cli`. The controller never calls it directly;
//! [`crate::fetch::execute`] does.

use std::future::Future;

use crate::{
  player::{Country, Player},
  query::SearchParams,
};

/// Abstraction over a paginated player listing.
///
/// A successful `Ok(None)` means "no body"; callers treat it as an empty
/// page, not as an error.
pub trait PlayerSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Unfiltered page of players. `page` starts at 1.
  fn list(
    &self,
    page: u32,
    page_size: u32,
  ) -> impl Future<Output = Result<Option<Vec<Player>>, Self::Error>> + Send + '_;

  /// Filtered page of players.
  fn search<'a>(
    &'a self,
    params: &'a SearchParams,
  ) -> impl Future<Output = Result<Option<Vec<Player>>, Self::Error>> + Send + 'a;

  /// All countries, for populating the nationality picker.
  fn countries(
    &self,
  ) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + '_;
}
