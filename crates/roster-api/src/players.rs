//! Handlers for the player listing endpoints.
//!
//! | Method | Path       | Notes |
//! |--------|------------|-------|
//! | `GET`  | `/players` | `?page=&page_size=` (defaults 1 and 10) |
//! | `GET`  | `/player`  | Optional `name`, `position`, `nationality`, `team`, plus `page`, `page_size` |
//!
//! Both return a JSON array; an empty page is `[]`.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use roster_core::{
  player::Player,
  query::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, SearchParams},
  source::PlayerSource,
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(default = "default_page")]
  pub page:      u32,
  #[serde(default = "default_page_size")]
  pub page_size: u32,
}

fn default_page() -> u32 { DEFAULT_PAGE }

fn default_page_size() -> u32 { DEFAULT_PAGE_SIZE }

/// `GET /players[?page=<n>][&page_size=<n>]`
pub async fn list<S>(
  State(source): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Player>>, ApiError>
where
  S: PlayerSource,
{
  check_window(params.page, params.page_size)?;
  let players = source
    .list(params.page, params.page_size)
    .await
    .map_err(ApiError::from_source)?;
  Ok(Json(players.unwrap_or_default()))
}

// ─── Search ───────────────────────────────────────────────────────────────────

/// `GET /player[?name=...][&position=...][&nationality=<id>][&team=<id>][&page=...][&page_size=...]`
pub async fn search<S>(
  State(source): State<Arc<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Player>>, ApiError>
where
  S: PlayerSource,
{
  check_window(params.page, params.page_size)?;
  let players = source
    .search(&params)
    .await
    .map_err(ApiError::from_source)?;
  Ok(Json(players.unwrap_or_default()))
}

fn check_window(page: u32, page_size: u32) -> Result<(), ApiError> {
  if page == 0 {
    return Err(ApiError::BadRequest("page must be at least 1".into()));
  }
  if page_size == 0 {
    return Err(ApiError::BadRequest("page_size must be at least 1".into()));
  }
  // The row offset must fit SQL's signed 64-bit OFFSET.
  if i64::from(page - 1).checked_mul(i64::from(page_size)).is_none() {
    return Err(ApiError::BadRequest("page and page_size are too large".into()));
  }
  Ok(())
}
