//! Handler for `GET /nationality`.

use std::sync::Arc;

use axum::{Json, extract::State};
use roster_core::{player::Country, source::PlayerSource};

use crate::error::ApiError;

/// `GET /nationality` — every country, for the nationality picker.
pub async fn list<S>(State(source): State<Arc<S>>) -> Result<Json<Vec<Country>>, ApiError>
where
  S: PlayerSource,
{
  let countries = source.countries().await.map_err(ApiError::from_source)?;
  Ok(Json(countries))
}
