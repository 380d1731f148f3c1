//! Filter editing and normalisation.
//!
//! [`FilterFields`] is the uncommitted editor state. [`build_filter`] turns it
//! into an [`ActiveFilter`] at submission time; nothing else can construct a
//! non-empty [`ActiveFilter`], so a present key always carries a non-blank
//! value.

use serde::{Deserialize, Serialize};

use crate::player::{Country, Position};

/// Page requested when a caller does not say otherwise.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used by the browser and by the listing endpoints by default.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ─── Editor state ────────────────────────────────────────────────────────────

/// Raw, uncommitted values of the search form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterFields {
  pub name:        String,
  /// Reserved: edited but never included in the built filter.
  pub team:        String,
  pub position:    Option<Position>,
  pub nationality: Option<Country>,
}

impl FilterFields {
  /// Reset every field to empty/unset.
  pub fn clear(&mut self) { *self = Self::default(); }
}

// ─── Active filter ───────────────────────────────────────────────────────────

/// The committed, normalised set of search constraints currently in effect.
///
/// An absent key means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ActiveFilter {
  name:        Option<String>,
  position:    Option<Position>,
  nationality: Option<u32>,
}

impl ActiveFilter {
  /// `true` when no constraint is set, i.e. the unfiltered listing applies.
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.position.is_none() && self.nationality.is_none()
  }

  pub fn name(&self) -> Option<&str> { self.name.as_deref() }

  pub fn position(&self) -> Option<Position> { self.position }

  pub fn nationality(&self) -> Option<u32> { self.nationality }

  /// Combine the filter with a page window into search parameters.
  pub fn search_params(&self, page: u32, page_size: u32) -> SearchParams {
    SearchParams {
      name: self.name.clone(),
      position: self.position,
      nationality: self.nationality,
      team: None,
      page,
      page_size,
    }
  }
}

/// Normalise the editor fields into an [`ActiveFilter`].
///
/// - `name` is trimmed and kept only if something remains.
/// - `position` is kept if one is selected.
/// - `nationality` is kept as the country id, and only if the selected entry
///   has a usable (present, non-zero) id.
/// - `team` is not carried over.
pub fn build_filter(fields: &FilterFields) -> ActiveFilter {
  let name = fields.name.trim();
  ActiveFilter {
    name:        (!name.is_empty()).then(|| name.to_owned()),
    position:    fields.position,
    nationality: fields.nationality.as_ref().and_then(Country::usable_id),
  }
}

// ─── Search parameters ───────────────────────────────────────────────────────

/// Parameters of the search capability; also the query string of
/// `GET /player`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
  /// Case-insensitive substring of the player's name.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub position:    Option<Position>,
  /// Country id.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub nationality: Option<u32>,
  /// Team id. Accepted by the search capability but never produced by
  /// [`build_filter`].
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub team:        Option<u32>,
  #[serde(default = "default_page")]
  pub page:        u32,
  #[serde(default = "default_page_size")]
  pub page_size:   u32,
}

fn default_page() -> u32 { DEFAULT_PAGE }

fn default_page_size() -> u32 { DEFAULT_PAGE_SIZE }
