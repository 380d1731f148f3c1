//! JSON fixture format for populating a store.
//!
//! ```json
//! {
//!   "countries": [{ "country_id": 1, "countryname": "Brazil" }],
//!   "teams":     [{ "team_id": 1, "teamname": "Rovers" }],
//!   "players":   [{ "playername": "Ana Souza", "team_id": 1,
//!                  "position": "MID", "nationality_id": 1, "age": 24 }]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::Result;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
  #[serde(default)]
  pub countries: Vec<SeedCountry>,
  #[serde(default)]
  pub teams:     Vec<SeedTeam>,
  #[serde(default)]
  pub players:   Vec<SeedPlayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedCountry {
  pub country_id:  u32,
  pub countryname: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedTeam {
  pub team_id:  u32,
  pub teamname: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedPlayer {
  /// Assigned by the store when omitted.
  #[serde(default)]
  pub player_id:      Option<i64>,
  pub playername:     String,
  #[serde(default)]
  pub team_id:        Option<u32>,
  pub position:       String,
  #[serde(default)]
  pub nationality_id: Option<u32>,
  #[serde(default)]
  pub age:            Option<u32>,
}

impl Seed {
  /// Read and parse a fixture file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
  }
}
