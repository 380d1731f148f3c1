//! Player and country records as served by the listing endpoints.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// ─── Position ────────────────────────────────────────────────────────────────

/// The closed set of positions a search can be narrowed to.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Position {
  Gk,
  Mid,
  Def,
  Fwd,
}

// ─── Player ──────────────────────────────────────────────────────────────────

/// One row of the roster.
///
/// `teamname`, `nationality` and `age` come from outer joins on the server
/// side and may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
  /// Row key.
  pub player_id:   i64,
  pub playername:  String,
  #[serde(default)]
  pub teamname:    Option<String>,
  pub position:    String,
  /// Display name of the player's country, e.g. `"Brazil"`.
  #[serde(default)]
  pub nationality: Option<String>,
  #[serde(default)]
  pub age:         Option<u32>,
}

// ─── Country ─────────────────────────────────────────────────────────────────

/// An entry of the nationality listing; what the nationality picker selects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
  /// `None` (or zero) means the entry cannot be used as a search constraint.
  #[serde(default)]
  pub country_id:  Option<u32>,
  pub countryname: String,
}

impl Country {
  /// The id to constrain a search by, if this entry carries a usable one.
  pub fn usable_id(&self) -> Option<u32> { self.country_id.filter(|id| *id != 0) }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn position_wire_names_are_uppercase() {
    let names: Vec<String> = Position::iter().map(|p| p.to_string()).collect();
    assert_eq!(names, ["GK", "MID", "DEF", "FWD"]);
    assert_eq!(Position::from_str("DEF").unwrap(), Position::Def);
    assert_eq!(serde_json::to_string(&Position::Fwd).unwrap(), "\"FWD\"");
  }

  #[test]
  fn player_tolerates_null_join_columns() {
    let json = r#"{
      "player_id": 7,
      "playername": "Ada Smith",
      "teamname": null,
      "position": "MID",
      "nationality": null,
      "age": null
    }"#;
    let player: Player = serde_json::from_str(json).unwrap();
    assert_eq!(player.player_id, 7);
    assert!(player.teamname.is_none());
    assert!(player.age.is_none());
  }

  #[test]
  fn country_without_id_is_not_usable() {
    let missing = Country { country_id: None, countryname: "Nowhere".into() };
    let zero = Country { country_id: Some(0), countryname: "Zero".into() };
    let real = Country { country_id: Some(44), countryname: "Wales".into() };
    assert_eq!(missing.usable_id(), None);
    assert_eq!(zero.usable_id(), None);
    assert_eq!(real.usable_id(), Some(44));
  }
}
