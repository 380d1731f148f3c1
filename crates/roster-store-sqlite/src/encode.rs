//! Conversions between query parameters / rows and their SQLite
//! representations.

use roster_core::player::Player;

use crate::{Error, Result};

// ─── Paging ──────────────────────────────────────────────────────────────────

/// `(LIMIT, OFFSET)` for a 1-based `page` of `page_size` rows.
pub fn encode_window(page: u32, page_size: u32) -> Result<(i64, i64)> {
  if page == 0 {
    return Err(Error::ZeroPage);
  }
  let limit = i64::from(page_size);
  let offset = i64::from(page - 1)
    .checked_mul(limit)
    .ok_or(Error::WindowTooLarge { page, page_size })?;
  Ok((limit, offset))
}

// ─── LIKE patterns ───────────────────────────────────────────────────────────

/// Lower-cased `%term%` pattern with LIKE wildcards in `term` escaped by `\`.
///
/// Blank terms yield `None` (no constraint).
pub fn encode_contains(term: Option<&str>) -> Option<String> {
  let term = term?.trim();
  if term.is_empty() {
    return None;
  }
  let mut pattern = String::with_capacity(term.len() + 2);
  pattern.push('%');
  for c in term.to_lowercase().chars() {
    if matches!(c, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(c);
  }
  pattern.push('%');
  Some(pattern)
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Column list shared by the listing and search queries; read by
/// [`decode_player`].
pub const PLAYER_COLUMNS: &str = "p.player_id, p.playername, t.teamname, p.position, \
                                  c.countryname AS nationality, p.age";

/// Joins shared by the listing and search queries.
pub const PLAYER_JOINS: &str = "FROM players p
   LEFT JOIN teams t     ON p.team_id = t.team_id
   LEFT JOIN countries c ON p.nationality_id = c.country_id";

pub fn decode_player(row: &rusqlite::Row<'_>) -> rusqlite::Result<Player> {
  Ok(Player {
    player_id:   row.get(0)?,
    playername:  row.get(1)?,
    teamname:    row.get(2)?,
    position:    row.get(3)?,
    nationality: row.get(4)?,
    age:         row.get(5)?,
  })
}
