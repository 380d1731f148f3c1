//! [`SqliteStore`] — the SQLite implementation of [`PlayerSource`].

use std::path::Path;

use roster_core::{
  player::{Country, Player},
  query::SearchParams,
  source::PlayerSource,
};

use crate::{
  Result,
  encode::{PLAYER_COLUMNS, PLAYER_JOINS, decode_player, encode_contains, encode_window},
  schema::SCHEMA,
  seed::Seed,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A player roster backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert every record of `seed` in one transaction.
  ///
  /// Countries and teams are upserted by id; players without an id get a
  /// fresh one. Returns the number of players inserted.
  pub async fn import(&self, seed: Seed) -> Result<usize> {
    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        for c in &seed.countries {
          tx.execute(
            "INSERT INTO countries (country_id, countryname) VALUES (?1, ?2)
             ON CONFLICT(country_id) DO UPDATE SET countryname = excluded.countryname",
            rusqlite::params![c.country_id, c.countryname],
          )?;
        }

        for t in &seed.teams {
          tx.execute(
            "INSERT INTO teams (team_id, teamname) VALUES (?1, ?2)
             ON CONFLICT(team_id) DO UPDATE SET teamname = excluded.teamname",
            rusqlite::params![t.team_id, t.teamname],
          )?;
        }

        for p in &seed.players {
          tx.execute(
            "INSERT INTO players (
               player_id, playername, team_id, position, nationality_id, age
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
              p.player_id,
              p.playername,
              p.team_id,
              p.position,
              p.nationality_id,
              p.age,
            ],
          )?;
        }

        tx.commit()?;
        Ok(seed.players.len())
      })
      .await?;

    tracing::info!(players = inserted, "imported seed data");
    Ok(inserted)
  }

  async fn query_players(
    &self,
    sql: String,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<Vec<Player>> {
    let players = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), decode_player)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(players)
  }
}

// ─── PlayerSource impl ───────────────────────────────────────────────────────

impl PlayerSource for SqliteStore {
  type Error = crate::Error;

  async fn list(&self, page: u32, page_size: u32) -> Result<Option<Vec<Player>>> {
    let (limit, offset) = encode_window(page, page_size)?;
    let sql = format!(
      "SELECT {PLAYER_COLUMNS}
       {PLAYER_JOINS}
       ORDER BY p.player_id
       LIMIT ?1 OFFSET ?2"
    );
    let players = self
      .query_players(sql, vec![limit.into(), offset.into()])
      .await?;
    Ok(Some(players))
  }

  async fn search(&self, params: &SearchParams) -> Result<Option<Vec<Player>>> {
    let (limit, offset) = encode_window(params.page, params.page_size)?;
    let name_pattern = encode_contains(params.name.as_deref());
    let position_pattern = params
      .position
      .map(|p| p.to_string())
      .and_then(|p| encode_contains(Some(&p)));

    let sql = format!(
      "SELECT {PLAYER_COLUMNS}
       {PLAYER_JOINS}
       WHERE (?1 IS NULL OR LOWER(p.playername) LIKE ?1 ESCAPE '\\')
         AND (?2 IS NULL OR p.team_id = ?2)
         AND (?3 IS NULL OR LOWER(p.position) LIKE ?3 ESCAPE '\\')
         AND (?4 IS NULL OR p.nationality_id = ?4)
       ORDER BY p.playername, p.player_id
       LIMIT ?5 OFFSET ?6"
    );
    let values: Vec<rusqlite::types::Value> = vec![
      name_pattern.into(),
      params.team.map(i64::from).into(),
      position_pattern.into(),
      params.nationality.map(i64::from).into(),
      limit.into(),
      offset.into(),
    ];

    let players = self.query_players(sql, values).await?;
    Ok(Some(players))
  }

  async fn countries(&self) -> Result<Vec<Country>> {
    let countries = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT country_id, countryname FROM countries ORDER BY countryname")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Country {
              country_id:  row.get(0)?,
              countryname: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(countries)
  }
}
