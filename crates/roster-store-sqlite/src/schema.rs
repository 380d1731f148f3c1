//! SQL schema for the roster SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout so later migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS countries (
    country_id   INTEGER PRIMARY KEY,
    countryname  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS teams (
    team_id   INTEGER PRIMARY KEY,
    teamname  TEXT NOT NULL
);

-- team and nationality are optional; listings LEFT JOIN them.
CREATE TABLE IF NOT EXISTS players (
    player_id       INTEGER PRIMARY KEY,
    playername      TEXT NOT NULL,
    team_id         INTEGER REFERENCES teams(team_id),
    position        TEXT NOT NULL,   -- 'GK' | 'MID' | 'DEF' | 'FWD' in practice
    nationality_id  INTEGER REFERENCES countries(country_id),
    age             INTEGER
);

CREATE INDEX IF NOT EXISTS players_name_idx        ON players(playername);
CREATE INDEX IF NOT EXISTS players_team_idx        ON players(team_id);
CREATE INDEX IF NOT EXISTS players_nationality_idx ON players(nationality_id);

PRAGMA user_version = 1;
";
