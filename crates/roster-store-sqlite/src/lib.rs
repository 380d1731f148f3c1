//! SQLite backend for the roster listing.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Implements
//! [`roster_core::source::PlayerSource`], so it can back the JSON API or be
//! browsed directly.

mod encode;
mod schema;
mod store;

pub mod error;
pub mod seed;

pub use error::{Error, Result};
pub use seed::{Seed, SeedCountry, SeedPlayer, SeedTeam};
pub use store::SqliteStore;
