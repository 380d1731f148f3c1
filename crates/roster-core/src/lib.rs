//! Core types and the paging state machine for the roster browser.
//!
//! This crate is deliberately free of HTTP, database and terminal
//! dependencies. The data source is abstracted behind
//! [`source::PlayerSource`]; the controller in [`controller`] never performs
//! I/O itself and instead hands out [`fetch::FetchRequest`]s for the caller to
//! run.

pub mod controller;
pub mod error;
pub mod fetch;
pub mod page;
pub mod player;
pub mod query;
pub mod source;

pub use controller::PageFetchController;
pub use error::{Error, Result};
