//! Fetch requests, their outcomes, and the async driver that runs them.

use thiserror::Error;

use crate::{
  player::Player,
  query::SearchParams,
  source::PlayerSource,
};

// ─── Tokens ──────────────────────────────────────────────────────────────────

/// Counter bumped on every explicit submit or clear.
///
/// Part of the fetch key, so re-submitting an identical filter still changes
/// the key and forces a refetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestEpoch(u64);

impl RequestEpoch {
  pub fn get(self) -> u64 { self.0 }

  pub(crate) fn bump(&mut self) { self.0 += 1; }
}

/// Identity of one issued fetch. Strictly increasing in issuance order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
  pub fn get(self) -> u64 { self.0 }

  pub(crate) fn first() -> Self { Self(1) }

  pub(crate) fn next(self) -> Self { Self(self.0 + 1) }
}

// ─── Requests and outcomes ───────────────────────────────────────────────────

/// Which capability a fetch uses, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchQuery {
  List { page: u32, page_size: u32 },
  Search(SearchParams),
}

/// A fetch the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
  pub token: RequestToken,
  pub query: FetchQuery,
}

/// The single error kind a fetch can end in. Causes are logged, not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FetchError {
  #[error("Error fetching players.")]
  FetchFailed,
}

/// The result of running a [`FetchRequest`], tagged with its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutcome {
  pub token:  RequestToken,
  pub result: Result<Vec<Player>, FetchError>,
}

// ─── Driver ──────────────────────────────────────────────────────────────────

/// Run `request` against `source`.
///
/// A missing body becomes an empty page. Any error from the source is logged
/// with its detail and reported as [`FetchError::FetchFailed`].
pub async fn execute<S: PlayerSource>(
  source: &S,
  request: FetchRequest,
) -> FetchOutcome {
  let FetchRequest { token, query } = request;

  let result = match &query {
    FetchQuery::List { page, page_size } => {
      tracing::debug!(token = token.get(), page, page_size, "fetching players");
      source.list(*page, *page_size).await
    }
    FetchQuery::Search(params) => {
      tracing::debug!(token = token.get(), ?params, "searching players");
      source.search(params).await
    }
  };

  let result = match result {
    Ok(players) => {
      let players = players.unwrap_or_default();
      tracing::debug!(token = token.get(), count = players.len(), "fetched players");
      Ok(players)
    }
    Err(e) => {
      tracing::error!(token = token.get(), ?query, error = %e, "fetching players failed");
      Err(FetchError::FetchFailed)
    }
  };

  FetchOutcome { token, result }
}
