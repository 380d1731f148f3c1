//! Async HTTP client for the roster listing API.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use roster_core::{
  player::{Country, Player},
  query::SearchParams,
  source::PlayerSource,
};
use serde::Deserialize;
use thiserror::Error;

/// Connection settings for the listing API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub timeout:  Duration,
}

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("failed to build HTTP client: {0}")]
  Build(#[source] reqwest::Error),

  #[error("GET {path} failed: {source}")]
  Request {
    path:   &'static str,
    #[source]
    source: reqwest::Error,
  },

  #[error("GET {path} → {status}")]
  Status { path: &'static str, status: StatusCode },

  #[error("deserialising {path}: {source}")]
  Decode {
    path:   &'static str,
    #[source]
    source: reqwest::Error,
  },
}

/// Body shapes the listing endpoints are known to answer with.
///
/// Some deployments answer an empty search with an object wrapping the rows
/// instead of a bare array. Any other object is malformed.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PlayersBody {
  Rows(Vec<Player>),
  Wrapped { results: Vec<Player> },
}

impl PlayersBody {
  fn into_players(self) -> Vec<Player> {
    match self {
      PlayersBody::Rows(rows) | PlayersBody::Wrapped { results: rows } => rows,
    }
  }
}

/// Async HTTP client for the roster JSON API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self, ClientError> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(ClientError::Build)?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  async fn get_players(
    &self,
    path: &'static str,
    query: &(impl serde::Serialize + ?Sized),
  ) -> Result<Option<Vec<Player>>, ClientError> {
    let resp = self
      .client
      .get(self.url(path))
      .query(query)
      .send()
      .await
      .map_err(|source| ClientError::Request { path, source })?;

    // Some deployments answer an empty listing with 404.
    if resp.status() == StatusCode::NOT_FOUND && path == "/players" {
      return Ok(None);
    }
    if !resp.status().is_success() {
      return Err(ClientError::Status { path, status: resp.status() });
    }

    let body: Option<PlayersBody> = resp
      .json()
      .await
      .map_err(|source| ClientError::Decode { path, source })?;
    Ok(body.map(PlayersBody::into_players))
  }
}

impl PlayerSource for ApiClient {
  type Error = ClientError;

  /// `GET /players?page=<n>&page_size=<n>`
  async fn list(&self, page: u32, page_size: u32) -> Result<Option<Vec<Player>>, ClientError> {
    self
      .get_players("/players", &[("page", page), ("page_size", page_size)])
      .await
  }

  /// `GET /player?<params>`
  async fn search(&self, params: &SearchParams) -> Result<Option<Vec<Player>>, ClientError> {
    self.get_players("/player", params).await
  }

  /// `GET /nationality`
  async fn countries(&self) -> Result<Vec<Country>, ClientError> {
    const PATH: &str = "/nationality";
    let resp = self
      .client
      .get(self.url(PATH))
      .send()
      .await
      .map_err(|source| ClientError::Request { path: PATH, source })?;

    if !resp.status().is_success() {
      return Err(ClientError::Status { path: PATH, status: resp.status() });
    }
    resp
      .json()
      .await
      .map_err(|source| ClientError::Decode { path: PATH, source })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn decode(json: &str) -> Option<Vec<Player>> {
    serde_json::from_str::<Option<PlayersBody>>(json)
      .unwrap()
      .map(PlayersBody::into_players)
  }

  #[test]
  fn bare_array_body() {
    let rows = decode(
      r#"[{"player_id":1,"playername":"Ana","teamname":"Rovers",
           "position":"MID","nationality":"Brazil","age":24}]"#,
    )
    .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].playername, "Ana");
  }

  #[test]
  fn wrapped_empty_body() {
    let rows = decode(r#"{"message":"No players found","results":[]}"#).unwrap();
    assert!(rows.is_empty());
  }

  #[test]
  fn malformed_object_is_an_error() {
    let body = serde_json::from_str::<Option<PlayersBody>>(r#"{"detail":"Internal error"}"#);
    assert!(body.is_err());
  }

  #[test]
  fn null_body_is_missing() {
    assert!(decode("null").is_none());
  }

  #[test]
  fn url_joins_without_double_slash() {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://localhost:8000/".into(),
      timeout:  Duration::from_secs(1),
    })
    .unwrap();
    assert_eq!(client.url("/players"), "http://localhost:8000/players");
  }
}
