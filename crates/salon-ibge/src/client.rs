//! [`IbgeClient`] — async client for the two localities endpoints the geo
//! sync needs.

use std::time::Duration;

use reqwest::Client;
use salon_core::{
  geo::{SourceCity, SourceState},
  source::GeoSource,
};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{Error, Result, error::Unavailable};

pub const DEFAULT_BASE_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";

/// Connection settings for the IBGE API.
#[derive(Debug, Clone)]
pub struct IbgeConfig {
  pub base_url: String,
  pub timeout:  Duration,
}

impl Default for IbgeConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      timeout:  Duration::from_secs(30),
    }
  }
}

/// Async HTTP client for the IBGE localities API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based. Every call
/// issues exactly one request; there is no retry or caching.
#[derive(Clone)]
pub struct IbgeClient {
  client: Client,
  config: IbgeConfig,
}

// ─── Wire shapes ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WireRegion {
  nome: String,
}

#[derive(Deserialize)]
struct WireState {
  nome:   String,
  sigla:  String,
  regiao: WireRegion,
}

impl From<WireState> for SourceState {
  fn from(w: WireState) -> Self {
    SourceState {
      name:         w.nome,
      abbreviation: w.sigla,
      region:       w.regiao.nome,
    }
  }
}

#[derive(Deserialize)]
struct WireCity {
  nome: String,
}

impl From<WireCity> for SourceCity {
  fn from(w: WireCity) -> Self { SourceCity { name: w.nome } }
}

// ─── Client ──────────────────────────────────────────────────────────────────

impl IbgeClient {
  pub fn new(config: IbgeConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(Error::Client)?;
    Ok(Self { client, config })
  }

  pub fn base_url(&self) -> &str { &self.config.base_url }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
    tracing::debug!(%url, "GET");

    let resp = self
      .client
      .get(&url)
      .send()
      .await
      .map_err(|e| Error::SourceUnavailable {
        url:    url.clone(),
        reason: Unavailable::Transport(e),
      })?;

    let status = resp.status();
    if !status.is_success() {
      return Err(Error::SourceUnavailable { url, reason: Unavailable::Status(status) });
    }

    resp
      .json()
      .await
      .map_err(|source| Error::Decode { url, source })
  }
}

impl GeoSource for IbgeClient {
  type Error = Error;

  /// `GET /estados?orderBy=nome`
  async fn fetch_states(&self) -> Result<Vec<SourceState>> {
    let states: Vec<WireState> =
      self.get_json(self.url("/estados?orderBy=nome")).await?;
    Ok(states.into_iter().map(SourceState::from).collect())
  }

  /// `GET /estados/{sigla}/municipios`
  async fn fetch_cities(&self, abbreviation: &str) -> Result<Vec<SourceCity>> {
    let cities: Vec<WireCity> = self
      .get_json(self.url(&format!("/estados/{abbreviation}/municipios")))
      .await?;
    Ok(cities.into_iter().map(SourceCity::from).collect())
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
