//! Error type for `salon-ibge`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  /// The request failed in transport or came back with a non-success status.
  #[error("source unavailable: GET {url}: {reason}")]
  SourceUnavailable {
    url:    String,
    #[source]
    reason: Unavailable,
  },

  #[error("unexpected response body from {url}: {source}")]
  Decode {
    url:    String,
    #[source]
    source: reqwest::Error,
  },
}

/// Why a request produced no usable response.
#[derive(Debug, Error)]
pub enum Unavailable {
  /// DNS, connect, timeout, ...
  #[error(transparent)]
  Transport(reqwest::Error),

  #[error("server returned {0}")]
  Status(StatusCode),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
