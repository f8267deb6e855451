//! Error types for `salon-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The country's name or code is already held by a row with a different
  /// (name, code) pair.
  #[error("country {name:?} ({code}) conflicts with an existing country")]
  DuplicateCountry { name: String, code: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
