//! Errors that abort a geo sync run.

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A failure that ends the run. Per-state city fetch failures are not
/// represented here; they are collected in the report instead.
#[derive(Debug, Error)]
pub enum SyncError {
  #[error("could not seed country: {0}")]
  CountrySeed(#[source] BoxError),

  #[error("could not fetch states: {0}")]
  FetchStates(#[source] BoxError),

  #[error("could not insert states: {0}")]
  InsertStates(#[source] BoxError),

  #[error("could not list states: {0}")]
  ListStates(#[source] BoxError),

  #[error("could not insert cities: {0}")]
  InsertCities(#[source] BoxError),
}
