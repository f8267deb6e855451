//! The `GeoSource` trait: a remote registry of states and municipalities.

use std::future::Future;

use crate::geo::{SourceCity, SourceState};

/// A read-only external registry of geo reference data.
///
/// Each call is a single best-effort request; implementations do not retry.
pub trait GeoSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// The full list of states, ordered by name.
  fn fetch_states(
    &self,
  ) -> impl Future<Output = Result<Vec<SourceState>, Self::Error>> + Send + '_;

  /// The municipalities of the state with the given abbreviation.
  fn fetch_cities<'a>(
    &'a self,
    abbreviation: &'a str,
  ) -> impl Future<Output = Result<Vec<SourceCity>, Self::Error>> + Send + 'a;
}
