//! The `GeoStore` trait.
//!
//! Implemented by storage backends (e.g. `salon-store-sqlite`). The sync
//! orchestrator depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::geo::{City, Country, CountrySeed, NewCity, NewCountry, NewState, State};

/// Persistence boundary for the geo hierarchy.
///
/// Bulk inserts are conflict-ignoring: a candidate whose natural key already
/// exists (in the store or earlier in the same batch) is skipped, never
/// reported as an error. Each bulk insert is applied inside a single write
/// transaction, so a non-constraint failure leaves the store untouched.
pub trait GeoStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Countries ─────────────────────────────────────────────────────────

  /// Return the country matching both `name` and `code`, creating it if no
  /// such row exists.
  ///
  /// Fails with a duplicate-country error if only one of the two keys is
  /// already taken.
  fn get_or_create_country(
    &self,
    country: NewCountry,
  ) -> impl Future<Output = Result<CountrySeed, Self::Error>> + Send + '_;

  fn get_country_by_code<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + 'a;

  // ── States ────────────────────────────────────────────────────────────

  /// Bulk-insert states, returning only the rows that were actually created.
  fn insert_states(
    &self,
    states: Vec<NewState>,
  ) -> impl Future<Output = Result<Vec<State>, Self::Error>> + Send + '_;

  /// All persisted states, ordered by name.
  fn list_states(
    &self,
  ) -> impl Future<Output = Result<Vec<State>, Self::Error>> + Send + '_;

  fn get_state_by_abbreviation<'a>(
    &'a self,
    abbreviation: &'a str,
  ) -> impl Future<Output = Result<Option<State>, Self::Error>> + Send + 'a;

  // ── Cities ────────────────────────────────────────────────────────────

  /// Bulk-insert cities, returning only the rows that were actually created.
  fn insert_cities(
    &self,
    cities: Vec<NewCity>,
  ) -> impl Future<Output = Result<Vec<City>, Self::Error>> + Send + '_;

  /// Cities of one state, ordered by name.
  fn list_cities(
    &self,
    state_id: i64,
  ) -> impl Future<Output = Result<Vec<City>, Self::Error>> + Send + '_;
}
