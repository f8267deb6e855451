//! End-to-end runs of `GeoSync` against an in-memory `SqliteStore` and a
//! scripted source.

use std::collections::HashMap;

use salon_core::{
  geo::{CountrySeed, NewCity, NewCountry, SourceCity, SourceState},
  source::GeoSource,
  store::GeoStore,
};
use salon_store_sqlite::SqliteStore;

use crate::{GeoSync, SyncError, SyncPhase, SyncReport};

// ─── Fake source ─────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("registry unavailable: {0}")]
struct Unavailable(String);

/// Serves a fixed state list and per-state city lists. A missing state list
/// or a state absent from `cities` fails like an HTTP error would.
#[derive(Default)]
struct ScriptedSource {
  states: Option<Vec<SourceState>>,
  cities: HashMap<String, Vec<SourceCity>>,
}

impl ScriptedSource {
  fn brazil_excerpt() -> Self {
    Self::default()
      .with_state("Rio de Janeiro", "RJ", "Sudeste")
      .with_state("São Paulo", "SP", "Sudeste")
      .with_cities("RJ", &["Niterói", "Rio de Janeiro"])
      .with_cities("SP", &["Campinas", "Santos", "São Paulo"])
  }

  fn with_state(mut self, name: &str, abbreviation: &str, region: &str) -> Self {
    self.states.get_or_insert_with(Vec::new).push(SourceState {
      name:         name.into(),
      abbreviation: abbreviation.into(),
      region:       region.into(),
    });
    self
  }

  fn with_cities(mut self, abbreviation: &str, names: &[&str]) -> Self {
    self.cities.insert(
      abbreviation.into(),
      names.iter().map(|n| SourceCity { name: (*n).into() }).collect(),
    );
    self
  }

  fn failing_cities(mut self, abbreviation: &str) -> Self {
    self.cities.remove(abbreviation);
    self
  }
}

impl GeoSource for ScriptedSource {
  type Error = Unavailable;

  async fn fetch_states(&self) -> Result<Vec<SourceState>, Unavailable> {
    self
      .states
      .clone()
      .ok_or_else(|| Unavailable("GET /estados → 503".into()))
  }

  async fn fetch_cities(&self, abbreviation: &str) -> Result<Vec<SourceCity>, Unavailable> {
    self
      .cities
      .get(abbreviation)
      .cloned()
      .ok_or_else(|| Unavailable(format!("GET /estados/{abbreviation}/municipios → 503")))
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn run(store: &SqliteStore, source: &ScriptedSource) -> SyncReport {
  GeoSync::new(store, source, NewCountry::default()).run().await
}

/// (state count, city count) currently persisted.
async fn counts(store: &SqliteStore) -> (usize, usize) {
  let states = store.list_states().await.unwrap();
  let mut cities = 0;
  for s in &states {
    cities += store.list_cities(s.id).await.unwrap().len();
  }
  (states.len(), cities)
}

async fn city_names(store: &SqliteStore, abbreviation: &str) -> Vec<String> {
  let state = store
    .get_state_by_abbreviation(abbreviation)
    .await
    .unwrap()
    .unwrap();
  store
    .list_cities(state.id)
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.name)
    .collect()
}

// ─── Happy path ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn full_run_populates_hierarchy() {
  let s = store().await;
  let report = run(&s, &ScriptedSource::brazil_excerpt()).await;

  assert!(report.is_success(), "{report}");
  assert!(matches!(report.country, Some(CountrySeed::Created(_))));
  assert_eq!(report.states_fetched, 2);
  assert_eq!(report.states_inserted, 2);
  assert_eq!(report.cities_found, 5);
  assert_eq!(report.cities_inserted, 5);
  assert!(report.city_failures.is_empty());

  let brasil = s.get_country_by_code("BRA").await.unwrap().unwrap();
  let sp = s.get_state_by_abbreviation("SP").await.unwrap().unwrap();
  assert_eq!(sp.country_id, brasil.id);
  assert_eq!(sp.region, "Sudeste");
  assert_eq!(city_names(&s, "SP").await, ["Campinas", "Santos", "São Paulo"]);
}

#[tokio::test]
async fn rerun_is_idempotent() {
  let s = store().await;
  let source = ScriptedSource::brazil_excerpt();

  run(&s, &source).await;
  let after_first = counts(&s).await;

  let second = run(&s, &source).await;
  assert!(second.is_success());
  assert!(matches!(second.country, Some(CountrySeed::Existing(_))));
  assert_eq!(second.states_inserted, 0);
  assert_eq!(second.cities_found, 5);
  assert_eq!(second.cities_inserted, 0);
  assert_eq!(counts(&s).await, after_first);
  assert_eq!(after_first, (2, 5));
}

#[tokio::test]
async fn existing_country_is_reported_and_run_proceeds() {
  let s = store().await;
  s.get_or_create_country(NewCountry::default()).await.unwrap();

  let report = run(&s, &ScriptedSource::brazil_excerpt()).await;

  assert!(report.is_success());
  assert!(matches!(report.country, Some(CountrySeed::Existing(_))));
  assert!(report.to_string().contains("already exists"));
  assert_eq!(report.states_inserted, 2);
}

// ─── Conflict skipping ───────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_abbreviation_persists_one_state() {
  let s = store().await;
  let source = ScriptedSource::default()
    .with_state("São Paulo", "SP", "Sudeste")
    .with_state("Sao Paulo (legacy)", "SP", "Sudeste")
    .with_cities("SP", &["Campinas"]);

  let report = run(&s, &source).await;

  assert!(report.is_success());
  assert_eq!(report.states_fetched, 2);
  assert_eq!(report.states_inserted, 1);
  assert_eq!(s.list_states().await.unwrap().len(), 1);
}

#[tokio::test]
async fn existing_city_is_skipped() {
  let s = store().await;
  let source = ScriptedSource::default()
    .with_state("São Paulo", "SP", "Sudeste")
    .with_cities("SP", &["Campinas"]);

  // First run with no cities available, then seed Campinas by hand.
  let empty = ScriptedSource::default()
    .with_state("São Paulo", "SP", "Sudeste")
    .with_cities("SP", &[]);
  run(&s, &empty).await;
  let sp = s.get_state_by_abbreviation("SP").await.unwrap().unwrap();
  s.insert_cities(vec![NewCity { name: "Campinas".into(), state_id: sp.id }])
    .await
    .unwrap();

  let report = run(&s, &source).await;

  assert!(report.is_success());
  assert_eq!(report.cities_found, 1);
  assert_eq!(report.cities_inserted, 0);
  assert_eq!(city_names(&s, "SP").await, ["Campinas"]);
}

// ─── Failures ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn conflicting_country_aborts_before_states() {
  let s = store().await;
  s.get_or_create_country(NewCountry::new("Brasil", "BRZ"))
    .await
    .unwrap();

  let report = run(&s, &ScriptedSource::brazil_excerpt()).await;

  assert_eq!(report.phase(), SyncPhase::Aborted);
  assert_eq!(report.reached, SyncPhase::NotStarted);
  assert!(matches!(report.error, Some(SyncError::CountrySeed(_))));
  assert!(report.country.is_none());
  assert_eq!(counts(&s).await, (0, 0));
}

#[tokio::test]
async fn state_fetch_failure_writes_nothing() {
  let s = store().await;
  let source = ScriptedSource::default().with_cities("SP", &["Campinas"]);

  let report = run(&s, &source).await;

  assert_eq!(report.phase(), SyncPhase::Aborted);
  assert_eq!(report.reached, SyncPhase::CountrySeeded);
  assert!(matches!(report.error, Some(SyncError::FetchStates(_))));
  assert_eq!(counts(&s).await, (0, 0));
  assert!(report.to_string().contains("could not fetch states"));
}

#[tokio::test]
async fn city_fetch_failure_skips_only_that_state() {
  let s = store().await;
  let source = ScriptedSource::brazil_excerpt().failing_cities("RJ");

  let report = run(&s, &source).await;

  assert!(report.is_success());
  assert_eq!(report.city_failures.len(), 1);
  assert_eq!(report.city_failures[0].abbreviation, "RJ");
  assert_eq!(report.city_failures[0].state_name, "Rio de Janeiro");
  assert!(report.city_failures[0].message.contains("503"));
  assert_eq!(city_names(&s, "SP").await.len(), 3);
  assert!(city_names(&s, "RJ").await.is_empty());
}

#[tokio::test]
async fn rerun_fills_in_previously_skipped_state() {
  let s = store().await;

  run(&s, &ScriptedSource::brazil_excerpt().failing_cities("RJ")).await;
  assert!(city_names(&s, "RJ").await.is_empty());

  let report = run(&s, &ScriptedSource::brazil_excerpt()).await;

  assert!(report.is_success());
  assert_eq!(report.states_inserted, 0);
  assert_eq!(report.cities_inserted, 2);
  assert_eq!(city_names(&s, "RJ").await, ["Niterói", "Rio de Janeiro"]);
}

#[tokio::test]
async fn city_insert_failure_aborts_and_rolls_back() {
  let s = store().await;
  let too_long = "x".repeat(101);
  let source = ScriptedSource::default()
    .with_state("São Paulo", "SP", "Sudeste")
    .with_cities("SP", &["Campinas", too_long.as_str()]);

  let report = run(&s, &source).await;

  assert_eq!(report.phase(), SyncPhase::Aborted);
  assert_eq!(report.reached, SyncPhase::StatesImported);
  assert!(matches!(report.error, Some(SyncError::InsertCities(_))));
  assert_eq!(counts(&s).await, (1, 0));
}
