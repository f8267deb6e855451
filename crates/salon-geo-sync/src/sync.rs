//! [`GeoSync`] — the three-phase country → state → city population.

use salon_core::{
  geo::{CountrySeed, NewCity, NewCountry, NewState},
  source::GeoSource,
  store::GeoStore,
};

use crate::{
  error::SyncError,
  report::{CityFetchFailure, SyncPhase, SyncReport},
};

/// Drives one sync run over an injected store and source.
///
/// Network calls are made between store calls, never inside one, so no write
/// transaction is held open across I/O.
pub struct GeoSync<'a, S, C> {
  store:   &'a S,
  source:  &'a C,
  country: NewCountry,
}

impl<'a, S, C> GeoSync<'a, S, C>
where
  S: GeoStore,
  C: GeoSource,
{
  pub fn new(store: &'a S, source: &'a C, country: NewCountry) -> Self {
    Self { store, source, country }
  }

  /// Run all phases, stopping at the first fatal error.
  ///
  /// Always returns a report; inspect [`SyncReport::phase`] or
  /// [`SyncReport::is_success`] to tell how far it got.
  pub async fn run(&self) -> SyncReport {
    tracing::info!("starting geo population");
    let mut report = SyncReport::new();

    // ── Phase 1: country ──────────────────────────────────────────────────
    let seed = match self.store.get_or_create_country(self.country.clone()).await {
      Ok(seed) => seed,
      Err(e) => {
        tracing::error!(
          country = %self.country.name,
          code = %self.country.code,
          error = %e,
          "could not seed country"
        );
        return report.abort(SyncError::CountrySeed(Box::new(e)));
      }
    };
    match &seed {
      CountrySeed::Created(c) => tracing::info!(country = %c.name, "added country"),
      CountrySeed::Existing(c) => {
        tracing::warn!(country = %c.name, "country already exists, skipping")
      }
    }
    let country_id = seed.country().id;
    report.country = Some(seed);
    report.reached = SyncPhase::CountrySeeded;

    // ── Phase 2: states ───────────────────────────────────────────────────
    let fetched = match self.source.fetch_states().await {
      Ok(states) => states,
      Err(e) => {
        tracing::error!(error = %e, "could not fetch states");
        return report.abort(SyncError::FetchStates(Box::new(e)));
      }
    };
    report.states_fetched = fetched.len();

    let candidates: Vec<NewState> = fetched
      .into_iter()
      .map(|s| s.into_new_state(country_id))
      .collect();
    match self.store.insert_states(candidates).await {
      Ok(created) => report.states_inserted = created.len(),
      Err(e) => {
        tracing::error!(error = %e, "could not insert states");
        return report.abort(SyncError::InsertStates(Box::new(e)));
      }
    }
    tracing::info!(
      fetched = report.states_fetched,
      inserted = report.states_inserted,
      "states imported"
    );
    report.reached = SyncPhase::StatesImported;

    // ── Phase 3: cities ───────────────────────────────────────────────────
    // Every persisted state is visited, not only the ones inserted above, so
    // a rerun fills in cities missed by an earlier partial run.
    tracing::info!("populating cities, this may take a few minutes");
    let states = match self.store.list_states().await {
      Ok(states) => states,
      Err(e) => {
        tracing::error!(error = %e, "could not list states");
        return report.abort(SyncError::ListStates(Box::new(e)));
      }
    };

    let mut candidates: Vec<NewCity> = Vec::new();
    for state in &states {
      match self.source.fetch_cities(&state.abbreviation).await {
        Ok(cities) => {
          tracing::debug!(state = %state.abbreviation, count = cities.len(), "fetched cities");
          candidates.extend(cities.into_iter().map(|c| c.into_new_city(state.id)));
        }
        Err(e) => {
          tracing::warn!(state = %state.abbreviation, error = %e, "could not fetch cities, skipping state");
          report.city_failures.push(CityFetchFailure {
            state_name:   state.name.clone(),
            abbreviation: state.abbreviation.clone(),
            message:      e.to_string(),
          });
        }
      }
    }
    report.cities_found = candidates.len();
    tracing::info!(count = report.cities_found, "found cities to populate");

    match self.store.insert_cities(candidates).await {
      Ok(created) => report.cities_inserted = created.len(),
      Err(e) => {
        tracing::error!(error = %e, "could not insert cities");
        return report.abort(SyncError::InsertCities(Box::new(e)));
      }
    }
    tracing::info!(
      inserted = report.cities_inserted,
      skipped_states = report.city_failures.len(),
      "cities imported"
    );
    report.reached = SyncPhase::CitiesImported;

    report
  }
}
