//! The value returned by a sync run.
//!
//! The orchestrator never writes to the console itself; callers render the
//! report (see its [`Display`](std::fmt::Display) impl) however they like.

use std::fmt;

use salon_core::geo::CountrySeed;

use crate::error::SyncError;

/// Progress through the three phases. `CitiesImported` is the only success
/// terminal. A run can abort before country seeding, or after it while
/// importing states or cities; it never resumes, a rerun starts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
  NotStarted,
  CountrySeeded,
  StatesImported,
  CitiesImported,
  Aborted,
}

/// A state whose municipality list could not be fetched. Its cities were
/// skipped for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityFetchFailure {
  pub state_name:   String,
  pub abbreviation: String,
  pub message:      String,
}

#[derive(Debug)]
pub struct SyncReport {
  /// Last phase that completed, regardless of a later abort.
  pub reached:         SyncPhase,
  pub country:         Option<CountrySeed>,
  /// States returned by the source.
  pub states_fetched:  usize,
  /// States newly written to the store.
  pub states_inserted: usize,
  /// City candidates gathered across all states.
  pub cities_found:    usize,
  /// Cities newly written to the store.
  pub cities_inserted: usize,
  pub city_failures:   Vec<CityFetchFailure>,
  pub error:           Option<SyncError>,
}

impl SyncReport {
  pub(crate) fn new() -> Self {
    Self {
      reached:         SyncPhase::NotStarted,
      country:         None,
      states_fetched:  0,
      states_inserted: 0,
      cities_found:    0,
      cities_inserted: 0,
      city_failures:   Vec::new(),
      error:           None,
    }
  }

  pub(crate) fn abort(mut self, error: SyncError) -> Self {
    self.error = Some(error);
    self
  }

  /// Current state of the run: `Aborted` if an error ended it, otherwise the
  /// last phase reached.
  pub fn phase(&self) -> SyncPhase {
    if self.error.is_some() { SyncPhase::Aborted } else { self.reached }
  }

  pub fn is_success(&self) -> bool { self.phase() == SyncPhase::CitiesImported }
}

impl fmt::Display for SyncReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.country {
      Some(CountrySeed::Created(c)) => {
        writeln!(f, "Added country: {} ({})", c.name, c.code)?
      }
      Some(CountrySeed::Existing(c)) => {
        writeln!(f, "Country {} ({}) already exists, skipping", c.name, c.code)?
      }
      None => {}
    }

    if matches!(
      self.reached,
      SyncPhase::StatesImported | SyncPhase::CitiesImported
    ) {
      writeln!(
        f,
        "Added {} new states ({} fetched)",
        self.states_inserted, self.states_fetched
      )?;
    }

    for failure in &self.city_failures {
      writeln!(
        f,
        "Error fetching cities for {} ({}): {}",
        failure.state_name, failure.abbreviation, failure.message
      )?;
    }

    if self.reached == SyncPhase::CitiesImported {
      writeln!(f, "Found {} cities to populate", self.cities_found)?;
      writeln!(f, "Added {} new cities", self.cities_inserted)?;
    }

    match &self.error {
      Some(e) => write!(f, "Geo population aborted: {e}"),
      None if self.city_failures.is_empty() => {
        write!(f, "Geo population finished successfully")
      }
      None => write!(
        f,
        "Geo population finished; {} state(s) skipped",
        self.city_failures.len()
      ),
    }
  }
}
