//! Geo reference entities: country, state and city.
//!
//! Rows are identified by natural keys (country code, state abbreviation,
//! city name within a state). The sync process only ever inserts them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Country ─────────────────────────────────────────────────────────────────

/// A persisted country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
  pub id:         i64,
  pub name:       String,
  /// Three-letter code, e.g. `BRA`.
  pub code:       String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Natural key used to fetch-or-create a [`Country`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCountry {
  pub name: String,
  pub code: String,
}

impl NewCountry {
  pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
    Self { name: name.into(), code: code.into() }
  }
}

impl Default for NewCountry {
  fn default() -> Self { Self::new("Brasil", "BRA") }
}

/// Outcome of a fetch-or-create on a country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountrySeed {
  Created(Country),
  Existing(Country),
}

impl CountrySeed {
  pub fn country(&self) -> &Country {
    match self {
      CountrySeed::Created(c) | CountrySeed::Existing(c) => c,
    }
  }

  pub fn into_country(self) -> Country {
    match self {
      CountrySeed::Created(c) | CountrySeed::Existing(c) => c,
    }
  }

  pub fn was_created(&self) -> bool { matches!(self, CountrySeed::Created(_)) }
}

// ─── State ───────────────────────────────────────────────────────────────────

/// A persisted state (unidade federativa).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
  pub id:           i64,
  pub name:         String,
  /// Two-letter abbreviation; the join key to the external registry.
  pub abbreviation: String,
  pub region:       String,
  pub country_id:   i64,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

/// Candidate row for a bulk state insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewState {
  pub name:         String,
  pub abbreviation: String,
  pub region:       String,
  pub country_id:   i64,
}

// ─── City ────────────────────────────────────────────────────────────────────

/// A persisted city (município). Unique per `(name, state_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
  pub id:         i64,
  pub name:       String,
  pub state_id:   i64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Candidate row for a bulk city insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCity {
  pub name:     String,
  pub state_id: i64,
}

// ─── Source records ──────────────────────────────────────────────────────────

/// A state as listed by an external geo source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceState {
  pub name:         String,
  pub abbreviation: String,
  pub region:       String,
}

impl SourceState {
  /// Attach the record to a persisted country, producing an insert candidate.
  pub fn into_new_state(self, country_id: i64) -> NewState {
    NewState {
      name: self.name,
      abbreviation: self.abbreviation,
      region: self.region,
      country_id,
    }
  }
}

/// A municipality as listed by an external geo source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCity {
  pub name: String,
}

impl SourceCity {
  pub fn into_new_city(self, state_id: i64) -> NewCity {
    NewCity { name: self.name, state_id }
  }
}
