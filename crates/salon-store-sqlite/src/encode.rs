//! Conversions between domain types and the plain-text representations stored
//! in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings in UTC.

use chrono::{DateTime, Utc};
use rusqlite::Row;
use salon_core::geo::{City, Country, State};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────
//
// Rows are read into these plain structs inside the connection closure and
// decoded afterwards, so decode errors surface as `Error` rather than
// `rusqlite::Error`.

pub const COUNTRY_COLUMNS: &str = "id, name, code, created_at, updated_at";

pub struct RawCountry {
  pub id:         i64,
  pub name:       String,
  pub code:       String,
  pub created_at: String,
  pub updated_at: String,
}

impl RawCountry {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      code:       row.get(2)?,
      created_at: row.get(3)?,
      updated_at: row.get(4)?,
    })
  }

  pub fn into_country(self) -> Result<Country> {
    Ok(Country {
      id:         self.id,
      name:       self.name,
      code:       self.code,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

pub const STATE_COLUMNS: &str =
  "id, name, abbreviation, region, country_id, created_at, updated_at";

pub struct RawState {
  pub id:           i64,
  pub name:         String,
  pub abbreviation: String,
  pub region:       String,
  pub country_id:   i64,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawState {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      name:         row.get(1)?,
      abbreviation: row.get(2)?,
      region:       row.get(3)?,
      country_id:   row.get(4)?,
      created_at:   row.get(5)?,
      updated_at:   row.get(6)?,
    })
  }

  pub fn into_state(self) -> Result<State> {
    Ok(State {
      id:           self.id,
      name:         self.name,
      abbreviation: self.abbreviation,
      region:       self.region,
      country_id:   self.country_id,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}

pub const CITY_COLUMNS: &str = "id, name, state_id, created_at, updated_at";

pub struct RawCity {
  pub id:         i64,
  pub name:       String,
  pub state_id:   i64,
  pub created_at: String,
  pub updated_at: String,
}

impl RawCity {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      state_id:   row.get(2)?,
      created_at: row.get(3)?,
      updated_at: row.get(4)?,
    })
  }

  pub fn into_city(self) -> Result<City> {
    Ok(City {
      id:         self.id,
      name:       self.name,
      state_id:   self.state_id,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
