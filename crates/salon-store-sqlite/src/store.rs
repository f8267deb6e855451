//! [`SqliteStore`] — the SQLite implementation of [`GeoStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{ErrorCode, OptionalExtension as _};
use salon_core::{
  geo::{City, Country, CountrySeed, NewCity, NewCountry, NewState, State},
  store::GeoStore,
};

use crate::{
  encode::{
    encode_dt, RawCity, RawCountry, RawState, CITY_COLUMNS, COUNTRY_COLUMNS,
    STATE_COLUMNS,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A geo store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

/// What happened inside the country fetch-or-create transaction.
enum CountryRow {
  Existing(RawCountry),
  Created(RawCountry),
  Conflict,
}

/// A UNIQUE constraint failure. CHECK, NOT NULL and foreign-key failures share
/// the primary code, so the extended code is what tells them apart.
fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(err, _)
      if err.code == ErrorCode::ConstraintViolation
        && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── GeoStore impl ───────────────────────────────────────────────────────────

impl GeoStore for SqliteStore {
  type Error = Error;

  // ── Countries ─────────────────────────────────────────────────────────────

  async fn get_or_create_country(&self, country: NewCountry) -> Result<CountrySeed> {
    let NewCountry { name, code } = country;
    let (name_c, code_c) = (name.clone(), code.clone());
    let now = encode_dt(Utc::now());

    let row = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let existing = tx
          .query_row(
            &format!("SELECT {COUNTRY_COLUMNS} FROM country WHERE name = ?1 AND code = ?2"),
            rusqlite::params![name_c, code_c],
            RawCountry::from_row,
          )
          .optional()?;
        if let Some(raw) = existing {
          return Ok(CountryRow::Existing(raw));
        }

        let inserted = tx.query_row(
          &format!(
            "INSERT INTO country (name, code, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             RETURNING {COUNTRY_COLUMNS}"
          ),
          rusqlite::params![name_c, code_c, now],
          RawCountry::from_row,
        );
        let raw = match inserted {
          Ok(raw) => raw,
          Err(e) if is_unique_violation(&e) => return Ok(CountryRow::Conflict),
          Err(e) => return Err(e.into()),
        };

        tx.commit()?;
        Ok(CountryRow::Created(raw))
      })
      .await?;

    match row {
      CountryRow::Existing(raw) => Ok(CountrySeed::Existing(raw.into_country()?)),
      CountryRow::Created(raw) => Ok(CountrySeed::Created(raw.into_country()?)),
      CountryRow::Conflict => {
        Err(salon_core::Error::DuplicateCountry { name, code }.into())
      }
    }
  }

  async fn get_country_by_code(&self, code: &str) -> Result<Option<Country>> {
    let code = code.to_owned();

    let raw: Option<RawCountry> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {COUNTRY_COLUMNS} FROM country WHERE code = ?1"),
              rusqlite::params![code],
              RawCountry::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCountry::into_country).transpose()
  }

  // ── States ────────────────────────────────────────────────────────────────

  async fn insert_states(&self, states: Vec<NewState>) -> Result<Vec<State>> {
    if states.is_empty() {
      return Ok(Vec::new());
    }
    let now = encode_dt(Utc::now());

    let raws: Vec<RawState> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut inserted = Vec::with_capacity(states.len());
        {
          // Rows hitting a UNIQUE constraint return nothing and are skipped.
          let mut stmt = tx.prepare(&format!(
            "INSERT INTO state (name, abbreviation, region, country_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             ON CONFLICT DO NOTHING
             RETURNING {STATE_COLUMNS}"
          ))?;
          for s in &states {
            let row = stmt
              .query_row(
                rusqlite::params![s.name, s.abbreviation, s.region, s.country_id, now],
                RawState::from_row,
              )
              .optional()?;
            inserted.extend(row);
          }
        }
        tx.commit()?;
        Ok(inserted)
      })
      .await?;

    raws.into_iter().map(RawState::into_state).collect()
  }

  async fn list_states(&self) -> Result<Vec<State>> {
    let raws: Vec<RawState> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {STATE_COLUMNS} FROM state ORDER BY name"))?;
        let rows = stmt
          .query_map([], RawState::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawState::into_state).collect()
  }

  async fn get_state_by_abbreviation(&self, abbreviation: &str) -> Result<Option<State>> {
    let abbreviation = abbreviation.to_owned();

    let raw: Option<RawState> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {STATE_COLUMNS} FROM state WHERE abbreviation = ?1"),
              rusqlite::params![abbreviation],
              RawState::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawState::into_state).transpose()
  }

  // ── Cities ────────────────────────────────────────────────────────────────

  async fn insert_cities(&self, cities: Vec<NewCity>) -> Result<Vec<City>> {
    if cities.is_empty() {
      return Ok(Vec::new());
    }
    let now = encode_dt(Utc::now());

    let raws: Vec<RawCity> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut inserted = Vec::with_capacity(cities.len());
        {
          let mut stmt = tx.prepare(&format!(
            "INSERT INTO city (name, state_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             ON CONFLICT DO NOTHING
             RETURNING {CITY_COLUMNS}"
          ))?;
          for c in &cities {
            let row = stmt
              .query_row(rusqlite::params![c.name, c.state_id, now], RawCity::from_row)
              .optional()?;
            inserted.extend(row);
          }
        }
        tx.commit()?;
        Ok(inserted)
      })
      .await?;

    raws.into_iter().map(RawCity::into_city).collect()
  }

  async fn list_cities(&self, state_id: i64) -> Result<Vec<City>> {
    let raws: Vec<RawCity> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CITY_COLUMNS} FROM city WHERE state_id = ?1 ORDER BY name"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![state_id], RawCity::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCity::into_city).collect()
  }
}
