//! SQL schema for the salon SQLite store.
//!
//! Executed at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- ── Geo reference ────────────────────────────────────────────────────────────
-- Only ever inserted by the geo sync; natural keys carry UNIQUE constraints so
-- bulk inserts can skip rows that already exist.

CREATE TABLE IF NOT EXISTS country (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE CHECK (length(name) <= 100),
    code        TEXT NOT NULL UNIQUE CHECK (length(code) = 3),
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS state (
    id            INTEGER PRIMARY KEY,
    name          TEXT NOT NULL UNIQUE CHECK (length(name) <= 100),
    abbreviation  TEXT NOT NULL UNIQUE CHECK (length(abbreviation) <= 2),
    region        TEXT NOT NULL,
    country_id    INTEGER NOT NULL REFERENCES country(id) ON DELETE CASCADE,
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS city (
    id          INTEGER PRIMARY KEY,
    name        TEXT NOT NULL CHECK (length(name) <= 100),
    state_id    INTEGER NOT NULL REFERENCES state(id) ON DELETE CASCADE,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    UNIQUE (name, state_id)
);

CREATE INDEX IF NOT EXISTS state_country_idx ON state(country_id);
CREATE INDEX IF NOT EXISTS city_state_idx    ON city(state_id);

-- ── Addresses ───────────────────────────────────────────────────────────────

CREATE TABLE IF NOT EXISTS address (
    id            INTEGER PRIMARY KEY,
    street        TEXT NOT NULL,
    neighborhood  TEXT NOT NULL,
    number        TEXT NOT NULL DEFAULT 'S/N',   -- 'S/N' when there is none
    complement    TEXT,
    reference     TEXT,
    latitude      REAL,
    longitude     REAL,
    city_id       INTEGER NOT NULL REFERENCES city(id) ON DELETE RESTRICT,
    zip_code      TEXT,                          -- 00000-000
    created_at    TEXT NOT NULL,
    updated_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS address_street_idx       ON address(street);
CREATE INDEX IF NOT EXISTS address_neighborhood_idx ON address(neighborhood);
CREATE INDEX IF NOT EXISTS address_number_idx       ON address(number);
CREATE INDEX IF NOT EXISTS address_zip_code_idx     ON address(zip_code);

-- ── Users ───────────────────────────────────────────────────────────────────

CREATE TABLE IF NOT EXISTS \"user\" (
    id               INTEGER PRIMARY KEY,
    username         TEXT NOT NULL UNIQUE,
    email            TEXT NOT NULL UNIQUE,
    password_hash    TEXT NOT NULL,
    first_name       TEXT NOT NULL DEFAULT '',
    last_name        TEXT NOT NULL DEFAULT '',
    user_type        TEXT NOT NULL DEFAULT 'client'
                     CHECK (user_type IN ('client', 'professional', 'salon_owner')),
    phone_number     TEXT,
    bio              TEXT,
    profile_picture  TEXT,
    is_active        INTEGER NOT NULL DEFAULT 1,
    is_staff         INTEGER NOT NULL DEFAULT 0,
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL
);

-- ── Business ────────────────────────────────────────────────────────────────

CREATE TABLE IF NOT EXISTS salon (
    id               INTEGER PRIMARY KEY,
    name             TEXT NOT NULL UNIQUE,
    description      TEXT NOT NULL DEFAULT '',
    address_id       INTEGER NOT NULL REFERENCES address(id) ON DELETE RESTRICT,
    email            TEXT NOT NULL UNIQUE,
    phone_number     TEXT,
    website          TEXT,
    slug             TEXT NOT NULL UNIQUE,
    logo             TEXT,
    is_active        INTEGER NOT NULL DEFAULT 1,
    operating_hours  TEXT NOT NULL DEFAULT '{}',   -- JSON object
    owner_id         INTEGER NOT NULL REFERENCES \"user\"(id) ON DELETE CASCADE,
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS salon_phone_idx ON salon(phone_number);

CREATE TABLE IF NOT EXISTS professional (
    id               INTEGER PRIMARY KEY,
    user_id          INTEGER NOT NULL UNIQUE REFERENCES \"user\"(id) ON DELETE CASCADE,
    salon_id         INTEGER NOT NULL REFERENCES salon(id) ON DELETE CASCADE,
    full_name        TEXT NOT NULL,
    profile_picture  TEXT,
    is_active        INTEGER NOT NULL DEFAULT 1,
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS service (
    id                INTEGER PRIMARY KEY,
    salon_id          INTEGER NOT NULL REFERENCES salon(id) ON DELETE CASCADE,
    name              TEXT NOT NULL,
    description       TEXT NOT NULL DEFAULT '',
    price_cents       INTEGER NOT NULL,
    duration_minutes  INTEGER NOT NULL,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL,
    UNIQUE (salon_id, name)
);

CREATE TABLE IF NOT EXISTS professional_specialty (
    professional_id  INTEGER NOT NULL REFERENCES professional(id) ON DELETE CASCADE,
    service_id       INTEGER NOT NULL REFERENCES service(id) ON DELETE CASCADE,
    PRIMARY KEY (professional_id, service_id)
);

CREATE TABLE IF NOT EXISTS appointment (
    id               INTEGER PRIMARY KEY,
    salon_id         INTEGER NOT NULL REFERENCES salon(id) ON DELETE CASCADE,
    client_id        INTEGER NOT NULL REFERENCES \"user\"(id) ON DELETE CASCADE,
    professional_id  INTEGER REFERENCES professional(id) ON DELETE CASCADE,
    service_id       INTEGER NOT NULL REFERENCES service(id) ON DELETE CASCADE,
    date_time        TEXT NOT NULL,
    notes            TEXT,
    status           TEXT NOT NULL DEFAULT 'pending'
                     CHECK (status IN ('pending', 'confirmed', 'completed', 'cancelled')),
    created_at       TEXT NOT NULL,
    updated_at       TEXT NOT NULL,
    UNIQUE (professional_id, date_time)
);

CREATE INDEX IF NOT EXISTS appointment_date_time_idx ON appointment(date_time);
CREATE INDEX IF NOT EXISTS appointment_status_idx    ON appointment(status);

PRAGMA user_version = 1;
";
