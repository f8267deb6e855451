//! HTTP client for the IBGE localities API.
//!
//! Implements [`salon_core::source::GeoSource`] over
//! `https://servicodados.ibge.gov.br/api/v1/localidades`.

mod client;

pub mod error;

pub use client::{DEFAULT_BASE_URL, IbgeClient, IbgeConfig};
pub use error::{Error, Result, Unavailable};
