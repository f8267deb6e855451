//! Core types and trait definitions for the salon backend's geo reference
//! data.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! store and source crates implement its traits; the sync orchestrator depends
//! only on those traits.

pub mod error;
pub mod geo;
pub mod source;
pub mod store;

pub use error::{Error, Result};
