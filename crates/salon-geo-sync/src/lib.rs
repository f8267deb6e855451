//! Geo reference synchronization for the salon backend.
//!
//! [`GeoSync`] populates the country → state → city hierarchy from any
//! [`GeoSource`](salon_core::source::GeoSource) into any
//! [`GeoStore`](salon_core::store::GeoStore). Every phase is insert-only and
//! conflict-ignoring, so a run can be repeated safely.

pub mod error;
pub mod report;
pub mod settings;
pub mod sync;

pub use error::SyncError;
pub use report::{CityFetchFailure, SyncPhase, SyncReport};
pub use settings::SyncSettings;
pub use sync::GeoSync;

#[cfg(test)]
mod tests;
