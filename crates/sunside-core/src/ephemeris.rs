//! The solar ephemeris capability consumed by the sampler.

use chrono::{DateTime, Utc};

use crate::models::{GeoPoint, SolarState};

/// Source of the sun's position for an instant and a place on Earth.
///
/// Implementations are treated as pure functions of `(instant, position)`
/// and may be shared across threads. Sunrise and sunset are optional: polar
/// day and night have neither, and the event detector falls back to
/// interpolating altitude when they are missing.
pub trait Ephemeris: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn solar_state(
        &self,
        instant: DateTime<Utc>,
        position: GeoPoint,
    ) -> Result<SolarState, Self::Error>;
}
