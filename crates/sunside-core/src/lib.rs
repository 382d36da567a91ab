//! Sunside core - which side of the aircraft gets the sun.
//!
//! Samples the sun along a great-circle flight, detects sunrise and sunset
//! from the cabin, and tallies the sun's side for a seat recommendation.
//! The solar ephemeris itself is supplied by the caller via [`Ephemeris`].

pub mod analysis;
pub mod classify;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod events;
pub mod models;
pub mod sampler;
pub mod spatial;

pub use analysis::{analyze_flight, FlightQuery, FlightReport};
pub use classify::{
    classify, recommend, relative_position, Classification, Recommendation, SeatPreference,
    SideSummary,
};
pub use config::SamplingConfig;
pub use ephemeris::Ephemeris;
pub use error::{Result, SunsideError};
pub use events::detect_sun_events;
pub use models::{
    GeoPoint, PathSegment, RelativePosition, RouteSample, SideTally, SolarState, SunEvent,
    SunEventKind,
};
pub use sampler::sample_route;
pub use spatial::{
    great_circle_distance_km, great_circle_point, initial_bearing, route_points, segment_route,
};
