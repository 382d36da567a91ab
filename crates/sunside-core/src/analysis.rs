//! One-call flight analysis tying the sampler, detector and classifier together.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::classify::{classify, Classification, Recommendation, SeatPreference};
use crate::config::SamplingConfig;
use crate::ephemeris::Ephemeris;
use crate::error::Result;
use crate::events::detect_sun_events;
use crate::models::{GeoPoint, PathSegment, RouteSample, SunEvent};
use crate::sampler::sample_route;
use crate::spatial::{great_circle_distance_km, route_points, segment_route};

/// A single sun-side question about one flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightQuery {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub departure: DateTime<Utc>,
    pub duration_hours: f64,
    #[serde(default)]
    pub preference: SeatPreference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightReport {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub distance_km: f64,
    pub preference: SeatPreference,
    /// Seat to book given the preference
    pub seat: Recommendation,
    pub classification: Classification,
    pub events: Vec<SunEvent>,
    pub samples: Vec<RouteSample>,
    /// Display polyline split at the antimeridian
    pub path: Vec<PathSegment>,
}

impl FlightReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Sample the flight, find sun events, classify sides, and build the display path.
pub fn analyze_flight<E: Ephemeris>(
    query: &FlightQuery,
    config: &SamplingConfig,
    ephemeris: &E,
) -> Result<FlightReport> {
    config.validate()?;

    let samples = sample_route(
        query.origin,
        query.destination,
        query.departure,
        query.duration_hours,
        config.interval_minutes,
        ephemeris,
    )?;

    let events = detect_sun_events(&samples);
    let classification = classify(&samples);
    let seat = classification.recommendation.seat_for(query.preference);

    let points = route_points(query.origin, query.destination, config.route_points);
    let path = segment_route(&points);

    // sample_route always ends on the arrival sample
    let arrival = samples
        .last()
        .map(|s| s.timestamp)
        .unwrap_or(query.departure);

    tracing::debug!(
        "Analyzed {} -> {}: {} samples, {} events, seat {}",
        query.origin,
        query.destination,
        samples.len(),
        events.len(),
        seat
    );

    Ok(FlightReport {
        origin: query.origin,
        destination: query.destination,
        departure: query.departure,
        arrival,
        distance_km: great_circle_distance_km(query.origin, query.destination),
        preference: query.preference,
        seat,
        classification,
        events,
        samples,
        path,
    })
}
