//! Turning command-line endpoints and times into a [`FlightQuery`].

use std::fmt;

use chrono_tz::Tz;
use sunside_core::{great_circle_distance_km, FlightQuery, GeoPoint, SeatPreference};
use thiserror::Error;

use crate::airports::{Airport, AirportCatalog, AirportError};
use crate::config::Config;
use crate::departure::{resolve_departure, DepartureError};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Airport(#[from] AirportError),

    #[error(transparent)]
    Departure(#[from] DepartureError),

    #[error("invalid coordinates '{input}': {reason}")]
    Coordinates { input: String, reason: String },

    #[error("flight duration must be positive, got {0} hours")]
    Duration(f64),
}

/// One end of the flight.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    Airport(Airport),
    Coordinates(GeoPoint),
}

impl Endpoint {
    /// Parse `lat,lon` or look up an IATA code.
    pub fn resolve(input: &str, catalog: &AirportCatalog) -> Result<Self, PlanError> {
        let input = input.trim();
        if input.contains(',') {
            return parse_coordinates(input).map(Endpoint::Coordinates);
        }
        Ok(Endpoint::Airport(catalog.require(input)?.clone()))
    }

    pub fn point(&self) -> GeoPoint {
        match self {
            Endpoint::Airport(airport) => airport.location,
            Endpoint::Coordinates(point) => *point,
        }
    }

    pub fn timezone(&self) -> Option<Tz> {
        match self {
            Endpoint::Airport(airport) => Some(airport.timezone),
            Endpoint::Coordinates(_) => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Airport(a) => write!(f, "{} ({}, {})", a.iata, a.city, a.country),
            Endpoint::Coordinates(p) => write!(f, "{}", p),
        }
    }
}

fn parse_coordinates(input: &str) -> Result<GeoPoint, PlanError> {
    let invalid = |reason: String| PlanError::Coordinates {
        input: input.to_string(),
        reason,
    };

    let (lat, lon) = input
        .split_once(',')
        .ok_or_else(|| invalid("expected lat,lon".to_string()))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| invalid(format!("latitude '{}' is not a number", lat.trim())))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| invalid(format!("longitude '{}' is not a number", lon.trim())))?;

    GeoPoint::new(lat, lon).map_err(|err| invalid(err.to_string()))
}

/// Raw flight parameters as typed by the user.
#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub from: String,
    pub to: String,
    pub depart: String,
    pub duration_hours: Option<f64>,
    pub preference: SeatPreference,
}

/// A resolved flight ready for analysis.
#[derive(Debug, Clone)]
pub struct FlightPlan {
    pub origin: Endpoint,
    pub destination: Endpoint,
    pub query: FlightQuery,
    /// True when the duration came from the cruise-speed estimate
    pub duration_estimated: bool,
}

impl PlanRequest {
    pub fn resolve(
        &self,
        catalog: &AirportCatalog,
        config: &Config,
    ) -> Result<FlightPlan, PlanError> {
        let origin = Endpoint::resolve(&self.from, catalog)?;
        let destination = Endpoint::resolve(&self.to, catalog)?;

        // Wall-clock departures are read in the origin's zone
        let departure = resolve_departure(&self.depart, origin.timezone())?;

        let (duration_hours, duration_estimated) = match self.duration_hours {
            Some(hours) => (hours, false),
            None => {
                let distance = great_circle_distance_km(origin.point(), destination.point());
                (config.estimate_duration_hours(distance), true)
            }
        };
        if !duration_hours.is_finite() || duration_hours <= 0.0 {
            return Err(PlanError::Duration(duration_hours));
        }

        if duration_estimated {
            tracing::info!(
                "No duration given, estimated {:.2} h from cruise speed",
                duration_hours
            );
        }

        let query = FlightQuery {
            origin: origin.point(),
            destination: destination.point(),
            departure,
            duration_hours,
            preference: self.preference,
        };

        Ok(FlightPlan {
            origin,
            destination,
            query,
            duration_estimated,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn catalog() -> AirportCatalog {
        AirportCatalog::embedded().unwrap()
    }

    fn request(from: &str, to: &str, depart: &str, duration: Option<f64>) -> PlanRequest {
        PlanRequest {
            from: from.to_string(),
            to: to.to_string(),
            depart: depart.to_string(),
            duration_hours: duration,
            preference: SeatPreference::SeekSun,
        }
    }

    #[test]
    fn test_airport_endpoint() {
        let endpoint = Endpoint::resolve("lax", &catalog()).unwrap();
        assert!(matches!(&endpoint, Endpoint::Airport(a) if a.iata == "LAX"));
        assert!(endpoint.timezone().is_some());
    }

    #[test]
    fn test_coordinate_endpoint() {
        let endpoint = Endpoint::resolve("-33.95, 151.18", &catalog()).unwrap();
        assert_eq!(endpoint.point(), GeoPoint { lat: -33.95, lon: 151.18 });
        assert!(endpoint.timezone().is_none());
    }

    #[test]
    fn test_bad_coordinates() {
        assert!(matches!(
            Endpoint::resolve("91,0", &catalog()),
            Err(PlanError::Coordinates { .. })
        ));
        assert!(matches!(
            Endpoint::resolve("north,0", &catalog()),
            Err(PlanError::Coordinates { .. })
        ));
    }

    #[test]
    fn test_unknown_airport() {
        assert!(matches!(
            Endpoint::resolve("ZZZ", &catalog()),
            Err(PlanError::Airport(AirportError::NotFound(_)))
        ));
    }

    #[test]
    fn test_departure_uses_origin_zone() {
        let plan = request("JFK", "LAX", "2024-07-22T08:00", Some(5.5))
            .resolve(&catalog(), &Config::default())
            .unwrap();
        assert_eq!(
            plan.query.departure,
            Utc.with_ymd_and_hms(2024, 7, 22, 12, 0, 0).unwrap()
        );
        assert_eq!(plan.query.duration_hours, 5.5);
        assert!(!plan.duration_estimated);
    }

    #[test]
    fn test_coordinate_origin_reads_utc() {
        let plan = request("40.64,-73.78", "LAX", "2024-07-22T08:00", Some(5.5))
            .resolve(&catalog(), &Config::default())
            .unwrap();
        assert_eq!(
            plan.query.departure,
            Utc.with_ymd_and_hms(2024, 7, 22, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_missing_duration_is_estimated() {
        let plan = request("JFK", "LAX", "2024-07-22T08:00", None)
            .resolve(&catalog(), &Config::default())
            .unwrap();
        assert!(plan.duration_estimated);
        assert!(plan.query.duration_hours > 4.5 && plan.query.duration_hours < 6.0);
    }

    #[test]
    fn test_non_positive_duration() {
        let result = request("JFK", "LAX", "2024-07-22T08:00", Some(0.0))
            .resolve(&catalog(), &Config::default());
        assert!(matches!(result, Err(PlanError::Duration(_))));
    }
}
