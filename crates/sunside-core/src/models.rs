//! Core data models for route sampling and sun-side analysis.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SunsideError};

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let point = Self { lat, lon };
        point.validate()?;
        Ok(point)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || !self.lon.is_finite() {
            return Err(SunsideError::invalid_input(format!(
                "coordinates must be finite, got ({}, {})",
                self.lat, self.lon
            )));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(SunsideError::invalid_input(format!(
                "latitude {} outside [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(SunsideError::invalid_input(format!(
                "longitude {} outside [-180, 180]",
                self.lon
            )));
        }
        Ok(())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// Solar state reported by an ephemeris for one instant and location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarState {
    /// Degrees above (+) or below (-) the horizon
    pub altitude: f64,
    /// Degrees clockwise from true north, [0, 360)
    pub azimuth: f64,
    /// Sunrise for the location's day, if the sun rises at all
    #[serde(default)]
    pub sunrise: Option<DateTime<Utc>>,
    /// Sunset for the location's day, if the sun sets at all
    #[serde(default)]
    pub sunset: Option<DateTime<Utc>>,
}

/// One time step along the flight with the sun's position attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSample {
    pub position: GeoPoint,
    pub timestamp: DateTime<Utc>,
    pub sun_altitude: f64,
    pub sun_azimuth: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sunset: Option<DateTime<Utc>>,
}

impl RouteSample {
    pub fn new(position: GeoPoint, timestamp: DateTime<Utc>, solar: SolarState) -> Self {
        Self {
            position,
            timestamp,
            sun_altitude: solar.altitude,
            sun_azimuth: solar.azimuth,
            sunrise: solar.sunrise,
            sunset: solar.sunset,
        }
    }

    /// Sun is at or above the horizon. A non-finite altitude is never up.
    pub fn sun_up(&self) -> bool {
        self.sun_altitude.is_finite() && self.sun_altitude >= 0.0
    }
}

/// Where the sun sits relative to the direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativePosition {
    Ahead,
    Right,
    Behind,
    Left,
}

impl RelativePosition {
    /// Bucket a relative bearing (sun azimuth minus heading) into a quadrant.
    ///
    /// Each quadrant is 90 degrees wide and includes its lower edge, so 45
    /// is already Right and 315 is already Ahead again. A non-finite angle
    /// has no quadrant.
    pub fn from_relative_angle(angle_deg: f64) -> Option<Self> {
        if !angle_deg.is_finite() {
            return None;
        }
        let angle = angle_deg.rem_euclid(360.0);
        let position = if (45.0..135.0).contains(&angle) {
            Self::Right
        } else if (135.0..225.0).contains(&angle) {
            Self::Behind
        } else if (225.0..315.0).contains(&angle) {
            Self::Left
        } else {
            Self::Ahead
        };
        Some(position)
    }
}

impl fmt::Display for RelativePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ahead => "Ahead",
            Self::Right => "Right",
            Self::Behind => "Behind",
            Self::Left => "Left",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SunEventKind {
    Sunrise,
    Sunset,
}

impl fmt::Display for SunEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sunrise => f.write_str("Sunrise"),
            Self::Sunset => f.write_str("Sunset"),
        }
    }
}

/// A sunrise or sunset observed from the aircraft during the flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunEvent {
    pub kind: SunEventKind,
    pub time: DateTime<Utc>,
    pub position: GeoPoint,
    pub sun_azimuth: f64,
    pub relative_position: RelativePosition,
}

/// A polyline that never crosses the antimeridian internally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    pub points: Vec<GeoPoint>,
}

impl PathSegment {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Interval counts per quadrant for one flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideTally {
    pub left: usize,
    pub right: usize,
    pub ahead: usize,
    pub behind: usize,
    /// Intervals whose starting sample has the sun above the horizon
    pub visible_intervals: usize,
    /// Sample count minus one
    pub total_intervals: usize,
}

impl SideTally {
    pub(crate) fn record(&mut self, position: RelativePosition) {
        match position {
            RelativePosition::Left => self.left += 1,
            RelativePosition::Right => self.right += 1,
            RelativePosition::Ahead => self.ahead += 1,
            RelativePosition::Behind => self.behind += 1,
        }
    }

    pub fn count(&self, position: RelativePosition) -> usize {
        match position {
            RelativePosition::Left => self.left,
            RelativePosition::Right => self.right,
            RelativePosition::Ahead => self.ahead,
            RelativePosition::Behind => self.behind,
        }
    }
}
