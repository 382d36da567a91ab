//! Tunables for route sampling.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SunsideError};

/// Configuration for sampling a flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Time between solar samples in minutes
    pub interval_minutes: f64,
    /// Number of points in the display polyline
    pub route_points: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 10.0,
            route_points: 128,
        }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.interval_minutes.is_finite() || self.interval_minutes <= 0.0 {
            return Err(SunsideError::invalid_input(format!(
                "interval must be positive, got {} minutes",
                self.interval_minutes
            )));
        }
        if self.route_points < 2 {
            return Err(SunsideError::invalid_input(format!(
                "route needs at least 2 display points, got {}",
                self.route_points
            )));
        }
        Ok(())
    }
}
