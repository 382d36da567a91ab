//! Samples the sun's position at fixed intervals along a great-circle flight.

use chrono::{DateTime, Duration, Utc};

use crate::ephemeris::Ephemeris;
use crate::error::{Result, SunsideError};
use crate::models::{GeoPoint, RouteSample};
use crate::spatial::{great_circle_point, is_antipodal, is_degenerate};

/// Upper bound on samples per flight; guards against absurdly small intervals.
pub const MAX_SAMPLES: i64 = 100_000;

const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;

/// Sample the sun along the route from `origin` to `destination`.
///
/// Samples are `interval_minutes` apart starting at `departure`. The last
/// sample is always the arrival point at `departure + duration_hours`, even
/// when the flight is not a whole number of intervals long, so the events
/// and the side tally cover the entire flight. Times are kept to the
/// millisecond.
pub fn sample_route<E: Ephemeris>(
    origin: GeoPoint,
    destination: GeoPoint,
    departure: DateTime<Utc>,
    duration_hours: f64,
    interval_minutes: f64,
    ephemeris: &E,
) -> Result<Vec<RouteSample>> {
    origin.validate()?;
    destination.validate()?;

    if !duration_hours.is_finite() || duration_hours <= 0.0 {
        return Err(SunsideError::invalid_input(format!(
            "flight duration must be positive, got {duration_hours} hours"
        )));
    }
    if !interval_minutes.is_finite() || interval_minutes <= 0.0 {
        return Err(SunsideError::invalid_input(format!(
            "sampling interval must be positive, got {interval_minutes} minutes"
        )));
    }
    if is_antipodal(origin, destination) {
        return Err(SunsideError::invalid_input(format!(
            "{origin} and {destination} are antipodal; no unique great-circle route"
        )));
    }

    let total_ms = (duration_hours * MS_PER_HOUR).round() as i64;
    let step_ms = (interval_minutes * MS_PER_MINUTE).round() as i64;
    if total_ms < 1 || step_ms < 1 {
        return Err(SunsideError::invalid_input(
            "duration and interval must each be at least one millisecond",
        ));
    }

    Duration::try_milliseconds(total_ms)
        .and_then(|flight| departure.checked_add_signed(flight))
        .ok_or_else(|| {
            SunsideError::invalid_input(format!(
                "arrival after {duration_hours} hours is out of range"
            ))
        })?;

    // ceil(total / step) without float rounding surprises
    let steps = total_ms.saturating_add(step_ms - 1) / step_ms;
    if steps + 1 > MAX_SAMPLES {
        return Err(SunsideError::invalid_input(format!(
            "{} samples requested, limit is {MAX_SAMPLES}",
            steps + 1
        )));
    }

    if is_degenerate(origin, destination) {
        tracing::warn!(
            "Origin {} and destination {} coincide; sampling a stationary route",
            origin,
            destination
        );
    }

    let mut samples = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        let offset_ms = (i * step_ms).min(total_ms);
        let fraction = if i == steps {
            1.0
        } else {
            offset_ms as f64 / total_ms as f64
        };

        let position = great_circle_point(origin, destination, fraction);
        let timestamp = departure + Duration::milliseconds(offset_ms);

        let solar = ephemeris
            .solar_state(timestamp, position)
            .map_err(SunsideError::ephemeris)?;
        if !solar.altitude.is_finite() || !solar.azimuth.is_finite() {
            return Err(SunsideError::invalid_input(format!(
                "ephemeris returned non-finite sun position at {timestamp} {position}"
            )));
        }

        samples.push(RouteSample::new(position, timestamp, solar));
    }

    tracing::debug!(
        "Sampled {} points over {:.2}h at {}min intervals",
        samples.len(),
        duration_hours,
        interval_minutes
    );

    Ok(samples)
}
