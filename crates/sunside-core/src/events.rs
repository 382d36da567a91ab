//! Sunrise and sunset detection along a sampled flight.

use chrono::{DateTime, Duration, Utc};

use crate::models::{RelativePosition, RouteSample, SunEvent, SunEventKind};
use crate::spatial::{initial_bearing, relative_bearing};

/// Find every sunrise and sunset seen from the aircraft, in time order.
///
/// A crossing is bracketed by consecutive samples whose altitudes straddle
/// the horizon. The crossing time prefers the ephemeris' own sunrise/sunset
/// for the later sample's location when it falls inside the bracket, and
/// otherwise interpolates the altitude linearly. Position and azimuth are
/// taken from the later sample.
pub fn detect_sun_events(samples: &[RouteSample]) -> Vec<SunEvent> {
    let mut events = Vec::new();

    for pair in samples.windows(2) {
        let (before, after) = (&pair[0], &pair[1]);

        let kind = if before.sun_altitude < 0.0 && after.sun_altitude >= 0.0 {
            SunEventKind::Sunrise
        } else if before.sun_altitude >= 0.0 && after.sun_altitude < 0.0 {
            SunEventKind::Sunset
        } else {
            continue;
        };

        let reported = match kind {
            SunEventKind::Sunrise => after.sunrise,
            SunEventKind::Sunset => after.sunset,
        };
        let time = match reported {
            Some(t) if t >= before.timestamp && t <= after.timestamp => t,
            _ => interpolate_crossing(before, after),
        };

        let heading = initial_bearing(before.position, after.position);
        let Some(relative_position) =
            RelativePosition::from_relative_angle(relative_bearing(after.sun_azimuth, heading))
        else {
            tracing::debug!(
                "Dropping {} near {}: non-finite sun azimuth",
                kind,
                after.timestamp
            );
            continue;
        };

        tracing::debug!("{} at {} near {} ({})", kind, time, after.position, relative_position);

        events.push(SunEvent {
            kind,
            time,
            position: after.position,
            sun_azimuth: after.sun_azimuth,
            relative_position,
        });
    }

    events
}

/// Zero crossing of the altitude, assuming it varies linearly across the bracket.
fn interpolate_crossing(before: &RouteSample, after: &RouteSample) -> DateTime<Utc> {
    let rise = (after.sun_altitude - before.sun_altitude).abs();
    let fraction = if rise > 0.0 {
        (before.sun_altitude.abs() / rise).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let span_ms = (after.timestamp - before.timestamp).num_milliseconds();
    before.timestamp + Duration::milliseconds((fraction * span_ms as f64).round() as i64)
}
