//! Per-interval sun side classification and the seat recommendation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SunsideError;
use crate::models::{RelativePosition, RouteSample, SideTally};
use crate::spatial::{initial_bearing, relative_bearing};

/// Which side of the aircraft gets the sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Left,
    Right,
    /// Sun is up but never favours one side
    Neither,
    /// Sun never above the horizon at the start of an interval
    NotVisible,
}

impl Recommendation {
    /// Seat to pick for the traveller's preference.
    ///
    /// Avoiding the sun means sitting on the opposite side; with no sunny
    /// side there is nothing to avoid.
    pub fn seat_for(self, preference: SeatPreference) -> Recommendation {
        match (preference, self) {
            (SeatPreference::SeekSun, rec) => rec,
            (SeatPreference::AvoidSun, Recommendation::Left) => Recommendation::Right,
            (SeatPreference::AvoidSun, Recommendation::Right) => Recommendation::Left,
            (SeatPreference::AvoidSun, rec) => rec,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Left => "Left",
            Self::Right => "Right",
            Self::Neither => "Neither",
            Self::NotVisible => "Neither, sun not visible",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatPreference {
    /// Sit where the sun is (views, photos)
    #[default]
    SeekSun,
    /// Sit away from the sun
    AvoidSun,
}

impl FromStr for SeatPreference {
    type Err = SunsideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sun" | "seek" | "seek_sun" | "sunny" => Ok(Self::SeekSun),
            "shade" | "avoid" | "avoid_sun" | "shady" => Ok(Self::AvoidSun),
            other => Err(SunsideError::invalid_input(format!(
                "unknown seat preference '{other}', expected 'sun' or 'shade'"
            ))),
        }
    }
}

/// Percentages derived from a [`SideTally`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SideSummary {
    /// Share of all intervals with the sun up
    pub visible_pct: f64,
    // The per-side shares are of visible intervals, not of the whole flight.
    pub left_pct: f64,
    pub right_pct: f64,
    pub ahead_pct: f64,
    pub behind_pct: f64,
}

impl SideSummary {
    pub fn from_tally(tally: &SideTally) -> Self {
        let visible = tally.visible_intervals;
        Self {
            visible_pct: percent(visible, tally.total_intervals),
            left_pct: percent(tally.left, visible),
            right_pct: percent(tally.right, visible),
            ahead_pct: percent(tally.ahead, visible),
            behind_pct: percent(tally.behind, visible),
        }
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Result of classifying one sampled flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub recommendation: Recommendation,
    pub tally: SideTally,
    pub summary: SideSummary,
    pub summary_text: String,
}

/// Quadrant of the sun relative to the aircraft, `None` for a non-finite bearing.
pub fn relative_position(sun_azimuth: f64, heading: f64) -> Option<RelativePosition> {
    RelativePosition::from_relative_angle(relative_bearing(sun_azimuth, heading))
}

/// Tally which side the sun is on for every interval of the flight.
///
/// Each interval is judged by its starting sample: intervals that begin with
/// the sun below the horizon, or with a non-finite sun position, count
/// towards the total only. Pure; calling it twice on the same samples gives
/// the same answer.
pub fn classify(samples: &[RouteSample]) -> Classification {
    let mut tally = SideTally::default();

    for pair in samples.windows(2) {
        let (start, end) = (&pair[0], &pair[1]);
        tally.total_intervals += 1;
        if !start.sun_up() {
            continue;
        }

        let heading = initial_bearing(start.position, end.position);
        let Some(position) = relative_position(start.sun_azimuth, heading) else {
            tracing::debug!(
                "Skipping interval at {}: non-finite sun azimuth {}",
                start.timestamp,
                start.sun_azimuth
            );
            continue;
        };
        tally.visible_intervals += 1;
        tally.record(position);
    }

    let recommendation = recommend(&tally);
    let summary = SideSummary::from_tally(&tally);
    let summary_text = summary_text(&tally, &summary);

    Classification {
        recommendation,
        tally,
        summary,
        summary_text,
    }
}

/// Turn a tally into a seat recommendation.
///
/// A left/right tie goes to Left whenever the sun was on the left at all.
/// That bias is deliberate product behaviour, not an accident.
pub fn recommend(tally: &SideTally) -> Recommendation {
    if tally.visible_intervals == 0 {
        return Recommendation::NotVisible;
    }
    if tally.left > tally.right {
        Recommendation::Left
    } else if tally.right > tally.left {
        Recommendation::Right
    } else if tally.left > 0 {
        Recommendation::Left
    } else {
        Recommendation::Neither
    }
}

fn summary_text(tally: &SideTally, summary: &SideSummary) -> String {
    if tally.visible_intervals == 0 {
        return "Sun not visible during the flight".to_string();
    }
    format!(
        "Sun visible {:.0}% of flight; left {:.0}%, right {:.0}%, ahead {:.0}%, behind {:.0}%",
        summary.visible_pct,
        summary.left_pct,
        summary.right_pct,
        summary.ahead_pct,
        summary.behind_pct
    )
}
