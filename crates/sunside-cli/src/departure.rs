//! Departure time parsing.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Error, PartialEq)]
pub enum DepartureError {
    #[error("unrecognised departure time '{0}', expected YYYY-MM-DDTHH:MM or RFC 3339")]
    Unparseable(String),

    #[error("departure time {local} does not exist in {tz} (clocks skip forward)")]
    NonexistentLocalTime { local: NaiveDateTime, tz: Tz },
}

/// Resolve a departure time to UTC.
///
/// RFC 3339 input carries its own offset and is taken as is. A naive
/// wall-clock time is read in `tz` (the origin airport's zone), or UTC when
/// no zone is known. During a DST fall-back the earlier of the two instants
/// is used.
pub fn resolve_departure(input: &str, tz: Option<Tz>) -> Result<DateTime<Utc>, DepartureError> {
    let input = input.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&Utc));
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| DepartureError::Unparseable(input.to_string()))?;

    let Some(tz) = tz else {
        return Ok(naive.and_utc());
    };

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(local) => Ok(local.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(DepartureError::NonexistentLocalTime { local: naive, tz }),
    }
}
