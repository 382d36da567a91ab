//! Solar ephemeris backed by NREL's Solar Position Algorithm.
//!
//! Positions are topocentric at sea level with standard atmospheric
//! refraction. Sunrise and sunset use the usual -0.833 degree horizon.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use solar_positioning::{
    spa,
    time::DeltaT,
    types::{RefractionCorrection, SunriseResult},
    Horizon,
};
use sunside_core::{Ephemeris, GeoPoint, SolarState};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("date out of range near {0}")]
    DateOutOfRange(DateTime<Utc>),

    #[error("solar position calculation failed: {0}")]
    Calculation(String),
}

fn calculation<E: std::fmt::Display>(err: E) -> EphemerisError {
    EphemerisError::Calculation(err.to_string())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpaEphemeris;

impl SpaEphemeris {
    fn delta_t(instant: DateTime<Utc>) -> Result<f64, EphemerisError> {
        DeltaT::estimate_from_date(instant.year(), instant.month()).map_err(calculation)
    }

    /// Apparent sun altitude and azimuth (degrees) at an instant and place.
    pub fn position(
        &self,
        instant: DateTime<Utc>,
        position: GeoPoint,
    ) -> Result<(f64, f64), EphemerisError> {
        let solar = spa::solar_position(
            instant,
            position.lat,
            position.lon,
            0.0,
            Self::delta_t(instant)?,
            Some(RefractionCorrection::standard()),
        )
        .map_err(calculation)?;
        Ok((solar.elevation_angle(), solar.azimuth()))
    }

    /// Sunrise and sunset (UTC) around the transit on `date`.
    ///
    /// Both are `None` during polar day or polar night.
    pub fn sunrise_sunset(
        &self,
        date: NaiveDate,
        position: GeoPoint,
    ) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>), EphemerisError> {
        let day = date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| EphemerisError::Calculation(format!("invalid date {date}")))?;

        let result = spa::sunrise_sunset_for_horizon(
            day,
            position.lat,
            position.lon,
            Self::delta_t(day)?,
            Horizon::SunriseSunset,
        )
        .map_err(calculation)?;

        Ok(match result {
            SunriseResult::RegularDay {
                sunrise, sunset, ..
            } => (Some(sunrise), Some(sunset)),
            SunriseResult::AllDay { .. } | SunriseResult::AllNight { .. } => (None, None),
        })
    }

    /// The sunrise and sunset closest to `instant`, searching the neighbouring days.
    fn nearest_events(
        &self,
        instant: DateTime<Utc>,
        position: GeoPoint,
    ) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>), EphemerisError> {
        let today = instant.date_naive();
        let days = [
            today.pred_opt().ok_or(EphemerisError::DateOutOfRange(instant))?,
            today,
            today.succ_opt().ok_or(EphemerisError::DateOutOfRange(instant))?,
        ];

        let mut rises = Vec::with_capacity(days.len());
        let mut sets = Vec::with_capacity(days.len());
        for day in days {
            let (sunrise, sunset) = self.sunrise_sunset(day, position)?;
            rises.extend(sunrise);
            sets.extend(sunset);
        }

        let closest = |candidates: Vec<DateTime<Utc>>| {
            candidates
                .into_iter()
                .min_by_key(|t| (*t - instant).num_milliseconds().abs())
        };
        Ok((closest(rises), closest(sets)))
    }
}

impl Ephemeris for SpaEphemeris {
    type Error = EphemerisError;

    fn solar_state(
        &self,
        instant: DateTime<Utc>,
        position: GeoPoint,
    ) -> Result<SolarState, Self::Error> {
        let (altitude, azimuth) = self.position(instant, position)?;
        let (sunrise, sunset) = self.nearest_events(instant, position)?;
        Ok(SolarState {
            altitude,
            azimuth,
            sunrise,
            sunset,
        })
    }
}
