//! CLI configuration from environment.

use std::env;
use std::path::PathBuf;

use sunside_core::SamplingConfig;

/// Typical jet cruise speed used when no duration is given.
const DEFAULT_CRUISE_KMH: f64 = 830.0;
/// Taxi, climb and descent allowance on top of cruise time.
const BLOCK_OVERHEAD_HOURS: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub interval_minutes: f64,
    pub route_points: usize,
    /// Replacement airport catalog; the embedded one is used when unset
    pub airports_path: Option<PathBuf>,
    pub cruise_kmh: f64,
    /// Emit logs as JSON lines instead of text
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        let sampling = SamplingConfig::default();
        Self {
            interval_minutes: sampling.interval_minutes,
            route_points: sampling.route_points,
            airports_path: None,
            cruise_kmh: DEFAULT_CRUISE_KMH,
            log_json: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            interval_minutes: lookup("SUNSIDE_INTERVAL_MINUTES")
                .and_then(|s| s.parse().ok())
                .filter(|v: &f64| v.is_finite() && *v > 0.0)
                .unwrap_or(defaults.interval_minutes),
            route_points: lookup("SUNSIDE_ROUTE_POINTS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.route_points),
            airports_path: lookup("SUNSIDE_AIRPORTS")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            cruise_kmh: lookup("SUNSIDE_CRUISE_KMH")
                .and_then(|s| s.parse().ok())
                .filter(|v: &f64| v.is_finite() && *v > 0.0)
                .unwrap_or(defaults.cruise_kmh),
            log_json: lookup("SUNSIDE_LOG_FORMAT")
                .map(|s| s.trim().eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.log_json),
        }
    }

    /// Sampling settings, with the command-line interval taking precedence.
    pub fn sampling(&self, interval_override: Option<f64>) -> SamplingConfig {
        SamplingConfig {
            interval_minutes: interval_override.unwrap_or(self.interval_minutes),
            route_points: self.route_points,
        }
    }

    /// Rough block time for a great-circle distance.
    pub fn estimate_duration_hours(&self, distance_km: f64) -> f64 {
        distance_km / self.cruise_kmh + BLOCK_OVERHEAD_HOURS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.interval_minutes, 10.0);
        assert_eq!(config.route_points, 128);
        assert!(config.airports_path.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SUNSIDE_INTERVAL_MINUTES", "5"),
            ("SUNSIDE_ROUTE_POINTS", "64"),
            ("SUNSIDE_AIRPORTS", "/tmp/airports.json"),
            ("SUNSIDE_LOG_FORMAT", "JSON"),
        ]));
        assert!(config.log_json);
        assert_eq!(config.interval_minutes, 5.0);
        assert_eq!(config.route_points, 64);
        assert_eq!(config.airports_path, Some(PathBuf::from("/tmp/airports.json")));
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_lookup(lookup(&[
            ("SUNSIDE_INTERVAL_MINUTES", "-3"),
            ("SUNSIDE_ROUTE_POINTS", "lots"),
            ("SUNSIDE_AIRPORTS", "  "),
        ]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_interval_flag_wins() {
        let config = Config::default();
        assert_eq!(config.sampling(Some(2.5)).interval_minutes, 2.5);
        assert_eq!(config.sampling(None).interval_minutes, 10.0);
    }

    #[test]
    fn test_duration_estimate() {
        let config = Config::default();
        let hours = config.estimate_duration_hours(3974.0);
        assert!((hours - 5.29).abs() < 0.01);
    }
}
