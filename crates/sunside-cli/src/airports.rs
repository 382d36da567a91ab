//! Airport catalog used to resolve IATA codes into coordinates and timezones.
//!
//! The catalog ships embedded in the binary and can be replaced with a JSON
//! file of the same shape. Every record is validated when the catalog loads,
//! so the rest of the CLI only ever sees well-formed airports.

use std::collections::BTreeMap;
use std::path::Path;

use chrono_tz::Tz;
use serde::Deserialize;
use sunside_core::GeoPoint;
use thiserror::Error;

const EMBEDDED_CATALOG: &str = include_str!("../data/airports.json");

#[derive(Debug, Error)]
pub enum AirportError {
    #[error("failed to read airport catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse airport catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid airport record '{iata}': {reason}")]
    InvalidRecord { iata: String, reason: String },

    #[error("airport '{0}' listed more than once")]
    Duplicate(String),

    #[error("airport '{0}' not found in catalog")]
    NotFound(String),
}

/// Catalog entry exactly as stored on disk.
#[derive(Debug, Clone, Deserialize)]
struct AirportRecord {
    iata: String,
    name: String,
    city: String,
    country: String,
    latitude: f64,
    longitude: f64,
    timezone: String,
}

/// A validated airport.
#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    /// Three-letter IATA code, upper case (e.g. "JFK")
    pub iata: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub location: GeoPoint,
    pub timezone: Tz,
}

impl TryFrom<AirportRecord> for Airport {
    type Error = AirportError;

    fn try_from(record: AirportRecord) -> Result<Self, Self::Error> {
        let invalid = |reason: String| AirportError::InvalidRecord {
            iata: record.iata.clone(),
            reason,
        };

        let iata = record.iata.trim().to_ascii_uppercase();
        if iata.len() != 3 || !iata.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid("IATA code must be three letters".to_string()));
        }
        if record.name.trim().is_empty() {
            return Err(invalid("name is empty".to_string()));
        }

        let location = GeoPoint::new(record.latitude, record.longitude)
            .map_err(|err| invalid(err.to_string()))?;
        let timezone: Tz = record
            .timezone
            .parse()
            .map_err(|_| invalid(format!("unknown timezone '{}'", record.timezone)))?;

        Ok(Self {
            iata,
            name: record.name.trim().to_string(),
            city: record.city.trim().to_string(),
            country: record.country.trim().to_string(),
            location,
            timezone,
        })
    }
}

/// Immutable lookup table of airports keyed by IATA code.
#[derive(Debug, Clone)]
pub struct AirportCatalog {
    airports: BTreeMap<String, Airport>,
}

impl AirportCatalog {
    /// Catalog compiled into the binary.
    pub fn embedded() -> Result<Self, AirportError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AirportError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| AirportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, AirportError> {
        let records: Vec<AirportRecord> = serde_json::from_str(json)?;
        let mut airports = BTreeMap::new();
        for record in records {
            let airport = Airport::try_from(record)?;
            if airports.contains_key(&airport.iata) {
                return Err(AirportError::Duplicate(airport.iata));
            }
            airports.insert(airport.iata.clone(), airport);
        }
        tracing::debug!("Loaded {} airports", airports.len());
        Ok(Self { airports })
    }

    /// Case-insensitive lookup by IATA code.
    pub fn get(&self, iata: &str) -> Option<&Airport> {
        self.airports.get(&iata.trim().to_ascii_uppercase())
    }

    pub fn require(&self, iata: &str) -> Result<&Airport, AirportError> {
        self.get(iata)
            .ok_or_else(|| AirportError::NotFound(iata.trim().to_string()))
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Airports in IATA order.
    pub fn iter(&self) -> impl Iterator<Item = &Airport> {
        self.airports.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = AirportCatalog::embedded().unwrap();
        assert!(catalog.len() > 30);
        let jfk = catalog.get("jfk").unwrap();
        assert_eq!(jfk.iata, "JFK");
        assert_eq!(jfk.timezone, chrono_tz::America::New_York);
        assert!((jfk.location.lat - 40.64).abs() < 0.01);
    }

    #[test]
    fn test_catalog_iterates_in_code_order() {
        let catalog = AirportCatalog::embedded().unwrap();
        let codes: Vec<_> = catalog.iter().map(|a| a.iata.as_str()).collect();
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);
    }

    #[test]
    fn test_unknown_code_is_not_found() {
        let catalog = AirportCatalog::embedded().unwrap();
        assert!(matches!(catalog.require("ZZZ"), Err(AirportError::NotFound(_))));
    }

    #[test]
    fn test_rejects_bad_coordinates() {
        let json = r#"[{"iata": "BAD", "name": "Bad", "city": "X", "country": "Y",
            "latitude": 123.0, "longitude": 0.0, "timezone": "UTC"}]"#;
        assert!(matches!(
            AirportCatalog::from_json(json),
            Err(AirportError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_timezone() {
        let json = r#"[{"iata": "BAD", "name": "Bad", "city": "X", "country": "Y",
            "latitude": 10.0, "longitude": 0.0, "timezone": "Mars/Olympus_Mons"}]"#;
        assert!(matches!(
            AirportCatalog::from_json(json),
            Err(AirportError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_code_and_duplicates() {
        let long_code = r#"[{"iata": "KJFK", "name": "Kennedy", "city": "X", "country": "Y",
            "latitude": 10.0, "longitude": 0.0, "timezone": "UTC"}]"#;
        assert!(AirportCatalog::from_json(long_code).is_err());

        let dup = r#"[
            {"iata": "abc", "name": "A", "city": "X", "country": "Y", "latitude": 1.0, "longitude": 1.0, "timezone": "UTC"},
            {"iata": "ABC", "name": "B", "city": "X", "country": "Y", "latitude": 2.0, "longitude": 2.0, "timezone": "UTC"}
        ]"#;
        assert!(matches!(AirportCatalog::from_json(dup), Err(AirportError::Duplicate(code)) if code == "ABC"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AirportCatalog::from_path("/nonexistent/airports.json").unwrap_err();
        assert!(matches!(err, AirportError::Io { .. }));
    }
}
