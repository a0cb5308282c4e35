//! Geographic coordinates.

use serde::{Deserialize, Serialize};

use crate::algorithms::error::{AnalysisError, AnalysisResult};

/// Location used when the client cannot provide one (Gangnam-gu, Seoul).
pub const FALLBACK_LOCATION: Coordinate = Coordinate {
    latitude: 37.5172,
    longitude: 127.0473,
};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting NaN and infinite components.
    pub fn new(latitude: f64, longitude: f64) -> AnalysisResult<Self> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Parses a coordinate from two path segments such as `"37.5"` / `"127.0"`.
    pub fn parse(latitude: &str, longitude: &str) -> AnalysisResult<Self> {
        let lat = latitude
            .trim()
            .parse::<f64>()
            .map_err(|_| AnalysisError::invalid_input(format!("latitude '{latitude}' is not a number")))?;
        let lng = longitude
            .trim()
            .parse::<f64>()
            .map_err(|_| AnalysisError::invalid_input(format!("longitude '{longitude}' is not a number")))?;
        Self::new(lat, lng)
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Fails with `InvalidInput` unless both components are finite.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(AnalysisError::invalid_coordinate(self.latitude, self.longitude))
        }
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        FALLBACK_LOCATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinate::new(f64::NEG_INFINITY, 0.0).is_err());
        assert!(Coordinate::new(37.5, 127.0).is_ok());
    }

    #[test]
    fn test_parse_path_segments() {
        let c = Coordinate::parse("37.5172", " 127.0473").unwrap();
        assert_eq!(c, FALLBACK_LOCATION);

        assert!(Coordinate::parse("abc", "127.0").is_err());
        assert!(Coordinate::parse("NaN", "127.0").is_err());
        assert!(Coordinate::parse("37.0", "inf").is_err());
    }

    #[test]
    fn test_default_is_fallback() {
        assert_eq!(Coordinate::default(), FALLBACK_LOCATION);
    }
}
