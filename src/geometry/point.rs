use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A geographic position in WGS84 degrees.
///
/// Persisted as a `[lat, lon]` two-element array, matching the zone
/// configuration format. Validation happens on construction: both
/// coordinates must be finite and within standard geographic ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self, ValidationError> {
        if !lat.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate(lat));
        }
        if !lon.is_finite() {
            return Err(ValidationError::NonFiniteCoordinate(lon));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(ValidationError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(ValidationError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }
}

impl TryFrom<[f64; 2]> for GeoPoint {
    type Error = ValidationError;

    fn try_from(pair: [f64; 2]) -> Result<Self, Self::Error> {
        GeoPoint::new(pair[0], pair[1])
    }
}

impl From<GeoPoint> for [f64; 2] {
    fn from(p: GeoPoint) -> [f64; 2] {
        [p.lat, p.lon]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_point() {
        let p = GeoPoint::new(37.7749, -122.4194).unwrap();
        assert_eq!(p.lat, 37.7749);
        assert_eq!(p.lon, -122.4194);
    }

    #[test]
    fn test_range_limits() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert_eq!(
            GeoPoint::new(90.1, 0.0),
            Err(ValidationError::LatitudeOutOfRange(90.1))
        );
        assert_eq!(
            GeoPoint::new(0.0, -180.5),
            Err(ValidationError::LongitudeOutOfRange(-180.5))
        );
    }

    #[test]
    fn test_non_finite() {
        assert!(matches!(
            GeoPoint::new(f64::NAN, 0.0),
            Err(ValidationError::NonFiniteCoordinate(_))
        ));
        assert!(matches!(
            GeoPoint::new(0.0, f64::INFINITY),
            Err(ValidationError::NonFiniteCoordinate(_))
        ));
    }

    #[test]
    fn test_serializes_as_pair() {
        let p = GeoPoint::new(1.5, 2.5).unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "[1.5,2.5]");

        let q: GeoPoint = serde_json::from_str("[1.5,2.5]").unwrap();
        assert_eq!(q, p);
    }

    #[test]
    fn test_deserialize_rejects_bad_range() {
        let r: Result<GeoPoint, _> = serde_json::from_str("[95.0,0.0]");
        assert!(r.is_err());
    }
}
