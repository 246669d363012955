use serde::{Deserialize, Serialize};

use crate::error::{ParseError, ValidationError};
use crate::geometry::{self, GeoPoint};
use crate::wizard::{MAX_VERTICES, MIN_VERTICES};

/// A finalized geofence: a name, the tracked device it watches, and the
/// polygon's vertex sequence in insertion order.
///
/// Immutable once created; reconfiguring a zone means building a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    /// Opaque identifier of the tracked device (e.g. "device_tracker.james_phone")
    pub device: String,
    pub polygon: Vec<GeoPoint>,
}

impl Zone {
    /// Create a zone from an already-finalized vertex sequence.
    ///
    /// The polygon must hold 3 to 15 vertices; `PolygonBuilder::finish` and
    /// `parse_coordinates` both guarantee this, so a failure here means the
    /// sequence came from somewhere else (e.g. a hand-edited store file).
    pub fn new(
        name: impl Into<String>,
        device: impl Into<String>,
        polygon: Vec<GeoPoint>,
    ) -> Result<Self, ValidationError> {
        if polygon.len() < MIN_VERTICES {
            return Err(ValidationError::TooFewPoints(polygon.len()));
        }
        if polygon.len() > MAX_VERTICES {
            return Err(ValidationError::TooManyPoints);
        }
        Ok(Self {
            name: name.into(),
            device: device.into(),
            polygon,
        })
    }

    /// Whether the given position lies inside this zone's polygon.
    pub fn contains(&self, position: GeoPoint) -> bool {
        geometry::contains(&self.polygon, position)
    }
}

/// Parse a persisted coordinate list: a JSON array of `[lat, lon]` pairs.
///
/// This is the format zones are stored in and the format accepted when a
/// zone is imported whole instead of built point by point. Checks: valid
/// JSON, a list of two-element number pairs, at least 3 entries, every
/// coordinate finite and in range.
pub fn parse_coordinates(input: &str) -> Result<Vec<GeoPoint>, ParseError> {
    let raw: serde_json::Value = serde_json::from_str(input)?;

    let entries = raw.as_array().ok_or(ParseError::NotAPairList)?;

    let mut points = Vec::with_capacity(entries.len());
    for entry in entries {
        let pair = entry.as_array().ok_or(ParseError::NotAPairList)?;
        if pair.len() != 2 {
            return Err(ParseError::NotAPairList);
        }
        let lat = pair[0].as_f64().ok_or(ParseError::NotAPairList)?;
        let lon = pair[1].as_f64().ok_or(ParseError::NotAPairList)?;
        points.push(GeoPoint::new(lat, lon)?);
    }

    if points.len() < MIN_VERTICES {
        return Err(ValidationError::TooFewPoints(points.len()).into());
    }
    if points.len() > MAX_VERTICES {
        return Err(ValidationError::TooManyPoints.into());
    }

    Ok(points)
}
