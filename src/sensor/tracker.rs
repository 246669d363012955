use std::fmt;

use serde_json::json;

use crate::domain::Zone;
use crate::geometry::GeoPoint;

/// The two-valued state a zone sensor reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorState {
    InZone,
    NotInZone,
}

impl fmt::Display for SensorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorState::InZone => write!(f, "In zone"),
            SensorState::NotInZone => write!(f, "Not in zone"),
        }
    }
}

/// Runtime evaluator for one zone.
///
/// Holds the finalized zone and the last computed state; each position
/// update from the tracked device produces one containment test. A device
/// with no usable position (unavailable, or coordinates missing) is always
/// reported as outside.
#[derive(Debug)]
pub struct ZoneSensor {
    zone: Zone,
    entity_id: String,
    is_inside: bool,
}

impl ZoneSensor {
    pub fn new(zone: Zone) -> Self {
        // e.g. "device_tracker.james_phone" + "Work" -> sensor.customzone_james_phone_work
        let device_slug = slugify(zone.device.rsplit('.').next().unwrap_or(&zone.device));
        let entity_id = format!("sensor.customzone_{}_{}", device_slug, slugify(&zone.name));
        Self {
            zone,
            entity_id,
            is_inside: false,
        }
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    pub fn state(&self) -> SensorState {
        if self.is_inside {
            SensorState::InZone
        } else {
            SensorState::NotInZone
        }
    }

    /// Extra attributes published alongside the state.
    pub fn attributes(&self) -> serde_json::Value {
        json!({
            "device": self.zone.device,
            "polygon": self.zone.polygon,
        })
    }

    /// Feed one position update from the tracked device.
    ///
    /// `None` means the device is unavailable or reported no coordinates.
    /// Returns true when the sensor state changed, so the caller knows to
    /// republish.
    pub fn update(&mut self, position: Option<(f64, f64)>) -> bool {
        let inside = match position {
            None => {
                log::debug!("device {} is unavailable or has no coordinates", self.zone.device);
                false
            }
            Some((lat, lon)) => match GeoPoint::new(lat, lon) {
                Ok(point) => {
                    log::debug!(
                        "device {} at {}, {}, checking zone {}",
                        self.zone.device,
                        lat,
                        lon,
                        self.zone.name
                    );
                    let inside = self.zone.contains(point);
                    log::debug!(
                        "device {} is {} zone {}",
                        self.zone.device,
                        if inside { "inside" } else { "outside" },
                        self.zone.name
                    );
                    inside
                }
                Err(err) => {
                    log::error!("invalid coordinates for device {}: {}", self.zone.device, err);
                    false
                }
            },
        };

        let changed = self.is_inside != inside;
        self.is_inside = inside;
        changed
    }
}

/// Lowercase a name and collapse anything non-alphanumeric into single
/// underscores, for use in a sensor entity id.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_sep = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::zone::parse_coordinates;

    fn sensor() -> ZoneSensor {
        let polygon = parse_coordinates("[[0,0],[0,2],[2,2],[2,0]]").unwrap();
        let zone = Zone::new("Work", "device_tracker.james_phone", polygon).unwrap();
        ZoneSensor::new(zone)
    }

    #[test]
    fn test_entity_id() {
        assert_eq!(sensor().entity_id(), "sensor.customzone_james_phone_work");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Back Yard"), "back_yard");
        assert_eq!(slugify("  Café #2  "), "caf_2");
        assert_eq!(slugify("james_phone"), "james_phone");
    }

    #[test]
    fn test_update_transitions() {
        let mut s = sensor();
        assert_eq!(s.state(), SensorState::NotInZone);

        // Outside -> inside
        assert!(s.update(Some((1.0, 1.0))));
        assert_eq!(s.state(), SensorState::InZone);

        // Still inside: no change to republish
        assert!(!s.update(Some((0.5, 1.5))));

        // Inside -> outside
        assert!(s.update(Some((3.0, 3.0))));
        assert_eq!(s.state(), SensorState::NotInZone);
    }

    #[test]
    fn test_unavailable_device_forces_outside() {
        let mut s = sensor();
        s.update(Some((1.0, 1.0)));
        assert_eq!(s.state(), SensorState::InZone);

        assert!(s.update(None));
        assert_eq!(s.state(), SensorState::NotInZone);
    }

    #[test]
    fn test_invalid_coordinates_force_outside() {
        let mut s = sensor();
        s.update(Some((1.0, 1.0)));
        assert!(s.update(Some((999.0, 0.0))));
        assert_eq!(s.state(), SensorState::NotInZone);
    }

    #[test]
    fn test_attributes() {
        let s = sensor();
        let attrs = s.attributes();
        assert_eq!(attrs["device"], "device_tracker.james_phone");
        assert_eq!(attrs["polygon"][0][1], 0.0);
        assert_eq!(attrs["polygon"][2][0], 2.0);
    }
}
