//! polyzone - Polygonal geofence zones for tracked devices
//!
//! Zones are simple polygons over raw lat/lon (treated as a flat plane, no
//! geodesic correction). A zone is built interactively one vertex at a time
//! with [`PolygonBuilder`], persisted as a list of `[lat, lon]` pairs, and
//! evaluated on every device position update with the ray-casting test in
//! [`geometry::contains`].

pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod sensor;
pub mod store;
pub mod wizard;

pub use domain::{Zone, parse_coordinates, shape_label};
pub use error::{ParseError, ValidationError};
pub use geometry::{GeoPoint, contains};
pub use sensor::{SensorState, ZoneSensor};
pub use store::ZoneStore;
pub use wizard::{MAX_VERTICES, MIN_VERTICES, PolygonBuilder, StepFeedback};
