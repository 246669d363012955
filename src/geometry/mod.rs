pub mod containment;
pub mod point;

pub use containment::contains;
pub use point::GeoPoint;
