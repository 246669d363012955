pub mod shape;
pub mod zone;

pub use shape::shape_label;
pub use zone::{Zone, parse_coordinates};
