pub mod tracker;

pub use tracker::{SensorState, ZoneSensor, slugify};
