pub mod builder;

pub use builder::{MAX_VERTICES, MIN_VERTICES, PolygonBuilder, StepFeedback};
