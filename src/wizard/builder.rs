use crate::domain::shape_label;
use crate::error::ValidationError;
use crate::geometry::GeoPoint;

/// Fewest vertices a finalized polygon may have.
pub const MIN_VERTICES: usize = 3;
/// Most vertices a polygon may have. Keeps the per-update containment scan
/// cheap and the setup wizard tractable.
pub const MAX_VERTICES: usize = 15;

/// Feedback returned to the wizard driver after each accepted point.
#[derive(Debug, Clone, PartialEq)]
pub struct StepFeedback {
    pub point_count: usize,
    pub shape_label: String,
    pub can_finish: bool,
}

/// Accumulates polygon vertices one wizard step at a time.
///
/// One builder per setup session, driven strictly sequentially. Every
/// transition validates before it mutates, so a rejected step leaves the
/// accumulated sequence untouched.
#[derive(Debug, Default)]
pub struct PolygonBuilder {
    points: Vec<GeoPoint>,
}

impl PolygonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vertex.
    ///
    /// Fails with `TooManyPoints` once the polygon holds 15 vertices, or
    /// with a coordinate error if the values are non-finite or outside
    /// geographic range. On success returns the updated count, the shape
    /// name for that count, and whether `finish` is now allowed.
    pub fn add_point(&mut self, lat: f64, lon: f64) -> Result<StepFeedback, ValidationError> {
        if self.points.len() >= MAX_VERTICES {
            return Err(ValidationError::TooManyPoints);
        }
        let point = GeoPoint::new(lat, lon)?;
        self.points.push(point);

        let count = self.points.len();
        Ok(StepFeedback {
            point_count: count,
            shape_label: shape_label(count),
            can_finish: count >= MIN_VERTICES,
        })
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn can_finish(&self) -> bool {
        self.points.len() >= MIN_VERTICES
    }

    /// The vertices accumulated so far, in insertion order.
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Finalize the polygon and hand the vertex sequence off.
    ///
    /// Fails with `TooFewPoints` below 3 vertices, keeping the session
    /// intact so the caller can collect more. On success the builder is
    /// spent: the sequence moves out and the session resets to empty.
    pub fn finish(&mut self) -> Result<Vec<GeoPoint>, ValidationError> {
        if self.points.len() < MIN_VERTICES {
            return Err(ValidationError::TooFewPoints(self.points.len()));
        }
        Ok(std::mem::take(&mut self.points))
    }
}
