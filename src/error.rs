use thiserror::Error;

use crate::wizard::{MAX_VERTICES, MIN_VERTICES};

/// Validation failures surfaced synchronously to the wizard driver.
///
/// None of these corrupt already-accumulated builder state: a rejected step
/// leaves the vertex sequence exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("too few points: a zone needs at least {MIN_VERTICES} vertices, got {0}")]
    TooFewPoints(usize),

    #[error("too many points: a zone is limited to {MAX_VERTICES} vertices")]
    TooManyPoints,

    #[error("out-of-range coordinate: latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("out-of-range coordinate: longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("non-finite coordinate: {0}")]
    NonFiniteCoordinate(f64),
}

/// Failures when parsing a persisted coordinate list.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("coordinates must be a list of [lat, lon] pairs")]
    NotAPairList,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
