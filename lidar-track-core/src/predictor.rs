//! Linear motion extrapolation.

use crate::{Point, Vector};

/// Extrapolate a position along a constant velocity.
///
/// `elapsed` is in seconds and must not be negative; the controller rejects
/// bad values before they get here.
pub fn predict(position: &Point, velocity: &Vector, elapsed: f64) -> Point {
    debug_assert!(elapsed >= 0.0, "negative elapsed time {}", elapsed);
    *position + *velocity * elapsed
}
