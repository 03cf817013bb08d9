//! Search Pattern Generation
//!
//! When a direct probe at the predicted point misses, the controller sweeps a
//! grid of directions around it. Grid points are a fixed lateral distance
//! apart at the target's range, so the search footprint stays the same size
//! in meters regardless of how far away the target is.
//!
//! # Ordering
//!
//! For `R = ring_count(uncertainty, spacing)` and ring index `k = 1..R-1`:
//!
//! | Phase | Offsets (pitch, yaw) | Count |
//! |-------|----------------------|-------|
//! | Pitch axis | `(+θk, 0)`, `(-θk, 0)` for each k | `2(R-1)` |
//! | Yaw axis | `(0, +θk)`, `(0, -θk)` for each k | `2(R-1)` |
//! | Off axis | k1 outer (pitch), k2 inner (yaw); yaw/pitch signs `++`, `-+`, `--`, `+-` | `4(R-1)²` |
//!
//! where `θk = atan2(spacing * k, distance)`.

use std::iter::FusedIterator;

use nalgebra::{Unit, UnitQuaternion};
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::error::TrackError;
use crate::{Point, Vector};

/// Angular deflection from the base aim vector, in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchOffset {
    /// Rotation about the lateral (X) axis
    pub pitch: f64,
    /// Rotation about the vertical (Y) axis
    pub yaw: f64,
}

impl SearchOffset {
    pub fn new(pitch: f64, yaw: f64) -> Self {
        SearchOffset { pitch, yaw }
    }

    /// Rotation taking the base vector to this offset: pitch first, then yaw
    pub fn rotation(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector::y_axis(), self.yaw)
            * UnitQuaternion::from_axis_angle(&Vector::x_axis(), self.pitch)
    }
}

/// Number of grid rings needed to cover `uncertainty` meters of drift.
///
/// Ring 0 is the direct probe, so a result of 0 or 1 means no search.
pub fn ring_count(uncertainty: f64, spacing: f64) -> usize {
    if !(uncertainty > 0.0 && spacing > 0.0) {
        return 0;
    }
    (uncertainty / spacing).ceil() as usize
}

/// Angle that displaces a ray `spacing * k` meters sideways at `distance`
pub fn offset_angle(k: usize, spacing: f64, distance: f64) -> f64 {
    (spacing * k as f64).atan2(distance)
}

/// Length of the probe for a target `distance` meters away.
///
/// Overshoots the target to tolerate short-range prediction error, but never
/// beyond the sensor's maximum range.
pub fn probe_length(distance: f64, config: &SearchConfig) -> f64 {
    let overshot = distance + config.probe_overshoot;
    if overshot > config.max_probe_distance {
        config.max_probe_distance
    } else {
        overshot
    }
}

/// Aim vector (relative to the origin) for the direct probe.
///
/// Fails with [`TrackError::DegenerateGeometry`] when `to_target` has no
/// usable direction.
pub fn base_vector(to_target: &Vector, config: &SearchConfig) -> Result<Vector, TrackError> {
    let distance = to_target.norm();
    let direction =
        Unit::try_new(*to_target, f64::EPSILON).ok_or(TrackError::DegenerateGeometry)?;
    Ok(direction.into_inner() * probe_length(distance, config))
}

/// World-space aim point for `offset` around `base`
pub fn aim_point(origin: &Point, base: &Vector, offset: &SearchOffset) -> Point {
    *origin + offset.rotation() * *base
}

/// Lazy, ordered sequence of search offsets.
///
/// Offsets are computed on demand from the position in the sequence, so
/// nothing is allocated and the iterator knows its exact length.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPattern {
    /// Ring indices per axis (ring count minus one)
    steps: usize,
    distance: f64,
    spacing: f64,
    index: usize,
    len: usize,
}

impl SearchPattern {
    /// Build the pattern for a given uncertainty radius and target distance
    pub fn new(uncertainty: f64, distance: f64, spacing: f64) -> Self {
        let steps = ring_count(uncertainty, spacing).saturating_sub(1);
        let len = steps
            .saturating_mul(4)
            .saturating_add(steps.saturating_mul(steps).saturating_mul(4));
        SearchPattern {
            steps,
            distance,
            spacing,
            index: 0,
            len,
        }
    }

    /// Number of grid rings, counting the direct probe as ring 0
    pub fn ring_count(&self) -> usize {
        if self.steps == 0 {
            0
        } else {
            self.steps + 1
        }
    }

    /// Total offsets in the pattern, consumed or not
    pub fn total(&self) -> usize {
        self.len
    }

    fn angle(&self, k: usize) -> f64 {
        offset_angle(k, self.spacing, self.distance)
    }

    fn offset_at(&self, i: usize) -> SearchOffset {
        let axis = 2 * self.steps;

        if i < axis {
            let theta = signed(self.angle(i / 2 + 1), i % 2 == 0);
            return SearchOffset::new(theta, 0.0);
        }

        if i < 2 * axis {
            let j = i - axis;
            let theta = signed(self.angle(j / 2 + 1), j % 2 == 0);
            return SearchOffset::new(0.0, theta);
        }

        let j = i - 2 * axis;
        let cell = j / 4;
        let pitch = self.angle(cell / self.steps + 1);
        let yaw = self.angle(cell % self.steps + 1);
        match j % 4 {
            0 => SearchOffset::new(pitch, yaw),
            1 => SearchOffset::new(pitch, -yaw),
            2 => SearchOffset::new(-pitch, -yaw),
            _ => SearchOffset::new(-pitch, yaw),
        }
    }
}

fn signed(angle: f64, positive: bool) -> f64 {
    if positive {
        angle
    } else {
        -angle
    }
}

impl Iterator for SearchPattern {
    type Item = SearchOffset;

    fn next(&mut self) -> Option<SearchOffset> {
        if self.index >= self.len {
            return None;
        }
        let offset = self.offset_at(self.index);
        self.index += 1;
        Some(offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SearchPattern {}

impl FusedIterator for SearchPattern {}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_ring_count() {
        assert_eq!(ring_count(0.0, 4.0), 0);
        assert_eq!(ring_count(2.4, 4.0), 1);
        assert_eq!(ring_count(4.0, 4.0), 1);
        assert_eq!(ring_count(4.8, 4.0), 2);
        assert_eq!(ring_count(8.0, 4.0), 2);
        assert_eq!(ring_count(8.1, 4.0), 3);
        assert_eq!(ring_count(-3.0, 4.0), 0);
    }

    #[test]
    fn test_no_offsets_within_grid_spacing() {
        for uncertainty in [0.0, 0.5, 2.4, 3.999, 4.0] {
            let pattern = SearchPattern::new(uncertainty, 1000.0, 4.0);
            assert_eq!(pattern.len(), 0, "uncertainty {}", uncertainty);
            assert_eq!(pattern.count(), 0);
        }
    }

    #[test]
    fn test_offset_counts() {
        // R=2 -> 8, R=3 -> 24, R=5 -> 80
        for (uncertainty, expected) in [(4.8, 8), (12.0, 24), (17.0, 80)] {
            let pattern = SearchPattern::new(uncertainty, 500.0, 4.0);
            assert_eq!(pattern.total(), expected);
            assert_eq!(pattern.len(), expected);
            assert_eq!(pattern.count(), expected);
        }
    }

    #[test]
    fn test_offset_order_two_rings() {
        let theta = offset_angle(1, 4.0, 1000.0);
        let offsets: Vec<SearchOffset> = SearchPattern::new(6.0, 1000.0, 4.0).collect();

        assert_eq!(
            offsets,
            vec![
                SearchOffset::new(theta, 0.0),
                SearchOffset::new(-theta, 0.0),
                SearchOffset::new(0.0, theta),
                SearchOffset::new(0.0, -theta),
                SearchOffset::new(theta, theta),
                SearchOffset::new(theta, -theta),
                SearchOffset::new(-theta, -theta),
                SearchOffset::new(-theta, theta),
            ]
        );
    }

    #[test]
    fn test_offset_order_three_rings() {
        let distance = 750.0;
        let t1 = offset_angle(1, 4.0, distance);
        let t2 = offset_angle(2, 4.0, distance);
        let offsets: Vec<SearchOffset> = SearchPattern::new(10.0, distance, 4.0).collect();
        assert_eq!(offsets.len(), 24);

        // Pitch axis, ascending k
        assert_eq!(&offsets[0..4], &[
            SearchOffset::new(t1, 0.0),
            SearchOffset::new(-t1, 0.0),
            SearchOffset::new(t2, 0.0),
            SearchOffset::new(-t2, 0.0),
        ]);
        // Yaw axis, ascending k
        assert_eq!(&offsets[4..8], &[
            SearchOffset::new(0.0, t1),
            SearchOffset::new(0.0, -t1),
            SearchOffset::new(0.0, t2),
            SearchOffset::new(0.0, -t2),
        ]);
        // k1=1, k2=1
        assert_eq!(offsets[8], SearchOffset::new(t1, t1));
        assert_eq!(offsets[11], SearchOffset::new(-t1, t1));
        // k1=1, k2=2
        assert_eq!(offsets[12], SearchOffset::new(t1, t2));
        assert_eq!(offsets[13], SearchOffset::new(t1, -t2));
        // k1=2, k2=1
        assert_eq!(offsets[16], SearchOffset::new(t2, t1));
        // k1=2, k2=2, last quadrant
        assert_eq!(offsets[23], SearchOffset::new(-t2, t2));
    }

    #[test]
    fn test_pattern_is_reproducible() {
        let a: Vec<SearchOffset> = SearchPattern::new(31.0, 1200.0, 4.0).collect();
        let b: Vec<SearchOffset> = SearchPattern::new(31.0, 1200.0, 4.0).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_size_hint_tracks_consumption() {
        let mut pattern = SearchPattern::new(4.8, 100.0, 4.0);
        assert_eq!(pattern.len(), 8);
        pattern.next();
        pattern.next();
        assert_eq!(pattern.len(), 6);
        assert_eq!(pattern.by_ref().count(), 6);
        assert_eq!(pattern.next(), None);
    }

    #[test]
    fn test_grid_spacing_constant_at_range() {
        for distance in [100.0, 1000.0, 2400.0] {
            for k in 1..5 {
                let theta = offset_angle(k, 4.0, distance);
                assert!(close(theta.tan() * distance, 4.0 * k as f64));
            }
        }
    }

    #[test]
    fn test_base_vector_overshoot() {
        let config = SearchConfig::default();
        let base = base_vector(&Vector::new(1000.0, 0.0, 0.0), &config).unwrap();
        assert!(close(base.norm(), 1100.0));
        assert!(close(base.x, 1100.0));
    }

    #[test]
    fn test_base_vector_clamped() {
        let config = SearchConfig::default();
        let base = base_vector(&Vector::new(0.0, 0.0, -2600.0), &config).unwrap();
        assert!(close(base.norm(), 2500.0));
        assert!(close(base.z, -2500.0));

        // Overshoot alone crosses max range
        let base = base_vector(&Vector::new(0.0, 2450.0, 0.0), &config).unwrap();
        assert!(close(base.norm(), 2500.0));
    }

    #[test]
    fn test_base_vector_degenerate() {
        let config = SearchConfig::default();
        assert!(matches!(
            base_vector(&Vector::zeros(), &config),
            Err(TrackError::DegenerateGeometry)
        ));
    }

    #[test]
    fn test_aim_point_zero_offset() {
        let origin = Point::new(10.0, 20.0, 30.0);
        let base = Vector::new(0.0, 0.0, -500.0);
        let aim = aim_point(&origin, &base, &SearchOffset::default());
        assert!((aim - Point::new(10.0, 20.0, -470.0)).norm() < EPSILON);
    }

    #[test]
    fn test_aim_point_yaw_rotates_about_vertical() {
        let base = Vector::new(0.0, 0.0, -1000.0);
        let theta = 0.1;
        let aim = aim_point(&Point::origin(), &base, &SearchOffset::new(0.0, theta));

        assert!(close(aim.x, -1000.0 * theta.sin()));
        assert!(close(aim.y, 0.0));
        assert!(close(aim.z, -1000.0 * theta.cos()));
    }

    #[test]
    fn test_aim_point_pitch_rotates_about_lateral() {
        let base = Vector::new(0.0, 0.0, -1000.0);
        let theta = 0.1;
        let aim = aim_point(&Point::origin(), &base, &SearchOffset::new(theta, 0.0));

        assert!(close(aim.x, 0.0));
        assert!(close(aim.y, 1000.0 * theta.sin()));
        assert!(close(aim.z, -1000.0 * theta.cos()));
    }

    #[test]
    fn test_aim_point_pitch_then_yaw() {
        let base = Vector::new(0.0, 0.0, -1000.0);
        let offset = SearchOffset::new(0.2, 0.3);
        let aim = aim_point(&Point::origin(), &base, &offset);

        let pitched = aim_point(&Point::origin(), &base, &SearchOffset::new(0.2, 0.0));
        let expected = UnitQuaternion::from_axis_angle(&Vector::y_axis(), 0.3) * pitched.coords;
        assert!((aim.coords - expected).norm() < 1e-6);
        // Rotation preserves probe length
        assert!(close(aim.coords.norm(), 1000.0));
    }
}
