//! Scripted target motion.

use lidar_track_core::{Detection, Point, Vector};

use crate::config::TargetScript;

/// A spherical target moving under constant acceleration
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedTarget {
    pub name: String,
    pub position: Point,
    pub velocity: Vector,
    pub acceleration: Vector,
    /// Hit radius around `position`
    pub radius: f64,
}

impl SimulatedTarget {
    pub fn from_script(script: &TargetScript) -> Self {
        SimulatedTarget {
            name: script.name.clone(),
            position: script.position,
            velocity: script.velocity,
            acceleration: script.acceleration,
            radius: script.radius,
        }
    }

    /// Move forward by `dt` seconds (semi-implicit Euler)
    pub fn advance(&mut self, dt: f64) {
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
    }

    /// Whether the segment `from`..`to` passes within the hit radius
    pub fn intersects(&self, from: &Point, to: &Point) -> bool {
        let segment = *to - *from;
        let length_sq = segment.norm_squared();
        let t = if length_sq > 0.0 {
            ((self.position - *from).dot(&segment) / length_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let closest = *from + segment * t;
        (self.position - closest).norm() <= self.radius
    }

    pub fn detection(&self) -> Detection {
        Detection {
            name: self.name.clone(),
            position: self.position,
            velocity: self.velocity,
        }
    }
}
