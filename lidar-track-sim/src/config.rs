//! Scenario Configuration
//!
//! A scenario is a JSON file describing the tracker settings, the host tick,
//! the sensor array and the scripted target. Every field is optional:
//!
//! ```json
//! {
//!   "ticks": 120,
//!   "sensorCount": 6,
//!   "search": { "gridSpacing": 4.0, "cycleDecimation": 2 },
//!   "seedPosition": [269.18, 176.96, 89.21],
//!   "target": { "name": "Drone", "velocity": [12.0, 0.0, -3.0], "radius": 4.0 }
//! }
//! ```

use std::path::Path;

use lidar_track_core::{Point, SearchConfig, Vector};
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Seconds added to the contact timer on every host tick
pub const DEFAULT_TICK_SECONDS: f64 = 0.160;

fn default_seed_position() -> Point {
    Point::new(269.18, 176.96, 89.21)
}

/// Motion script of the simulated target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TargetScript {
    pub name: String,
    pub position: Point,
    pub velocity: Vector,
    pub acceleration: Vector,
    /// Hit radius in meters
    pub radius: f64,
}

impl Default for TargetScript {
    fn default() -> Self {
        TargetScript {
            name: "Target Drone".to_string(),
            position: default_seed_position(),
            velocity: Vector::zeros(),
            acceleration: Vector::zeros(),
            radius: 5.0,
        }
    }
}

/// Complete simulation scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimConfig {
    /// Tracker settings
    pub search: SearchConfig,
    /// Host tick length in seconds
    pub tick_seconds: f64,
    /// Ticks to run
    pub ticks: u32,
    /// Forward-facing sensors on the vehicle
    pub sensor_count: u32,
    /// Vehicle position (sensor origin)
    pub origin: Point,
    /// Tracker's initial estimate
    pub seed_position: Point,
    pub seed_velocity: Vector,
    pub target: TargetScript,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            search: SearchConfig::default(),
            tick_seconds: DEFAULT_TICK_SECONDS,
            ticks: 60,
            sensor_count: 4,
            origin: Point::origin(),
            seed_position: default_seed_position(),
            seed_velocity: Vector::zeros(),
            target: TargetScript::default(),
        }
    }
}

impl SimConfig {
    /// Load a scenario from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::debug!("Loaded scenario from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        self.search.validate()?;
        if !self.tick_seconds.is_finite() || self.tick_seconds <= 0.0 {
            return Err(SimError::InvalidScenario(format!(
                "tickSeconds must be positive, got {}",
                self.tick_seconds
            )));
        }
        if !self.target.radius.is_finite() || self.target.radius <= 0.0 {
            return Err(SimError::InvalidScenario(format!(
                "target radius must be positive, got {}",
                self.target.radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tick_seconds, 0.160);
        assert_eq!(config.seed_position, config.target.position);
    }

    #[test]
    fn test_partial_json() {
        let config = SimConfig::from_json(
            r#"{"sensorCount": 2, "search": {"gridSpacing": 2.0}, "target": {"radius": 1.0}}"#,
        )
        .unwrap();
        assert_eq!(config.sensor_count, 2);
        assert_eq!(config.search.grid_spacing, 2.0);
        assert_eq!(config.search.max_probe_distance, 2500.0);
        assert_eq!(config.target.radius, 1.0);
        assert_eq!(config.target.name, "Target Drone");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            SimConfig::from_json(r#"{"tickSeconds": 0.0}"#),
            Err(SimError::InvalidScenario(_))
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{"target": {"radius": -1.0}}"#),
            Err(SimError::InvalidScenario(_))
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{"search": {"maxProbeDistance": 0.0}}"#),
            Err(SimError::Track(_))
        ));
        assert!(matches!(
            SimConfig::from_json("[1, 2"),
            Err(SimError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            SimConfig::load("/nonexistent/scenario.json"),
            Err(SimError::Io { .. })
        ));
    }
}
