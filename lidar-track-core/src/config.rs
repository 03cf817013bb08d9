//! Search Configuration
//!
//! All tunable constants of the reacquisition algorithm. Units are meters and
//! seconds throughout. Values deserialize from camelCase JSON; missing fields
//! fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::TrackError;
use crate::Vector;

/// Max probe range the sensors may use (meters)
pub const DEFAULT_MAX_PROBE_DISTANCE: f64 = 2500.0;

/// Distance probes overshoot the predicted point (meters)
pub const DEFAULT_PROBE_OVERSHOOT: f64 = 100.0;

/// Expected lateral deviation from course per second (meters)
pub const DEFAULT_UNCERTAINTY_PER_SECOND: f64 = 7.5;

/// Lateral spacing of the search grid (meters)
pub const DEFAULT_GRID_SPACING: f64 = 4.0;

/// Reacquisition attempt every Nth tick
pub const DEFAULT_CYCLE_DECIMATION: u32 = 2;

/// Tunable parameters for target reacquisition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    /// Longest probe the sensors may cast
    pub max_probe_distance: f64,

    /// Extra distance past the predicted point
    pub probe_overshoot: f64,

    /// Meters of lateral drift expected per second without contact
    pub uncertainty_per_second: f64,

    /// Lateral distance between neighboring search grid points
    pub grid_spacing: f64,

    /// Added to every detected position (detection point to target center)
    pub target_offset: Vector,

    /// Number of ticks per reacquisition attempt
    pub cycle_decimation: u32,

    /// Aim direction used when the prediction coincides with the origin
    /// and no earlier direction is known
    pub fallback_direction: Vector,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_probe_distance: DEFAULT_MAX_PROBE_DISTANCE,
            probe_overshoot: DEFAULT_PROBE_OVERSHOOT,
            uncertainty_per_second: DEFAULT_UNCERTAINTY_PER_SECOND,
            grid_spacing: DEFAULT_GRID_SPACING,
            target_offset: Vector::zeros(),
            cycle_decimation: DEFAULT_CYCLE_DECIMATION,
            // Sensors look down -Z
            fallback_direction: Vector::new(0.0, 0.0, -1.0),
        }
    }
}

impl SearchConfig {
    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self, TrackError> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable by the search algorithm
    pub fn validate(&self) -> Result<(), TrackError> {
        fn positive(name: &str, value: f64) -> Result<(), TrackError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TrackError::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )))
            }
        }

        positive("maxProbeDistance", self.max_probe_distance)?;
        positive("gridSpacing", self.grid_spacing)?;

        if !self.probe_overshoot.is_finite() || self.probe_overshoot < 0.0 {
            return Err(TrackError::InvalidConfig(format!(
                "probeOvershoot must not be negative, got {}",
                self.probe_overshoot
            )));
        }
        if !self.uncertainty_per_second.is_finite() || self.uncertainty_per_second < 0.0 {
            return Err(TrackError::InvalidConfig(format!(
                "uncertaintyPerSecond must not be negative, got {}",
                self.uncertainty_per_second
            )));
        }
        if self.cycle_decimation == 0 {
            return Err(TrackError::InvalidConfig(
                "cycleDecimation must be at least 1".to_string(),
            ));
        }
        if !self.target_offset.iter().all(|v| v.is_finite()) {
            return Err(TrackError::InvalidConfig(
                "targetOffset must be finite".to_string(),
            ));
        }
        let fallback = self.fallback_direction.norm();
        if !fallback.is_finite() || fallback == 0.0 {
            return Err(TrackError::InvalidConfig(
                "fallbackDirection must be a finite non-zero vector".to_string(),
            ));
        }

        Ok(())
    }
}
