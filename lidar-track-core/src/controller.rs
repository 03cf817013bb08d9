//! Reacquisition Controller
//!
//! Owns the tracked target and the sensor ring, and runs one reacquisition
//! cycle every Nth host tick:
//!
//! 1. refresh the sensor ring from the host
//! 2. predict the target position from its last known state
//! 3. probe the predicted point directly
//! 4. on a miss, sweep the [`SearchPattern`] round-robin across sensors
//! 5. on the first hit replace the tracked target, otherwise keep it stale
//!
//! A cycle always runs to completion within the call that starts it.

use nalgebra::Unit;
use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::error::TrackError;
use crate::predictor::predict;
use crate::ring::SensorRing;
use crate::search::{aim_point, base_vector, probe_length, SearchPattern};
use crate::sensor::{Detection, ProbeResult, SensorArray};
use crate::status::TrackerStatus;
use crate::{Point, Vector};

/// Last known state of the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedTarget {
    /// Name reported by the last detection, `None` for a seed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Position at last contact (detection plus configured offset)
    pub position: Point,
    /// Velocity at last contact
    pub velocity: Vector,
    /// Seconds since last contact
    pub age: f64,
}

impl TrackedTarget {
    /// Initial estimate before any detection
    pub fn seed(position: Point, velocity: Vector) -> Self {
        TrackedTarget {
            name: None,
            position,
            velocity,
            age: 0.0,
        }
    }

    fn from_detection(detection: &Detection, offset: &Vector) -> Self {
        TrackedTarget {
            name: Some(detection.name.clone()),
            position: detection.position + *offset,
            velocity: detection.velocity,
            age: 0.0,
        }
    }

    /// Where the target should be now
    pub fn predicted_position(&self) -> Point {
        predict(&self.position, &self.velocity, self.age)
    }

    /// True once a real detection has replaced the seed
    pub fn has_contact(&self) -> bool {
        self.name.is_some()
    }
}

/// Run something every Nth tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    every: u32,
    counter: u32,
}

impl Cadence {
    pub fn every(ticks: u32) -> Self {
        Cadence {
            every: ticks.max(1),
            counter: 0,
        }
    }

    /// Count one tick; true when this tick is due
    pub fn tick(&mut self) -> bool {
        self.counter += 1;
        if self.counter >= self.every {
            self.counter = 0;
            true
        } else {
            false
        }
    }

    pub fn period(&self) -> u32 {
        self.every
    }
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControllerState {
    /// Waiting for the next due tick
    Idle,
    /// Reacquisition cycle in progress
    Searching,
}

/// Which probe of a cycle made contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbePhase {
    /// The probe at the predicted point
    Direct,
    /// A search pattern offset, by position in the pattern
    Search { index: usize },
}

/// Result of one host tick
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Tick not due for a reacquisition attempt
    Waiting,
    /// Target found, tracked state replaced
    Reacquired {
        detection: Detection,
        phase: ProbePhase,
        probes: usize,
    },
    /// Every candidate direction probed without contact
    Exhausted { probes: usize },
    /// Sensor ring empty, nothing probed
    NoSensors,
}

impl CycleOutcome {
    pub fn is_reacquired(&self) -> bool {
        matches!(self, CycleOutcome::Reacquired { .. })
    }

    /// Probes issued during the tick
    pub fn probes(&self) -> usize {
        match self {
            CycleOutcome::Reacquired { probes, .. } | CycleOutcome::Exhausted { probes } => {
                *probes
            }
            CycleOutcome::Waiting | CycleOutcome::NoSensors => 0,
        }
    }
}

/// Geometry of one reacquisition cycle, computed without probing
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
    /// Probe origin
    pub origin: Point,
    /// Predicted target position
    pub predicted: Point,
    /// Distance from origin to the predicted position
    pub distance: f64,
    /// Direct probe vector relative to the origin
    pub base: Vector,
    /// Expected lateral drift in meters
    pub uncertainty: f64,
    /// Prediction coincided with the origin; `base` uses a fallback direction
    pub degenerate: bool,
    spacing: f64,
}

impl SearchPlan {
    /// World-space aim point of the direct probe
    pub fn direct_aim(&self) -> Point {
        self.origin + self.base
    }

    /// Fresh search pattern for this plan
    pub fn pattern(&self) -> SearchPattern {
        // With no distance every atan2 angle would be 90 degrees; use the probe range instead
        let range = if self.degenerate {
            self.base.norm()
        } else {
            self.distance
        };
        SearchPattern::new(self.uncertainty, range, self.spacing)
    }

    /// World-space aim points of the search pattern, in probe order
    pub fn aim_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.pattern()
            .map(move |offset| aim_point(&self.origin, &self.base, &offset))
    }
}

/// Target reacquisition state machine
#[derive(Debug, Clone)]
pub struct ReacquisitionController {
    config: SearchConfig,
    target: TrackedTarget,
    ring: SensorRing,
    cadence: Cadence,
    state: ControllerState,
    /// Last usable aim direction, for degenerate geometry
    last_direction: Option<Unit<Vector>>,
    cycles: u64,
    reacquisitions: u64,
}

impl ReacquisitionController {
    /// Create a controller tracking from `seed`
    pub fn new(config: SearchConfig, seed: TrackedTarget) -> Result<Self, TrackError> {
        config.validate()?;
        Ok(ReacquisitionController {
            cadence: Cadence::every(config.cycle_decimation),
            config,
            target: seed,
            ring: SensorRing::default(),
            state: ControllerState::Idle,
            last_direction: None,
            cycles: 0,
            reacquisitions: 0,
        })
    }

    /// Start from a pre-built sensor ring (keeps its cursor across the first refresh)
    pub fn with_sensor_ring(mut self, ring: SensorRing) -> Self {
        self.ring = ring;
        self
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn target(&self) -> &TrackedTarget {
        &self.target
    }

    pub fn ring(&self) -> &SensorRing {
        &self.ring
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Snapshot for diagnostic display
    pub fn status(&self) -> TrackerStatus {
        TrackerStatus {
            age: self.target.age,
            last_contact: self.target.name.clone(),
            position: self.target.position,
            velocity: self.target.velocity,
            cycles: self.cycles,
            reacquisitions: self.reacquisitions,
        }
    }

    /// Host tick entry point.
    ///
    /// Adds `elapsed` seconds to the time since last contact and, if this
    /// tick is due, runs a full reacquisition cycle.
    pub fn tick<S: SensorArray>(
        &mut self,
        elapsed: f64,
        sensors: &mut S,
    ) -> Result<CycleOutcome, TrackError> {
        if !elapsed.is_finite() || elapsed < 0.0 {
            return Err(TrackError::InvalidElapsedTime(elapsed));
        }
        self.target.age += elapsed;

        if !self.cadence.tick() {
            return Ok(CycleOutcome::Waiting);
        }
        Ok(self.reacquire(sensors))
    }

    /// Run one reacquisition cycle now, ignoring the cadence
    pub fn reacquire<S: SensorArray>(&mut self, sensors: &mut S) -> CycleOutcome {
        self.state = ControllerState::Searching;
        self.cycles += 1;
        self.ring.refresh(sensors.discover());

        let outcome = self.search(sensors);

        match &outcome {
            CycleOutcome::Reacquired {
                detection,
                phase,
                probes,
            } => {
                log::info!(
                    "Reacquired {} at {:?} after {} probes ({:?})",
                    detection.name,
                    detection.position,
                    probes,
                    phase
                );
                self.target = TrackedTarget::from_detection(detection, &self.config.target_offset);
                self.reacquisitions += 1;
            }
            CycleOutcome::Exhausted { probes } => {
                log::debug!(
                    "Search exhausted after {} probes, target stale for {:.3}s",
                    probes,
                    self.target.age
                );
            }
            CycleOutcome::NoSensors => {
                log::warn!(
                    "{}, target stale for {:.3}s",
                    TrackError::NoSensorsAvailable,
                    self.target.age
                );
            }
            CycleOutcome::Waiting => {}
        }

        self.state = ControllerState::Idle;
        outcome
    }

    /// Compute the geometry of a cycle from `origin` without probing
    pub fn plan(&self, origin: &Point) -> SearchPlan {
        let predicted = self.target.predicted_position();
        let to_target = predicted - *origin;
        let distance = to_target.norm();

        let (base, degenerate) = match base_vector(&to_target, &self.config) {
            Ok(base) => (base, false),
            Err(err) => {
                let direction = self
                    .last_direction
                    .unwrap_or_else(|| Unit::new_normalize(self.config.fallback_direction));
                // Zero overshoot would leave a zero-length probe at the origin
                let length = probe_length(distance, &self.config)
                    .max(self.config.grid_spacing)
                    .min(self.config.max_probe_distance);
                log::warn!("{}, aiming along {:?}", err, direction.into_inner());
                (direction.into_inner() * length, true)
            }
        };

        SearchPlan {
            origin: *origin,
            predicted,
            distance,
            base,
            uncertainty: self.target.age * self.config.uncertainty_per_second,
            degenerate,
            spacing: self.config.grid_spacing,
        }
    }

    fn search<S: SensorArray>(&mut self, sensors: &mut S) -> CycleOutcome {
        if self.ring.is_empty() {
            return CycleOutcome::NoSensors;
        }

        let origin = sensors.origin();
        let plan = self.plan(&origin);
        if !plan.degenerate {
            self.last_direction = Unit::try_new(plan.base, f64::EPSILON);
        }

        log::debug!(
            "Cycle {}: predicted {:?} at {:.1}m, uncertainty {:.1}m, {} sensors",
            self.cycles,
            plan.predicted,
            plan.distance,
            plan.uncertainty,
            self.ring.len()
        );

        let mut probes = 1;
        if let ProbeResult::Hit(detection) = self.probe(sensors, &plan.origin, &plan.direct_aim()) {
            return CycleOutcome::Reacquired {
                detection,
                phase: ProbePhase::Direct,
                probes,
            };
        }

        for (index, aim) in plan.aim_points().enumerate() {
            probes += 1;
            if let ProbeResult::Hit(detection) = self.probe(sensors, &plan.origin, &aim) {
                return CycleOutcome::Reacquired {
                    detection,
                    phase: ProbePhase::Search { index },
                    probes,
                };
            }
        }

        CycleOutcome::Exhausted { probes }
    }

    fn probe<S: SensorArray>(
        &mut self,
        sensors: &mut S,
        origin: &Point,
        aim: &Point,
    ) -> ProbeResult {
        match self.ring.next_sensor() {
            Ok(sensor) => {
                let result = ProbeResult::from(sensors.probe(sensor, origin, aim));
                log::trace!("{} probe {:?}: hit={}", sensor, aim, result.is_hit());
                result
            }
            Err(err) => {
                log::warn!("{}", err);
                ProbeResult::Miss
            }
        }
    }
}
