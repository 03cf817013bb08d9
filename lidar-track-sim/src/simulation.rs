//! Tick loop driving the controller against the simulated array.

use lidar_track_core::{
    CycleOutcome, ProbePhase, ReacquisitionController, TrackedTarget, TrackerStatus,
};
use serde::Serialize;

use crate::array::SimulatedSensorArray;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::target::SimulatedTarget;

/// What happened on one host tick
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    pub tick: u64,
    /// Simulated seconds since start
    pub time: f64,
    /// "waiting", "direct", "search", "exhausted" or "noSensors"
    pub outcome: &'static str,
    /// Pattern index of a search hit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_index: Option<usize>,
    pub probes: usize,
    /// Distance between the tracker's prediction and the true target
    pub error: f64,
    pub status: TrackerStatus,
    #[serde(skip)]
    pub cycle: CycleOutcome,
}

impl TickReport {
    pub fn is_reacquired(&self) -> bool {
        self.cycle.is_reacquired()
    }
}

fn outcome_label(outcome: &CycleOutcome) -> (&'static str, Option<usize>) {
    match outcome {
        CycleOutcome::Waiting => ("waiting", None),
        CycleOutcome::Reacquired {
            phase: ProbePhase::Direct,
            ..
        } => ("direct", None),
        CycleOutcome::Reacquired {
            phase: ProbePhase::Search { index },
            ..
        } => ("search", Some(*index)),
        CycleOutcome::Exhausted { .. } => ("exhausted", None),
        CycleOutcome::NoSensors => ("noSensors", None),
    }
}

/// Controller plus simulated world
pub struct Simulation {
    controller: ReacquisitionController,
    sensors: SimulatedSensorArray,
    tick_seconds: f64,
    tick: u64,
}

impl Simulation {
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let seed = TrackedTarget::seed(config.seed_position, config.seed_velocity);
        let controller = ReacquisitionController::new(config.search.clone(), seed)?;
        let target = SimulatedTarget::from_script(&config.target);
        let sensors = SimulatedSensorArray::new(config.origin, config.sensor_count, target);

        log::info!(
            "Simulating {} sensors, tick {:.3}s, reacquisition every {} ticks",
            config.sensor_count,
            config.tick_seconds,
            config.search.cycle_decimation
        );

        Ok(Simulation {
            controller,
            sensors,
            tick_seconds: config.tick_seconds,
            tick: 0,
        })
    }

    pub fn controller(&self) -> &ReacquisitionController {
        &self.controller
    }

    pub fn sensors(&self) -> &SimulatedSensorArray {
        &self.sensors
    }

    pub fn sensors_mut(&mut self) -> &mut SimulatedSensorArray {
        &mut self.sensors
    }

    /// Advance the world one tick, then let the controller run
    pub fn step(&mut self) -> Result<TickReport, SimError> {
        self.sensors.target_mut().advance(self.tick_seconds);
        let cycle = self.controller.tick(self.tick_seconds, &mut self.sensors)?;
        self.tick += 1;

        let predicted = self.controller.target().predicted_position();
        let error = (self.sensors.target().position - predicted).norm();
        let (outcome, search_index) = outcome_label(&cycle);

        if let CycleOutcome::Exhausted { probes } = &cycle {
            log::debug!("Tick {}: lost contact, {} probes, error {:.1}m", self.tick, probes, error);
        }

        Ok(TickReport {
            tick: self.tick,
            time: self.tick as f64 * self.tick_seconds,
            outcome,
            search_index,
            probes: cycle.probes(),
            error,
            status: self.controller.status(),
            cycle,
        })
    }

    pub fn run(&mut self, ticks: u32) -> Result<Vec<TickReport>, SimError> {
        (0..ticks).map(|_| self.step()).collect()
    }
}
