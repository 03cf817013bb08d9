//! LIDAR Target Reacquisition
//!
//! Platform-independent tracking core for an array of forward-facing,
//! ray-based distance sensors. Given the last known position and velocity of
//! a target and the time since it was last seen, the core predicts where the
//! target should be, probes that point directly, and on a miss sweeps a
//! widening grid of directions around it until contact is regained.
//!
//! # Architecture
//!
//! - **config**: [`SearchConfig`] with all tunable constants
//! - **predictor**: linear motion extrapolation
//! - **sensor**: the [`SensorArray`] host trait and probe result types
//! - **ring**: [`SensorRing`], round-robin sensor scheduling
//! - **search**: base vector and the [`SearchPattern`] offset generator
//! - **controller**: [`ReacquisitionController`], the per-tick state machine
//! - **status**: [`TrackerStatus`] for diagnostic output
//!
//! # Usage
//!
//! ```rust,ignore
//! use lidar_track_core::{ReacquisitionController, SearchConfig, TrackedTarget};
//!
//! let seed = TrackedTarget::seed(Point3::new(269.18, 176.96, 89.21), Vector3::zeros());
//! let mut controller = ReacquisitionController::new(SearchConfig::default(), seed)?;
//!
//! // Called by the host at a fixed cadence
//! let outcome = controller.tick(0.160, &mut sensors)?;
//! println!("{}", controller.status());
//! ```
//!
//! The core performs no I/O. Hosts implement [`SensorArray`] to connect it to
//! real or simulated sensors.

mod config;
mod controller;
mod error;
mod predictor;
mod ring;
mod search;
mod sensor;
mod status;

pub use config::SearchConfig;
pub use controller::{
    Cadence, ControllerState, CycleOutcome, ProbePhase, ReacquisitionController, SearchPlan,
    TrackedTarget,
};
pub use error::TrackError;
pub use predictor::predict;
pub use ring::SensorRing;
pub use search::{
    aim_point, base_vector, offset_angle, probe_length, ring_count, SearchOffset, SearchPattern,
};
pub use sensor::{Detection, ProbeResult, SensorArray, SensorHandle};
pub use status::TrackerStatus;

/// World-space position
pub type Point = nalgebra::Point3<f64>;

/// World-space displacement or velocity
pub type Vector = nalgebra::Vector3<f64>;
