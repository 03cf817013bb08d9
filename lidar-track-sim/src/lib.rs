//! Simulated host for LIDAR target reacquisition.
//!
//! Plays the role of the vehicle that carries the sensors: it owns a scripted
//! target, a set of simulated ray sensors, and calls the controller at a fixed
//! tick, the way an in-game script would be called by its host.
//!
//! ```rust,ignore
//! use lidar_track_sim::{SimConfig, Simulation};
//!
//! let config = SimConfig::load("scenario.json")?;
//! let mut sim = Simulation::new(&config)?;
//! for report in sim.run(config.ticks)? {
//!     println!("{}", report.status);
//! }
//! ```

pub mod array;
pub mod config;
pub mod error;
pub mod simulation;
pub mod target;

pub use array::SimulatedSensorArray;
pub use config::{SimConfig, TargetScript};
pub use error::SimError;
pub use simulation::{Simulation, TickReport};
pub use target::SimulatedTarget;
