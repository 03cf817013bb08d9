//! Tracker Status
//!
//! Snapshot of the controller for diagnostic output. The text form mirrors a
//! cockpit display: seconds since last contact on the first line, and the
//! name of the last detected entity below it once there is one.

use serde::{Deserialize, Serialize};

use crate::{Point, Vector};

/// Diagnostic snapshot of the tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerStatus {
    /// Seconds since last contact
    pub age: f64,

    /// Name of the last detected entity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_contact: Option<String>,

    /// Last known position
    pub position: Point,

    /// Last known velocity
    pub velocity: Vector,

    /// Reacquisition cycles run so far
    pub cycles: u64,

    /// Cycles that ended with a detection
    pub reacquisitions: u64,
}

impl std::fmt::Display for TrackerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}", self.age)?;
        if let Some(name) = &self.last_contact {
            write!(f, "\n{}", name)?;
        }
        Ok(())
    }
}
