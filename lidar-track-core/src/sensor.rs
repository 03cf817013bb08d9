//! Sensor Host Interface
//!
//! The core never talks to hardware. Hosts implement [`SensorArray`] to
//! expose their ray-casting sensors: a discovery query returning handles,
//! and a probe call that casts one ray and reports what it hit.
//!
//! ```rust,ignore
//! struct Cameras { /* host state */ }
//!
//! impl SensorArray for Cameras {
//!     fn origin(&self) -> Point { self.vehicle_position() }
//!     fn discover(&mut self) -> Vec<SensorHandle> { self.camera_ids() }
//!     fn probe(&mut self, sensor: SensorHandle, _: &Point, aim: &Point) -> Option<Detection> {
//!         self.camera(sensor)?.raycast(aim)
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{Point, Vector};

/// Opaque identifier of one sensor, assigned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SensorHandle(pub u32);

impl std::fmt::Display for SensorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sensor#{}", self.0)
    }
}

/// An entity returned by a successful probe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    /// Name reported by the sensor
    pub name: String,
    /// World position of the detected entity
    pub position: Point,
    /// World velocity of the detected entity
    pub velocity: Vector,
}

/// Result of a single probe
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeResult {
    Hit(Detection),
    Miss,
}

impl ProbeResult {
    pub fn is_hit(&self) -> bool {
        matches!(self, ProbeResult::Hit(_))
    }
}

impl From<Option<Detection>> for ProbeResult {
    fn from(detection: Option<Detection>) -> Self {
        match detection {
            Some(d) => ProbeResult::Hit(d),
            None => ProbeResult::Miss,
        }
    }
}

/// Host-provided array of forward-facing ray sensors.
///
/// The controller calls [`discover`](SensorArray::discover) once per
/// reacquisition cycle and [`probe`](SensorArray::probe) once per candidate
/// direction. A handle that is no longer valid on the host side should
/// simply return `None`.
pub trait SensorArray {
    /// Current position rays are cast from
    fn origin(&self) -> Point;

    /// Sensors currently available, in round-robin order
    fn discover(&mut self) -> Vec<SensorHandle>;

    /// Cast one ray from `origin` toward `aim`
    fn probe(&mut self, sensor: SensorHandle, origin: &Point, aim: &Point) -> Option<Detection>;
}
