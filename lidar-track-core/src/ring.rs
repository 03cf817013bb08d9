//! Round-robin sensor scheduling.

use crate::error::TrackError;
use crate::sensor::SensorHandle;

/// Ordered sensor handles with a rotating cursor.
///
/// Every probe takes the sensor under the cursor and moves the cursor one
/// step, wrapping at the end. The cursor is always in `[0, len)`, or 0 when
/// the ring is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorRing {
    sensors: Vec<SensorHandle>,
    cursor: usize,
}

impl SensorRing {
    /// Create a ring with the cursor on the first sensor
    pub fn new(sensors: Vec<SensorHandle>) -> Self {
        SensorRing { sensors, cursor: 0 }
    }

    /// Create a ring with a pre-set cursor (wrapped into range)
    pub fn with_cursor(sensors: Vec<SensorHandle>, cursor: usize) -> Self {
        let mut ring = SensorRing::new(sensors);
        ring.cursor = ring.wrap(cursor);
        ring
    }

    /// Replace ring membership, keeping the cursor position where possible
    pub fn refresh(&mut self, sensors: Vec<SensorHandle>) {
        if sensors.len() != self.sensors.len() {
            log::debug!(
                "Sensor ring resized from {} to {}",
                self.sensors.len(),
                sensors.len()
            );
        }
        self.sensors = sensors;
        self.cursor = self.wrap(self.cursor);
    }

    /// Take the sensor under the cursor and advance
    pub fn next_sensor(&mut self) -> Result<SensorHandle, TrackError> {
        let sensor = *self
            .sensors
            .get(self.cursor)
            .ok_or(TrackError::NoSensorsAvailable)?;
        self.cursor = self.wrap(self.cursor + 1);
        Ok(sensor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    pub fn sensors(&self) -> &[SensorHandle] {
        &self.sensors
    }

    fn wrap(&self, index: usize) -> usize {
        if self.sensors.is_empty() {
            0
        } else {
            index % self.sensors.len()
        }
    }
}
