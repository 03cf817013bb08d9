//! Simulated sensor array.

use lidar_track_core::{Detection, Point, SensorArray, SensorHandle};

use crate::target::SimulatedTarget;

/// Forward-facing ray sensors mounted at a single point.
///
/// A probe hits when the ray segment from the origin to the aim point passes
/// within the target's radius. Field of view and occlusion are not modeled.
#[derive(Debug, Clone)]
pub struct SimulatedSensorArray {
    origin: Point,
    sensor_count: u32,
    target: SimulatedTarget,
    probe_counts: Vec<u64>,
    total_probes: u64,
}

impl SimulatedSensorArray {
    pub fn new(origin: Point, sensor_count: u32, target: SimulatedTarget) -> Self {
        SimulatedSensorArray {
            origin,
            sensor_count,
            target,
            probe_counts: vec![0; sensor_count as usize],
            total_probes: 0,
        }
    }

    pub fn target(&self) -> &SimulatedTarget {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut SimulatedTarget {
        &mut self.target
    }

    /// Add or remove sensors; takes effect at the next discovery
    pub fn set_sensor_count(&mut self, sensor_count: u32) {
        log::info!("Sensor count {} -> {}", self.sensor_count, sensor_count);
        self.sensor_count = sensor_count;
        self.probe_counts.resize(sensor_count as usize, 0);
    }

    /// Probes issued per current sensor
    pub fn probe_counts(&self) -> &[u64] {
        &self.probe_counts
    }

    /// Probes issued since start, including by sensors since removed
    pub fn total_probes(&self) -> u64 {
        self.total_probes
    }
}

impl SensorArray for SimulatedSensorArray {
    fn origin(&self) -> Point {
        self.origin
    }

    fn discover(&mut self) -> Vec<SensorHandle> {
        (0..self.sensor_count).map(SensorHandle).collect()
    }

    fn probe(&mut self, sensor: SensorHandle, origin: &Point, aim: &Point) -> Option<Detection> {
        // Removed sensors see nothing
        let count = self.probe_counts.get_mut(sensor.0 as usize)?;
        *count += 1;
        self.total_probes += 1;

        if self.target.intersects(origin, aim) {
            Some(self.target.detection())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use lidar_track_core::Vector;

    use super::*;

    fn array(sensor_count: u32) -> SimulatedSensorArray {
        let target = SimulatedTarget {
            name: "Target Drone".to_string(),
            position: Point::new(0.0, 0.0, -500.0),
            velocity: Vector::new(1.0, 0.0, 0.0),
            acceleration: Vector::zeros(),
            radius: 3.0,
        };
        SimulatedSensorArray::new(Point::origin(), sensor_count, target)
    }

    #[test]
    fn test_discover() {
        let mut array = array(3);
        assert_eq!(
            array.discover(),
            vec![SensorHandle(0), SensorHandle(1), SensorHandle(2)]
        );
        array.set_sensor_count(0);
        assert!(array.discover().is_empty());
    }

    #[test]
    fn test_probe_hit_and_miss() {
        let mut array = array(2);
        let origin = Point::origin();

        let hit = array.probe(SensorHandle(0), &origin, &Point::new(0.0, 0.0, -600.0));
        assert_eq!(hit.unwrap().velocity, Vector::new(1.0, 0.0, 0.0));

        let miss = array.probe(SensorHandle(1), &origin, &Point::new(0.0, 50.0, -600.0));
        assert!(miss.is_none());

        assert_eq!(array.probe_counts(), &[1, 1]);
        assert_eq!(array.total_probes(), 2);
    }

    #[test]
    fn test_total_survives_shrink() {
        let mut array = array(3);
        let aim = Point::new(0.0, 50.0, -600.0);
        for sensor in 0..3 {
            array.probe(SensorHandle(sensor), &Point::origin(), &aim);
        }

        array.set_sensor_count(1);
        assert_eq!(array.probe_counts(), &[1]);
        assert_eq!(array.total_probes(), 3);
    }

    #[test]
    fn test_removed_sensor_misses() {
        let mut array = array(1);
        let hit = array.probe(SensorHandle(4), &Point::origin(), &Point::new(0.0, 0.0, -600.0));
        assert!(hit.is_none());
        assert_eq!(array.total_probes(), 0);
    }
}
