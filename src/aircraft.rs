//! Per-tail aircraft state.

use crate::classes::{ClassSpec, Time, sat_add};
use crate::rng::RngService;

/// One physical vehicle instance with a persistent identity across the run.
/// Never destroyed, never duplicated; mutated only by the component
/// currently holding it (`PendingQueue`, `ChargerBank`, or a `Flight`).
#[derive(Debug, Clone)]
pub struct Aircraft {
    pub class_id: usize,
    spec: ClassSpec,
    tail: u64,
    remaining_interval: Time,
}

impl Aircraft {
    /// Creates a new aircraft with its first fault interval already drawn.
    pub fn new(class_id: usize, spec: ClassSpec, tail: u64, rng: &mut RngService) -> Self {
        let remaining_interval = rng.draw_fault_interval(spec.faults_per_hour);
        Self {
            class_id,
            spec,
            tail,
            remaining_interval,
        }
    }

    pub fn tail(&self) -> u64 {
        self.tail
    }

    pub fn class(&self) -> ClassSpec {
        self.spec
    }

    pub fn remaining_interval(&self) -> Time {
        self.remaining_interval
    }

    /// Samples a fresh exponential fault interval with mean
    /// `3600 / faults_per_hour`, overwriting `remaining_interval`, and
    /// returns it.
    pub fn draw_fault_interval(&mut self, rng: &mut RngService) -> Time {
        let interval = rng.draw_fault_interval(self.spec.faults_per_hour);
        self.remaining_interval = interval;
        interval
    }

    /// Decrements `remaining_interval` by `seconds`, never driving it
    /// negative. No-op when the interval is infinite.
    pub fn consume_interval(&mut self, seconds: Time) {
        debug_assert!(seconds >= 0, "consume_interval called with negative duration");
        if self.remaining_interval == crate::classes::INFINITY {
            return;
        }
        self.remaining_interval = (self.remaining_interval - seconds).max(0);
    }

    /// `start + remaining_interval`, saturating at `+∞`.
    pub fn next_fault_from(&self, start: Time) -> Time {
        sat_add(start, self.remaining_interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::{CLASSES, INFINITY};

    #[test]
    fn new_aircraft_has_nonzero_remaining_interval() {
        let mut rng = RngService::new(1);
        let a = Aircraft::new(0, CLASSES[0], 1, &mut rng);
        assert!(a.remaining_interval() >= 1);
    }

    #[test]
    fn fault_free_class_has_infinite_remaining_interval() {
        let mut rng = RngService::new(1);
        let a = Aircraft::new(1, crate::classes::ClassSpec { faults_per_hour: 0.0, ..CLASSES[0] }, 1, &mut rng);
        assert_eq!(a.remaining_interval(), INFINITY);
        assert_eq!(a.next_fault_from(100), INFINITY);
    }

    #[test]
    fn consume_interval_never_goes_negative() {
        let mut rng = RngService::new(1);
        let mut a = Aircraft::new(0, CLASSES[0], 1, &mut rng);
        let remaining = a.remaining_interval();
        a.consume_interval(remaining + 1000);
        assert_eq!(a.remaining_interval(), 0);
    }

    #[test]
    fn consume_interval_is_noop_when_infinite() {
        let mut rng = RngService::new(1);
        let mut a = Aircraft::new(1, crate::classes::ClassSpec { faults_per_hour: 0.0, ..CLASSES[0] }, 1, &mut rng);
        a.consume_interval(99999);
        assert_eq!(a.remaining_interval(), INFINITY);
    }
}
