//! `Flight`: the ephemeral event source representing one aircraft airborne.

use crate::aircraft::Aircraft;
use crate::charger::ChargerBank;
use crate::classes::{Time, sat_add};
use crate::config::{FaultOption, SimSettings};
use crate::pending::PendingQueue;
use crate::rng::RngService;
use crate::scheduler::SchedulerCore;
use crate::stats::{FlightRecord, StatsSink};

/// One aircraft airborne from `start_time` until it lands (nominally) or is
/// grounded mid-flight by a fault. `dispatch` consumes the flight by value:
/// `Some(self)` means it stays installed (a fault fired but didn't end the
/// flight), `None` means it terminated and its aircraft was handed off.
pub struct Flight {
    aircraft: Aircraft,
    start_time: Time,
    scheduled_end: Time,
    next_fault: Time,
    faults_so_far: u32,
    passengers: u32,
    /// Start of the fault interval currently in progress; advances to `now`
    /// each time a fault fires mid-flight, so only the last segment's
    /// elapsed duration is ever deducted from the aircraft's remaining
    /// interval.
    current_interval_start: Time,
    must_ground: bool,
}

impl Flight {
    pub fn new(t0: Time, aircraft: Aircraft, passengers: u32) -> Self {
        let scheduled_end = sat_add(t0, aircraft.class().flight_seconds_full());
        let next_fault = aircraft.next_fault_from(t0);
        Self {
            start_time: t0,
            scheduled_end,
            next_fault,
            faults_so_far: 0,
            passengers,
            current_interval_start: t0,
            must_ground: false,
            aircraft,
        }
    }

    pub fn next_due_time(&self) -> Time {
        self.scheduled_end.min(self.next_fault)
    }

    fn passenger_miles(&self, duration: Time) -> f64 {
        duration as f64 * self.passengers as f64 * self.aircraft.class().cruise_mph / 3600.0
    }

    fn flight_record(&self, duration: Time, truncated: bool) -> FlightRecord {
        FlightRecord {
            class_id: self.aircraft.class_id,
            tail: self.aircraft.tail(),
            duration,
            passengers: self.passengers,
            faults: self.faults_so_far,
            passenger_miles: self.passenger_miles(duration),
            truncated,
        }
    }

    /// Completes the flight at `scheduled_end`: consumes the elapsed
    /// portion of the current fault interval, records a `FlightRecord`,
    /// and hands the aircraft to the charger (or back to the pending queue,
    /// grounded, if a mid-flight fault required it).
    fn complete(
        mut self,
        pending: &mut PendingQueue,
        charger: &mut ChargerBank,
        core: &mut SchedulerCore,
        stats: &mut StatsSink,
    ) {
        let now = self.scheduled_end;
        let elapsed = now - self.current_interval_start;
        self.aircraft.consume_interval(elapsed);

        let record = self.flight_record(now - self.start_time, false);
        stats.push_flight(record);

        if self.must_ground {
            pending.insert(self.aircraft, crate::classes::INFINITY, core);
        } else {
            charger.admit(now, self.aircraft, core);
        }
    }

    /// Dispatches at `now`. Returns `Some(self)` if the flight stays
    /// airborne (a fault fired but the flight continues), `None` if it
    /// terminated this call.
    pub fn dispatch(
        mut self,
        now: Time,
        pending: &mut PendingQueue,
        charger: &mut ChargerBank,
        core: &mut SchedulerCore,
        rng: &mut RngService,
        stats: &mut StatsSink,
        settings: &SimSettings,
    ) -> Option<Self> {
        if now == self.next_fault {
            self.faults_so_far += 1;
            let fresh = self.aircraft.draw_fault_interval(rng);
            self.next_fault = sat_add(now, fresh);
            self.current_interval_start = now;

            match settings.fault_option {
                FaultOption::CountOnly => {
                    if self.next_due_time() > now {
                        return Some(self);
                    }
                    // Fault and completion coincide at this instant; fall
                    // through to the completion path below.
                }
                FaultOption::GroundImmediately => {
                    let record = self.flight_record(now - self.start_time, true);
                    stats.push_flight(record);
                    pending.insert(self.aircraft, crate::classes::INFINITY, core);
                    return None;
                }
                FaultOption::GroundAtEnd => {
                    self.must_ground = true;
                    if self.next_due_time() > now {
                        return Some(self);
                    }
                }
            }
        }

        debug_assert_eq!(now, self.scheduled_end, "Flight dispatched at neither fault nor completion time");
        self.complete(pending, charger, core, stats);
        None
    }

    /// Horizon close-out: writes a truncated `FlightRecord` for the partial
    /// flight and drops the aircraft without transferring it anywhere.
    pub fn close_out(self, now: Time, stats: &mut StatsSink) {
        let record = self.flight_record(now - self.start_time, true);
        stats.push_flight(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::{CLASSES, ClassSpec};
    use crate::config::SimSettings;
    use std::collections::HashMap;

    fn no_fault_class() -> ClassSpec {
        ClassSpec {
            faults_per_hour: 0.0,
            ..CLASSES[0]
        }
    }

    #[test]
    fn s1_single_full_flight_then_admits_to_charger() {
        let mut rng = RngService::new(1);
        let aircraft = Aircraft::new(0, no_fault_class(), 1, &mut rng);
        let flight = Flight::new(0, aircraft, 4);
        assert_eq!(flight.next_due_time(), 6000);

        let mut pending = PendingQueue::new();
        let mut charger = ChargerBank::new(1);
        let mut stats = StatsSink::new();
        let settings = SimSettings::default();
        let mut flights = HashMap::new();
        let mut next_id = 0u64;
        let mut raw_ordering = crate::scheduler::test_support::fresh_ordering();
        let mut core = crate::scheduler::test_support::core_from(&mut raw_ordering, &mut flights, &mut next_id);

        let outcome = flight.dispatch(6000, &mut pending, &mut charger, &mut core, &mut rng, &mut stats, &settings);
        assert!(outcome.is_none());
        assert_eq!(charger.active_count(), 1);
        assert_eq!(stats.flight_records().len(), 1);
        let record = &stats.flight_records()[0];
        assert_eq!(record.duration, 6000);
        assert!((record.passenger_miles - 6000.0 * 4.0 * 120.0 / 3600.0).abs() < 1e-9);
        assert!(!record.truncated);
    }

    #[test]
    fn close_out_writes_truncated_partial_record() {
        let mut rng = RngService::new(1);
        let aircraft = Aircraft::new(0, no_fault_class(), 1, &mut rng);
        let flight = Flight::new(8160, aircraft, 4);
        let mut stats = StatsSink::new();
        flight.close_out(10800, &mut stats);
        let record = &stats.flight_records()[0];
        assert_eq!(record.duration, 2640);
        assert!(record.truncated);
    }

    #[test]
    fn ground_immediately_grounds_aircraft_on_first_fault() {
        let mut rng = RngService::new(1);
        let high_fault_class = ClassSpec {
            faults_per_hour: 3600.0,
            ..CLASSES[0]
        };
        let aircraft = Aircraft::new(0, high_fault_class, 1, &mut rng);
        let mut flight = Flight::new(0, aircraft, 4);
        let first_fault = flight.next_due_time();

        let mut pending = PendingQueue::new();
        let mut charger = ChargerBank::new(1);
        let mut stats = StatsSink::new();
        let mut settings = SimSettings::default();
        settings.fault_option = FaultOption::GroundImmediately;
        let mut flights = HashMap::new();
        let mut next_id = 0u64;
        let mut raw_ordering = crate::scheduler::test_support::fresh_ordering();
        let mut core = crate::scheduler::test_support::core_from(&mut raw_ordering, &mut flights, &mut next_id);

        let outcome = flight.dispatch(first_fault, &mut pending, &mut charger, &mut core, &mut rng, &mut stats, &settings);
        assert!(outcome.is_none());
        assert_eq!(pending.len(), 1);
        assert_eq!(pending.next_due_time(), crate::classes::INFINITY);
        assert_eq!(stats.flight_records().len(), 1);
        assert_eq!(stats.flight_records()[0].faults, 1);
        assert!(stats.flight_records()[0].truncated);
    }
}
