//! `PendingQueue`: the ordered set of aircraft waiting to fly (or
//! permanently grounded).

use std::collections::BTreeMap;

use crate::aircraft::Aircraft;
use crate::classes::{INFINITY, Time};
use crate::config::{PassengerCountOption, SimSettings};
use crate::flight::Flight;
use crate::rng::RngService;
use crate::scheduler::{SchedulerCore, SourceId};

/// Ordered by `(ready_at_time, insertion_sequence)`; an aircraft with
/// `ready_at_time == INFINITY` is permanently grounded.
#[derive(Default)]
pub struct PendingQueue {
    items: BTreeMap<(Time, u64), Aircraft>,
    seq: u64,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Smallest `ready_at_time` across all waiting aircraft, or `+∞` when
    /// empty (or when every waiting aircraft is grounded).
    pub fn next_due_time(&self) -> Time {
        self.items.keys().next().map(|(t, _)| *t).unwrap_or(INFINITY)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Inserts preserving `(ready_at, insertion order)`. Notifies
    /// `Scheduler.resort` when the insertion changes the minimum.
    pub fn insert(&mut self, aircraft: Aircraft, ready_at: Time, core: &mut SchedulerCore) {
        let old_min = self.next_due_time();
        let seq = self.seq;
        self.seq += 1;
        self.items.insert((ready_at, seq), aircraft);
        let new_min = self.next_due_time();
        if new_min != old_min {
            core.resort(SourceId::Pending, new_min);
        }
    }

    /// Pops every item with `ready_at_time <= now`, samples a passenger
    /// count for each, and installs a freshly created `Flight`. Always
    /// returns `true` (the queue stays scheduled even while empty, with
    /// `next_due_time() == +∞`).
    pub fn dispatch(
        &mut self,
        now: Time,
        core: &mut SchedulerCore,
        rng: &mut RngService,
        settings: &SimSettings,
    ) -> bool {
        let rest = self.items.split_off(&(now + 1, 0));
        let due = std::mem::replace(&mut self.items, rest);

        for (_, aircraft) in due {
            let seats = aircraft.class().seats;
            let passengers = match settings.passenger_count_option {
                PassengerCountOption::AlwaysFull => seats,
                PassengerCountOption::Random => rng.passenger_count_random(seats),
            };
            let flight = Flight::new(now, aircraft, passengers);
            core.install_flight(flight);
        }
        true
    }

    /// Pending aircraft at horizon are discarded without a statistics
    /// record, including grounded ones.
    pub fn close_out(&mut self, _now: Time) {
        self.items.clear();
    }
}
