//! The quantum clock: an ordered set of event sources, advanced by jumping
//! directly to the next due source rather than ticking uniformly.
//!
//! The scheduler itself never embeds a pointer back to its sources' owner.
//! It tracks only identities and due times; `PendingQueue` and `ChargerBank`
//! are owned by [`Simulation`](crate::simulation::Simulation) and borrowed
//! in for the duration of [`Scheduler::run`]. `Flight`s are ephemeral and
//! owned by the scheduler itself for their lifetime.

use std::collections::{BTreeSet, HashMap};

use crate::charger::ChargerBank;
use crate::classes::Time;
use crate::config::SimSettings;
use crate::flight::Flight;
use crate::pending::PendingQueue;
use crate::rng::RngService;
use crate::stats::StatsSink;

/// Identity of one installed event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceId {
    Pending,
    Charger,
    Flight(u64),
}

/// The ordering oracle: a balanced ordered set keyed by
/// `(next_due_time, insertion_sequence)`, plus an index for removal by
/// identity. This is the container Design Notes calls for: insert,
/// remove-by-identity, peek-min, pop-min, with FIFO tie-break on equal
/// due times.
#[derive(Default)]
pub(crate) struct Ordering {
    set: BTreeSet<(Time, u64, SourceId)>,
    index: HashMap<SourceId, (Time, u64)>,
    next_seq: u64,
}

impl Ordering {
    fn install(&mut self, id: SourceId, due: Time) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.set.insert((due, seq, id));
        self.index.insert(id, (due, seq));
    }

    fn remove(&mut self, id: SourceId) {
        if let Some(key) = self.index.remove(&id) {
            self.set.remove(&(key.0, key.1, id));
        }
    }

    /// Removes `id` (if installed) and re-installs it with a fresh
    /// sequence number, matching the observable behaviour of
    /// "remove + re-install" described for `Scheduler::resort`.
    fn resort(&mut self, id: SourceId, due: Time) {
        self.remove(id);
        self.install(id, due);
    }

    fn peek_min(&self) -> Option<(Time, u64, SourceId)> {
        self.set.iter().next().copied()
    }

    fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    fn installed_ids(&self) -> impl Iterator<Item = SourceId> + '_ {
        self.index.keys().copied()
    }
}

/// The borrowed context a mutation hands to whichever source it changed, so
/// that source can notify the scheduler without anyone holding a pointer
/// back to the other. This is what Design Notes means by "dispatch
/// functions receive a borrowed context as an argument" rather than each
/// source embedding a back-pointer to its owner.
pub struct SchedulerCore<'a> {
    ordering: &'a mut Ordering,
    flights: &'a mut HashMap<u64, Flight>,
    next_flight_id: &'a mut u64,
}

impl<'a> SchedulerCore<'a> {
    /// Notifies the scheduler that `id`'s `next_due_time` changed to `due`
    /// while it was installed. Must only be called for a source other than
    /// the one currently being dispatched.
    pub fn resort(&mut self, id: SourceId, due: Time) {
        self.ordering.resort(id, due);
    }

    /// Installs a freshly created `Flight`, assigning it the next tail-local
    /// flight id and registering it with the scheduler's ordering.
    pub fn install_flight(&mut self, flight: Flight) {
        let id = *self.next_flight_id;
        *self.next_flight_id += 1;
        let due = flight.next_due_time();
        self.flights.insert(id, flight);
        self.ordering.install(SourceId::Flight(id), due);
    }
}

/// The quantum-clock scheduler.
pub struct Scheduler {
    ordering: Ordering,
    flights: HashMap<u64, Flight>,
    next_flight_id: u64,
    now: Time,
    horizon: Time,
}

impl Scheduler {
    pub fn new(horizon: Time) -> Self {
        Self {
            ordering: Ordering::default(),
            flights: HashMap::new(),
            next_flight_id: 0,
            now: 0,
            horizon,
        }
    }

    pub fn now(&self) -> Time {
        self.now
    }

    pub fn horizon(&self) -> Time {
        self.horizon
    }

    /// Number of live flights currently installed (used by invariant checks).
    pub fn in_flight_count(&self) -> usize {
        self.flights.len()
    }

    pub fn install_pending(&mut self, due: Time) {
        self.ordering.install(SourceId::Pending, due);
    }

    pub fn install_charger(&mut self, due: Time) {
        self.ordering.install(SourceId::Charger, due);
    }

    /// Borrows the scheduler's internal ordering/flight registry as a
    /// `SchedulerCore`, for wiring initial fleet insertions before `run`
    /// starts.
    pub fn core(&mut self) -> SchedulerCore<'_> {
        SchedulerCore {
            ordering: &mut self.ordering,
            flights: &mut self.flights,
            next_flight_id: &mut self.next_flight_id,
        }
    }

    /// Advances one dispatch: peeks the minimum-due source, jumps `now`
    /// forward to it, detaches it, dispatches, and re-installs it if it
    /// stays. Returns `false` once the minimum due time would exceed the
    /// horizon or the structure has emptied (the caller should then close
    /// out remaining sources); `true` otherwise. Exposed publicly (not just
    /// for tests) so invariants can be re-checked between individual
    /// dispatches, matching each source's independent testability.
    pub fn step(
        &mut self,
        pending: &mut PendingQueue,
        charger: &mut ChargerBank,
        rng: &mut RngService,
        stats: &mut StatsSink,
        settings: &SimSettings,
        verbose: bool,
    ) -> bool {
        // A zero horizon means the run ends before it starts: nothing is
        // ever dispatched, so `PendingQueue`/`ChargerBank` can't spawn a
        // `Flight` out of their initial installation at `due == 0`. This
        // can't spuriously fire for an in-progress `Flight`/charge whose
        // scheduled completion coincides with a nonzero horizon, since
        // every class's flight/charge duration is strictly positive.
        if self.horizon == 0 {
            return false;
        }
        let Some((due, _seq, id)) = self.ordering.peek_min() else {
            return false;
        };
        if due > self.horizon {
            self.now = self.horizon;
            return false;
        }
        assert!(
            due >= self.now,
            "invariant violation: scheduler time moved backward ({due} < {})",
            self.now
        );
        self.now = due;
        self.ordering.remove(id);

        if verbose {
            eprintln!("[t={}] dispatch {:?}", self.now, id);
        }

        match id {
            SourceId::Pending => {
                let mut core = self.core();
                let stay = pending.dispatch(self.now, &mut core, rng, settings);
                if stay {
                    let new_due = pending.next_due_time();
                    assert!(
                        new_due > due,
                        "scheduler livelock: PendingQueue.next_due_time failed to advance"
                    );
                    self.ordering.install(SourceId::Pending, new_due);
                }
            }
            SourceId::Charger => {
                let mut core = self.core();
                let stay = charger.dispatch(self.now, pending, &mut core, rng, stats, settings);
                if stay {
                    let new_due = charger.next_due_time();
                    assert!(
                        new_due > due,
                        "scheduler livelock: ChargerBank.next_due_time failed to advance"
                    );
                    self.ordering.install(SourceId::Charger, new_due);
                }
            }
            SourceId::Flight(fid) => {
                let flight = self
                    .flights
                    .remove(&fid)
                    .expect("scheduler invariant violation: dispatched flight id not registered");
                let mut core = SchedulerCore {
                    ordering: &mut self.ordering,
                    flights: &mut self.flights,
                    next_flight_id: &mut self.next_flight_id,
                };
                let outcome = flight.dispatch(self.now, pending, charger, &mut core, rng, stats, settings);
                if let Some(flight) = outcome {
                    let new_due = flight.next_due_time();
                    assert!(
                        new_due > due,
                        "scheduler livelock: Flight.next_due_time failed to advance"
                    );
                    self.flights.insert(fid, flight);
                    self.ordering.install(SourceId::Flight(fid), new_due);
                }
            }
        }
        true
    }

    /// Closes out every source still installed (reached when `step` returns
    /// `false`): writes truncated records for whatever is mid-flight or
    /// mid-charge, and discards pending aircraft without record.
    pub fn close_out(&mut self, pending: &mut PendingQueue, charger: &mut ChargerBank, stats: &mut StatsSink) {
        for id in self.ordering.installed_ids().collect::<Vec<_>>() {
            match id {
                SourceId::Pending => pending.close_out(self.now),
                SourceId::Charger => charger.close_out(self.now, stats),
                SourceId::Flight(fid) => {
                    if let Some(flight) = self.flights.remove(&fid) {
                        flight.close_out(self.now, stats);
                    }
                }
            }
        }
        self.ordering = Ordering::default();
    }

    /// Drives `step` to completion, then closes out every source still
    /// installed.
    pub fn run(
        &mut self,
        pending: &mut PendingQueue,
        charger: &mut ChargerBank,
        rng: &mut RngService,
        stats: &mut StatsSink,
        settings: &SimSettings,
        verbose: bool,
    ) {
        while self.step(pending, charger, rng, stats, settings, verbose) {}
        self.close_out(pending, charger, stats);
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.ordering.is_empty()
    }
}

/// Test-only helpers letting `pending`, `charger`, and `flight` unit tests
/// build a standalone `SchedulerCore` without spinning up a full
/// `Simulation`, matching Design Notes' "makes each source independently
/// testable."
#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn fresh_ordering() -> Ordering {
        Ordering::default()
    }

    pub fn core_from<'a>(
        ordering: &'a mut Ordering,
        flights: &'a mut HashMap<u64, Flight>,
        next_flight_id: &'a mut u64,
    ) -> SchedulerCore<'a> {
        SchedulerCore {
            ordering,
            flights,
            next_flight_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_breaks_ties_by_insertion_sequence() {
        let mut ordering = Ordering::default();
        ordering.install(SourceId::Pending, 10);
        ordering.install(SourceId::Charger, 10);
        let (due, _, first) = ordering.peek_min().unwrap();
        assert_eq!(due, 10);
        assert_eq!(first, SourceId::Pending);
    }

    #[test]
    fn resort_moves_a_source_to_its_new_due_time() {
        let mut ordering = Ordering::default();
        ordering.install(SourceId::Pending, 10);
        ordering.install(SourceId::Charger, 5);
        ordering.resort(SourceId::Pending, 1);
        let (due, _, id) = ordering.peek_min().unwrap();
        assert_eq!(due, 1);
        assert_eq!(id, SourceId::Pending);
    }

    #[test]
    fn remove_by_identity_drops_only_that_source() {
        let mut ordering = Ordering::default();
        ordering.install(SourceId::Pending, 10);
        ordering.install(SourceId::Charger, 5);
        ordering.remove(SourceId::Charger);
        assert_eq!(ordering.set.len(), 1);
        let (_, _, id) = ordering.peek_min().unwrap();
        assert_eq!(id, SourceId::Pending);
    }
}
