//! `ChargerBank`: a fixed-size pool of charging slots plus a FIFO wait list.

use std::collections::{BTreeMap, VecDeque};

use crate::aircraft::Aircraft;
use crate::classes::{INFINITY, Time, sat_add};
use crate::config::SimSettings;
use crate::pending::PendingQueue;
use crate::rng::RngService;
use crate::scheduler::{SchedulerCore, SourceId};
use crate::stats::{ChargeRecord, StatsSink};

struct Slot {
    aircraft: Aircraft,
    start_wait: Time,
    start_charge: Time,
}

struct Waiting {
    aircraft: Aircraft,
    start_wait: Time,
}

/// `slot_count` active charging sessions ordered by `end_charge_time`, plus
/// a strict-FIFO wait list for when all slots are occupied.
pub struct ChargerBank {
    slot_count: usize,
    active: BTreeMap<(Time, u64), Slot>,
    wait_list: VecDeque<Waiting>,
    seq: u64,
}

impl ChargerBank {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slot_count,
            active: BTreeMap::new(),
            wait_list: VecDeque::new(),
            seq: 0,
        }
    }

    /// Smallest `end_charge_time` across active slots, or `+∞` when no
    /// slot is occupied (the wait list alone never produces a due time).
    pub fn next_due_time(&self) -> Time {
        self.active.keys().next().map(|(t, _)| *t).unwrap_or(INFINITY)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn waiting_count(&self) -> usize {
        self.wait_list.len()
    }

    fn insert_active(&mut self, aircraft: Aircraft, start_wait: Time, start_charge: Time, end: Time) {
        let seq = self.seq;
        self.seq += 1;
        self.active.insert(
            (end, seq),
            Slot {
                aircraft,
                start_wait,
                start_charge,
            },
        );
    }

    /// Admits `aircraft` at `now`: into a free slot if one exists, else to
    /// the back of the wait list. Always called cross-source (from
    /// `Flight.dispatch`), so it notifies `Scheduler.resort` when the
    /// bank's minimum `end_charge_time` changes.
    pub fn admit(&mut self, now: Time, aircraft: Aircraft, core: &mut SchedulerCore) {
        let old_min = self.next_due_time();
        if self.active.len() < self.slot_count {
            let end = sat_add(now, aircraft.class().charge_seconds());
            self.insert_active(aircraft, now, now, end);
        } else {
            self.wait_list.push_back(Waiting {
                aircraft,
                start_wait: now,
            });
        }
        let new_min = self.next_due_time();
        if new_min != old_min {
            core.resort(SourceId::Charger, new_min);
        }
    }

    /// Releases every slot due at or before `now`, writing a `ChargeRecord`
    /// for each and handing the aircraft back to `pending` with a freshly
    /// drawn passenger delay. Then promotes head-of-line waiters into any
    /// slots freed up. Always returns `true` (stays scheduled, possibly
    /// with `next_due_time() == +∞`).
    pub fn dispatch(
        &mut self,
        now: Time,
        pending: &mut PendingQueue,
        core: &mut SchedulerCore,
        rng: &mut RngService,
        stats: &mut StatsSink,
        settings: &SimSettings,
    ) -> bool {
        let rest = self.active.split_off(&(now + 1, 0));
        let due = std::mem::replace(&mut self.active, rest);

        for (_, slot) in due {
            let class_id = slot.aircraft.class_id;
            stats.push_charge(ChargeRecord {
                class_id,
                tail: slot.aircraft.tail(),
                charge_duration: now - slot.start_charge,
                charge_plus_wait: now - slot.start_wait,
                truncated: false,
            });
            let delay = rng.passenger_delay(settings.max_passenger_delay);
            pending.insert(slot.aircraft, now + delay, core);
        }

        while self.active.len() < self.slot_count {
            let Some(waiting) = self.wait_list.pop_front() else {
                break;
            };
            let end = sat_add(now, waiting.aircraft.class().charge_seconds());
            self.insert_active(waiting.aircraft, waiting.start_wait, now, end);
        }

        true
    }

    /// Every active slot gets a truncated `ChargeRecord`; wait-list
    /// entries are discarded without record.
    pub fn close_out(&mut self, now: Time, stats: &mut StatsSink) {
        for (_, slot) in std::mem::take(&mut self.active) {
            stats.push_charge(ChargeRecord {
                class_id: slot.aircraft.class_id,
                tail: slot.aircraft.tail(),
                charge_duration: now - slot.start_charge,
                charge_plus_wait: now - slot.start_wait,
                truncated: true,
            });
        }
        self.wait_list.clear();
    }
}
