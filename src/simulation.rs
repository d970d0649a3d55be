//! `Simulation`: the lifecycle composer. Seeds the RNG, generates the
//! initial fleet, wires the two long-lived sources into the `Scheduler`,
//! drains to horizon, and aggregates the final per-class report.

use crate::charger::ChargerBank;
use crate::config::{ConfigError, SimSettings};
use crate::fleet;
use crate::pending::PendingQueue;
use crate::rng::RngService;
use crate::scheduler::Scheduler;
use crate::stats::{FinalStats, StatsSink};

/// Owns a validated [`SimSettings`] and knows how to run exactly one
/// simulation to completion. Independent `Simulation`s share no state and
/// are `Send`, so separate instances may run concurrently on separate
/// threads (spec §5) even though this crate does not ship the averaging
/// driver that would join their results.
pub struct Simulation {
    settings: SimSettings,
}

impl Simulation {
    /// Validates `settings` and refuses to construct on any violation,
    /// per spec §7's "invalid specification surfaced at construction".
    pub fn new(settings: SimSettings) -> Result<Self, Vec<ConfigError>> {
        let errors = settings.validate();
        if errors.is_empty() {
            Ok(Self { settings })
        } else {
            Err(errors)
        }
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    /// Runs the engine to completion and returns one `FinalStats` row per
    /// class, in class-id order.
    pub fn run(&self) -> Vec<FinalStats> {
        let mut rng = RngService::new(self.settings.random_seed);
        let mut scheduler = Scheduler::new(self.settings.simulation_duration);
        let mut charger = ChargerBank::new(self.settings.charger_count);
        let mut pending = PendingQueue::new();
        let mut stats = StatsSink::new();

        let fleet = fleet::generate_fleet(self.settings.plane_count, self.settings.min_per_class, &mut rng);
        for aircraft in fleet {
            let ready_at = rng.passenger_delay(self.settings.max_passenger_delay);
            let mut core = scheduler.core();
            pending.insert(aircraft, ready_at, &mut core);
        }

        scheduler.install_pending(pending.next_due_time());
        scheduler.install_charger(charger.next_due_time());

        scheduler.run(
            &mut pending,
            &mut charger,
            &mut rng,
            &mut stats,
            &self.settings,
            self.settings.verbose,
        );

        FinalStats::aggregate(&stats)
    }
}
