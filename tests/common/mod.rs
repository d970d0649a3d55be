//! Shared test fixtures for integration tests.

use evtol_fleet_sim::aircraft::Aircraft;
use evtol_fleet_sim::charger::ChargerBank;
use evtol_fleet_sim::classes::{ClassSpec, Time, CLASSES};
use evtol_fleet_sim::config::SimSettings;
use evtol_fleet_sim::pending::PendingQueue;
use evtol_fleet_sim::rng::RngService;
use evtol_fleet_sim::scheduler::Scheduler;
use evtol_fleet_sim::stats::{FinalStats, StatsSink};

/// Class A with its fault rate zeroed out, for scenarios that must be
/// fault-free regardless of the canonical table's parameters.
pub fn fault_free_class_a() -> ClassSpec {
    ClassSpec {
        faults_per_hour: 0.0,
        ..CLASSES[0]
    }
}

/// Settings matching the default 20-aircraft baseline, overridden field by
/// field by callers via struct-update syntax.
pub fn default_settings() -> SimSettings {
    SimSettings::default()
}

/// Drives a hand-assembled fleet through a full run, mirroring
/// `Simulation::run`'s wiring but letting the caller control each
/// aircraft's class and arrival time directly (needed for scenarios that
/// require a specific class/fault combination or a specific insertion
/// order).
pub fn run_custom_fleet(
    fleet: Vec<(Aircraft, Time)>,
    charger_count: usize,
    horizon: Time,
    settings: &SimSettings,
) -> (Vec<FinalStats>, StatsSink) {
    let mut rng = RngService::new(settings.random_seed.max(1));
    let mut scheduler = Scheduler::new(horizon);
    let mut charger = ChargerBank::new(charger_count);
    let mut pending = PendingQueue::new();
    let mut stats = StatsSink::new();

    for (aircraft, ready_at) in fleet {
        let mut core = scheduler.core();
        pending.insert(aircraft, ready_at, &mut core);
    }

    scheduler.install_pending(pending.next_due_time());
    scheduler.install_charger(charger.next_due_time());

    scheduler.run(&mut pending, &mut charger, &mut rng, &mut stats, settings, settings.verbose);

    let final_stats = FinalStats::aggregate(&stats);
    (final_stats, stats)
}
