//! Fixed aircraft class specifications and the shared integer time type.

/// Simulated time, in raw integer units (seconds at the default
/// `units_per_minute = 60`). `Time::MAX` stands in for `+∞` — a
/// [`PendingQueue`](crate::pending::PendingQueue) item with this
/// `ready_at_time` is permanently grounded, and a class with
/// `faults_per_hour == 0.0` has an infinite mean fault interval.
pub type Time = i64;

/// Sentinel standing in for "+∞" in all `Time`-valued fields.
pub const INFINITY: Time = Time::MAX;

/// Adds two `Time` values, saturating at [`INFINITY`] instead of overflowing.
/// Any operand already at `INFINITY` makes the sum `INFINITY`.
pub fn sat_add(a: Time, b: Time) -> Time {
    if a == INFINITY || b == INFINITY {
        INFINITY
    } else {
        a.checked_add(b).unwrap_or(INFINITY)
    }
}

/// Immutable physical parameters for one of the five aircraft classes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassSpec {
    pub name: &'static str,
    pub cruise_mph: f64,
    pub battery_kwh: f64,
    pub charge_hours: f64,
    pub energy_kwh_per_mile: f64,
    pub seats: u32,
    pub faults_per_hour: f64,
}

impl ClassSpec {
    /// `battery_kwh / energy_kwh_per_mile`.
    pub fn range_miles(&self) -> f64 {
        self.battery_kwh / self.energy_kwh_per_mile
    }

    /// `round(range_miles * 3600 / cruise_mph)`, the duration of a full flight.
    pub fn flight_seconds_full(&self) -> Time {
        (self.range_miles() * 3600.0 / self.cruise_mph).round() as Time
    }

    /// `round(charge_hours * 3600)`.
    pub fn charge_seconds(&self) -> Time {
        (self.charge_hours * 3600.0).round() as Time
    }

    /// `3600 / faults_per_hour`, or [`f64::INFINITY`] when fault-free.
    pub fn mean_fault_interval_seconds(&self) -> f64 {
        if self.faults_per_hour == 0.0 {
            f64::INFINITY
        } else {
            3600.0 / self.faults_per_hour
        }
    }
}

/// Number of aircraft classes (`K` in the fleet-generation algorithm).
pub const CLASS_COUNT: usize = 5;

/// The canonical five-class parameter table shipped with this crate.
/// Overriding these from configuration is out of scope (no runtime-
/// configurable aircraft specs).
pub const CLASSES: [ClassSpec; CLASS_COUNT] = [
    ClassSpec {
        name: "A",
        cruise_mph: 120.0,
        battery_kwh: 320.0,
        charge_hours: 0.60,
        energy_kwh_per_mile: 1.6,
        seats: 4,
        faults_per_hour: 0.25,
    },
    ClassSpec {
        name: "B",
        cruise_mph: 100.0,
        battery_kwh: 100.0,
        charge_hours: 0.20,
        energy_kwh_per_mile: 1.5,
        seats: 5,
        faults_per_hour: 0.10,
    },
    ClassSpec {
        name: "C",
        cruise_mph: 160.0,
        battery_kwh: 220.0,
        charge_hours: 0.80,
        energy_kwh_per_mile: 2.2,
        seats: 3,
        faults_per_hour: 0.05,
    },
    ClassSpec {
        name: "D",
        cruise_mph: 90.0,
        battery_kwh: 120.0,
        charge_hours: 0.62,
        energy_kwh_per_mile: 0.8,
        seats: 2,
        faults_per_hour: 0.22,
    },
    ClassSpec {
        name: "E",
        cruise_mph: 30.0,
        battery_kwh: 150.0,
        charge_hours: 0.30,
        energy_kwh_per_mile: 5.8,
        seats: 2,
        faults_per_hour: 0.61,
    },
];
