//! Append-only statistics records and per-class aggregation into
//! [`FinalStats`], the core's entire output contract.

use std::fmt;

use serde::Serialize;

use crate::classes::{CLASSES, Time};

/// One completed (or horizon-truncated) flight.
#[derive(Debug, Clone)]
pub struct FlightRecord {
    pub class_id: usize,
    pub tail: u64,
    pub duration: Time,
    pub passengers: u32,
    pub faults: u32,
    pub passenger_miles: f64,
    pub truncated: bool,
}

/// One completed (or horizon-truncated) charging session.
#[derive(Debug, Clone)]
pub struct ChargeRecord {
    pub class_id: usize,
    pub tail: u64,
    pub charge_duration: Time,
    pub charge_plus_wait: Time,
    pub truncated: bool,
}

/// The record sink every `Flight.complete` and `ChargerBank.release` append
/// into; owned by [`Simulation`](crate::simulation::Simulation) for the
/// lifetime of one run.
#[derive(Default)]
pub struct StatsSink {
    flights: Vec<FlightRecord>,
    charges: Vec<ChargeRecord>,
}

impl StatsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_flight(&mut self, record: FlightRecord) {
        self.flights.push(record);
    }

    pub fn push_charge(&mut self, record: ChargeRecord) {
        self.charges.push(record);
    }

    pub fn flight_records(&self) -> &[FlightRecord] {
        &self.flights
    }

    pub fn charge_records(&self) -> &[ChargeRecord] {
        &self.charges
    }
}

/// Aggregate operational statistics for one aircraft class; one row per
/// class, in class-id order, is the entire output of [`Simulation::run`].
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct FinalStats {
    pub class_id: usize,
    pub class_name: &'static str,
    pub total_flights: u64,
    pub avg_time_per_flight: f64,
    pub avg_miles_per_flight: f64,
    pub total_charges: u64,
    pub avg_charge_time: f64,
    pub avg_charge_time_plus_wait: f64,
    pub total_faults: u64,
    pub total_passenger_miles: f64,
}

impl FinalStats {
    /// Aggregates the run's append-only records into one row per class.
    pub fn aggregate(sink: &StatsSink) -> Vec<FinalStats> {
        CLASSES
            .iter()
            .enumerate()
            .map(|(class_id, spec)| {
                let flights: Vec<&FlightRecord> = sink
                    .flight_records()
                    .iter()
                    .filter(|r| r.class_id == class_id)
                    .collect();
                let charges: Vec<&ChargeRecord> = sink
                    .charge_records()
                    .iter()
                    .filter(|r| r.class_id == class_id)
                    .collect();

                let total_flights = flights.len() as u64;
                let avg_time_per_flight = if flights.is_empty() {
                    0.0
                } else {
                    flights.iter().map(|r| r.duration as f64).sum::<f64>() / flights.len() as f64
                };
                let avg_miles_per_flight = avg_time_per_flight * spec.cruise_mph / 3600.0;
                let total_charges = charges.len() as u64;
                let avg_charge_time = if charges.is_empty() {
                    0.0
                } else {
                    charges.iter().map(|r| r.charge_duration as f64).sum::<f64>() / charges.len() as f64
                };
                let avg_charge_time_plus_wait = if charges.is_empty() {
                    0.0
                } else {
                    charges.iter().map(|r| r.charge_plus_wait as f64).sum::<f64>() / charges.len() as f64
                };
                let total_faults = flights.iter().map(|r| r.faults as u64).sum();
                let total_passenger_miles = flights.iter().map(|r| r.passenger_miles).sum();

                FinalStats {
                    class_id,
                    class_name: spec.name,
                    total_flights,
                    avg_time_per_flight,
                    avg_miles_per_flight,
                    total_charges,
                    avg_charge_time,
                    avg_charge_time_plus_wait,
                    total_faults,
                    total_passenger_miles,
                }
            })
            .collect()
    }
}

/// A human-readable report over a completed run's per-class results, with
/// durations labelled according to the configured time granularity.
pub struct Report<'a> {
    pub stats: &'a [FinalStats],
    pub units_per_minute: u32,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = if self.units_per_minute == 60 { "s" } else { "units" };
        writeln!(f, "class  flights  avg_flight({unit})  avg_miles  charges  avg_charge({unit})  avg_charge+wait({unit})  faults  pax_miles")?;
        for row in self.stats {
            writeln!(
                f,
                "{:<5}  {:<7}  {:<15.1}  {:<9.1}  {:<7}  {:<13.1}  {:<20.1}  {:<6}  {:.1}",
                row.class_name,
                row.total_flights,
                row.avg_time_per_flight,
                row.avg_miles_per_flight,
                row.total_charges,
                row.avg_charge_time,
                row.avg_charge_time_plus_wait,
                row.total_faults,
                row.total_passenger_miles,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregate_of_empty_sink_is_all_zero() {
        let sink = StatsSink::new();
        let stats = FinalStats::aggregate(&sink);
        assert_eq!(stats.len(), crate::classes::CLASS_COUNT);
        for row in &stats {
            assert_eq!(row.total_flights, 0);
            assert_eq!(row.total_charges, 0);
            assert_eq!(row.total_faults, 0);
            assert_eq!(row.total_passenger_miles, 0.0);
        }
    }

    #[test]
    fn aggregate_matches_s1_expected_totals() {
        let mut sink = StatsSink::new();
        sink.push_flight(FlightRecord {
            class_id: 0,
            tail: 1,
            duration: 6000,
            passengers: 4,
            faults: 0,
            passenger_miles: 6000.0 * 4.0 * 120.0 / 3600.0,
            truncated: false,
        });
        sink.push_flight(FlightRecord {
            class_id: 0,
            tail: 1,
            duration: 2640,
            passengers: 4,
            faults: 0,
            passenger_miles: 2640.0 * 4.0 * 120.0 / 3600.0,
            truncated: true,
        });
        sink.push_charge(ChargeRecord {
            class_id: 0,
            tail: 1,
            charge_duration: 2160,
            charge_plus_wait: 2160,
            truncated: false,
        });

        let stats = FinalStats::aggregate(&sink);
        let row = &stats[0];
        assert_eq!(row.total_flights, 2);
        assert_eq!(row.total_charges, 1);
        assert_eq!(row.total_faults, 0);
        assert!((row.total_passenger_miles - 1152.0).abs() < 1e-9);
    }

    #[test]
    fn report_display_includes_every_class_row() {
        let sink = StatsSink::new();
        let stats = FinalStats::aggregate(&sink);
        let report = Report {
            stats: &stats,
            units_per_minute: 60,
        };
        let text = report.to_string();
        for spec in CLASSES {
            assert!(text.contains(spec.name));
        }
    }
}
