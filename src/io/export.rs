//! CSV export for per-class final statistics.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::stats::FinalStats;

/// Column header for the per-class CSV export.
const HEADER: &str = "class,total_flights,avg_time_per_flight,avg_miles_per_flight,\
                       total_charges,avg_charge_time,avg_charge_time_plus_wait,\
                       total_faults,total_passenger_miles";

/// Exports per-class final statistics to a CSV file at the given path.
///
/// Writes a header row followed by one data row per class, in class-id
/// order. Produces deterministic output for identical inputs.
///
/// # Arguments
///
/// * `stats` - Complete per-class final statistics
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(stats: &[FinalStats], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(stats, buf)
}

/// Writes per-class final statistics as CSV to any writer.
///
/// # Arguments
///
/// * `stats` - Complete per-class final statistics
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(stats: &[FinalStats], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows
    for row in stats {
        wtr.write_record(&[
            row.class_name.to_string(),
            row.total_flights.to_string(),
            format!("{:.4}", row.avg_time_per_flight),
            format!("{:.4}", row.avg_miles_per_flight),
            row.total_charges.to_string(),
            format!("{:.4}", row.avg_charge_time),
            format!("{:.4}", row.avg_charge_time_plus_wait),
            row.total_faults.to_string(),
            format!("{:.4}", row.total_passenger_miles),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
