//! Discrete-event simulation of an eVTOL fleet sharing a charger pool.

pub mod aircraft;
pub mod charger;
pub mod classes;
/// TOML scenario configuration and preset definitions.
pub mod config;
pub mod fleet;
pub mod flight;
/// I/O utilities for data export.
pub mod io;
pub mod pending;
pub mod rng;
pub mod scheduler;
pub mod simulation;
pub mod stats;

pub use config::{ConfigError, SimSettings};
pub use simulation::Simulation;
pub use stats::FinalStats;
