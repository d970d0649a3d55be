//! `SimSettings`: the external configuration surface for the core engine,
//! loaded from TOML or selected by preset name.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::classes::{CLASS_COUNT, Time};

/// How many passengers board a ready aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassengerCountOption {
    AlwaysFull,
    Random,
}

impl Default for PassengerCountOption {
    fn default() -> Self {
        Self::AlwaysFull
    }
}

/// What happens to a flight when an in-flight fault fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FaultOption {
    CountOnly,
    GroundImmediately,
    GroundAtEnd,
}

impl Default for FaultOption {
    fn default() -> Self {
        Self::CountOnly
    }
}

/// A single validation failure: which field, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Every value the core engine consumes (spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimSettings {
    /// Horizon, in raw time units. Must be > 0.
    pub simulation_duration: Time,
    /// Charger pool size. May be 0 (no aircraft ever flies).
    pub charger_count: usize,
    /// Fleet size.
    pub plane_count: usize,
    /// Fleet-generation constraint: minimum aircraft guaranteed per class.
    /// Must satisfy `min_per_class * CLASS_COUNT <= plane_count`.
    pub min_per_class: usize,
    pub passenger_count_option: PassengerCountOption,
    /// Non-negative; 0 disables passenger-delay randomization.
    pub max_passenger_delay: Time,
    pub fault_option: FaultOption,
    /// 0 derives a seed from the system clock; any other value is used
    /// directly and makes the run deterministic.
    pub random_seed: u64,
    /// Maps simulated integer time to real time: 60 = seconds, 1 = minutes.
    pub units_per_minute: u32,
    pub verbose: bool,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            simulation_duration: 3 * 3600,
            charger_count: 3,
            plane_count: 20,
            min_per_class: 0,
            passenger_count_option: PassengerCountOption::AlwaysFull,
            max_passenger_delay: 0,
            fault_option: FaultOption::CountOnly,
            random_seed: 0,
            units_per_minute: 60,
            verbose: false,
        }
    }
}

pub const PRESETS: &[&str] = &["baseline", "stress", "fault-immediate"];

impl SimSettings {
    /// The default 20-aircraft, 3-charger, 3-hour scenario.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// More aircraft than chargers, so the wait list sees real contention.
    pub fn stress() -> Self {
        Self {
            plane_count: 40,
            charger_count: 2,
            min_per_class: 1,
            simulation_duration: 6 * 3600,
            fault_option: FaultOption::GroundAtEnd,
            ..Self::default()
        }
    }

    /// Every aircraft is grounded after its first fault (S4-style scenario).
    pub fn fault_immediate() -> Self {
        Self {
            fault_option: FaultOption::GroundImmediately,
            simulation_duration: 3600,
            ..Self::default()
        }
    }

    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "stress" => Ok(Self::stress()),
            "fault-immediate" => Ok(Self::fault_immediate()),
            other => Err(ConfigError {
                field: "preset".to_string(),
                message: format!("unknown preset \"{other}\", expected one of {PRESETS:?}"),
            }),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError {
            field: "<toml>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(&path).map_err(|e| ConfigError {
            field: "<file>".to_string(),
            message: format!("{}: {e}", path.as_ref().display()),
        })?;
        Self::from_toml_str(&text)
    }

    /// Collects every constraint violation from spec §6's domain column,
    /// rather than stopping at the first.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.simulation_duration <= 0 {
            errors.push(ConfigError {
                field: "simulation_duration".to_string(),
                message: "must be > 0".to_string(),
            });
        }
        if self.max_passenger_delay < 0 {
            errors.push(ConfigError {
                field: "max_passenger_delay".to_string(),
                message: "must be >= 0".to_string(),
            });
        }
        let needed = self.min_per_class.saturating_mul(CLASS_COUNT);
        if needed > self.plane_count {
            errors.push(ConfigError {
                field: "min_per_class".to_string(),
                message: format!(
                    "min_per_class * {CLASS_COUNT} ({needed}) exceeds plane_count ({})",
                    self.plane_count
                ),
            });
        }

        errors
    }
}
