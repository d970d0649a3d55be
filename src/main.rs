//! eVTOL fleet simulator entry point — CLI wiring and config-driven run.

use std::path::Path;
use std::process;

use evtol_fleet_sim::config::SimSettings;
use evtol_fleet_sim::io::export::export_csv;
use evtol_fleet_sim::stats::Report;
use evtol_fleet_sim::Simulation;

/// Parsed CLI arguments.
struct CliArgs {
    scenario_path: Option<String>,
    preset: Option<String>,
    seed_override: Option<u64>,
    verbose: bool,
    csv_out: Option<String>,
}

fn print_help() {
    eprintln!("evtol-fleet-sim — discrete-event simulator for a shared-charger eVTOL fleet");
    eprintln!();
    eprintln!("Usage: evtol-fleet-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --scenario <path>   Load settings from a TOML config file");
    eprintln!("  --preset <name>     Use a built-in preset (baseline, stress, fault-immediate)");
    eprintln!("  --seed <u64>        Override the random seed");
    eprintln!("  --verbose           Log every dispatch to stderr as it happens");
    eprintln!("  --csv-out <path>    Export the final per-class report to CSV");
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("If no --scenario or --preset is given, the baseline preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        scenario_path: None,
        preset: None,
        seed_override: None,
        verbose: false,
        csv_out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--scenario" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --scenario requires a path argument");
                    process::exit(1);
                }
                cli.scenario_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--verbose" => {
                cli.verbose = true;
            }
            "--csv-out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --csv-out requires a path argument");
                    process::exit(1);
                }
                cli.csv_out = Some(args[i].clone());
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn main() {
    let cli = parse_args();

    // Load settings: --scenario takes priority, then --preset, then baseline default
    let mut settings = if let Some(ref path) = cli.scenario_path {
        match SimSettings::from_toml_file(Path::new(path)) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match SimSettings::from_preset(name) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        SimSettings::baseline()
    };

    // Apply seed override
    if let Some(seed) = cli.seed_override {
        settings.random_seed = seed;
    }
    if cli.verbose {
        settings.verbose = true;
    }

    let sim = match Simulation::new(settings) {
        Ok(sim) => sim,
        Err(errors) => {
            for e in &errors {
                eprintln!("{e}");
            }
            process::exit(1);
        }
    };

    let stats = sim.run();
    let report = Report {
        stats: &stats,
        units_per_minute: sim.settings().units_per_minute,
    };
    print!("{report}");

    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(&stats, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Report written to {path}");
    }
}
