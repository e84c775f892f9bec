//! Occupancy simulator entry point: CLI wiring and config-driven run.

use std::fs;
use std::path::Path;
use std::process;

use tracing::info;
use tracing_subscriber::EnvFilter;

use occupancy_sim::building::Building;
use occupancy_sim::config::BuildingConfig;
use occupancy_sim::io::export::export_csv;
use occupancy_sim::sim::engine::Simulator;
use occupancy_sim::sim::event::EventLog;
use occupancy_sim::sim::report::UsageReport;

/// Seed used when `--seed` is not given.
const DEFAULT_SEED: u64 = 42;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    preset: Option<String>,
    events_path: Option<String>,
    seed: u64,
    csv_out: Option<String>,
    log_level: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("occupancy-sim: building occupancy and appliance power-draw simulator");
    eprintln!();
    eprintln!("Usage: occupancy-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load rooms from a JSON (or .toml) file");
    eprintln!("  --preset <name>          Use a built-in preset (demo)");
    eprintln!("  --events <path>          Event log to replay (required with --config)");
    eprintln!("  --seed <u64>             Random seed (default: {DEFAULT_SEED})");
    eprintln!("  --csv-out <path>         Export records to CSV");
    eprintln!("  --log-level <filter>     Log filter, overrides RUST_LOG (default: info)");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server after simulation");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the demo preset is used.");
}

/// Returns the value following the flag at `args[*i]`, or exits with an error.
fn flag_value(args: &[String], i: &mut usize, flag: &str, what: &str) -> String {
    *i += 1;
    match args.get(*i) {
        Some(value) => value.clone(),
        None => {
            eprintln!("error: {flag} requires {what}");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        preset: None,
        events_path: None,
        seed: DEFAULT_SEED,
        csv_out: None,
        log_level: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => cli.config_path = Some(flag_value(&args, &mut i, "--config", "a path")),
            "--preset" => cli.preset = Some(flag_value(&args, &mut i, "--preset", "a name")),
            "--events" => cli.events_path = Some(flag_value(&args, &mut i, "--events", "a path")),
            "--seed" => {
                let value = flag_value(&args, &mut i, "--seed", "a u64 argument");
                if let Ok(s) = value.parse::<u64>() {
                    cli.seed = s;
                } else {
                    eprintln!("error: --seed value \"{value}\" is not a valid u64");
                    process::exit(1);
                }
            }
            "--csv-out" => cli.csv_out = Some(flag_value(&args, &mut i, "--csv-out", "a path")),
            "--log-level" => {
                cli.log_level = Some(flag_value(&args, &mut i, "--log-level", "a filter"));
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                let value = flag_value(&args, &mut i, "--port", "a u16 argument");
                if let Ok(p) = value.parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{value}\" is not a valid u16");
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    if cli.config_path.is_some() && cli.preset.is_some() {
        eprintln!("error: --config and --preset are mutually exclusive; choose one source");
        process::exit(1);
    }
    if cli.config_path.is_some() && cli.events_path.is_none() {
        eprintln!("error: --config requires --events");
        process::exit(1);
    }

    cli
}

/// Logs go to stderr so stdout carries only the record stream.
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolves the configuration and event-log text from the CLI sources.
fn load_inputs(cli: &CliArgs) -> (BuildingConfig, String) {
    let (config, preset_log) = if let Some(ref path) = cli.config_path {
        match BuildingConfig::from_file(Path::new(path)) {
            Ok(cfg) => (cfg, None),
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
    } else {
        let name = cli.preset.as_deref().unwrap_or("demo");
        match BuildingConfig::from_preset(name) {
            Ok(cfg) => (cfg, BuildingConfig::preset_event_log(name)),
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        }
    };

    let log_text = match (&cli.events_path, preset_log) {
        (Some(path), _) => fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("error: cannot read \"{path}\": {e}");
            process::exit(1);
        }),
        (None, Some(text)) => text.to_string(),
        (None, None) => {
            eprintln!("error: no event log given; use --events");
            process::exit(1);
        }
    };

    (config, log_text)
}

fn main() {
    let cli = parse_args();
    init_logging(cli.log_level.as_deref());

    let (config, log_text) = load_inputs(&cli);

    let log = match EventLog::parse(&log_text) {
        Ok(log) => log,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let building = Building::from_config(&config);
    info!(
        rooms = building.rooms().len(),
        events = log.len(),
        seed = cli.seed,
        "starting simulation"
    );

    let mut sim = Simulator::seeded(building, cli.seed);
    let outcomes = match sim.run(&log) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    for outcome in &outcomes {
        println!("{outcome}");
    }

    let report = UsageReport::from_outcomes(&outcomes, sim.building());
    println!("\n{report}");

    if let Some(ref path) = cli.csv_out {
        if let Err(e) = export_csv(&outcomes, sim.building(), Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(%path, "records written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(occupancy_sim::api::AppState::new(
            cli.seed,
            sim.building(),
            outcomes,
        ));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        if let Err(e) = rt.block_on(occupancy_sim::api::serve(state, addr)) {
            eprintln!("error: API server failed: {e}");
            process::exit(1);
        }
    }
}
