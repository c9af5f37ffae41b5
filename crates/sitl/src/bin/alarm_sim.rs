//! Intrusion alarm simulator.
//!
//! Runs a scenario file against the alarm state machine and prints the
//! resulting event and output timeline.
//!
//! Usage:
//!   cargo run -p intrusion_alarm_sitl --bin alarm_sim -- <SCENARIO.json> [OPTIONS]
//!
//! Options:
//!   --realtime           Pace cycles at wall-clock speed
//!   --speed <FACTOR>     Pace cycles at FACTOR x wall-clock speed
//!   -h, --help           Show this help
//!
//! Log verbosity follows RUST_LOG (default: info).

use std::env;
use std::process;

use intrusion_alarm_sitl::{Scenario, ScenarioRunner, TimeMode};
use tracing_subscriber::EnvFilter;

struct Args {
    scenario: String,
    mode: TimeMode,
}

fn parse_args() -> Args {
    let mut scenario = None;
    let mut mode = TimeMode::FreeRunning;

    let raw: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < raw.len() {
        match raw[i].as_str() {
            "--realtime" => mode = TimeMode::Scaled { factor: 1.0 },
            "--speed" => {
                i += 1;
                let factor = raw
                    .get(i)
                    .and_then(|s| s.parse::<f32>().ok())
                    .filter(|f| f.is_finite() && *f > 0.0)
                    .unwrap_or_else(|| {
                        eprintln!("Error: --speed requires a positive number");
                        process::exit(1);
                    });
                mode = TimeMode::Scaled { factor };
            }
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown option: {other}");
                print_usage();
                process::exit(1);
            }
            path => scenario = Some(path.to_string()),
        }
        i += 1;
    }

    let Some(scenario) = scenario else {
        eprintln!("Error: missing scenario file");
        print_usage();
        process::exit(1);
    };

    Args { scenario, mode }
}

fn print_usage() {
    eprintln!("Usage: alarm_sim <SCENARIO.json> [--realtime | --speed <FACTOR>]");
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let args = parse_args();

    let scenario = match Scenario::load(&args.scenario) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Error: {}: {e}", args.scenario);
            process::exit(1);
        }
    };
    let runner = match ScenarioRunner::new(&scenario) {
        Ok(runner) => runner,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let timeline = runner.run_paced(args.mode).await;
    println!("{timeline}");
}
