//! Game balance simulator CLI.
//!
//! Autoplay many seeded sessions to analyze game balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 1000 runs
//!   cargo run --bin simulate -- -n 100 -b 30   # 100 runs, 30 battles each
//!   cargo run --bin simulate -- --seed 42      # Reproducible run

use std::env;
use std::process::ExitCode;

use alexandria::narrative::HttpNarrative;
use alexandria::simulator::{run_simulation, run_simulation_with, SimConfig};
use alexandria::GameConfig;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("alexandria=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);
    let use_backend = args.iter().any(|a| a == "--backend");

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              ALEXANDRIA BALANCE SIMULATOR                     ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Max Battles:    {}", config.max_battles_per_run);
    println!("  Heal Below:     {:.0}%", config.heal_below_percent);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }

    let backend_url = GameConfig::from_env().backend_url.filter(|_| use_backend);
    if let Some(url) = &backend_url {
        println!("  Backend:        {}", url);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = match &backend_url {
        Some(url) => run_simulation_with(&config, &HttpNarrative::new(url)),
        None => run_simulation(&config),
    };

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        let written = report
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&filename, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(1000);
                    i += 1;
                }
            }
            "-b" | "--battles" => {
                if i + 1 < args.len() {
                    config.max_battles_per_run = args[i + 1].parse().unwrap_or(60);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--heal-below" => {
                if i + 1 < args.len() {
                    config.heal_below_percent = args[i + 1].parse().unwrap_or(35.0);
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick();
            }
            "--aggressive" => {
                config = SimConfig::aggressive(config.num_runs);
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Alexandria Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of simulated sessions (default: 1000)");
    println!("    -b, --battles <N>     Max battles per session (default: 60)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    --heal-below <P>      Heal when HP is below P percent (default: 35)");
    println!("    --backend             Use ALEXANDRIA_BACKEND_URL for enemies");
    println!("    -v, --verbose         Print every run");
    println!("    --json                Save JSON report");
    println!("    --quick               Quick test (100 runs, 30 battles)");
    println!("    --aggressive          Never heal");
    println!("    -h, --help            Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                    # Default run");
    println!("    cargo run --bin simulate -- -n 100 -b 30   # Shorter sessions");
    println!("    cargo run --bin simulate -- --seed 42      # Reproducible");
    println!("    cargo run --bin simulate -- --quick        # Quick balance check");
}
