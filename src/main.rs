use std::process::ExitCode;

use alexandria::combat::Turn;
use alexandria::narrative::{HttpNarrative, NarrativeService, OfflineNarrative};
use alexandria::simulator::{play_session, SimConfig};
use alexandria::utils::build_info;
use alexandria::utils::persistence::FileStore;
use alexandria::{GameConfig, GameError, SessionController, SessionEvent};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("alexandria=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("autoplay") => match run_autoplay(&args[2..]) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("autoplay failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Some("--version") | Some("-v") => {
            println!("{}", build_info::version_line());
            ExitCode::SUCCESS
        }
        Some("--help") | Some("-h") | None => {
            print_help();
            ExitCode::SUCCESS
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run 'alexandria --help' for usage.");
            ExitCode::FAILURE
        }
    }
}

fn run_autoplay(args: &[String]) -> Result<(), GameError> {
    let mut fresh = false;
    let mut seed: Option<u64> = None;
    let mut sim = SimConfig::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--fresh" => fresh = true,
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-b" | "--battles" => {
                if i + 1 < args.len() {
                    sim.max_battles_per_run = args[i + 1].parse().unwrap_or(60);
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }

    let config = GameConfig::from_env();
    let service: Box<dyn NarrativeService> = match &config.backend_url {
        Some(url) => {
            info!(%url, "using narrative service");
            Box::new(HttpNarrative::new(url))
        }
        None => Box::new(OfflineNarrative),
    };

    let store = FileStore::new()?;
    info!(dir = %store.dir().display(), "save directory");

    let mut session = match seed {
        Some(seed) => SessionController::with_seed(config, Box::new(store), seed),
        None => SessionController::new(config, Box::new(store)),
    };

    if fresh || !session.continue_game()? {
        session.new_game();
    }

    let stats = play_session(&mut session, service.as_ref(), &sim, print_event)?;

    println!();
    println!(
        "{} after {} battles: level {}, {} deaths, {}/3 fragments",
        if stats.completed {
            "The Library is restored"
        } else {
            "Stopped"
        },
        stats.battles,
        stats.final_level,
        stats.deaths,
        stats.fragments
    );
    Ok(())
}

fn print_event(event: &SessionEvent) {
    match event {
        SessionEvent::PhaseStarted { phase } => {
            println!();
            println!("{} {}: {}", phase.emoji(), phase.painting_name(), phase.title());
        }
        SessionEvent::DialogueShown { speaker, text } => println!("{}: {}", speaker, text),
        SessionEvent::BattleStarted {
            enemy_name,
            enemy_hp,
            is_boss,
        } => {
            let tag = if *is_boss { " (boss)" } else { "" };
            println!("⚔️  {}{} [{} hp]", enemy_name, tag, enemy_hp);
        }
        SessionEvent::ActionResolved {
            actor,
            player_hp,
            enemy_hp,
            message,
        } => {
            let marker = match actor {
                Turn::Player => ">",
                Turn::Enemy => "<",
            };
            println!(
                "  {} {} [you {} | foe {}]",
                marker, message, player_hp, enemy_hp
            );
        }
        SessionEvent::LeveledUp { level, max_hp } => {
            println!("  ✨ Level {}! Max HP is now {}", level, max_hp)
        }
        SessionEvent::FragmentAwarded { phase } => {
            println!("  💎 {} recovered", phase.fragment_name())
        }
        _ => {}
    }
}

fn print_help() {
    println!("Alexandria - a narrative turn-based RPG\n");
    println!("Usage: alexandria [command]\n");
    println!("Commands:");
    println!("  autoplay   Play the saved game (or a new one) headlessly");
    println!("      --fresh            Ignore the save and start over");
    println!("      -s, --seed <S>     Random seed for reproducibility");
    println!("      -b, --battles <N>  Stop after N battles (default: 60)");
    println!("  --version  Show version information");
    println!("  --help     Show this help message");
    println!();
    println!("Environment:");
    println!("  ALEXANDRIA_BACKEND_URL     Narrative service base URL");
    println!("  ALEXANDRIA_SAVE_KEY        Save slot name (default: alexandriaGame)");
    println!("  RUST_LOG                   Log filter (default: alexandria=info)");
}
