mod config;
mod constants;
mod game;

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn, Level};

use crate::config::{get_profiles, load_profile, save_profile, PROFILES_DIR};
use crate::constants::DEFAULT_SELF_PLAY_PLIES;
use crate::game::search::SearchConfig;
use crate::game::{GameState, SearchMode};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Starting position in FEN; defaults to the standard start position
    #[arg(long)]
    fen: Option<String>,

    /// Search every move to this fixed depth instead of using the clock
    #[arg(long)]
    depth: Option<u8>,

    /// Time budget per move in milliseconds
    #[arg(long)]
    movetime_ms: Option<u64>,

    /// Number of plies to self-play
    #[arg(long, default_value_t = DEFAULT_SELF_PLAY_PLIES)]
    plies: u32,

    /// Name of a search profile to load
    #[arg(long)]
    profile: Option<String>,

    /// Directory holding search profiles
    #[arg(long, default_value = PROFILES_DIR)]
    profiles_dir: PathBuf,

    /// Save the effective search settings under this profile name
    #[arg(long)]
    save_profile: Option<String>,

    /// List the saved profiles and exit
    #[arg(long)]
    list_profiles: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
    std::panic::set_hook(Box::new(tracing_panic::panic_hook));

    if args.list_profiles {
        for name in get_profiles(&args.profiles_dir)? {
            println!("{name}");
        }
        return Ok(());
    }

    let mut config = match &args.profile {
        Some(name) => {
            info!(profile = %name, "loading search profile");
            load_profile(&args.profiles_dir, name)?
        }
        None => SearchConfig::default(),
    };
    if let Some(ms) = args.movetime_ms {
        config.time_budget_ms = ms;
    }

    if let Some(name) = &args.save_profile {
        save_profile(&args.profiles_dir, name, &config)?;
        info!(profile = %name, dir = %args.profiles_dir.display(), "search profile saved");
    }

    let mode = match args.depth {
        Some(depth) => SearchMode::FixedDepth(depth),
        None => SearchMode::Timed,
    };
    let mut game = match &args.fen {
        Some(fen) => GameState::from_fen(fen, config, mode)?,
        None => GameState::new(config, mode),
    };

    for ply in 0..args.plies {
        if game.is_game_over() {
            info!(ply, outcome = ?game.outcome(), "game over");
            break;
        }
        let Some(result) = game.get_ai_move() else {
            warn!(ply, "searcher returned no move");
            break;
        };
        if !game.play(result.mv) {
            return Err(format!("searcher chose an illegal move: {:?}", result.mv).into());
        }
    }

    println!("{}", game.get_pgn());
    Ok(())
}
