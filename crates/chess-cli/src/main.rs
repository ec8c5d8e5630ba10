//! Chess CLI - replays coordinate moves and inspects the resulting position.
//!
//! Moves are written as source and destination squares, e.g. `e2e4`.
//! Settings are read from `chess.toml` unless `--config` says otherwise.

mod config;
mod report;

use anyhow::{bail, Context, Result};
use chess_engine::{perft, Game, GameResult};
use clap::{ArgAction, Parser, Subcommand};
use config::CliConfig;
use std::path::PathBuf;
use std::time::Instant;
use tracing::Level;

#[derive(Parser)]
#[command(name = "chess")]
#[command(about = "Replay and inspect chess games")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = "chess.toml")]
    config: PathBuf,

    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play moves from the starting position and report the outcome
    Play {
        /// Moves to play, e.g. e2e4 e7e5
        #[arg(required = true)]
        moves: Vec<String>,
    },
    /// List the legal moves of the side to move
    Moves {
        /// Moves to play first
        moves: Vec<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Count leaf nodes per move from the starting position
    Perft {
        /// Search depth (defaults to perft_depth from the config)
        #[arg(short, long)]
        depth: Option<u32>,
    },
    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let level = log_level(&config, cli.verbose)?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(config = ?cli.config, "configuration loaded");

    match cli.command {
        Commands::Play { moves } => {
            let game = replay(&moves, |game| {
                if config.show_board {
                    if let Some(last) = game.move_history().last() {
                        println!("{}. {}", game.ply_count(), last.notation);
                    }
                    println!("{}", game.board());
                }
            })?;
            println!("{}", describe(&game));
        }
        Commands::Moves { moves, json } => {
            let game = replay(&moves, |_| {})?;
            let listing = report::MoveListing::from_board(game.board())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&listing)?);
            } else {
                println!("{}", describe(&game));
                for entry in &listing.moves {
                    println!("{:<10} {}", entry.notation, entry.status);
                }
            }
        }
        Commands::Perft { depth } => {
            let depth = depth.unwrap_or(config.perft_depth);
            let game = Game::new();
            let start = Instant::now();
            let divide = perft::perft_divide(game.board(), depth)?;
            let total: u64 = divide.iter().map(|(_, nodes)| nodes).sum();
            for (mv, nodes) in &divide {
                println!("{}: {}", mv, nodes);
            }
            println!();
            println!("Nodes searched: {}", total);
            tracing::info!(depth, total, elapsed = ?start.elapsed(), "perft finished");
        }
        Commands::Config => {
            print!("{}", toml::to_string(&config)?);
        }
    }

    Ok(())
}

fn log_level(config: &CliConfig, verbose: u8) -> Result<Level> {
    Ok(match verbose {
        0 => config
            .log_level
            .parse()
            .with_context(|| format!("invalid log_level '{}'", config.log_level))?,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    })
}

/// Plays `moves` from the start, calling `after_move` after each one.
///
/// A move that cannot be played is an error naming the move.
fn replay(moves: &[String], mut after_move: impl FnMut(&Game)) -> Result<Game> {
    let mut game = Game::new();
    for text in moves {
        let status = game
            .make_move_text(text)
            .with_context(|| format!("cannot play {}", text))?;
        if !status.is_done() {
            bail!("cannot play {}: {}", text, status);
        }
        after_move(&game);
    }
    Ok(game)
}

/// One-line summary of whose turn it is and how the game stands.
fn describe(game: &Game) -> String {
    let side = game.board().next_move_maker();
    match game.result() {
        Some(GameResult::Stalemate) => format!("{} is stalemated (1/2-1/2)", side),
        Some(result) => format!("{} is checkmated ({})", side, result),
        None if game.is_check() => format!("{} to move, in check", side),
        None => format!("{} to move", side),
    }
}
