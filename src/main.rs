//! Console front end for the SOS engine

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use sos::{Board, Game, Player};

#[derive(Parser, Debug)]
#[command(
    name = "sos",
    about = "Play SOS against another human, a random mover, or the alpha-beta engine"
)]
struct Args {
    /// Board size N (the grid is N x N)
    #[arg(long, default_value_t = 4)]
    size: usize,

    /// Who moves first
    #[arg(long, value_enum, default_value_t = PlayerArg::Human)]
    player1: PlayerArg,

    /// Who moves second
    #[arg(long, value_enum, default_value_t = PlayerArg::Search)]
    player2: PlayerArg,

    /// Search depth for the engine (defaults to log2 of the board size)
    #[arg(long)]
    depth: Option<u32>,

    /// RNG seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlayerArg {
    Human,
    Random,
    Search,
}

fn build_player(kind: PlayerArg, depth: u32, seed: Option<u64>) -> Player {
    match kind {
        PlayerArg::Human => Player::human(),
        PlayerArg::Random => Player::random(seed),
        PlayerArg::Search => Player::search(depth, seed),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if args.size < 3 {
        bail!("board size must be at least 3, got {}", args.size);
    }

    let depth = args.depth.unwrap_or_else(|| args.size.ilog2());
    let board = Board::new(args.size);
    // Offset the second seed so two seeded random players do not mirror
    let players = [
        build_player(args.player1, depth, args.seed),
        build_player(args.player2, depth, args.seed.map(|s| s.wrapping_add(1))),
    ];

    Game::new(board, players).run()?;
    Ok(())
}
