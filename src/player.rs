//! Player variants
//!
//! The three ways a side can be driven: a person at the console, a uniform
//! random mover, and the alpha-beta search engine. `Player` is a closed set
//! of variants behind one `make_move` capability; construction is a plain
//! mapping from [`PlayerKind`] to the matching constructor at the CLI edge.

use std::io::{self, Write};

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{Board, Move, Pos, Sign};
use crate::error::{Error, Result};
use crate::search::Searcher;

/// Tag for the player variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Random,
    Search,
}

impl std::fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PlayerKind::Human => "human",
            PlayerKind::Random => "random",
            PlayerKind::Search => "search",
        };
        write!(f, "{}", label)
    }
}

/// Per-variant state behind the shared capability.
enum Brain {
    Human,
    Random(StdRng),
    Search(Searcher),
}

/// A side in the game: its kind, its score, and its move source.
pub struct Player {
    kind: PlayerKind,
    score: u32,
    brain: Brain,
}

impl Player {
    /// Console-driven player.
    pub fn human() -> Self {
        Self {
            kind: PlayerKind::Human,
            score: 0,
            brain: Brain::Human,
        }
    }

    /// Uniform random mover. Without a seed the generator self-seeds.
    pub fn random(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };
        Self {
            kind: PlayerKind::Random,
            score: 0,
            brain: Brain::Random(rng),
        }
    }

    /// Search-driven player with the given horizon.
    pub fn search(depth: u32, seed: Option<u64>) -> Self {
        Self {
            kind: PlayerKind::Search,
            score: 0,
            brain: Brain::Search(Searcher::new(depth, seed)),
        }
    }

    #[inline]
    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Credit points earned by the last move.
    pub fn add_score(&mut self, delta: u32) {
        self.score += delta;
    }

    /// Produce the next move.
    ///
    /// Human input is validated and re-prompted until legal; the random and
    /// search variants only ever offer empty cells by construction. The
    /// search variant mutates the board speculatively but always restores it.
    pub fn make_move(&mut self, board: &mut Board) -> Result<Move> {
        match &mut self.brain {
            Brain::Human => prompt_move(board),
            Brain::Random(rng) => random_move(board, rng).ok_or(Error::NoMovesAvailable),
            Brain::Search(searcher) => searcher
                .choose_move(board)
                .best_move
                .ok_or(Error::NoMovesAvailable),
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} player (score {})", self.kind, self.score)
    }
}

/// Uniformly random legal move: a random empty cell with a random playable
/// sign. `None` on a full board. Shared with the search tie-break fallback.
pub(crate) fn random_move(board: &Board, rng: &mut StdRng) -> Option<Move> {
    let empties = board.empty_locations();
    let pos = empties.choose(rng)?;
    let sign = Sign::PLAYABLE.choose(rng)?;
    Some(Move::new(*pos, *sign))
}

/// Console prompt loop: row, column, then the sign letter. Parse failures
/// and illegal targets are reported and re-prompted, never fatal.
fn prompt_move(board: &Board) -> Result<Move> {
    let max = board.size() - 1;
    loop {
        let x = match prompt(&format!("Enter row 0-{}: ", max))?.parse::<i32>() {
            Ok(value) => value,
            Err(_) => {
                println!("Please enter a number.");
                continue;
            }
        };
        let y = match prompt(&format!("Enter column 0-{}: ", max))?.parse::<i32>() {
            Ok(value) => value,
            Err(_) => {
                println!("Please enter a number.");
                continue;
            }
        };

        let input = prompt("Enter letter S or O: ")?;
        let mut chars = input.chars();
        let sign = match (chars.next(), chars.next()) {
            (Some(c), None) => match Sign::from_input(c) {
                Ok(sign) => sign,
                Err(err) => {
                    println!("{}", err);
                    continue;
                }
            },
            _ => {
                println!("Enter a single letter, S or O.");
                continue;
            }
        };

        let mv = Move::new(Pos::new(x, y), sign);
        if !board.is_in_range(mv.pos) {
            println!(
                "{}. Try again.\n",
                Error::OutOfBounds {
                    pos: mv.pos,
                    size: board.size(),
                }
            );
            continue;
        }
        if !board.move_is_legal(mv) {
            println!("{}. Try again.\n", Error::CellOccupied { pos: mv.pos });
            continue;
        }
        return Ok(mv);
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
