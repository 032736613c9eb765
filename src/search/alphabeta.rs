//! Alpha-Beta search with turn retention
//!
//! This module implements the move selection for the computer player: a
//! depth-limited minimax over every (empty cell, sign) placement, with
//! alpha-beta pruning and the SOS turn-retention rule: a placement that
//! completes a sequence keeps the turn, so the maximizing/minimizing role
//! only flips after a non-scoring move.
//!
//! # Features
//!
//! - Finite integer alpha-beta bounds derived from the board size
//! - Per-branch node and cutoff accounting returned up the tree
//! - Block-heuristic tie-break for flat evaluation landscapes
//! - Prune-rate diagnostics relative to the theoretical node count
//!
//! # Example
//!
//! ```
//! use sos::board::{Board, Move, Pos, Sign};
//! use sos::search::Searcher;
//!
//! let mut board = Board::new(3);
//! board.place(Move::new(Pos::new(0, 0), Sign::S));
//! board.place(Move::new(Pos::new(0, 2), Sign::S));
//!
//! let mut searcher = Searcher::new(1, Some(42));
//! let result = searcher.choose_move(&mut board);
//! assert_eq!(result.best_move, Some(Move::new(Pos::new(0, 1), Sign::O)));
//! ```

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::board::{Board, Move, Sign};
use crate::eval::block_evaluation;
use crate::player::random_move;
use crate::rules::count_sos;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    /// Nodes visited across all root candidates
    pub nodes: u64,
    /// Alpha-beta cutoff events
    pub cutoffs: u64,
}

/// Search result containing the selected move and associated diagnostics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Selected move, `None` only on a full board
    pub best_move: Option<Move>,
    /// Best guaranteed leaf value found at the root
    pub score: i32,
    /// Node and cutoff counters
    pub stats: SearchStats,
    /// Cutoff events as a percentage of the theoretical node count
    pub prune_rate: f64,
}

/// Value of one explored branch, accumulated on the way back up.
struct BranchEval {
    score: i32,
    nodes: u64,
    cutoffs: u64,
}

/// Depth-limited alpha-beta searcher for the computer player.
///
/// Holds its own random source so that tie-break choices are reproducible
/// under a fixed seed.
pub struct Searcher {
    depth: u32,
    rng: StdRng,
}

impl Searcher {
    pub fn new(depth: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };
        Self { depth, rng }
    }

    /// Select a move for the side to act.
    ///
    /// Every candidate placement is searched with a fresh full window, the
    /// opponent minimizing at the next ply; the strictly best score wins,
    /// first seen on ties. When every candidate scores the same (a flat
    /// evaluation landscape, common on sparse boards) the game tree offered
    /// no signal and the choice falls back to the block-heuristic tie-break.
    ///
    /// The board is mutated only through scoped speculation and is restored
    /// exactly before this method returns.
    pub fn choose_move(&mut self, board: &mut Board) -> SearchResult {
        let ceiling = score_ceiling(board);
        let empties = board.empty_locations();
        let empty_count = empties.len();

        let mut stats = SearchStats::default();
        let mut scores = Vec::with_capacity(empty_count * Sign::PLAYABLE.len());
        let mut best_move = None;
        let mut best_score = -ceiling;

        for &pos in &empties {
            for sign in Sign::PLAYABLE {
                let mv = Move::new(pos, sign);
                let eval =
                    board.with_move(mv, |b| minimax(b, self.depth, false, -ceiling, ceiling));
                stats.nodes += eval.nodes;
                stats.cutoffs += eval.cutoffs;
                scores.push(eval.score);

                if eval.score > best_score {
                    best_score = eval.score;
                    best_move = Some(mv);
                }
            }
        }

        if let Some(&worst) = scores.iter().min() {
            if best_score == worst {
                best_move = self.smart_random_move(board);
            }
        }

        let prune_rate = prune_rate(stats.cutoffs, empty_count, self.depth);
        debug!(
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            prune_rate,
            "alpha-beta search complete"
        );

        SearchResult {
            best_move,
            score: best_score,
            stats,
            prune_rate,
        }
    }

    /// Tie-break for flat landscapes.
    ///
    /// Keeps the candidates whose block-evaluation score is exactly 1,
    /// meaning the placement leaves no S cell one step from enabling a
    /// sequence, and picks one uniformly. Falls back to a fully random move
    /// when no candidate qualifies.
    fn smart_random_move(&mut self, board: &mut Board) -> Option<Move> {
        let mut quiet = Vec::new();
        for pos in board.empty_locations() {
            for sign in Sign::PLAYABLE {
                let mv = Move::new(pos, sign);
                let score = board.with_move(mv, |b| block_evaluation(b));
                if score == 1.0 {
                    quiet.push(mv);
                }
            }
        }

        if let Some(&mv) = quiet.choose(&mut self.rng) {
            return Some(mv);
        }
        random_move(board, &mut self.rng)
    }
}

/// Recursive minimax with alpha-beta pruning.
///
/// The candidate's score delta decides whether the role flips for the next
/// ply: a scoring placement keeps the turn. Leaves evaluate to the absolute
/// sequence count of the board as configured. Every speculative placement
/// goes through [`Board::with_move`], so the grid is restored before the
/// next sibling regardless of pruning.
fn minimax(board: &mut Board, depth: u32, maximizing: bool, mut alpha: i32, mut beta: i32) -> BranchEval {
    if depth == 0 || !board.has_empty_locations() {
        return BranchEval {
            score: count_sos(board) as i32,
            nodes: 1,
            cutoffs: 0,
        };
    }

    let mut nodes = 1;
    let mut cutoffs = 0;
    let mut best = if maximizing {
        -score_ceiling(board)
    } else {
        score_ceiling(board)
    };

    'candidates: for pos in board.empty_locations() {
        for sign in Sign::PLAYABLE {
            let before = count_sos(board);
            let mv = Move::new(pos, sign);
            let eval = board.with_move(mv, |b| {
                let scored = count_sos(b) != before;
                let next = if scored { maximizing } else { !maximizing };
                minimax(b, depth - 1, next, alpha, beta)
            });
            nodes += eval.nodes;
            cutoffs += eval.cutoffs;

            if maximizing {
                best = best.max(eval.score);
                alpha = alpha.max(best);
            } else {
                best = best.min(eval.score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                cutoffs += 1;
                break 'candidates;
            }
        }
    }

    BranchEval {
        score: best,
        nodes,
        cutoffs,
    }
}

/// Finite stand-in for infinity in the alpha-beta window.
///
/// An O anchors at most four sequences, so the total count on any reachable
/// board stays strictly below `4 * cells`.
fn score_ceiling(board: &Board) -> i32 {
    4 * (board.size() * board.size()) as i32
}

/// Cutoff events as a percentage of the theoretical node count
/// `prod_{k = e - d + 1..=e} 2k`, the product of branching factors over the
/// explored depth. Reports 0 whenever the product is not positive (depth
/// exceeding the empty-cell count drives a factor to zero). Observational
/// only; never used in move selection.
fn prune_rate(cutoffs: u64, empty_count: usize, depth: u32) -> f64 {
    let top = empty_count as i64;
    let bottom = top - i64::from(depth) + 1;
    let total: f64 = (bottom..=top).map(|k| (2 * k) as f64).product();
    if total > 0.0 {
        100.0 * cutoffs as f64 / total
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    fn place_all(board: &mut Board, moves: &[(i32, i32, Sign)]) {
        for &(x, y, sign) in moves {
            board.place(Move::new(Pos::new(x, y), sign));
        }
    }

    /// Plain minimax without pruning, same turn-retention semantics.
    fn exhaustive(board: &mut Board, depth: u32, maximizing: bool) -> i32 {
        if depth == 0 || !board.has_empty_locations() {
            return count_sos(board) as i32;
        }
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        for pos in board.empty_locations() {
            for sign in Sign::PLAYABLE {
                let before = count_sos(board);
                let score = board.with_move(Move::new(pos, sign), |b| {
                    let scored = count_sos(b) != before;
                    let next = if scored { maximizing } else { !maximizing };
                    exhaustive(b, depth - 1, next)
                });
                best = if maximizing {
                    best.max(score)
                } else {
                    best.min(score)
                };
            }
        }
        best
    }

    /// Pruning must not change any root candidate's value, only the node
    /// count. Checked per candidate against the unpruned search.
    fn assert_matches_exhaustive(board: &mut Board, depth: u32) {
        let ceiling = score_ceiling(board);
        for pos in board.empty_locations() {
            for sign in Sign::PLAYABLE {
                let mv = Move::new(pos, sign);
                let pruned =
                    board.with_move(mv, |b| minimax(b, depth, false, -ceiling, ceiling).score);
                let brute = board.with_move(mv, |b| exhaustive(b, depth, false));
                assert_eq!(pruned, brute, "diverged at {} depth {}", mv, depth);
            }
        }
    }

    #[test]
    fn test_pruned_search_matches_exhaustive_minimax() {
        for depth in 1..=2 {
            let mut board = Board::new(3);
            assert_matches_exhaustive(&mut board, depth);

            let mut board = Board::new(3);
            place_all(
                &mut board,
                &[(0, 0, Sign::S), (0, 2, Sign::S), (1, 1, Sign::O)],
            );
            assert_matches_exhaustive(&mut board, depth);

            let mut board = Board::new(3);
            place_all(
                &mut board,
                &[(0, 0, Sign::S), (1, 0, Sign::O), (2, 2, Sign::O)],
            );
            assert_matches_exhaustive(&mut board, depth);
        }
    }

    #[test]
    fn test_only_scoring_completion_is_ranked_strictly_best() {
        // S _ S in the top row: O at the gap is the only move that raises
        // the count, so it must win the root outright
        for depth in 1..=2 {
            let mut board = Board::new(3);
            place_all(&mut board, &[(0, 0, Sign::S), (0, 2, Sign::S)]);

            let mut searcher = Searcher::new(depth, Some(7));
            let result = searcher.choose_move(&mut board);
            assert_eq!(result.best_move, Some(Move::new(Pos::new(0, 1), Sign::O)));
            assert!(result.score >= 1);
        }
    }

    #[test]
    fn test_board_restored_after_search() {
        let mut board = Board::new(4);
        place_all(&mut board, &[(1, 1, Sign::S), (2, 2, Sign::O)]);
        let snapshot = board.clone();

        let mut searcher = Searcher::new(2, Some(3));
        searcher.choose_move(&mut board);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_flat_landscape_falls_back_to_tie_break() {
        // On an empty board no placement forces anything at depth 1: every
        // candidate scores 0 and the tree offers no signal
        let mut board = Board::new(3);
        let mut searcher = Searcher::new(1, Some(5));
        let result = searcher.choose_move(&mut board);

        let mv = result.best_move.expect("empty board has moves");
        assert!(board.move_is_legal(mv));
        assert_eq!(result.score, 0);

        // Same seed, same choice
        let mut other = Searcher::new(1, Some(5));
        assert_eq!(other.choose_move(&mut board).best_move, Some(mv));
    }

    #[test]
    fn test_tie_break_prefers_quiet_placements() {
        // With an S at the corner, placements like O beside it would leave
        // an S cell one step from a sequence; quiet candidates exist (for
        // example S at (2, 1)), so the tie-break must never pick a loud one.
        for seed in 0..32 {
            let mut board = Board::new(3);
            board.place(Move::new(Pos::new(0, 0), Sign::S));

            let mut searcher = Searcher::new(1, Some(seed));
            let mv = searcher
                .smart_random_move(&mut board)
                .expect("board has empty cells");
            let score = board.with_move(mv, |b| block_evaluation(b));
            assert_eq!(score, 1.0, "seed {} picked loud move {}", seed, mv);
        }
    }

    #[test]
    fn test_full_random_fallback_when_no_quiet_move_exists() {
        // S _ S everywhere it matters: a 3x3 board whose every empty cell
        // touches an open pattern, leaving no block-score-1 candidate
        let mut board = Board::new(3);
        place_all(
            &mut board,
            &[
                (0, 0, Sign::S),
                (0, 2, Sign::S),
                (2, 0, Sign::S),
                (2, 2, Sign::S),
            ],
        );

        let quiet_exists = board.empty_locations().iter().any(|&pos| {
            Sign::PLAYABLE.iter().any(|&sign| {
                board.with_move(Move::new(pos, sign), |b| block_evaluation(b)) == 1.0
            })
        });
        assert!(!quiet_exists);

        let mut searcher = Searcher::new(1, Some(9));
        let mv = searcher
            .smart_random_move(&mut board)
            .expect("board has empty cells");
        assert!(board.move_is_legal(mv));
    }

    #[test]
    fn test_no_cutoffs_at_shallow_depth() {
        // Nothing past the root can be pruned with nothing to compare
        for depth in 0..=1 {
            let mut board = Board::new(3);
            place_all(&mut board, &[(0, 0, Sign::S), (0, 2, Sign::S)]);

            let mut searcher = Searcher::new(depth, Some(1));
            let result = searcher.choose_move(&mut board);
            assert_eq!(result.stats.cutoffs, 0);
            assert_eq!(result.prune_rate, 0.0);
        }
    }

    #[test]
    fn test_prune_rate_is_bounded() {
        let mut board = Board::new(4);
        place_all(
            &mut board,
            &[(0, 0, Sign::S), (1, 1, Sign::O), (2, 2, Sign::S)],
        );

        let mut searcher = Searcher::new(3, Some(2));
        let result = searcher.choose_move(&mut board);
        assert!(result.prune_rate >= 0.0);
        assert!(result.prune_rate <= 100.0);
    }

    #[test]
    fn test_prune_rate_reports_zero_when_depth_exceeds_empties() {
        // The theoretical node product hits a zero factor; the rate is
        // reported as 0 rather than dividing by it
        assert_eq!(prune_rate(10, 3, 5), 0.0);
        assert_eq!(prune_rate(0, 0, 0), 0.0);
        assert!(prune_rate(4, 8, 2) > 0.0);
    }

    /// The leaf value is the absolute sequence count of the board, with no
    /// attribution of who scored it. A leaf the opponent just scored on is
    /// indistinguishable from one the searching player scored on. Preserved
    /// reference behavior, kept as a named caveat.
    #[test]
    fn leaf_value_is_absolute_count_not_differential() {
        let mut board = Board::new(3);
        place_all(
            &mut board,
            &[(0, 0, Sign::S), (0, 1, Sign::O), (0, 2, Sign::S)],
        );

        let ceiling = score_ceiling(&board);
        let as_max = minimax(&mut board, 0, true, -ceiling, ceiling).score;
        let as_min = minimax(&mut board, 0, false, -ceiling, ceiling).score;
        assert_eq!(as_max, 1);
        assert_eq!(as_min, 1);
    }

    #[test]
    fn test_search_on_full_board_returns_no_move() {
        let mut board = Board::new(3);
        for pos in board.empty_locations() {
            board.place(Move::new(pos, Sign::S));
        }

        let mut searcher = Searcher::new(2, Some(0));
        let result = searcher.choose_move(&mut board);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_depth_beyond_empty_cells_terminates() {
        let mut board = Board::new(3);
        for pos in board.empty_locations() {
            if pos != Pos::new(2, 2) && pos != Pos::new(2, 1) {
                board.place(Move::new(pos, Sign::O));
            }
        }

        let mut searcher = Searcher::new(10, Some(4));
        let result = searcher.choose_move(&mut board);
        assert!(result.best_move.is_some());
    }
}
