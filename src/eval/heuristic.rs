//! Near-sequence heuristics

use crate::board::{Board, Pos, Sign};

/// Whether `pos` sits one placement away from a sequence through a neighbor.
///
/// Probes the 8 non-zero directions. With `near` one step and `far` two
/// steps out along a direction, the cell qualifies when `far` is in range
/// and either
/// - `near` holds `O` and `far` is empty (an S at `far` would complete
///   S-O-S), or
/// - `near` is empty and `far` holds `S` (an O at `near` would complete it).
///
/// Callers pass `S` cells; the probe itself never reads the sign at `pos`.
/// Heuristic only, never used for scoring.
pub fn is_almost_sos(board: &Board, pos: Pos) -> bool {
    for dx in -1..=1 {
        for dy in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let near = pos.step(dx, dy);
            let far = pos.step(2 * dx, 2 * dy);
            // far in range implies near in range: near sits between pos and far
            if !board.is_in_range(far) {
                continue;
            }
            let needs_s = board.get(near) == Some(Sign::O) && board.get(far) == Some(Sign::Empty);
            let needs_o = board.get(near) == Some(Sign::Empty) && board.get(far) == Some(Sign::S);
            if needs_s || needs_o {
                return true;
            }
        }
    }
    false
}

/// Block-evaluation score: `1 / (1 + t)` where `t` counts the S cells for
/// which [`is_almost_sos`] holds.
///
/// A score of exactly 1 means no S cell on the board is one placement away
/// from enabling a new sequence, which is what the tie-break prefers to
/// leave behind.
pub fn block_evaluation(board: &Board) -> f64 {
    let threats = board
        .locations_with_sign(Sign::S)
        .into_iter()
        .filter(|&pos| is_almost_sos(board, pos))
        .count();
    1.0 / (1.0 + threats as f64)
}
