//! Turn loop and scorekeeping

use std::cmp::Ordering;

use tracing::info;

use crate::board::Board;
use crate::error::Result;
use crate::player::Player;
use crate::rules::count_sos;

/// Final standings of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOutcome {
    pub scores: [u32; 2],
    /// Index of the winning player, `None` on a draw.
    pub winner: Option<usize>,
}

/// Alternating turn loop with the turn-retention rule.
///
/// Each round the current player produces a move, the move is applied, and
/// the change in the board's sequence count is awarded to the mover. A
/// scoring move keeps the turn; only a non-scoring move passes it. The game
/// ends when the grid is full, highest score winning.
pub struct Game {
    board: Board,
    players: [Player; 2],
    sos_count: u32,
}

impl Game {
    pub fn new(board: Board, players: [Player; 2]) -> Self {
        let sos_count = count_sos(&board);
        Self {
            board,
            players,
            sos_count,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Play until the board is full and announce the result.
    pub fn run(&mut self) -> Result<GameOutcome> {
        println!("{}", self.board);
        let mut current = 0;

        while self.board.has_empty_locations() {
            let mv = self.players[current].make_move(&mut self.board)?;
            self.board.place(mv);

            let new_count = count_sos(&self.board);
            let delta = new_count - self.sos_count;
            if delta > 0 {
                self.sos_count = new_count;
                self.players[current].add_score(delta);
                info!(player = current + 1, points = delta, %mv, "scoring move");
                println!("{} got {} point(s)\n", self.players[current], delta);
            } else {
                current = 1 - current;
            }

            println!("{}", self.board);
        }

        let outcome = self.outcome();
        self.announce(&outcome);
        Ok(outcome)
    }

    fn outcome(&self) -> GameOutcome {
        let scores = [self.players[0].score(), self.players[1].score()];
        let winner = match scores[0].cmp(&scores[1]) {
            Ordering::Greater => Some(0),
            Ordering::Less => Some(1),
            Ordering::Equal => None,
        };
        GameOutcome { scores, winner }
    }

    fn announce(&self, outcome: &GameOutcome) {
        for player in &self.players {
            println!("{}", player);
        }
        match outcome.winner {
            Some(index) => println!("Good game, the {} won!", self.players[index]),
            None => println!("It's a draw."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_game_fills_board_and_scores_add_up() {
        let board = Board::new(3);
        let players = [Player::random(Some(11)), Player::random(Some(17))];
        let mut game = Game::new(board, players);

        let outcome = game.run().unwrap();
        assert!(!game.board().has_empty_locations());
        assert_eq!(
            outcome.scores[0] + outcome.scores[1],
            count_sos(game.board())
        );
    }

    #[test]
    fn test_winner_reflects_scores() {
        let board = Board::new(4);
        let players = [Player::random(Some(2)), Player::search(2, Some(3))];
        let mut game = Game::new(board, players);

        let outcome = game.run().unwrap();
        match outcome.winner {
            Some(index) => {
                assert!(outcome.scores[index] > outcome.scores[1 - index]);
            }
            None => assert_eq!(outcome.scores[0], outcome.scores[1]),
        }
    }

    #[test]
    fn test_outcome_mirrors_player_scores() {
        let players = [Player::random(Some(5)), Player::random(Some(6))];
        let mut game = Game::new(Board::new(3), players);
        let outcome = game.run().unwrap();

        assert_eq!(game.players()[0].score(), outcome.scores[0]);
        assert_eq!(game.players()[1].score(), outcome.scores[1]);
    }
}
