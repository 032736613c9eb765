//! Board representation for SOS

pub mod grid;


// Re-exports
pub use grid::Board;

use crate::error::Error;

/// Cell marks. `Empty` is the rest state of a cell; only `S` and `O` are
/// valid move payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    S,
    O,
    Empty,
}

impl Sign {
    /// The two signs a player may write into a cell.
    pub const PLAYABLE: [Sign; 2] = [Sign::S, Sign::O];

    #[inline]
    pub fn is_empty(self) -> bool {
        self == Sign::Empty
    }

    /// Parse a sign from user input. Only `S` and `O` are accepted.
    pub fn from_input(c: char) -> Result<Sign, Error> {
        match c.to_ascii_uppercase() {
            'S' => Ok(Sign::S),
            'O' => Ok(Sign::O),
            other => Err(Error::InvalidSign(other)),
        }
    }
}

impl std::fmt::Display for Sign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = match self {
            Sign::S => 'S',
            Sign::O => 'O',
            Sign::Empty => '_',
        };
        write!(f, "{}", c)
    }
}

/// Position on the board: `x` is the row, `y` the column, both 0-indexed.
///
/// Coordinates are signed so that neighbor arithmetic in pattern scans can
/// step off the grid and be rejected by a range check instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away along `(dx, dy)`.
    #[inline]
    pub fn step(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A placement: a position plus a non-`Empty` sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub pos: Pos,
    pub sign: Sign,
}

impl Move {
    #[inline]
    pub fn new(pos: Pos, sign: Sign) -> Self {
        debug_assert!(!sign.is_empty());
        Self { pos, sign }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.sign, self.pos)
    }
}
