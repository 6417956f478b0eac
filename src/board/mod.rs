//! Board representation for m,n,k games

pub mod board;


// Re-exports
pub use board::{Board, BoardParseError, Placed};

use serde::{Deserialize, Serialize};

/// Largest supported side length (coordinates are stored as `u8`)
pub const MAX_BOARD_SIZE: usize = u8::MAX as usize;

/// The four line directions: horizontal, vertical, diagonal, anti-diagonal
pub const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Cell contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Stone {
    #[default]
    #[serde(rename = ".")]
    Empty,
    X,
    O,
}

impl Stone {
    /// Get opponent symbol
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::X => Stone::O,
            Stone::O => Stone::X,
            Stone::Empty => Stone::Empty,
        }
    }

    /// One-byte symbol used in position keys and board text
    #[inline]
    pub fn symbol(self) -> u8 {
        match self {
            Stone::Empty => b'.',
            Stone::X => b'X',
            Stone::O => b'O',
        }
    }

    /// Parse a board symbol. Both `.` and `-` denote an empty cell.
    #[inline]
    pub fn from_symbol(ch: char) -> Option<Stone> {
        match ch {
            '.' | '-' => Some(Stone::Empty),
            'X' | 'x' => Some(Stone::X),
            'O' | 'o' => Some(Stone::O),
            _ => None,
        }
    }
}

/// Position on the board, zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major index on a board with `size` cells per side
    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            row: (idx / size) as u8,
            col: (idx % size) as u8,
        }
    }

    /// Step `steps` cells along `(dr, dc)`, or `None` when leaving a board
    /// with `size` cells per side
    #[inline]
    pub fn offset(self, dr: i32, dc: i32, steps: i32, size: usize) -> Option<Pos> {
        let r = i32::from(self.row) + dr * steps;
        let c = i32::from(self.col) + dc * steps;
        if r >= 0 && c >= 0 && (r as usize) < size && (c as usize) < size {
            Some(Pos::new(r as u8, c as u8))
        } else {
            None
        }
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}
