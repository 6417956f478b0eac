//! Grid board with scoped move application

use std::cmp::Reverse;
use std::ops::{Deref, DerefMut};

use thiserror::Error;

use super::{Pos, Stone, MAX_BOARD_SIZE};

/// Errors raised while reading a board from text
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("board text is empty")]
    Empty,
    #[error("board has {0} rows, at most {MAX_BOARD_SIZE} are supported")]
    TooLarge(usize),
    #[error("row {row} has {len} cells, expected {expected}")]
    Ragged { row: usize, len: usize, expected: usize },
    #[error("invalid symbol {symbol:?} at row {row}, column {col}")]
    InvalidSymbol { symbol: char, row: usize, col: usize },
}

/// Square n×n board with a fixed win length k
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    win_length: usize,
    cells: Vec<Stone>,
    /// Occupied cell count, kept in step with `apply`/`revert`
    stones: usize,
    last_move: Option<Pos>,
}

impl Board {
    /// Create an empty `size`×`size` board. Win lengths above `size` are
    /// clamped to `size`.
    pub fn new(size: usize, win_length: usize) -> Self {
        debug_assert!(size >= 1 && size <= MAX_BOARD_SIZE);
        Self {
            size,
            win_length: win_length.clamp(1, size),
            cells: vec![Stone::Empty; size * size],
            stones: 0,
            last_move: None,
        }
    }

    /// Read a board from rows of symbols (`.` or `-` empty, `X`, `O`).
    ///
    /// Stones are applied row-major, so `last_move` ends on the last stone
    /// read. Blank lines and surrounding whitespace are ignored.
    pub fn parse(text: &str, win_length: usize) -> Result<Self, BoardParseError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(BoardParseError::Empty);
        }
        let size = rows.len();
        if size > MAX_BOARD_SIZE {
            return Err(BoardParseError::TooLarge(size));
        }

        let mut board = Board::new(size, win_length);
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != size {
                return Err(BoardParseError::Ragged {
                    row,
                    len,
                    expected: size,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let stone = Stone::from_symbol(symbol)
                    .ok_or(BoardParseError::InvalidSymbol { symbol, row, col })?;
                if stone != Stone::Empty {
                    board.apply(Pos::new(row as u8, col as u8), stone);
                }
            }
        }
        Ok(board)
    }

    /// Cells per side (n)
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Stones in a row needed to win (k)
    #[inline]
    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Total number of cells (n²)
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Center coordinate, used for opening and move ordering
    #[inline]
    pub fn center(&self) -> u8 {
        (self.size / 2) as u8
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.to_index(self.size)]
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos) == Stone::Empty
    }

    /// Most recent applied move, `None` before the first move
    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    /// Write `stone` into an empty cell and record it as the last move.
    /// The cell must be empty; this is not checked in release builds.
    #[inline]
    pub fn apply(&mut self, pos: Pos, stone: Stone) {
        let idx = pos.to_index(self.size);
        debug_assert_eq!(self.cells[idx], Stone::Empty, "apply on occupied cell {pos}");
        if self.cells[idx] == Stone::Empty && stone != Stone::Empty {
            self.stones += 1;
        }
        self.cells[idx] = stone;
        self.last_move = Some(pos);
    }

    /// Reset a cell to empty. Does not touch `last_move`.
    #[inline]
    pub fn revert(&mut self, pos: Pos) {
        let idx = pos.to_index(self.size);
        if self.cells[idx] != Stone::Empty {
            self.stones -= 1;
        }
        self.cells[idx] = Stone::Empty;
    }

    /// Apply a move for the lifetime of the returned guard.
    ///
    /// Dropping the guard reverts the cell and restores the previous
    /// `last_move`, whichever way the holder's scope is left.
    #[inline]
    pub fn place(&mut self, pos: Pos, stone: Stone) -> Placed<'_> {
        let previous = self.last_move;
        self.apply(pos, stone);
        Placed {
            board: self,
            pos,
            previous,
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.stones == self.cells.len()
    }

    #[inline]
    pub fn stone_count(&self) -> usize {
        self.stones
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.stones == 0
    }

    /// Canonical encoding of the grid contents: one symbol byte per cell,
    /// row-major. Independent of move history and side to move.
    pub fn key(&self) -> Box<[u8]> {
        self.cells.iter().map(|s| s.symbol()).collect()
    }

    /// Negated Manhattan distance to the center; larger is closer
    #[inline]
    pub fn center_proximity(&self, pos: Pos) -> i32 {
        let center = i32::from(self.center());
        -((i32::from(pos.row) - center).abs() + (i32::from(pos.col) - center).abs())
    }

    /// Empty cells within Chebyshev distance `radius` of any stone, closest
    /// to the center first. Ties keep discovery order (row-major over the
    /// stones), so the ordering is deterministic.
    pub fn candidate_moves(&self, radius: u8) -> Vec<Pos> {
        let radius = i32::from(radius);
        let mut seen = vec![false; self.cells.len()];
        let mut moves = Vec::with_capacity(self.cells.len() - self.stones);

        for (idx, &cell) in self.cells.iter().enumerate() {
            if cell == Stone::Empty {
                continue;
            }
            let origin = Pos::from_index(idx, self.size);
            for dr in -radius..=radius {
                for dc in -radius..=radius {
                    let Some(pos) = origin.offset(dr, dc, 1, self.size) else {
                        continue;
                    };
                    let i = pos.to_index(self.size);
                    if seen[i] || self.cells[i] != Stone::Empty {
                        continue;
                    }
                    seen[i] = true;
                    moves.push(pos);
                }
            }
        }

        moves.sort_by_key(|&pos| Reverse(self.center_proximity(pos)));
        moves
    }
}

/// A move applied by [`Board::place`], reverted on drop
pub struct Placed<'a> {
    board: &'a mut Board,
    pos: Pos,
    previous: Option<Pos>,
}

impl Deref for Placed<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Placed<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Placed<'_> {
    fn drop(&mut self) {
        self.board.revert(self.pos);
        self.board.last_move = self.previous;
    }
}
