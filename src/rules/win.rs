//! Win condition checking: k or more stones in a row

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Count same-stone cells from `pos` along `(dr, dc)`, excluding `pos`
/// itself, stopping after `limit` steps.
#[inline]
pub(super) fn run_length(board: &Board, pos: Pos, dr: i32, dc: i32, stone: Stone, limit: usize) -> usize {
    let mut count = 0;
    for step in 1..=limit as i32 {
        match pos.offset(dr, dc, step, board.size()) {
            Some(next) if board.get(next) == stone => count += 1,
            _ => break,
        }
    }
    count
}

impl Board {
    /// Whether the stone at `pos` sits on a line of at least `k` stones.
    ///
    /// Only the four lines through `pos` are checked, so this is the
    /// terminal test for the move that was just played.
    pub fn is_winning_move(&self, pos: Pos) -> bool {
        let stone = self.get(pos);
        if stone == Stone::Empty {
            return false;
        }
        let k = self.win_length();
        DIRECTIONS.iter().any(|&(dr, dc)| {
            let forward = run_length(self, pos, dr, dc, stone, k - 1);
            let backward = run_length(self, pos, -dr, -dc, stone, k - 1);
            1 + forward + backward >= k
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, k: usize, stones: &[(u8, u8)], stone: Stone) -> Board {
        let mut board = Board::new(size, k);
        for &(r, c) in stones {
            board.apply(Pos::new(r, c), stone);
        }
        board
    }

    #[test]
    fn test_win_horizontal() {
        let board = board_with(6, 4, &[(2, 0), (2, 1), (2, 2), (2, 3)], Stone::X);
        for c in 0..4 {
            assert!(board.is_winning_move(Pos::new(2, c)));
        }
    }

    #[test]
    fn test_win_vertical() {
        let board = board_with(6, 4, &[(0, 5), (1, 5), (2, 5), (3, 5)], Stone::O);
        assert!(board.is_winning_move(Pos::new(1, 5)));
    }

    #[test]
    fn test_win_diagonals() {
        let diag = board_with(6, 4, &[(1, 1), (2, 2), (3, 3), (4, 4)], Stone::X);
        assert!(diag.is_winning_move(Pos::new(4, 4)));

        let anti = board_with(6, 4, &[(0, 4), (1, 3), (2, 2), (3, 1)], Stone::X);
        assert!(anti.is_winning_move(Pos::new(2, 2)));
    }

    #[test]
    fn test_overline_also_wins() {
        let board = board_with(8, 4, &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5)], Stone::X);
        assert!(board.is_winning_move(Pos::new(0, 2)));
    }

    #[test]
    fn test_short_line_not_win() {
        let board = board_with(6, 4, &[(2, 0), (2, 1), (2, 2)], Stone::X);
        assert!(!board.is_winning_move(Pos::new(2, 1)));
    }

    #[test]
    fn test_broken_line_not_win() {
        let mut board = board_with(6, 4, &[(2, 0), (2, 1), (2, 3)], Stone::X);
        board.apply(Pos::new(2, 2), Stone::O);
        assert!(!board.is_winning_move(Pos::new(2, 1)));
        assert!(!board.is_winning_move(Pos::new(2, 2)));
    }

    #[test]
    fn test_empty_cell_never_wins() {
        let board = Board::new(3, 3);
        assert!(!board.is_winning_move(Pos::new(1, 1)));
    }

    #[test]
    fn test_run_length_limit() {
        let board = board_with(8, 4, &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)], Stone::X);
        assert_eq!(run_length(&board, Pos::new(0, 0), 0, 1, Stone::X, 3), 3);
        assert_eq!(run_length(&board, Pos::new(0, 0), 0, -1, Stone::X, 3), 0);
    }

    #[test]
    fn test_anti_diagonal_from_any_stone() {
        let board = board_with(5, 3, &[(4, 2), (3, 3), (2, 4)], Stone::O);
        for (row, col) in [(4, 2), (3, 3), (2, 4)] {
            assert!(board.is_winning_move(Pos::new(row, col)));
        }
        assert!(!board.is_winning_move(Pos::new(0, 0)));
    }
}
