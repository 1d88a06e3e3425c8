use serde::{Deserialize, Serialize};

use arcade_core::error::InvalidMove;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A player marker. X is the human in computer mode and always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    X,
    O,
}

impl Marker {
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

/// A 3×3 board; the cell count is fixed at creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Marker>; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, index: usize) -> Option<Marker> {
        self.cells[index]
    }

    /// Place `marker` on an empty in-range cell; the board is unchanged on
    /// rejection.
    pub fn place(&mut self, index: usize, marker: Marker) -> Result<(), InvalidMove> {
        if index >= CELL_COUNT {
            return Err(InvalidMove::OutOfRange(index));
        }
        if self.cells[index].is_some() {
            return Err(InvalidMove::CellOccupied(index));
        }
        self.cells[index] = Some(marker);
        Ok(())
    }

    /// Unchecked placement for search; the caller guarantees an empty cell.
    pub(crate) fn set(&mut self, index: usize, marker: Marker) {
        self.cells[index] = Some(marker);
    }

    /// Scan all 8 lines for a three-in-a-row.
    pub fn winner(&self) -> Option<Marker> {
        for [a, b, c] in LINES {
            if let Some(marker) = self.cells[a]
                && self.cells[b] == Some(marker)
                && self.cells[c] == Some(marker)
            {
                return Some(marker);
            }
        }
        None
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    pub fn is_empty_cell(&self, index: usize) -> bool {
        index < CELL_COUNT && self.cells[index].is_none()
    }

    /// Indices of empty cells in ascending order.
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELL_COUNT).filter(|&i| self.cells[i].is_none()).collect()
    }

    pub fn move_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Board from a compact literal: 'X', 'O', or '.' per cell.
    pub(crate) fn board_from(s: &str) -> Board {
        let mut board = Board::new();
        for (i, ch) in s.chars().enumerate() {
            match ch {
                'X' => board.set(i, Marker::X),
                'O' => board.set(i, Marker::O),
                '.' => {},
                other => panic!("bad board char {other}"),
            }
        }
        board
    }

    #[test]
    fn place_rejects_out_of_range() {
        let mut board = Board::new();
        assert_eq!(
            board.place(9, Marker::X),
            Err(InvalidMove::OutOfRange(9))
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn place_rejects_occupied_cell() {
        let mut board = Board::new();
        board.place(4, Marker::X).unwrap();
        assert_eq!(
            board.place(4, Marker::O),
            Err(InvalidMove::CellOccupied(4))
        );
        assert_eq!(board.cell(4), Some(Marker::X));
    }

    #[test]
    fn row_column_and_diagonal_wins_are_found() {
        assert_eq!(board_from("XXX......").winner(), Some(Marker::X));
        assert_eq!(board_from("O..O..O..").winner(), Some(Marker::O));
        assert_eq!(board_from("X...X...X").winner(), Some(Marker::X));
        assert_eq!(board_from("..O.O.O..").winner(), Some(Marker::O));
    }

    #[test]
    fn mixed_line_is_no_winner() {
        assert_eq!(board_from("XOX......").winner(), None);
    }

    #[test]
    fn full_drawn_board_has_no_winner() {
        let board = board_from("XOXXOOOXX");
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn empty_cells_ascend() {
        let board = board_from("X.O...X..");
        assert_eq!(board.empty_cells(), vec![1, 3, 4, 5, 7, 8]);
    }

    #[test]
    fn move_count_matches_markers() {
        assert_eq!(board_from("X.O...X..").move_count(), 3);
        assert_eq!(Board::new().move_count(), 0);
    }
}
