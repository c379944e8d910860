use ratatui::style::Color;

use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::piece::Piece;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Cell {
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_filled(self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

pub type Row = [Cell; BOARD_WIDTH];

/// Settled blocks. Row 0 is the top of the well.
#[derive(Clone, PartialEq, Debug)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            rows: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn rows(&self) -> &[Row; BOARD_HEIGHT] {
        &self.rows
    }

    /// Cell at column `x`, row `y`; `None` outside the grid.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Writes a cell; returns `false` when `(x, y)` is outside the grid.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match self.rows.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    pub fn filled_count(&self) -> usize {
        self.rows.iter().flatten().filter(|cell| cell.is_filled()).count()
    }

    /// True when any filled cell of `piece` is below the floor, beyond a side
    /// wall, or on an occupied cell. Cells above row 0 count as free.
    pub fn collides(&self, piece: &Piece) -> bool {
        for (x, y) in piece.get_blocks() {
            if y >= BOARD_HEIGHT as i32 || x < 0 || x >= BOARD_WIDTH as i32 {
                return true;
            }
            if y >= 0 && self.rows[y as usize][x as usize].is_filled() {
                return true;
            }
        }
        false
    }

    /// Paints the piece colour into every cell it covers.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y) in piece.get_blocks() {
            let written = self.set(x, y, Cell::Filled(piece.color));
            debug_assert!(written || y < 0, "merge outside the grid at ({}, {})", x, y);
        }
    }

    /// Removes every full row, dropping the rows above it into place and
    /// refilling the top with empty rows. Returns how many rows went.
    pub fn clear_lines(&mut self) -> u32 {
        let mut lines_cleared = 0;
        let mut write_row = BOARD_HEIGHT;

        // Bottom-up, copying kept rows down over the cleared ones
        for read_row in (0..BOARD_HEIGHT).rev() {
            if self.rows[read_row].iter().all(|cell| cell.is_filled()) {
                lines_cleared += 1;
            } else {
                write_row -= 1;
                if read_row != write_row {
                    self.rows[write_row] = self.rows[read_row];
                }
            }
        }

        for row in &mut self.rows[..write_row] {
            *row = [Cell::Empty; BOARD_WIDTH];
        }

        lines_cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::piece::{shape_mask, COLORS};

    const RED: Color = COLORS[0];
    const BLUE: Color = COLORS[2];

    fn fill_row(board: &mut Board, y: i32, color: Color) {
        for x in 0..BOARD_WIDTH as i32 {
            board.set(x, y, Cell::Filled(color));
        }
    }

    fn piece_at(index: usize, x: i32, y: i32) -> Piece {
        let mut piece = Piece::new(shape_mask(index), RED);
        piece.x = x;
        piece.y = y;
        piece
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.filled_count(), 0);
        assert_eq!(board.rows().len(), BOARD_HEIGHT);
    }

    #[test]
    fn get_and_set_respect_bounds() {
        let mut board = Board::new();
        assert!(board.set(9, 19, Cell::Filled(RED)));
        assert_eq!(board.get(9, 19), Some(Cell::Filled(RED)));
        assert!(!board.set(10, 0, Cell::Filled(RED)));
        assert!(!board.set(0, 20, Cell::Filled(RED)));
        assert!(!board.set(-1, 0, Cell::Filled(RED)));
        assert_eq!(board.get(0, -1), None);
    }

    #[test]
    fn collides_with_walls_and_floor() {
        let board = Board::new();
        assert!(!board.collides(&piece_at(0, 0, 0)));
        assert!(!board.collides(&piece_at(0, 6, 19)));
        assert!(board.collides(&piece_at(0, -1, 0)));
        assert!(board.collides(&piece_at(0, 7, 0)));
        assert!(board.collides(&piece_at(0, 3, 20)));
        assert!(board.collides(&piece_at(4, 3, 19)));
    }

    #[test]
    fn rows_above_the_grid_are_free() {
        let board = Board::new();
        assert!(!board.collides(&piece_at(4, 3, -1)));
        assert!(!board.collides(&piece_at(0, 3, -5)));
    }

    #[test]
    fn collides_with_settled_cells() {
        let mut board = Board::new();
        board.set(5, 10, Cell::Filled(BLUE));
        assert!(board.collides(&piece_at(0, 3, 10)));
        assert!(!board.collides(&piece_at(0, 3, 9)));
        // Empty mask cells never collide
        board.set(2, 11, Cell::Filled(BLUE));
        assert!(!board.collides(&piece_at(2, 2, 10)));
    }

    #[test]
    fn merge_writes_only_covered_cells() {
        let mut board = Board::new();
        board.merge(&piece_at(3, 0, 18));
        assert_eq!(board.filled_count(), 4);
        assert_eq!(board.get(1, 19), Some(Cell::Filled(RED)));
        assert_eq!(board.get(0, 19), Some(Cell::Empty));
        assert_eq!(board.get(2, 19), Some(Cell::Empty));
    }

    #[test]
    fn clear_lines_without_full_rows_is_noop() {
        let mut board = Board::new();
        board.set(0, 19, Cell::Filled(RED));
        board.set(4, 12, Cell::Filled(BLUE));
        let before = board.clone();
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn clear_single_row_shifts_rows_above() {
        let mut board = Board::new();
        fill_row(&mut board, 19, RED);
        board.set(2, 18, Cell::Filled(BLUE));
        board.set(7, 3, Cell::Filled(BLUE));

        assert_eq!(board.clear_lines(), 1);
        assert_eq!(board.filled_count(), 2);
        assert_eq!(board.get(2, 19), Some(Cell::Filled(BLUE)));
        assert_eq!(board.get(7, 4), Some(Cell::Filled(BLUE)));
        assert!(board.rows()[0].iter().all(|cell| !cell.is_filled()));
    }

    #[test]
    fn clear_non_contiguous_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 19, RED);
        board.set(0, 18, Cell::Filled(BLUE));
        fill_row(&mut board, 17, RED);
        board.set(9, 16, Cell::Filled(BLUE));

        assert_eq!(board.clear_lines(), 2);
        assert_eq!(board.filled_count(), 2);
        assert_eq!(board.get(0, 19), Some(Cell::Filled(BLUE)));
        assert_eq!(board.get(9, 18), Some(Cell::Filled(BLUE)));
    }

    #[test]
    fn clear_whole_board() {
        let mut board = Board::new();
        for y in 0..BOARD_HEIGHT as i32 {
            fill_row(&mut board, y, BLUE);
        }
        assert_eq!(board.clear_lines(), BOARD_HEIGHT as u32);
        assert_eq!(board, Board::new());
    }
}
