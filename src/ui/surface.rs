use ratatui::style::Color;

use crate::constants::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::{Cell, Game};

/// Anything the game can paint onto: one block per grid cell.
pub trait Surface {
    fn clear(&mut self);
    fn fill_block(&mut self, col: i32, row: i32, color: Color);
}

/// Off-screen block buffer the terminal renderer draws from.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockCanvas {
    blocks: [[Option<Color>; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for BlockCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockCanvas {
    pub fn new() -> Self {
        Self {
            blocks: [[None; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn block(&self, col: usize, row: usize) -> Option<Color> {
        self.blocks.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<Color>; BOARD_WIDTH]> {
        self.blocks.iter()
    }

    pub fn painted_count(&self) -> usize {
        self.blocks.iter().flatten().filter(|b| b.is_some()).count()
    }
}

impl Surface for BlockCanvas {
    fn clear(&mut self) {
        self.blocks = [[None; BOARD_WIDTH]; BOARD_HEIGHT];
    }

    fn fill_block(&mut self, col: i32, row: i32, color: Color) {
        // Blocks off the canvas are clipped
        if col < 0 || row < 0 {
            return;
        }
        if let Some(slot) = self
            .blocks
            .get_mut(row as usize)
            .and_then(|r| r.get_mut(col as usize))
        {
            *slot = Some(color);
        }
    }
}

/// Full repaint: settled cells first, then the falling piece on top.
pub fn paint<S: Surface>(game: &Game, surface: &mut S) {
    surface.clear();

    for (y, row) in game.board.rows().iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if let Cell::Filled(color) = *cell {
                surface.fill_block(x as i32, y as i32, color);
            }
        }
    }

    if let Some(piece) = &game.current_piece {
        for (x, y) in piece.get_blocks() {
            surface.fill_block(x, y, piece.color);
        }
    }
}
