use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::style::Color;

use crate::constants::BOARD_WIDTH;
use crate::game::board::Board;

/// Shape masks, one row per slice. Rows are padded so every mask is rectangular.
pub const SHAPES: [&[&[bool]]; 5] = [
    &[&[true, true, true, true]],
    &[&[true, true, true], &[true, false, false]],
    &[&[true, true, true], &[false, false, true]],
    &[&[true, true, true], &[false, true, false]],
    &[&[true, true], &[true, true]],
];

pub const COLORS: [Color; 5] = [
    Color::Rgb(0xFF, 0x00, 0x00), // Red
    Color::Rgb(0x00, 0xFF, 0x00), // Green
    Color::Rgb(0x00, 0x00, 0xFF), // Blue
    Color::Rgb(0xFF, 0xFF, 0x00), // Yellow
    Color::Rgb(0xFF, 0xA5, 0x00), // Orange
];

/// Owned copy of a catalog mask.
pub fn shape_mask(index: usize) -> Vec<Vec<bool>> {
    SHAPES[index].iter().map(|row| row.to_vec()).collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    pub shape: Vec<Vec<bool>>,
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

impl Piece {
    /// Places `shape` horizontally centered on the top row.
    pub fn new(shape: Vec<Vec<bool>>, color: Color) -> Self {
        let width = shape.first().map_or(0, |row| row.len()) as i32;
        Self {
            shape,
            x: BOARD_WIDTH as i32 / 2 - width / 2,
            y: 0,
            color,
        }
    }

    pub fn width(&self) -> usize {
        self.shape.first().map_or(0, |row| row.len())
    }

    pub fn height(&self) -> usize {
        self.shape.len()
    }

    /// Column `i` of the current mask, read bottom-to-top, becomes row `i`.
    pub fn rotate_clockwise(&self) -> Self {
        let height = self.height();
        let new_shape = (0..self.width())
            .map(|i| (0..height).rev().map(|r| self.shape[r][i]).collect())
            .collect();

        Self {
            shape: new_shape,
            ..self.clone()
        }
    }

    /// Shifts the piece by `(dx, dy)` unless that collides with `board`.
    /// Returns `true` when the move was blocked and the piece left in place.
    pub fn try_move(&mut self, board: &Board, dx: i32, dy: i32) -> bool {
        self.x += dx;
        self.y += dy;
        if board.collides(self) {
            self.x -= dx;
            self.y -= dy;
            return true;
        }
        false
    }

    /// Absolute `(x, y)` of every filled cell.
    pub fn get_blocks(&self) -> Vec<(i32, i32)> {
        let mut blocks = Vec::new();
        for (i, row) in self.shape.iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                if cell {
                    blocks.push((self.x + j as i32, self.y + i as i32));
                }
            }
        }
        blocks
    }
}

/// Draws shapes and colours independently and uniformly.
pub struct Spawner {
    rng: StdRng,
}

impl Spawner {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn spawn(&mut self) -> Piece {
        let shape = self.rng.gen_range(0..SHAPES.len());
        let color = self.rng.gen_range(0..COLORS.len());
        Piece::new(shape_mask(shape), COLORS[color])
    }
}
