pub mod board;
pub mod gravity;
pub mod piece;
pub mod state;

pub use board::{Board, Cell};
pub use piece::{Piece, Spawner, COLORS, SHAPES};
pub use state::{Game, GameState};
