use std::time::Duration;

use tracing::{debug, info};

use crate::constants::LINE_SCORE;
use crate::game::board::Board;
use crate::game::gravity::Gravity;
use crate::game::piece::{Piece, Spawner};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum GameState {
    Playing,
    GameOver, // A fresh piece spawned on top of settled blocks
}

pub struct Game {
    pub board: Board,
    pub current_piece: Option<Piece>,
    pub score: u32,
    pub lines_cleared: u32,
    pub game_state: GameState,
    gravity: Gravity,
    spawner: Spawner,
}

impl Game {
    pub fn new(gravity_interval: Duration, seed: Option<u64>) -> Self {
        let mut game = Self {
            board: Board::new(),
            current_piece: None,
            score: 0,
            lines_cleared: 0,
            game_state: GameState::Playing,
            gravity: Gravity::new(gravity_interval),
            spawner: Spawner::new(seed),
        };
        game.spawn_piece();
        game
    }

    pub fn is_over(&self) -> bool {
        self.game_state == GameState::GameOver
    }

    /// Replaces the active piece with a fresh one. Ends the game when the
    /// new piece already overlaps the stack.
    pub fn spawn_piece(&mut self) {
        let piece = self.spawner.spawn();
        debug!(x = piece.x, width = piece.width(), color = ?piece.color, "spawned piece");

        if self.board.collides(&piece) {
            info!(score = self.score, lines = self.lines_cleared, "game over");
            self.game_state = GameState::GameOver;
        }
        self.current_piece = Some(piece);
    }

    /// Translates the active piece. Returns `true` when the move was blocked
    /// (or there is nothing to move).
    pub fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        if self.is_over() {
            return true;
        }
        match self.current_piece.as_mut() {
            Some(piece) => piece.try_move(&self.board, dx, dy),
            None => true,
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Rotates the active piece clockwise in place. A rotation that would
    /// overlap a wall, the floor or the stack is dropped.
    pub fn rotate_piece(&mut self) -> bool {
        if self.is_over() {
            return false;
        }
        if let Some(ref piece) = self.current_piece {
            let rotated = piece.rotate_clockwise();
            if !self.board.collides(&rotated) {
                self.current_piece = Some(rotated);
                return true;
            }
        }
        false
    }

    /// One gravity step: fall one row, or lock and respawn when blocked.
    pub fn step_down(&mut self) {
        if self.try_move(0, 1) && !self.is_over() {
            self.lock_piece();
        }
    }

    pub fn lock_piece(&mut self) {
        let Some(piece) = self.current_piece.take() else {
            return;
        };
        self.board.merge(&piece);
        debug!(x = piece.x, y = piece.y, "piece locked");

        let lines = self.board.clear_lines();
        if lines > 0 {
            self.lines_cleared += lines;
            self.score += lines * LINE_SCORE;
            info!(lines, score = self.score, "rows cleared");
        }

        self.spawn_piece();
    }

    /// Feeds elapsed wall time to the gravity clock and runs the steps it
    /// releases. Returns the number of steps taken.
    pub fn update(&mut self, elapsed: Duration) -> u32 {
        if self.is_over() {
            return 0;
        }

        let due = self.gravity.advance(elapsed);
        let mut taken = 0;
        for _ in 0..due {
            if self.is_over() {
                self.gravity.reset();
                break;
            }
            self.step_down();
            taken += 1;
        }
        taken
    }
}
