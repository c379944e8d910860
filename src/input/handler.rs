use crossterm::event::{KeyCode, KeyEventKind};

use crate::game::Game;

/// Engine commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Down,
    Rotate,
}

impl Command {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left => Some(Command::Left),
            KeyCode::Right => Some(Command::Right),
            KeyCode::Down => Some(Command::Down),
            KeyCode::Up => Some(Command::Rotate),
            _ => None,
        }
    }
}

pub fn apply_command(game: &mut Game, command: Command) {
    match command {
        Command::Left => {
            game.move_left();
        }
        Command::Right => {
            game.move_right();
        }
        Command::Down => game.step_down(),
        Command::Rotate => {
            game.rotate_piece();
        }
    }
}

/// Runs the command bound to `key_code`, if any. Held keys arrive as
/// repeats and move once per repeat; releases do nothing.
pub fn handle_input(game: &mut Game, key_code: KeyCode, kind: KeyEventKind) -> Option<Command> {
    match kind {
        KeyEventKind::Press | KeyEventKind::Repeat => {
            let command = Command::from_key(key_code)?;
            apply_command(game, command);
            Some(command)
        }
        KeyEventKind::Release => None,
    }
}
