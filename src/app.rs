use std::io::stdout;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use crate::config::Config;
use crate::game::Game;
use crate::input::handle_input;
use crate::ui::{paint, ui, BlockCanvas};

/// Keys owned by the loop driver rather than the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Quit,
    Restart,
}

pub fn host_action(key: &KeyEvent) -> Option<HostAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(HostAction::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(HostAction::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(HostAction::Restart),
        _ => None,
    }
}

pub fn run(config: &Config) -> Result<()> {
    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, config);

    // Cleanup, even when the loop failed
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, config: &Config) -> Result<()> {
    let frame_interval = config.frame_interval();
    let mut game = Game::new(config.gravity_interval(), config.seed);
    let mut canvas = BlockCanvas::new();
    let mut last_frame = Instant::now();

    loop {
        // Update then redraw
        let frame_start = Instant::now();
        game.update(frame_start.duration_since(last_frame));
        last_frame = frame_start;

        paint(&game, &mut canvas);
        terminal.draw(|f| ui(f, &game, &canvas))?;

        // Handle input until the next frame is due
        let deadline = frame_start + frame_interval;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match host_action(&key) {
                Some(HostAction::Quit) => {
                    info!(score = game.score, lines = game.lines_cleared, "quit");
                    return Ok(());
                }
                Some(HostAction::Restart) => {
                    info!(score = game.score, "restart");
                    game = Game::new(config.gravity_interval(), config.seed);
                }
                None => {
                    handle_input(&mut game, key.code, key.kind);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys() {
        assert_eq!(host_action(&press(KeyCode::Char('q'))), Some(HostAction::Quit));
        assert_eq!(host_action(&press(KeyCode::Esc)), Some(HostAction::Quit));
        assert_eq!(
            host_action(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(HostAction::Quit)
        );
    }

    #[test]
    fn restart_key() {
        assert_eq!(host_action(&press(KeyCode::Char('R'))), Some(HostAction::Restart));
    }

    #[test]
    fn game_keys_pass_through() {
        assert_eq!(host_action(&press(KeyCode::Left)), None);
        assert_eq!(host_action(&press(KeyCode::Char('c'))), None);
        assert_eq!(
            host_action(&KeyEvent::new_with_kind(
                KeyCode::Char('q'),
                KeyModifiers::NONE,
                KeyEventKind::Release
            )),
            None
        );
    }
}
