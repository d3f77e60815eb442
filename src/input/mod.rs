//! # Input Module
//!
//! Raw-mode keyboard handling: maps crossterm key events onto the small set
//! of inputs the game understands (WASD or arrow movement, quit, help).

use crate::game::Direction;
use crate::MazecrawlResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};

/// A player intent decoded from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Move one cell in a direction
    Move(Direction),
    /// Save the run and quit
    Quit,
    /// Show the controls line
    Help,
}

/// Decodes crossterm key events into [`PlayerInput`]s.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler.
    pub fn new() -> Self {
        Self
    }

    /// Blocks until a key the game understands is pressed.
    pub fn read_input(&self) -> MazecrawlResult<PlayerInput> {
        loop {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                if let Some(input) = Self::map_key(key.code) {
                    return Ok(input);
                }
            }
        }
    }

    /// Maps a key code to an input, or `None` for keys the game ignores.
    pub fn map_key(code: KeyCode) -> Option<PlayerInput> {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                Some(PlayerInput::Move(Direction::North))
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                Some(PlayerInput::Move(Direction::South))
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                Some(PlayerInput::Move(Direction::West))
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                Some(PlayerInput::Move(Direction::East))
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(PlayerInput::Quit),
            KeyCode::Char('?') => Some(PlayerInput::Help),
            _ => None,
        }
    }
}
