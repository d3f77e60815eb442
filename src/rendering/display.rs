//! # Terminal Display
//!
//! Draws the game into an alternate screen buffer with a hidden cursor.
//! The display owns the terminal mode for its lifetime: raw mode and the
//! alternate screen are entered on construction and restored on drop, so a
//! panic still leaves the terminal usable.

use crate::game::MazeSession;
use crate::generation::Cell;
use crate::MazecrawlResult;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{ExecutableCommand, QueueableCommand};
use std::io::{self, Stdout, Write};
use std::time::Duration;

// Two columns per cell so the maze reads roughly square.
const GLYPH_WALL: &str = "██";
const GLYPH_OPEN: &str = "  ";
const GLYPH_PLAYER: &str = "@ ";
const GLYPH_EXIT: &str = "⊡ ";

/// The glyph drawn for a cell marker.
pub fn cell_glyph(cell: Cell) -> &'static str {
    match cell {
        Cell::Wall => GLYPH_WALL,
        Cell::Open => GLYPH_OPEN,
        Cell::PlayerStart => GLYPH_PLAYER,
        Cell::ExitDoor => GLYPH_EXIT,
    }
}

/// Formats a level duration as `mm:ss`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Terminal renderer holding the raw-mode/alternate-screen guard.
pub struct TerminalDisplay {
    stdout: Stdout,
}

impl TerminalDisplay {
    /// Takes over the terminal: raw mode, alternate screen, hidden cursor.
    pub fn new() -> MazecrawlResult<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(Hide)?;
        Ok(Self { stdout })
    }

    /// Draws the full frame: status header, maze, message line, controls.
    pub fn render(
        &mut self,
        session: &MazeSession,
        best_score: u64,
        message: Option<&str>,
    ) -> MazecrawlResult<()> {
        self.stdout.queue(MoveTo(0, 0))?;
        self.stdout.queue(Clear(ClearType::All))?;

        self.stdout.queue(SetForegroundColor(Color::Yellow))?;
        self.stdout
            .queue(Print(format!("=== Level {} ===\r\n", session.level())))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(Print(format!(
            "Time: {} | Moves: {}\r\n",
            format_elapsed(session.elapsed()),
            session.move_count()
        )))?;
        self.stdout.queue(Print(format!(
            "Total score: {} | Best: {}\r\n\r\n",
            session.total_score(),
            best_score
        )))?;

        for row in session.grid().rows() {
            for &cell in row {
                match cell {
                    Cell::PlayerStart => {
                        self.stdout.queue(SetForegroundColor(Color::Green))?;
                        self.stdout.queue(Print(cell_glyph(cell)))?;
                        self.stdout.queue(ResetColor)?;
                    }
                    Cell::ExitDoor => {
                        self.stdout.queue(SetForegroundColor(Color::Red))?;
                        self.stdout.queue(Print(cell_glyph(cell)))?;
                        self.stdout.queue(ResetColor)?;
                    }
                    _ => {
                        self.stdout.queue(Print(cell_glyph(cell)))?;
                    }
                }
            }
            self.stdout.queue(Print("\r\n"))?;
        }

        if let Some(text) = message {
            self.stdout.queue(Print(format!("\r\n{}\r\n", text)))?;
        }
        self.stdout
            .queue(Print("\r\nControls: WASD/arrows move, Q saves and quits\r\n"))?;

        self.stdout.flush()?;
        Ok(())
    }

    /// Rings the terminal bell (wall bumps, victory).
    pub fn bell(&mut self) -> MazecrawlResult<()> {
        self.stdout.queue(Print("\x07"))?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = self.stdout.execute(Show);
        let _ = self.stdout.execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
