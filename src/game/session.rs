//! # Game Session
//!
//! The state of one maze-crawling run: the current grid, the player's
//! position, move counting, timing, and score arithmetic.
//!
//! A session owns the [`Grid`] the generator hands over and mutates
//! individual cells as the player walks. Levels grow and get denser as the
//! run progresses; the score rewards finishing fast with few moves.

use crate::game::{Direction, Position};
use crate::generation::{utils, Cell, GenerationConfig, Generator, Grid, MazeGenerator};
use crate::MazecrawlResult;
use log::info;
use std::time::{Duration, Instant};

/// Result of a single movement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The player stepped onto an open cell.
    Moved,
    /// A wall (or the border) blocked the step.
    Blocked,
    /// The step landed on the exit door.
    Won,
}

/// Score awarded for clearing a level in the given time and move count.
///
/// Both components decay linearly and bottom out at zero, so dawdling can
/// never drive a level score negative.
///
/// # Examples
///
/// ```
/// use mazecrawl::calculate_score;
///
/// assert_eq!(calculate_score(0, 0), 1500);
/// assert_eq!(calculate_score(30, 40), 700 + 300);
/// assert_eq!(calculate_score(500, 500), 0);
/// ```
pub fn calculate_score(elapsed_secs: u64, move_count: u32) -> u64 {
    let time_score = 1000_u64.saturating_sub(elapsed_secs.saturating_mul(10));
    let move_score = 500_u64.saturating_sub(move_count as u64 * 5);
    time_score + move_score
}

/// One run of the game: the active maze plus progress counters.
#[derive(Debug)]
pub struct MazeSession {
    level: u32,
    move_count: u32,
    total_score: u64,
    started_at: Instant,
    base_seed: u64,
    grid: Grid,
    player_pos: Position,
    exit_pos: Position,
}

impl MazeSession {
    /// Starts a session at the given level, generating its maze.
    ///
    /// `move_count` and `total_score` are carried in so a saved run can
    /// resume mid-level. Each level derives its own generation seed from
    /// the base seed, so a whole run is reproducible from one number.
    pub fn new(
        level: u32,
        move_count: u32,
        total_score: u64,
        base_seed: u64,
    ) -> MazecrawlResult<Self> {
        let config = GenerationConfig::for_level(level, base_seed.wrapping_add(level as u64));
        let generator = MazeGenerator::new();
        let mut rng = utils::create_rng(&config);

        info!(
            "starting level {} ({}x{}, difficulty {:.2})",
            level, config.width, config.height, config.difficulty
        );
        let grid = generator.generate(&config, &mut rng)?;

        // The caller-facing contract: positions come from scanning markers,
        // not from trusting the generator's internals.
        let player_pos = grid.find_marker(Cell::PlayerStart).unwrap_or(grid.start());
        let exit_pos = grid.find_marker(Cell::ExitDoor).unwrap_or(grid.exit());

        Ok(Self {
            level,
            move_count,
            total_score,
            started_at: Instant::now(),
            base_seed,
            grid,
            player_pos,
            exit_pos,
        })
    }

    /// Current level number (starts at 1).
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Moves taken on the current level.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Score accumulated across completed levels.
    pub fn total_score(&self) -> u64 {
        self.total_score
    }

    /// The maze being played.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The player's current cell.
    pub fn player_pos(&self) -> Position {
        self.player_pos
    }

    /// The exit cell.
    pub fn exit_pos(&self) -> Position {
        self.exit_pos
    }

    /// Time spent on the current level.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Score the current level would award if finished right now.
    pub fn level_score(&self) -> u64 {
        calculate_score(self.elapsed().as_secs(), self.move_count)
    }

    /// Attempts to move the player one cell.
    ///
    /// Walls and the border block; a successful step rewrites the player
    /// marker on the grid and counts a move. Stepping onto the exit wins
    /// the level and banks its score into the total.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        let target = self.player_pos + direction.to_delta();
        if self.grid.is_wall(target) {
            return MoveOutcome::Blocked;
        }

        // The old cell opens up; the exit marker is consumed by the winning
        // step, which is fine because the level ends there.
        let _ = self.grid.set(self.player_pos, Cell::Open);
        let _ = self.grid.set(target, Cell::PlayerStart);
        self.player_pos = target;
        self.move_count += 1;

        if self.player_pos == self.exit_pos {
            let earned = self.level_score();
            self.total_score += earned;
            info!(
                "level {} cleared in {} moves for {} points",
                self.level, self.move_count, earned
            );
            MoveOutcome::Won
        } else {
            MoveOutcome::Moved
        }
    }

    /// Replaces this session with one for the next level, keeping the
    /// accumulated score.
    pub fn advance_level(&mut self) -> MazecrawlResult<()> {
        *self = Self::new(self.level + 1, 0, self.total_score, self.base_seed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> MazeSession {
        MazeSession::new(1, 0, 0, 1234).expect("session generation")
    }

    #[test]
    fn test_session_starts_at_maze_start() {
        let session = test_session();
        assert_eq!(session.player_pos(), session.grid().start());
        assert_eq!(session.exit_pos(), session.grid().exit());
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.total_score(), 0);
    }

    #[test]
    fn test_blocked_by_border_wall() {
        let mut session = test_session();
        // Start is (1,1); north and west lead into the border ring.
        assert_eq!(session.move_player(Direction::North), MoveOutcome::Blocked);
        assert_eq!(session.move_player(Direction::West), MoveOutcome::Blocked);
        assert_eq!(session.move_count(), 0);
    }

    #[test]
    fn test_successful_move_rewrites_markers() {
        let mut session = test_session();
        let from = session.player_pos();

        // The spanning-tree carve always opens at least one neighbor of start.
        let direction = Direction::all()
            .into_iter()
            .find(|d| !session.grid().is_wall(from + d.to_delta()))
            .expect("start has an open neighbor");

        assert_eq!(session.move_player(direction), MoveOutcome::Moved);
        assert_eq!(session.grid().get(from), Some(Cell::Open));
        assert_eq!(
            session.grid().get(session.player_pos()),
            Some(Cell::PlayerStart)
        );
        assert_eq!(session.move_count(), 1);
    }

    #[test]
    fn test_score_arithmetic() {
        assert_eq!(calculate_score(0, 0), 1500);
        assert_eq!(calculate_score(10, 0), 900 + 500);
        assert_eq!(calculate_score(0, 100), 1000);
        // Both components floor at zero independently.
        assert_eq!(calculate_score(200, 0), 500);
        assert_eq!(calculate_score(0, 200), 1000);
        assert_eq!(calculate_score(1000, 1000), 0);
    }

    #[test]
    fn test_advance_level_keeps_score_and_grows_maze() {
        let mut session = test_session();
        let width_before = session.grid().width();
        session.total_score = 700;

        session.advance_level().unwrap();
        assert_eq!(session.level(), 2);
        assert_eq!(session.move_count(), 0);
        assert_eq!(session.total_score(), 700);
        assert_eq!(session.grid().width(), width_before + 2);
    }

    #[test]
    fn test_same_seed_reproduces_level_layout() {
        let a = MazeSession::new(3, 0, 0, 42).unwrap();
        let b = MazeSession::new(3, 0, 0, 42).unwrap();
        assert_eq!(a.grid(), b.grid());
    }
}
