//! # Generation Module
//!
//! Procedural maze generation with a hard solvability guarantee.
//!
//! This module provides the algorithmic heart of Mazecrawl: a randomized
//! spanning-tree carver ([`MazeGenerator`]), a pure BFS connectivity check
//! ([`reachability`]), and the grid data model they operate on. Every maze
//! handed to the game is validated Start-to-Exit reachable, falling back to
//! a deterministic pattern if randomized generation repeatedly fails.

pub mod maze;
pub mod reachability;

pub use maze::*;
pub use reachability::*;

use crate::game::Position;
use crate::{MazecrawlError, MazecrawlResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// The closed alphabet of maze cell markers.
///
/// Anything that is not a [`Cell::Wall`] is traversable; callers must not
/// extend this set without updating the traversal logic in
/// [`reachability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Impassable wall
    Wall,
    /// Open corridor floor
    Open,
    /// The player's starting cell (exactly one per maze)
    PlayerStart,
    /// The exit door (exactly one per maze)
    ExitDoor,
}

impl Cell {
    /// Whether the player (and the reachability search) can occupy this cell.
    pub fn is_traversable(self) -> bool {
        !matches!(self, Cell::Wall)
    }
}

/// A rectangular maze grid with fixed dimensions.
///
/// The grid is exclusively owned by the generator while a maze is being
/// built, then moved out to the game session, which mutates individual
/// cells as the player walks. Start and Exit coordinates are derived from
/// the dimensions and never change.
///
/// # Examples
///
/// ```
/// use mazecrawl::{Cell, Grid, Position};
///
/// let grid = Grid::new(9, 9);
/// assert_eq!(grid.start(), Position::new(1, 1));
/// assert_eq!(grid.exit(), Position::new(7, 7));
/// assert_eq!(grid.get(Position::new(4, 4)), Some(Cell::Wall));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Creates an all-Wall grid of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![Cell::Wall; width]; height],
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The fixed player start cell, always (1, 1).
    pub fn start(&self) -> Position {
        Position::new(1, 1)
    }

    /// The fixed exit cell, always (height-2, width-2).
    ///
    /// For a 3x3 grid this coincides with [`Grid::start`].
    pub fn exit(&self) -> Position {
        Position::new(self.height as i32 - 2, self.width as i32 - 2)
    }

    /// Whether a position lies inside the grid at all.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    /// Whether a position lies strictly inside the border ring.
    ///
    /// Carving and obstacle placement only ever touch interior cells; the
    /// outermost ring stays Wall.
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.row > 0
            && pos.col > 0
            && (pos.row as usize) < self.height - 1
            && (pos.col as usize) < self.width - 1
    }

    /// Returns the cell at a position, or `None` if out of bounds.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[pos.row as usize][pos.col as usize])
        } else {
            None
        }
    }

    /// Sets the cell at a position.
    pub fn set(&mut self, pos: Position, cell: Cell) -> MazecrawlResult<()> {
        if !self.in_bounds(pos) {
            return Err(MazecrawlError::InvalidState(format!(
                "Position ({}, {}) is outside {}x{} grid",
                pos.row, pos.col, self.width, self.height
            )));
        }
        self.cells[pos.row as usize][pos.col as usize] = cell;
        Ok(())
    }

    /// Whether a position blocks movement. Out-of-bounds counts as a wall.
    pub fn is_wall(&self, pos: Position) -> bool {
        !self.get(pos).map(Cell::is_traversable).unwrap_or(false)
    }

    /// Iterates the grid rows top to bottom, for rendering.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(|row| row.as_slice())
    }

    /// Scans for the first cell carrying a given marker.
    ///
    /// The game session uses this to locate the player and exit after
    /// generation hands the grid over.
    pub fn find_marker(&self, marker: Cell) -> Option<Position> {
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, &cell) in cells.iter().enumerate() {
                if cell == marker {
                    return Some(Position::new(row as i32, col as i32));
                }
            }
        }
        None
    }

    /// Counts cells carrying a given marker.
    pub fn count_marker(&self, marker: Cell) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == marker)
            .count()
    }
}

/// Configuration for maze generation.
///
/// Controls maze dimensions, obstacle density, the RNG seed for
/// reproducible generation, and the retry bound for randomized attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Maze width in cells (must be >= 3)
    pub width: usize,
    /// Maze height in cells (must be >= 3)
    pub height: usize,
    /// Obstacle density in [0, 1]; clamped on construction
    pub difficulty: f64,
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Maximum randomized attempts before the deterministic fallback
    pub max_attempts: u32,
}

impl GenerationConfig {
    /// Creates a generation configuration. Difficulty is clamped to [0, 1].
    ///
    /// # Examples
    ///
    /// ```
    /// use mazecrawl::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(15, 15, 1.7, 42);
    /// assert_eq!(config.difficulty, 1.0);
    /// ```
    pub fn new(width: usize, height: usize, difficulty: f64, seed: u64) -> Self {
        Self {
            width,
            height,
            difficulty: difficulty.clamp(0.0, 1.0),
            seed,
            max_attempts: 10,
        }
    }

    /// Creates the configuration for a given game level.
    ///
    /// Levels grow the maze by two cells per side and ramp difficulty from
    /// 0.3 toward a cap of 0.5.
    pub fn for_level(level: u32, seed: u64) -> Self {
        let size = crate::config::BASE_MAZE_SIZE + crate::config::SIZE_PER_LEVEL * level as usize;
        let difficulty = (crate::config::BASE_DIFFICULTY
            + crate::config::DIFFICULTY_PER_LEVEL * level as f64)
            .min(crate::config::MAX_DIFFICULTY);
        Self::new(size, size, difficulty, seed)
    }

    /// Creates a small configuration for testing.
    pub fn for_testing(seed: u64) -> Self {
        Self::new(9, 9, 0.3, seed)
    }

    /// Checks the minimum-size precondition for start/exit placement.
    pub fn validate_dimensions(&self) -> MazecrawlResult<()> {
        if self.width < 3 || self.height < 3 {
            return Err(MazecrawlError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::for_level(1, 42)
    }
}

/// Trait for procedural generators.
///
/// All generation in Mazecrawl goes through this trait so the game loop can
/// swap generators (and tests can validate) through one interface.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> MazecrawlResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> MazecrawlResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}
