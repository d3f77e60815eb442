//! # Game Module
//!
//! Core game state for a maze-crawling run:
//! - Grid coordinates and movement directions
//! - The per-level session (player position, move count, scoring)

pub mod session;

pub use session::*;

use serde::{Deserialize, Serialize};

/// Represents a cell coordinate in the maze grid.
///
/// Rows grow downward, columns grow rightward. Signed components let
/// neighbor arithmetic step outside the grid; bounds are checked by
/// [`crate::Grid`] accessors.
///
/// # Examples
///
/// ```
/// use mazecrawl::Position;
///
/// let pos = Position::new(5, 10);
/// assert_eq!(pos.row, 5);
/// assert_eq!(pos.col, 10);
///
/// let adjacent = pos.cardinal_adjacent_positions();
/// assert_eq!(adjacent.len(), 4); // No diagonals in a maze
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazecrawl::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.row - other.row).abs() + (self.col - other.col).abs()) as u32
    }

    /// Returns the 4 cardinal adjacent positions (no diagonals).
    ///
    /// Maze traversal and carving are strictly 4-directional, so this is the
    /// only neighborhood the game uses.
    pub fn cardinal_adjacent_positions(self) -> Vec<Position> {
        vec![
            Position::new(self.row - 1, self.col), // N
            Position::new(self.row + 1, self.col), // S
            Position::new(self.row, self.col - 1), // W
            Position::new(self.row, self.col + 1), // E
        ]
    }

    /// Returns the 4 positions at Manhattan distance 2 along the axes.
    ///
    /// These form the candidate lattice for spanning-tree carving: corridors
    /// are opened between a cell and a distance-2 neighbor through the
    /// midpoint cell.
    pub fn lattice_adjacent_positions(self) -> Vec<Position> {
        vec![
            Position::new(self.row - 2, self.col),
            Position::new(self.row + 2, self.col),
            Position::new(self.row, self.col - 2),
            Position::new(self.row, self.col + 2),
        ]
    }

    /// Returns the cell halfway between this position and a distance-2
    /// neighbor on the carving lattice.
    pub fn midpoint(self, other: Position) -> Position {
        Position::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.row + other.row, self.col + other.col)
    }
}

/// Directions for player movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use mazecrawl::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(-1, 0));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(-1, 0),
            Direction::South => Position::new(1, 0),
            Direction::East => Position::new(0, 1),
            Direction::West => Position::new(0, -1),
        }
    }

    /// Returns all 4 cardinal directions.
    pub fn all() -> Vec<Direction> {
        vec![
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}
