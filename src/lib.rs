//! # Mazecrawl
//!
//! A terminal maze-crawling game built around a validated procedural
//! maze-generation core.
//!
//! ## Architecture Overview
//!
//! Mazecrawl is split into a small number of focused modules:
//!
//! - **Generation System**: Randomized spanning-tree maze carving with
//!   connectivity-preserving obstacle injection and a deterministic fallback
//! - **Game State**: The per-level session (player position, moves, scoring)
//! - **Rendering System**: Terminal-based rendering using crossterm
//! - **Input System**: Raw-mode keyboard handling
//! - **Persistence**: JSON save files for level progress and score history
//!
//! The generation core is pure and deterministic under a seeded RNG; the
//! surrounding game loop is plain synchronous terminal I/O.

pub mod game;
pub mod generation;
pub mod input;
pub mod persistence;
pub mod rendering;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use persistence::*;
pub use rendering::*;

/// Core error type for the Mazecrawl game.
#[derive(thiserror::Error, Debug)]
pub enum MazecrawlError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Requested maze dimensions cannot host distinct start/exit cells
    #[error("Invalid maze dimensions: {width}x{height} (both must be >= 3)")]
    InvalidDimensions { width: usize, height: usize },

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Mazecrawl codebase.
pub type MazecrawlResult<T> = Result<T, MazecrawlError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Maze size for level 1; each level grows the maze by [`SIZE_PER_LEVEL`].
    pub const BASE_MAZE_SIZE: usize = 9;

    /// Extra cells of width and height added per level.
    pub const SIZE_PER_LEVEL: usize = 2;

    /// Difficulty for level 0 (levels start at 1, so level 1 plays at 0.32).
    pub const BASE_DIFFICULTY: f64 = 0.3;

    /// Difficulty added per level.
    pub const DIFFICULTY_PER_LEVEL: f64 = 0.02;

    /// Difficulty is capped here so high levels stay solvable in practice.
    pub const MAX_DIFFICULTY: f64 = 0.5;

    /// Number of historical scores kept in the save file.
    pub const MAX_HISTORY: usize = 5;

    /// Default save file name.
    pub const DEFAULT_SAVE_FILE: &str = "mazecrawl_save.json";
}
