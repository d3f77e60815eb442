//! # Rendering Module
//!
//! Terminal rendering for the maze, the status header, and the controls
//! footer, built on crossterm.

pub mod display;

pub use display::*;
