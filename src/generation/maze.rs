//! # Maze Generation
//!
//! Randomized spanning-tree maze carving with solvability-preserving
//! obstacle injection.
//!
//! The generator works in three phases per attempt: carve a corridor maze
//! with a randomized-Prim frontier walk, validate Start-to-Exit
//! connectivity, then add difficulty-scaled obstacle walls one at a time,
//! re-validating after each placement and rolling back any wall that would
//! cut the maze. If all randomized attempts fail, a deterministic comb
//! layout that is connected by construction is returned instead, so
//! generation always yields a solvable maze.

use crate::game::Position;
use crate::generation::{is_reachable, Cell, GenerationConfig, Generator, Grid};
use crate::{MazecrawlError, MazecrawlResult};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// A carving candidate: a lattice cell plus the cell that proposed it.
///
/// Consumed once when popped from the frontier; the parent determines which
/// midpoint wall gets opened.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    cell: Position,
    parent: Position,
}

/// Spanning-tree maze generator with greedy obstacle injection.
///
/// # Examples
///
/// ```
/// use mazecrawl::{generation, GenerationConfig, Generator, MazeGenerator};
///
/// let config = GenerationConfig::for_testing(42);
/// let mut rng = generation::utils::create_rng(&config);
/// let grid = MazeGenerator::new().generate(&config, &mut rng).unwrap();
/// assert!(mazecrawl::is_reachable(&grid, grid.start(), grid.exit()));
/// ```
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    /// Whether cells opened by the spanning-tree walk are excluded from
    /// obstacle candidates. Rollback alone already preserves connectivity;
    /// this avoids wasting trials on cells most likely to be load-bearing.
    pub protect_carved_path: bool,
}

impl MazeGenerator {
    /// Creates a generator with default settings.
    pub fn new() -> Self {
        Self {
            protect_carved_path: true,
        }
    }

    /// Carves the base corridor maze and returns it with the set of cells
    /// the walk opened.
    ///
    /// Works on the distance-2 candidate lattice: opening both the popped
    /// cell and the midpoint toward its parent keeps corridors one cell
    /// wide and walls one cell thick, which is what leaves the obstacle
    /// phase room to remove only redundant openings.
    fn carve_base(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> MazecrawlResult<(Grid, HashSet<Position>)> {
        let mut grid = Grid::new(config.width, config.height);
        let start = grid.start();
        grid.set(start, Cell::PlayerStart)?;

        let mut carved: HashSet<Position> = HashSet::new();
        let mut frontier: Vec<FrontierEntry> = start
            .lattice_adjacent_positions()
            .into_iter()
            .filter(|&cell| grid.is_interior(cell))
            .map(|cell| FrontierEntry { cell, parent: start })
            .collect();

        while !frontier.is_empty() {
            // Uniform random pop drives the tree shape; swap_remove keeps it O(1).
            let index = rng.gen_range(0..frontier.len());
            let entry = frontier.swap_remove(index);

            if grid.get(entry.cell) != Some(Cell::Wall) {
                continue;
            }

            grid.set(entry.cell.midpoint(entry.parent), Cell::Open)?;
            grid.set(entry.cell, Cell::Open)?;
            carved.insert(entry.cell);

            for next in entry.cell.lattice_adjacent_positions() {
                if grid.is_interior(next) && grid.get(next) == Some(Cell::Wall) {
                    frontier.push(FrontierEntry {
                        cell: next,
                        parent: entry.cell,
                    });
                }
            }
        }

        // Exit is always forced open, whatever the walk left there.
        grid.set(grid.exit(), Cell::ExitDoor)?;

        Ok((grid, carved))
    }

    /// Tentatively converts a cell to Wall, keeping the change only if the
    /// maze stays solvable.
    ///
    /// Transactional mutation: capture the prior cell, mutate, re-validate
    /// the connectivity invariant, restore on failure. Returns whether the
    /// wall was kept.
    fn try_place_wall(grid: &mut Grid, pos: Position) -> MazecrawlResult<bool> {
        let prior = grid.get(pos).ok_or_else(|| {
            MazecrawlError::InvalidState(format!(
                "Obstacle candidate ({}, {}) is out of bounds",
                pos.row, pos.col
            ))
        })?;

        grid.set(pos, Cell::Wall)?;
        if is_reachable(grid, grid.start(), grid.exit()) {
            Ok(true)
        } else {
            grid.set(pos, prior)?;
            Ok(false)
        }
    }

    /// Adds up to `floor(candidates * difficulty)` obstacle walls, one
    /// validated placement at a time. Returns the number actually placed.
    ///
    /// Greedy trial-and-rollback is O(candidates * BFS); candidate counts
    /// are small because maze dimensions are derived from the level number.
    fn inject_obstacles(
        &self,
        grid: &mut Grid,
        carved: &HashSet<Position>,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> MazecrawlResult<usize> {
        let mut candidates: Vec<Position> = Vec::new();
        for row in 1..grid.height() as i32 - 1 {
            for col in 1..grid.width() as i32 - 1 {
                let pos = Position::new(row, col);
                // Start/Exit carry their own markers, so filtering on Open
                // already excludes them.
                if grid.get(pos) == Some(Cell::Open)
                    && !(self.protect_carved_path && carved.contains(&pos))
                {
                    candidates.push(pos);
                }
            }
        }

        let wall_count = (candidates.len() as f64 * config.difficulty).floor() as usize;
        candidates.shuffle(rng);

        let mut placed = 0;
        for pos in candidates {
            if placed >= wall_count {
                break;
            }
            if Self::try_place_wall(grid, pos)? {
                placed += 1;
            }
        }

        debug!(
            "obstacle injection placed {} of {} requested walls",
            placed, wall_count
        );
        Ok(placed)
    }

    /// Builds the deterministic comb fallback maze.
    ///
    /// Every interior cell on the start's row or on an odd column is opened:
    /// the start row forms the comb's spine and the odd columns its teeth,
    /// so every odd/odd lattice cell is connected for any width and height
    /// of at least 3. No validation pass is needed.
    fn fallback_grid(&self, config: &GenerationConfig) -> MazecrawlResult<Grid> {
        let mut grid = Grid::new(config.width, config.height);
        let start = grid.start();
        let exit = grid.exit();

        for row in 1..grid.height() as i32 - 1 {
            for col in 1..grid.width() as i32 - 1 {
                if row == start.row || col % 2 == 1 {
                    grid.set(Position::new(row, col), Cell::Open)?;
                }
            }
        }

        grid.set(start, Cell::PlayerStart)?;
        grid.set(exit, Cell::ExitDoor)?;

        Ok(grid)
    }
}

impl Generator<Grid> for MazeGenerator {
    /// Generates a solvable maze.
    ///
    /// The only surfaced error is a dimension precondition violation
    /// (width or height below 3); every internal failure mode is recovered
    /// by retry, rollback, or the deterministic fallback.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> MazecrawlResult<Grid> {
        config.validate_dimensions()?;

        for attempt in 1..=config.max_attempts {
            let (mut grid, carved) = self.carve_base(config, rng)?;

            // The frontier walk produces a spanning tree, so this check is
            // defensive rather than load-bearing.
            if !is_reachable(&grid, grid.start(), grid.exit()) {
                warn!("attempt {} carved an unreachable maze, retrying", attempt);
                continue;
            }

            let placed = self.inject_obstacles(&mut grid, &carved, config, rng)?;

            // Per-placement rollback should make this pass unconditionally;
            // re-checking guards against any bug in the injection loop.
            if is_reachable(&grid, grid.start(), grid.exit()) {
                debug!(
                    "generated {}x{} maze on attempt {} with {} obstacles",
                    config.width, config.height, attempt, placed
                );
                return Ok(grid);
            }
            warn!(
                "attempt {} lost connectivity after obstacle injection, retrying",
                attempt
            );
        }

        warn!(
            "randomized generation exhausted {} attempts, using comb fallback",
            config.max_attempts
        );
        self.fallback_grid(config)
    }

    fn validate(&self, grid: &Grid, _config: &GenerationConfig) -> MazecrawlResult<()> {
        let start = grid.start();
        let exit = grid.exit();

        if !is_reachable(grid, start, exit) {
            return Err(MazecrawlError::GenerationFailed(
                "Exit is not reachable from start".to_string(),
            ));
        }

        if grid.count_marker(Cell::ExitDoor) != 1 || grid.find_marker(Cell::ExitDoor) != Some(exit)
        {
            return Err(MazecrawlError::GenerationFailed(
                "Maze must carry exactly one exit door at the exit cell".to_string(),
            ));
        }

        // On a 3x3 grid start and exit coincide and the door marker wins.
        if start != exit
            && (grid.count_marker(Cell::PlayerStart) != 1
                || grid.find_marker(Cell::PlayerStart) != Some(start))
        {
            return Err(MazecrawlError::GenerationFailed(
                "Maze must carry exactly one player start at the start cell".to_string(),
            ));
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "SpanningTreeMazeGenerator"
    }
}

impl Default for MazeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils;

    #[test]
    fn test_generated_maze_is_solvable() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig::new(15, 15, 0.4, 9001);
        let mut rng = utils::create_rng(&config);

        let grid = generator.generate(&config, &mut rng).unwrap();
        assert!(generator.validate(&grid, &config).is_ok());
        assert!(is_reachable(&grid, grid.start(), grid.exit()));
    }

    #[test]
    fn test_exactly_one_start_and_exit_marker() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig::for_testing(77);
        let mut rng = utils::create_rng(&config);

        let grid = generator.generate(&config, &mut rng).unwrap();
        assert_eq!(grid.count_marker(Cell::PlayerStart), 1);
        assert_eq!(grid.count_marker(Cell::ExitDoor), 1);
        assert_eq!(grid.find_marker(Cell::PlayerStart), Some(Position::new(1, 1)));
        assert_eq!(grid.find_marker(Cell::ExitDoor), Some(Position::new(7, 7)));
    }

    #[test]
    fn test_rejects_degenerate_dimensions() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig::new(2, 9, 0.3, 1);
        let mut rng = utils::create_rng(&config);

        assert!(matches!(
            generator.generate(&config, &mut rng),
            Err(MazecrawlError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_three_by_three_boundary() {
        // Start and exit coincide; generation must still succeed and the
        // checker must answer without traversal.
        let generator = MazeGenerator::new();
        let config = GenerationConfig::new(3, 3, 1.0, 5);
        let mut rng = utils::create_rng(&config);

        let grid = generator.generate(&config, &mut rng).unwrap();
        assert_eq!(grid.start(), grid.exit());
        assert!(is_reachable(&grid, grid.start(), grid.exit()));
    }

    #[test]
    fn test_zero_difficulty_equals_pure_carve() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig::new(9, 9, 0.0, 4242);

        let mut carve_rng = utils::create_rng(&config);
        let (carved_grid, _) = generator.carve_base(&config, &mut carve_rng).unwrap();

        let mut gen_rng = utils::create_rng(&config);
        let generated = generator.generate(&config, &mut gen_rng).unwrap();

        assert_eq!(generated, carved_grid);
    }

    #[test]
    fn test_full_difficulty_stays_solvable() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig::new(9, 9, 1.0, 31337);
        let mut rng = utils::create_rng(&config);

        let grid = generator.generate(&config, &mut rng).unwrap();
        assert!(is_reachable(&grid, grid.start(), grid.exit()));
    }

    #[test]
    fn test_obstacle_count_bounded_by_difficulty() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig::new(13, 13, 0.5, 2024);
        let mut rng = utils::create_rng(&config);

        let (mut grid, carved) = generator.carve_base(&config, &mut rng).unwrap();
        let open_before = grid.count_marker(Cell::Open);
        let mut candidates = 0usize;
        for row in 1..grid.height() as i32 - 1 {
            for col in 1..grid.width() as i32 - 1 {
                let pos = Position::new(row, col);
                if grid.get(pos) == Some(Cell::Open) && !carved.contains(&pos) {
                    candidates += 1;
                }
            }
        }
        let bound = (candidates as f64 * config.difficulty).floor() as usize;

        let placed = generator
            .inject_obstacles(&mut grid, &carved, &config, &mut rng)
            .unwrap();
        assert!(placed <= bound);
        assert_eq!(grid.count_marker(Cell::Open), open_before - placed);
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig::new(11, 11, 0.45, 555);

        let mut rng1 = utils::create_rng(&config);
        let mut rng2 = utils::create_rng(&config);
        let grid1 = generator.generate(&config, &mut rng1).unwrap();
        let grid2 = generator.generate(&config, &mut rng2).unwrap();

        assert_eq!(grid1, grid2);
    }

    #[test]
    fn test_try_place_wall_keeps_safe_wall() {
        // Fully open interior: any single wall leaves the maze solvable.
        let mut grid = Grid::new(7, 7);
        for row in 1..6 {
            for col in 1..6 {
                grid.set(Position::new(row, col), Cell::Open).unwrap();
            }
        }
        grid.set(grid.start(), Cell::PlayerStart).unwrap();
        grid.set(grid.exit(), Cell::ExitDoor).unwrap();

        let pos = Position::new(3, 3);
        assert!(MazeGenerator::try_place_wall(&mut grid, pos).unwrap());
        assert_eq!(grid.get(pos), Some(Cell::Wall));
    }

    #[test]
    fn test_try_place_wall_rolls_back_cutting_wall() {
        // Single corridor: walling any cell of it disconnects start and exit.
        let mut grid = Grid::new(7, 3);
        for col in 1..6 {
            grid.set(Position::new(1, col), Cell::Open).unwrap();
        }
        grid.set(Position::new(1, 1), Cell::PlayerStart).unwrap();
        grid.set(Position::new(1, 5), Cell::ExitDoor).unwrap();

        let pos = Position::new(1, 3);
        assert!(!MazeGenerator::try_place_wall(&mut grid, pos).unwrap());
        assert_eq!(grid.get(pos), Some(Cell::Open));
        assert!(is_reachable(&grid, Position::new(1, 1), Position::new(1, 5)));
    }

    #[test]
    fn test_fallback_grid_connected_by_construction() {
        let generator = MazeGenerator::new();
        for (width, height) in [(3, 3), (4, 6), (9, 9), (10, 7), (21, 13)] {
            let config = GenerationConfig::new(width, height, 0.3, 0);
            let grid = generator.fallback_grid(&config).unwrap();
            assert!(
                is_reachable(&grid, grid.start(), grid.exit()),
                "fallback {}x{} must be connected",
                width,
                height
            );
            assert_eq!(grid.find_marker(Cell::ExitDoor), Some(grid.exit()));
        }
    }

    #[test]
    fn test_fallback_opens_odd_lattice_cells() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig::new(11, 11, 0.3, 0);
        let grid = generator.fallback_grid(&config).unwrap();

        for row in (1..10).step_by(2) {
            for col in (1..10).step_by(2) {
                let cell = grid.get(Position::new(row, col)).unwrap();
                assert!(cell.is_traversable(), "odd/odd cell ({row}, {col}) open");
            }
        }
    }

    #[test]
    fn test_carve_keeps_border_walls() {
        let generator = MazeGenerator::new();
        let config = GenerationConfig::new(11, 9, 0.0, 98);
        let mut rng = utils::create_rng(&config);
        let (grid, _) = generator.carve_base(&config, &mut rng).unwrap();

        for col in 0..11 {
            assert_eq!(grid.get(Position::new(0, col)), Some(Cell::Wall));
            assert_eq!(grid.get(Position::new(8, col)), Some(Cell::Wall));
        }
        for row in 0..9 {
            assert_eq!(grid.get(Position::new(row, 0)), Some(Cell::Wall));
            assert_eq!(grid.get(Position::new(row, 10)), Some(Cell::Wall));
        }
    }

    #[test]
    fn test_unprotected_path_still_solvable() {
        // With path protection off, rollback alone must uphold connectivity.
        let generator = MazeGenerator {
            protect_carved_path: false,
        };
        let config = GenerationConfig::new(11, 11, 1.0, 808);
        let mut rng = utils::create_rng(&config);

        let grid = generator.generate(&config, &mut rng).unwrap();
        assert!(is_reachable(&grid, grid.start(), grid.exit()));
    }
}
