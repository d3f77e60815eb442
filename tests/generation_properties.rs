//! Property-based tests for the maze generation core.
//!
//! These exercise the solvability guarantee across the whole configuration
//! space the game uses: any size from 9 up, any difficulty in [0, 1], any
//! seed.

use mazecrawl::{
    generation, is_reachable, Cell, GenerationConfig, Generator, Grid, MazeGenerator, Position,
};
use proptest::prelude::*;

fn generate(config: &GenerationConfig) -> Grid {
    let mut rng = generation::utils::create_rng(config);
    MazeGenerator::new()
        .generate(config, &mut rng)
        .expect("generation never fails above minimum size")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn generated_mazes_are_always_solvable(
        half in 4usize..=10,
        difficulty in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let size = 2 * half + 1;
        let config = GenerationConfig::new(size, size, difficulty, seed);
        let grid = generate(&config);

        prop_assert!(is_reachable(&grid, grid.start(), grid.exit()));
        // Reachability is symmetric on an undirected grid.
        prop_assert!(is_reachable(&grid, grid.exit(), grid.start()));
    }

    #[test]
    fn generated_mazes_carry_exactly_one_marker_pair(
        half in 4usize..=10,
        difficulty in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let size = 2 * half + 1;
        let config = GenerationConfig::new(size, size, difficulty, seed);
        let grid = generate(&config);

        prop_assert_eq!(grid.count_marker(Cell::PlayerStart), 1);
        prop_assert_eq!(grid.count_marker(Cell::ExitDoor), 1);
        prop_assert_eq!(grid.find_marker(Cell::PlayerStart), Some(Position::new(1, 1)));
        prop_assert_eq!(
            grid.find_marker(Cell::ExitDoor),
            Some(Position::new(size as i32 - 2, size as i32 - 2))
        );
    }

    #[test]
    fn checker_is_idempotent_on_generated_mazes(
        difficulty in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let config = GenerationConfig::new(11, 11, difficulty, seed);
        let grid = generate(&config);
        let snapshot = grid.clone();

        let first = is_reachable(&grid, grid.start(), grid.exit());
        let second = is_reachable(&grid, grid.start(), grid.exit());
        prop_assert_eq!(first, second);
        prop_assert_eq!(grid, snapshot);
    }

    #[test]
    fn same_seed_gives_identical_grids(
        difficulty in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let config = GenerationConfig::new(13, 13, difficulty, seed);
        prop_assert_eq!(generate(&config), generate(&config));
    }

    #[test]
    fn generator_validation_passes_on_output(
        half in 4usize..=8,
        difficulty in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let size = 2 * half + 1;
        let config = GenerationConfig::new(size, size, difficulty, seed);
        let generator = MazeGenerator::new();
        let mut rng = generation::utils::create_rng(&config);
        let grid = generator.generate(&config, &mut rng).unwrap();

        prop_assert!(generator.validate(&grid, &config).is_ok());
    }
}

#[test]
fn non_square_mazes_are_solvable() {
    for (width, height, seed) in [(9, 15, 1u64), (21, 9, 2), (11, 19, 3)] {
        let config = GenerationConfig::new(width, height, 0.5, seed);
        let grid = generate(&config);
        assert!(is_reachable(&grid, grid.start(), grid.exit()));
    }
}

#[test]
fn even_dimensions_still_produce_a_solvable_maze() {
    // Even sizes leave the exit off the carving lattice; generation must
    // still come back with something solvable (via retries or fallback).
    for (width, height) in [(10, 10), (12, 9), (9, 14)] {
        let config = GenerationConfig::new(width, height, 0.4, 99);
        let grid = generate(&config);
        assert!(is_reachable(&grid, grid.start(), grid.exit()));
    }
}

#[test]
fn difficulty_extremes_on_level_sizes() {
    for level in 1..=5u32 {
        for difficulty in [0.0, 1.0] {
            let mut config = GenerationConfig::for_level(level, 7 + level as u64);
            config.difficulty = difficulty;
            let grid = generate(&config);
            assert!(
                is_reachable(&grid, grid.start(), grid.exit()),
                "level {} difficulty {} must stay solvable",
                level,
                difficulty
            );
        }
    }
}
