//! # Reachability Checking
//!
//! Pure BFS connectivity check used to validate every maze the generator
//! produces and every obstacle it tentatively places.

use crate::game::Position;
use crate::generation::Grid;
use std::collections::{HashSet, VecDeque};

/// Decides whether `exit` is reachable from `start` through non-Wall cells.
///
/// Breadth-first traversal over 4-directional neighbors. The grid is not
/// mutated, so the check is idempotent; a visited set guarantees
/// termination in O(width * height) even on cyclic open regions.
///
/// `start == exit` is trivially reachable without traversal.
///
/// # Examples
///
/// ```
/// use mazecrawl::{is_reachable, Cell, Grid, Position};
///
/// let mut grid = Grid::new(5, 5);
/// let (start, exit) = (grid.start(), grid.exit());
/// for col in 1..4 {
///     grid.set(Position::new(1, col), Cell::Open).unwrap();
///     grid.set(Position::new(3, col), Cell::Open).unwrap();
/// }
/// assert!(!is_reachable(&grid, start, exit));
///
/// grid.set(Position::new(2, 3), Cell::Open).unwrap();
/// assert!(is_reachable(&grid, start, exit));
/// ```
pub fn is_reachable(grid: &Grid, start: Position, exit: Position) -> bool {
    let mut visited: HashSet<Position> = HashSet::new();
    let mut queue: VecDeque<Position> = VecDeque::new();
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        if pos == exit {
            return true;
        }
        if !visited.insert(pos) {
            continue;
        }
        for adjacent in pos.cardinal_adjacent_positions() {
            if !visited.contains(&adjacent) && !grid.is_wall(adjacent) {
                queue.push_back(adjacent);
            }
        }
    }

    false
}
