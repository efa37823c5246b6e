// Solving is a second randomised depth first walk, this time over the carved passages.
//
// In a perfect maze exactly one simple path joins any two cells, so the walk does not search
// between alternatives: it wanders down branches in random order, dropping each dead end as it
// backs out, until only the branch leading to the exit is left on the stack.

use log::{debug, trace};
use rand::Rng;

use crate::cells::Cell;
use crate::grid::{Grid, MazeError};
use crate::neighbours::reachable_neighbours;
use crate::renderers::{Animation, VisitRole};
use crate::visited::VisitedCells;

/// Walk the maze from `entry` until reaching `exit`, returning the route taken.
///
/// The walk keeps a path stack and the solution in lockstep: the current cell is popped from
/// both, and pushed back onto both when it still has unexplored reachable neighbours. A cell with
/// none is simply dropped. The exit is pushed back onto the solution alone, ending the walk.
///
/// On a perfect maze the route is the unique path between the two cells. Running out of cells
/// without reaching the exit means the maze is not connected, an `InvariantViolation`.
pub fn random_walk_solution<R: Rng>(grid: &Grid,
                                    entry: Cell,
                                    exit: Cell,
                                    rng: &mut R)
                                    -> Result<Vec<Cell>, MazeError> {

    if !grid.is_valid_coordinate(exit) {
        return Err(MazeError::OutOfBoundsCell);
    }
    let mut visited = VisitedCells::starting_at(grid, entry)?;
    let mut path_stack = vec![entry];
    let mut solution = vec![entry];

    debug!("Solving maze from {} to {}", entry, exit);

    while let Some(current) = path_stack.pop() {
        let current_cell = solution.pop().ok_or(MazeError::InvariantViolation)?;

        if current_cell == exit {
            solution.push(current_cell);
            debug!("Solved maze, route of {} cells after visiting {}", solution.len(), visited.len());
            return Ok(solution);
        }

        let neighbours = reachable_neighbours(grid, current_cell, &visited)?;
        if !neighbours.is_empty() {
            path_stack.push(current);
            solution.push(current_cell);

            let next = neighbours[rng.gen_range(0..neighbours.len())];
            let _ = visited.insert(next)?;

            trace!("stepped {} -> {}", current_cell, next);
            path_stack.push(next);
            solution.push(next);
        } else {
            trace!("dead end at {}", current_cell);
        }
    }

    Err(MazeError::InvariantViolation)
}

/// Animate a route: mark each cell in turn, with a frame after each.
pub fn display_solution(solution: &[Cell], animation: &mut Animation) {
    let last_index = solution.len().saturating_sub(1);

    for (index, cell) in solution.iter().enumerate() {
        let role = match index {
            0 => VisitRole::Entry,
            i if i == last_index => VisitRole::Exit,
            _ => VisitRole::Ordinary,
        };
        animation.renderer.render_visit(*cell, role);
        animation.frame();
    }

    // a one cell route is both the entry and the exit
    if let [only] = solution {
        animation.renderer.render_visit(*only, VisitRole::Exit);
        animation.frame();
    }
}

/// Find a route from `entry` to `exit` and animate it.
pub fn solve_maze<R: Rng>(grid: &Grid,
                          entry: Cell,
                          exit: Cell,
                          rng: &mut R,
                          animation: &mut Animation)
                          -> Result<Vec<Cell>, MazeError> {
    let solution = random_walk_solution(grid, entry, exit, rng)?;
    display_solution(&solution, animation);
    Ok(solution)
}
