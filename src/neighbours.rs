//! Candidate next steps for the maze walks.
//!
//! Both finders list neighbours in the order right, left, up, down. Callers pick among them at
//! random; the fixed order only matters for reproducing a walk from a seeded rng.
//! An empty list is a dead end, not an error.

use crate::cells::{Cell, CellSmallVec, Direction};
use crate::grid::{Grid, MazeError};
use crate::visited::VisitedCells;

/// Neighbours the maze generator may carve into: in the grid and not yet part of the maze.
/// Walls are ignored.
pub fn unvisited_neighbours(grid: &Grid,
                            coord: Cell,
                            visited: &VisitedCells)
                            -> Result<CellSmallVec, MazeError> {
    neighbours_where(grid, coord, |_, neighbour| !visited.contains(neighbour))
}

/// Neighbours the solver may step into: in the grid, not yet walked and with no wall in between.
pub fn reachable_neighbours(grid: &Grid,
                            coord: Cell,
                            visited: &VisitedCells)
                            -> Result<CellSmallVec, MazeError> {
    let walls = grid.walls(coord)?;
    neighbours_where(grid, coord, |dir, neighbour| {
        walls.is_open(dir) && !visited.contains(neighbour)
    })
}

fn neighbours_where<F>(grid: &Grid, coord: Cell, accept: F) -> Result<CellSmallVec, MazeError>
    where F: Fn(Direction, Cell) -> bool
{
    if !grid.is_valid_coordinate(coord) {
        return Err(MazeError::OutOfBoundsCell);
    }

    Ok(Direction::ALL
        .iter()
        .filter_map(|dir| grid.neighbour_at_direction(coord, *dir).map(|n| (*dir, n)))
        .filter(|&(dir, neighbour)| accept(dir, neighbour))
        .map(|(_, neighbour)| neighbour)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{ColumnsCount, RowsCount};

    // Compare a smallvec to e.g. a vec! or &[T].
    macro_rules! assert_smallvec_eq {
        ($x:expr, $y:expr) => (assert_eq!(&*$x, &$y[..]))
    }

    fn grid(w: usize, h: usize) -> Grid {
        Grid::new(ColumnsCount(w), RowsCount(h)).unwrap()
    }

    #[test]
    fn unvisited_in_direction_order() {
        let g = grid(3, 3);
        let gc = |x, y| Cell::new(x, y);
        let visited = VisitedCells::new(&g);

        let check = |coord, expected: &[Cell]| {
            assert_smallvec_eq!(unvisited_neighbours(&g, coord, &visited).unwrap(), expected);
        };
        // right, left, up, down
        check(gc(1, 1), &[gc(2, 1), gc(0, 1), gc(1, 0), gc(1, 2)]);
        // corners
        check(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check(gc(2, 2), &[gc(1, 2), gc(2, 1)]);
        // side
        check(gc(2, 1), &[gc(1, 1), gc(2, 0), gc(2, 2)]);
    }

    #[test]
    fn unvisited_skips_visited_cells() {
        let g = grid(3, 3);
        let gc = |x, y| Cell::new(x, y);
        let mut visited = VisitedCells::starting_at(&g, gc(1, 1)).unwrap();
        visited.insert(gc(2, 1)).unwrap();
        visited.insert(gc(1, 0)).unwrap();

        assert_smallvec_eq!(unvisited_neighbours(&g, gc(1, 1), &visited).unwrap(),
                            [gc(0, 1), gc(1, 2)]);

        for cell in g.iter() {
            visited.insert(cell).unwrap();
        }
        assert!(unvisited_neighbours(&g, gc(1, 1), &visited).unwrap().is_empty());
    }

    #[test]
    fn reachable_needs_open_walls() {
        let mut g = grid(3, 3);
        let gc = |x, y| Cell::new(x, y);
        let visited = VisitedCells::new(&g);

        assert!(reachable_neighbours(&g, gc(1, 1), &visited).unwrap().is_empty());

        g.open_wall(gc(1, 1), gc(1, 2)).unwrap();
        g.open_wall(gc(0, 1), gc(1, 1)).unwrap();
        assert_smallvec_eq!(reachable_neighbours(&g, gc(1, 1), &visited).unwrap(),
                            [gc(0, 1), gc(1, 2)]);
        assert_smallvec_eq!(reachable_neighbours(&g, gc(1, 2), &visited).unwrap(), [gc(1, 1)]);
    }

    #[test]
    fn reachable_skips_visited_cells() {
        let mut g = grid(2, 1);
        let gc = |x, y| Cell::new(x, y);
        g.open_wall(gc(0, 0), gc(1, 0)).unwrap();
        let visited = VisitedCells::starting_at(&g, gc(0, 0)).unwrap();

        assert_smallvec_eq!(reachable_neighbours(&g, gc(0, 0), &visited).unwrap(), [gc(1, 0)]);
        assert!(reachable_neighbours(&g, gc(1, 0), &visited).unwrap().is_empty());
    }

    #[test]
    fn out_of_bounds_cell_rejected() {
        let g = grid(2, 2);
        let visited = VisitedCells::new(&g);
        assert_eq!(unvisited_neighbours(&g, Cell::new(2, 0), &visited).unwrap_err(),
                   MazeError::OutOfBoundsCell);
        assert_eq!(reachable_neighbours(&g, Cell::new(0, 9), &visited).unwrap_err(),
                   MazeError::OutOfBoundsCell);
    }

    #[test]
    fn single_cell_grid_is_a_dead_end() {
        let g = grid(1, 1);
        let visited = VisitedCells::new(&g);
        assert!(unvisited_neighbours(&g, Cell::new(0, 0), &visited).unwrap().is_empty());
        assert!(reachable_neighbours(&g, Cell::new(0, 0), &visited).unwrap().is_empty());
    }
}
