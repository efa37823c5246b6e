use bit_set::BitSet;

use crate::cells::Cell;
use crate::grid::{Grid, MazeError};
use crate::units::ColumnsCount;

/// The set of cells a maze walk has already reached.
///
/// One bit per grid cell, addressed by row-major index. Cells can be added but never removed.
#[derive(Debug, Clone)]
pub struct VisitedCells {
    visited: BitSet,
    columns: ColumnsCount,
    cells_count: usize,
}

impl VisitedCells {
    pub fn new(grid: &Grid) -> VisitedCells {
        let cells_count = grid.size();
        VisitedCells {
            visited: BitSet::with_capacity(cells_count),
            columns: grid.columns(),
            cells_count,
        }
    }

    /// A new visited set holding only `start`.
    pub fn starting_at(grid: &Grid, start: Cell) -> Result<VisitedCells, MazeError> {
        let mut visited = VisitedCells::new(grid);
        visited.insert(start)?;
        Ok(visited)
    }

    /// Mark a cell as visited. Returns true if it was not visited before.
    pub fn insert(&mut self, coord: Cell) -> Result<bool, MazeError> {
        let bit_index = self.bit_index(coord).ok_or(MazeError::OutOfBoundsCell)?;
        Ok(self.visited.insert(bit_index))
    }

    /// Cells outside the grid are never visited.
    pub fn contains(&self, coord: Cell) -> bool {
        self.bit_index(coord)
            .map_or(false, |bit_index| self.visited.contains(bit_index))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    /// Has every cell of the grid been visited?
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.len() == self.cells_count
    }

    fn bit_index(&self, coord: Cell) -> Option<usize> {
        let ColumnsCount(width) = self.columns;
        let (x, y) = (coord.x as usize, coord.y as usize);
        if x < width && y * width + x < self.cells_count {
            Some(y * width + x)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::RowsCount;

    fn grid(w: usize, h: usize) -> Grid {
        Grid::new(ColumnsCount(w), RowsCount(h)).unwrap()
    }

    #[test]
    fn starts_with_only_the_start_cell() {
        let g = grid(3, 2);
        let visited = VisitedCells::starting_at(&g, Cell::new(2, 1)).unwrap();
        assert_eq!(visited.len(), 1);
        for cell in g.iter() {
            assert_eq!(visited.contains(cell), cell == Cell::new(2, 1));
        }
    }

    #[test]
    fn insert_reports_new_cells() {
        let g = grid(3, 3);
        let mut visited = VisitedCells::new(&g);
        assert!(visited.is_empty());
        assert_eq!(visited.insert(Cell::new(1, 1)), Ok(true));
        assert_eq!(visited.insert(Cell::new(1, 1)), Ok(false));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn out_of_bounds_cells() {
        let g = grid(3, 2);
        let mut visited = VisitedCells::new(&g);
        assert_eq!(visited.insert(Cell::new(3, 0)), Err(MazeError::OutOfBoundsCell));
        assert_eq!(visited.insert(Cell::new(0, 2)), Err(MazeError::OutOfBoundsCell));
        assert!(!visited.contains(Cell::new(3, 0)));
        assert!(VisitedCells::starting_at(&g, Cell::new(5, 5)).is_err());
    }

    #[test]
    fn complete_when_every_cell_visited() {
        let g = grid(2, 2);
        let mut visited = VisitedCells::new(&g);
        for cell in g.iter() {
            assert!(!visited.is_complete());
            visited.insert(cell).unwrap();
        }
        assert!(visited.is_complete());
    }
}
