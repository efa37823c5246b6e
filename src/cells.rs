use smallvec::SmallVec;
use std::convert::From;
use std::fmt;

use crate::units::{ColumnIndex, ColumnsCount, RowIndex};

/// A grid square, identified by its column `x` and row `y`.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

pub type CellSmallVec = SmallVec<[Cell; 4]>;

/// The four sides of a square cell.
///
/// `Up` moves towards row 0, `Down` away from it.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    /// Canonical enumeration order, used wherever neighbours are listed.
    pub const ALL: [Direction; 4] = [Direction::Right, Direction::Left, Direction::Up, Direction::Down];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

impl Cell {
    pub fn new(x: u32, y: u32) -> Cell {
        Cell { x, y }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> Cell {
        let ColumnsCount(width) = columns;
        let x = index % width;
        let y = index / width;
        Cell::new(x as u32, y as u32)
    }

    #[inline]
    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Cell {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cell::new(col as u32, row as u32)
    }

    /// The cell one step away in `dir`, or None if that would leave the non-negative quadrant.
    /// Upper bounds are the grid's business.
    pub fn offset(self, dir: Direction) -> Option<Cell> {
        let (x, y) = (self.x, self.y);
        match dir {
            Direction::Right => x.checked_add(1).map(|x| Cell { x, y }),
            Direction::Left => x.checked_sub(1).map(|x| Cell { x, y }),
            Direction::Up => y.checked_sub(1).map(|y| Cell { x, y }),
            Direction::Down => y.checked_add(1).map(|y| Cell { x, y }),
        }
    }

    /// Which way to step from `self` to reach the adjacent cell `other`.
    /// None unless the two cells are exactly one step apart.
    pub fn direction_to(self, other: Cell) -> Option<Direction> {
        Direction::ALL
            .iter()
            .cloned()
            .find(|dir| self.offset(*dir) == Some(other))
    }

    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.direction_to(other).is_some()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_directions() {
        for dir in Direction::ALL.iter() {
            assert_ne!(*dir, dir.opposite());
            assert_eq!(*dir, dir.opposite().opposite());
        }
        assert_eq!(Direction::Right.opposite(), Direction::Left);
        assert_eq!(Direction::Up.opposite(), Direction::Down);
    }

    #[test]
    fn offsets() {
        let c = Cell::new(1, 1);
        assert_eq!(c.offset(Direction::Right), Some(Cell::new(2, 1)));
        assert_eq!(c.offset(Direction::Left), Some(Cell::new(0, 1)));
        assert_eq!(c.offset(Direction::Up), Some(Cell::new(1, 0)));
        assert_eq!(c.offset(Direction::Down), Some(Cell::new(1, 2)));

        let origin = Cell::new(0, 0);
        assert_eq!(origin.offset(Direction::Left), None);
        assert_eq!(origin.offset(Direction::Up), None);
        assert_eq!(Cell::new(u32::MAX, 0).offset(Direction::Right), None);
    }

    #[test]
    fn adjacency() {
        let gc = |x, y| Cell::new(x, y);
        assert_eq!(gc(0, 0).direction_to(gc(1, 0)), Some(Direction::Right));
        assert_eq!(gc(1, 0).direction_to(gc(0, 0)), Some(Direction::Left));
        assert_eq!(gc(0, 1).direction_to(gc(0, 0)), Some(Direction::Up));
        assert_eq!(gc(0, 0).direction_to(gc(0, 1)), Some(Direction::Down));

        assert!(!gc(0, 0).is_adjacent(gc(0, 0)));
        assert!(!gc(0, 0).is_adjacent(gc(1, 1)));
        assert!(!gc(0, 0).is_adjacent(gc(2, 0)));
    }

    #[test]
    fn row_major_index_conversion() {
        let columns = ColumnsCount(3);
        assert_eq!(Cell::from_row_major_index(0, columns), Cell::new(0, 0));
        assert_eq!(Cell::from_row_major_index(2, columns), Cell::new(2, 0));
        assert_eq!(Cell::from_row_major_index(4, columns), Cell::new(1, 1));
        assert_eq!(Cell::from_row_column_indices(ColumnIndex(2), RowIndex(5)),
                   Cell::new(2, 5));
    }
}
