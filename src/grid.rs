use petgraph::graph::{NodeIndex, UnGraph};
use std::error;
use std::fmt;

use crate::cells::{Cell, Direction};
use crate::grid_iterators::{CellIter, RowIter};
use crate::units::{ColumnsCount, RowsCount};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum MazeError {
    /// A grid needs at least one column and one row.
    InvalidDimensions,
    /// A wall can only be opened between two cells one step apart.
    InvalidAdjacency,
    OutOfBoundsCell,
    /// The carved walls do not form the spanning tree the solver relies on.
    InvariantViolation,
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let description = match *self {
            MazeError::InvalidDimensions => "grid dimensions must both be at least 1",
            MazeError::InvalidAdjacency => "cells are not adjacent",
            MazeError::OutOfBoundsCell => "cell coordinate is outside the grid",
            MazeError::InvariantViolation => "maze walk ended without reaching the exit",
        };
        f.write_str(description)
    }
}

impl error::Error for MazeError {}

/// Which sides of a single cell have no wall.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct CellWalls {
    pub open_right: bool,
    pub open_left: bool,
    pub open_up: bool,
    pub open_down: bool,
}

impl CellWalls {
    #[inline]
    pub fn is_open(&self, direction: Direction) -> bool {
        match direction {
            Direction::Right => self.open_right,
            Direction::Left => self.open_left,
            Direction::Up => self.open_up,
            Direction::Down => self.open_down,
        }
    }

    #[inline]
    fn open(&mut self, direction: Direction) {
        match direction {
            Direction::Right => self.open_right = true,
            Direction::Left => self.open_left = true,
            Direction::Up => self.open_up = true,
            Direction::Down => self.open_down = true,
        }
    }
}

/// Rectangular grid of cells and the walls between them.
///
/// Every cell starts walled off on all four sides. `open_wall` is the only mutation and it always
/// updates both cells either side of a wall.
#[derive(Clone)]
pub struct Grid {
    columns: ColumnsCount,
    rows: RowsCount,
    walls: Vec<CellWalls>,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: columns: {:?}, rows: {:?}, passages: {:?}",
               self.columns, self.rows, self.passages_count())
    }
}

impl Grid {
    pub fn new(columns: ColumnsCount, rows: RowsCount) -> Result<Grid, MazeError> {
        let (ColumnsCount(width), RowsCount(height)) = (columns, rows);
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions);
        }
        // Cells are addressed with u32 coordinates.
        if width > u32::MAX as usize || height > u32::MAX as usize {
            return Err(MazeError::InvalidDimensions);
        }
        let cells_count = width.checked_mul(height).ok_or(MazeError::InvalidDimensions)?;

        Ok(Grid {
            columns,
            rows,
            walls: vec![CellWalls::default(); cells_count],
        })
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.walls.len()
    }

    /// Is the cell within this grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cell) -> bool {
        (coord.x as usize) < self.columns.0 && (coord.y as usize) < self.rows.0
    }

    /// Convert a grid coordinate to a one dimensional row-major index in the range 0..grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cell) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.columns.0 + coord.x as usize)
        } else {
            None
        }
    }

    pub fn neighbour_at_direction(&self, coord: Cell, direction: Direction) -> Option<Cell> {
        coord.offset(direction)
             .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// The wall flags of a cell.
    pub fn walls(&self, coord: Cell) -> Result<CellWalls, MazeError> {
        self.grid_coordinate_to_index(coord)
            .map(|index| self.walls[index])
            .ok_or(MazeError::OutOfBoundsCell)
    }

    /// Is there a passage (no wall) on the `direction` side of the cell?
    pub fn is_open(&self, coord: Cell, direction: Direction) -> Result<bool, MazeError> {
        self.walls(coord).map(|walls| walls.is_open(direction))
    }

    /// Knock down the wall between two adjacent cells, opening it from both sides.
    pub fn open_wall(&mut self, a: Cell, b: Cell) -> Result<(), MazeError> {
        let a_index = self.grid_coordinate_to_index(a).ok_or(MazeError::OutOfBoundsCell)?;
        let b_index = self.grid_coordinate_to_index(b).ok_or(MazeError::OutOfBoundsCell)?;
        let direction = a.direction_to(b).ok_or(MazeError::InvalidAdjacency)?;

        self.walls[a_index].open(direction);
        self.walls[b_index].open(direction.opposite());
        Ok(())
    }

    /// Every cell, row by row.
    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.columns, self.rows)
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.columns, self.rows)
    }

    /// Each open wall once, as the pair (cell, neighbour to its right or below).
    pub fn iter_passages<'a>(&'a self) -> impl Iterator<Item = (Cell, Cell)> + 'a {
        self.walls.iter().enumerate().flat_map(move |(index, walls)| {
            let cell = Cell::from_row_major_index(index, self.columns);
            // open_wall only ever opens walls between in-bounds cells
            let right = if walls.open_right { cell.offset(Direction::Right) } else { None };
            let down = if walls.open_down { cell.offset(Direction::Down) } else { None };
            right.into_iter().chain(down).map(move |neighbour| (cell, neighbour))
        })
    }

    pub fn passages_count(&self) -> usize {
        self.walls
            .iter()
            .map(|w| w.open_right as usize + w.open_down as usize)
            .sum()
    }

    /// The open passages as an undirected graph. Node `i` is the cell at row-major index `i`.
    pub fn passage_graph(&self) -> UnGraph<Cell, ()> {
        let mut graph = UnGraph::with_capacity(self.size(), self.passages_count());
        for cell in self.iter() {
            let _ = graph.add_node(cell);
        }
        for (a, b) in self.iter_passages() {
            if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_to_index(a),
                                                     self.grid_coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }

    /// The bottom right cell, the default maze exit.
    pub fn last_cell(&self) -> Cell {
        Cell::new(self.columns.0 as u32 - 1, self.rows.0 as u32 - 1)
    }

    /// The passages as a plain text edge list. Line 1: n(#vertices) m(#edges).
    /// Line 2+: the two cells joined by a passage as 1-based row-major indices.
    pub fn edge_list_text(&self) -> String {
        let mut graph_data = format!("{} {}\n", self.size(), self.passages_count());
        for (src, dst) in self.iter_passages() {
            if let (Some(index_a), Some(index_b)) = (self.grid_coordinate_to_index(src),
                                                     self.grid_coordinate_to_index(dst)) {
                graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
            }
        }
        graph_data
    }
}
