use crate::cells::Cell;
use crate::units::{ColumnIndex, ColumnsCount, RowIndex, RowsCount};

/// Row-major iteration over every cell of a rectangular grid.
#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    columns: ColumnsCount,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub(crate) fn new(columns: ColumnsCount, rows: RowsCount) -> CellIter {
        CellIter {
            columns,
            current_cell_number: 0,
            cells_count: columns.0 * rows.0,
        }
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Cell;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = Cell::from_row_major_index(self.current_cell_number, self.columns);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// Yields the cells of one grid row at a time, top row first.
#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_index: usize,
    columns: ColumnsCount,
    rows: RowsCount,
}

impl RowIter {
    pub(crate) fn new(columns: ColumnsCount, rows: RowsCount) -> RowIter {
        RowIter {
            current_index: 0,
            columns,
            rows,
        }
    }
}

impl ExactSizeIterator for RowIter {}
impl Iterator for RowIter {
    type Item = Vec<Cell>;
    fn next(&mut self) -> Option<Self::Item> {
        let RowsCount(count) = self.rows;
        if self.current_index < count {
            let ColumnsCount(length) = self.columns;
            let coords = (0..length)
                .map(|i: usize| {
                    Cell::from_row_column_indices(ColumnIndex(i), RowIndex(self.current_index))
                })
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.rows.0 - self.current_index;
        (lower_bound, Some(lower_bound))
    }
}
