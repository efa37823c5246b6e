use std::fmt;

use crate::cells::{Cell, Direction};
use crate::grid::Grid;
use crate::utils::{self, FnvHashSet};

pub trait GridDisplay {
    /// Render the contents of a grid cell as text.
    /// The String should be 3 glyphs long, padded if required.
    fn render_cell_body(&self, _: Cell) -> String {
        String::from("   ")
    }
}

/// Marks a route through the maze: `S` at its start, `E` at its end and `.` in between.
#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cell>,
    start: Option<Cell>,
    end: Option<Cell>,
}

impl PathDisplay {
    pub fn new(path: &[Cell]) -> Self {
        let mut on_path_coordinates = utils::fnv_hashset(path.len());
        on_path_coordinates.extend(path.iter().cloned());
        PathDisplay {
            on_path_coordinates,
            start: path.first().cloned(),
            end: path.last().cloned(),
        }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cell) -> String {
        if self.start == Some(coord) {
            String::from(" S ")
        } else if self.end == Some(coord) {
            String::from(" E ")
        } else if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

struct EmptyDisplay;
impl GridDisplay for EmptyDisplay {}

/// A grid drawn with box drawing characters, cell bodies filled in by a `GridDisplay`.
pub struct MazeDisplay<'a> {
    grid: &'a Grid,
    cell_display: &'a dyn GridDisplay,
}

impl Grid {
    pub fn display_with<'a>(&'a self, cell_display: &'a dyn GridDisplay) -> MazeDisplay<'a> {
        MazeDisplay {
            grid: self,
            cell_display,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_with(&EmptyDisplay))
    }
}

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";

/// The glyph where wall segments meet, given which of the four arms are present.
fn corner(left: bool, right: bool, up: bool, down: bool) -> &'static str {
    match (left, right, up, down) {
        (true, true, true, true) => WALL_LRUD,
        (true, true, true, false) => WALL_LRU,
        (true, true, false, true) => WALL_LRD,
        (true, false, true, true) => WALL_LUD,
        (false, true, true, true) => WALL_RUD,
        (true, true, false, false) => WALL_LR,
        (false, false, true, true) => WALL_UD,
        (false, true, true, false) => WALL_RU,
        (true, false, false, true) => WALL_LD,
        (true, false, true, false) => WALL_LU,
        (false, true, false, true) => WALL_RD,
        (true, false, false, false) => WALL_L,
        (false, true, false, false) => WALL_R,
        (false, false, true, false) => WALL_U,
        (false, false, false, true) => WALL_D,
        (false, false, false, false) => " ",
    }
}

impl<'a> fmt::Display for MazeDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let grid = self.grid;
        let is_open = |cell: Cell, dir| grid.is_open(cell, dir).unwrap_or(false);
        let has_neighbour = |cell: Cell, dir| grid.neighbour_at_direction(cell, dir).is_some();

        // Each cell draws its body, its eastern boundary and its southern boundary with the
        // corner to the south east. The northern boundary and the west wall are special cases.
        let mut output = String::from(WALL_RD);
        if let Some(first_grid_row) = grid.iter_row().next() {
            for cell in first_grid_row {
                output.push_str(WALL_LR_3);
                output.push_str(corner(true,
                                       has_neighbour(cell, Direction::Right),
                                       false,
                                       !is_open(cell, Direction::Right)));
            }
        }
        output.push('\n');

        for row in grid.iter_row() {
            let mut row_middle_section_render = String::from(WALL_UD);
            let mut row_bottom_section_render = String::new();

            for (index_column, cell) in row.into_iter().enumerate() {
                let east_open = is_open(cell, Direction::Right);
                let south_open = is_open(cell, Direction::Down);

                if index_column == 0 {
                    row_bottom_section_render.push_str(corner(false,
                                                              !south_open,
                                                              true,
                                                              has_neighbour(cell, Direction::Down)));
                }

                row_middle_section_render.push_str(&self.cell_display.render_cell_body(cell));
                row_middle_section_render.push_str(if east_open { " " } else { WALL_UD });

                row_bottom_section_render.push_str(if south_open { "   " } else { WALL_LR_3 });

                // The arms right and down of the corner belong to the east and south neighbours.
                let show_right_section = grid.neighbour_at_direction(cell, Direction::Right)
                    .map_or(false, |east| !is_open(east, Direction::Down));
                let show_down_section = grid.neighbour_at_direction(cell, Direction::Down)
                    .map_or(false, |south| !is_open(south, Direction::Right));
                row_bottom_section_render.push_str(corner(!south_open,
                                                          show_right_section,
                                                          !east_open,
                                                          show_down_section));
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{ColumnsCount, RowsCount};

    fn grid(w: usize, h: usize) -> Grid {
        Grid::new(ColumnsCount(w), RowsCount(h)).unwrap()
    }

    #[test]
    fn closed_grid() {
        let g = grid(2, 1);
        assert_eq!(g.to_string(), "┌───┬───┐\n│   │   │\n└───┴───┘\n");
    }

    #[test]
    fn single_cell() {
        let g = grid(1, 1);
        assert_eq!(g.to_string(), "┌───┐\n│   │\n└───┘\n");
    }

    #[test]
    fn open_passage() {
        let mut g = grid(2, 1);
        g.open_wall(Cell::new(0, 0), Cell::new(1, 0)).unwrap();
        assert_eq!(g.to_string(), "┌───────┐\n│       │\n└───────┘\n");
    }

    #[test]
    fn two_by_two_tree() {
        let mut g = grid(2, 2);
        g.open_wall(Cell::new(0, 0), Cell::new(1, 0)).unwrap();
        g.open_wall(Cell::new(1, 0), Cell::new(1, 1)).unwrap();
        g.open_wall(Cell::new(0, 1), Cell::new(1, 1)).unwrap();
        let expected = "┌───────┐\n\
                        │       │\n\
                        ├───╴   │\n\
                        │       │\n\
                        └───────┘\n";
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn path_overlay() {
        let mut g = grid(3, 1);
        g.open_wall(Cell::new(0, 0), Cell::new(1, 0)).unwrap();
        g.open_wall(Cell::new(1, 0), Cell::new(2, 0)).unwrap();
        let path = PathDisplay::new(&[Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)]);
        let text = g.display_with(&path).to_string();
        assert_eq!(text.lines().nth(1), Some("│ S   .   E │"));
    }

    #[test]
    fn path_display_bodies() {
        let path = PathDisplay::new(&[Cell::new(0, 0), Cell::new(0, 1)]);
        assert_eq!(path.render_cell_body(Cell::new(0, 0)), " S ");
        assert_eq!(path.render_cell_body(Cell::new(0, 1)), " E ");
        assert_eq!(path.render_cell_body(Cell::new(5, 5)), "   ");
    }
}
