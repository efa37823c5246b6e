//! **maze-walker** carves perfect mazes with a randomised depth first backtracker, then walks
//! them from entry to exit with a second randomised depth first search, animating both.

pub mod cells;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod neighbours;
pub mod pathing;
pub mod renderers;
#[cfg(feature = "sdl")]
pub mod sdl;
pub mod units;
pub mod visited;
mod utils;

pub use crate::cells::{Cell, Direction};
pub use crate::grid::{CellWalls, Grid, MazeError};
