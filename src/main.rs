use docopt::Docopt;
use log::{debug, info};
use maze_walker::{
    cells::Cell,
    generators,
    grid::Grid,
    grid_displays::PathDisplay,
    pathing,
    renderers::{canvas_size, Animation, ImageRenderer, LoggingRenderer, NoPacing, NullRenderer,
                Pacing, Renderer, MAX_CANVAS_SIDE},
    units::{CellSidePixels, ColumnsCount, RowsCount},
};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;
use std::{
    io,
    io::prelude::*,
    fs::File,
};

const USAGE: &str = "Maze Walker

Carves a perfect maze with a randomised depth first backtracker, then walks it from the entry
to the exit with a second randomised depth first search.

Usage:
    maze_walker -h | --help
    maze_walker [text] [--text-out=<path>] [options]
    maze_walker image --image-out=<path> [options]
    maze_walker screen [--delay-ms=<n>] [options]

Options:
    -h --help              Show this screen.
    --columns=<w>          Number of columns in the grid [default: 10].
    --rows=<h>             Number of rows in the grid [default: 10].
    --entry-x=<x>          x coordinate of the maze entry [default: 0].
    --entry-y=<y>          y coordinate of the maze entry [default: 0].
    --exit-x=<x>           x coordinate of the maze exit. The last column if not given.
    --exit-y=<y>           y coordinate of the maze exit. The last row if not given.
    --seed=<n>             Seed for the random choices. Chosen at random and logged if not given.
    --cell-pixels=<n>      Pixel length of one cell side when drawing [default: 60].
    --delay-ms=<n>         Pause after each animation step on screen [default: 100].
    --text-out=<path>      Output file path for the text rendering instead of stdout.
    --image-out=<path>     Output file path for an image rendering of the maze. Always PNG format.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    cmd_text: bool,
    cmd_image: bool,
    cmd_screen: bool,
    flag_columns: usize,
    flag_rows: usize,
    flag_entry_x: u32,
    flag_entry_y: u32,
    flag_exit_x: Option<u32>,
    flag_exit_y: Option<u32>,
    flag_seed: Option<u64>,
    flag_cell_pixels: u32,
    flag_delay_ms: u64,
    flag_text_out: String,
    flag_image_out: String,
    flag_save_edges: String,
}

mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            ImageSaveError(::image::ImageError);
            Io(::std::io::Error);
            Maze(::maze_walker::MazeError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let mut maze_grid = Grid::new(ColumnsCount(args.flag_columns), RowsCount(args.flag_rows))
        .chain_err(|| format!("Cannot make a {}x{} grid", args.flag_columns, args.flag_rows))?;

    let entry = Cell::new(args.flag_entry_x, args.flag_entry_y);
    let last_cell = maze_grid.last_cell();
    let exit = Cell::new(args.flag_exit_x.unwrap_or(last_cell.x),
                         args.flag_exit_y.unwrap_or(last_cell.y));
    for (name, cell) in &[("entry", entry), ("exit", exit)] {
        if !maze_grid.is_valid_coordinate(*cell) {
            return Err(format!("The {} {} is outside the {}x{} grid",
                               name, cell, args.flag_columns, args.flag_rows).into());
        }
    }

    let seed = args.flag_seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("Maze seed {}", seed);
    let mut rng = XorShiftRng::seed_from_u64(seed);
    let cell_size = CellSidePixels(args.flag_cell_pixels);
    if (args.cmd_image || args.cmd_screen) &&
       canvas_size(maze_grid.columns(), maze_grid.rows(), cell_size).is_none() {
        return Err(format!("A {}x{} maze of {} pixel cells does not fit a canvas of at most {}x{} pixels",
                           args.flag_columns, args.flag_rows, args.flag_cell_pixels,
                           MAX_CANVAS_SIDE, MAX_CANVAS_SIDE).into());
    }

    let solution = if args.cmd_screen {

        run_on_screen(&mut maze_grid, entry, exit, &mut rng, cell_size, args.flag_delay_ms)?

    } else if args.cmd_image {

        let mut renderer = LoggingRenderer::new(ImageRenderer::new());
        let solution = walk_maze(&mut maze_grid, entry, exit, &mut rng, cell_size,
                                 &mut renderer, &mut NoPacing)?;
        renderer.into_inner()
                .save(&args.flag_image_out)
                .chain_err(|| format!("Failed to save maze image {}", args.flag_image_out))?;
        solution

    } else {

        if !args.cmd_text {
            debug!("No output chosen, rendering as text");
        }
        let mut renderer = LoggingRenderer::new(NullRenderer);
        let solution = walk_maze(&mut maze_grid, entry, exit, &mut rng, cell_size,
                                 &mut renderer, &mut NoPacing)?;
        let path_display = PathDisplay::new(solution.as_deref().unwrap_or(&[]));
        let text = maze_grid.display_with(&path_display).to_string();
        if args.flag_text_out.is_empty() {
            println!("{}", text);
        } else {
            write_text_to_file(&text, &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
        solution
    };

    if let Some(route) = solution {
        info!("Route from {} to {} is {} cells long", entry, exit, route.len());
    }

    if !args.flag_save_edges.is_empty() {

        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    Ok(())
}

/// Draw the empty grid, carve the maze and walk it, all on the one renderer.
/// No route is returned when the renderer asks to stop once the maze is carved.
fn walk_maze(maze_grid: &mut Grid,
             entry: Cell,
             exit: Cell,
             rng: &mut XorShiftRng,
             cell_size: CellSidePixels,
             renderer: &mut dyn Renderer,
             pacing: &mut dyn Pacing)
             -> Result<Option<Vec<Cell>>> {

    renderer.render_grid(maze_grid.columns(), maze_grid.rows(), cell_size);
    renderer.present();

    let mut animation = Animation::new(renderer, pacing);
    generators::recursive_backtracker(maze_grid, entry, rng, &mut animation)?;

    if animation.renderer.should_stop() {
        info!("Stopped before solving the maze");
        return Ok(None);
    }

    let solution = pathing::solve_maze(maze_grid, entry, exit, rng, &mut animation)?;
    Ok(Some(solution))
}

#[cfg(feature = "sdl")]
fn run_on_screen(maze_grid: &mut Grid,
                 entry: Cell,
                 exit: Cell,
                 rng: &mut XorShiftRng,
                 cell_size: CellSidePixels,
                 delay_ms: u64)
                 -> Result<Option<Vec<Cell>>> {
    use maze_walker::renderers::FixedDelay;
    use maze_walker::sdl::SdlRenderer;
    use std::time::Duration;

    let mut renderer = LoggingRenderer::new(SdlRenderer::new("Maze Walker")?);
    let mut pacing = FixedDelay(Duration::from_millis(delay_ms));
    let solution = walk_maze(maze_grid, entry, exit, rng, cell_size, &mut renderer, &mut pacing)?;

    let mut screen = renderer.into_inner();
    screen.run_until_closed();
    Ok(solution)
}

#[cfg(not(feature = "sdl"))]
fn run_on_screen(_: &mut Grid,
                 _: Cell,
                 _: Cell,
                 _: &mut XorShiftRng,
                 _: CellSidePixels,
                 _: u64)
                 -> Result<Option<Vec<Cell>>> {
    Err("Screen rendering needs a build with the `sdl` feature".into())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    write_text_to_file(&maze_grid.edge_list_text(), file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
