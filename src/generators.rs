use log::{debug, trace};
use rand::Rng;

use crate::cells::Cell;
use crate::grid::{Grid, MazeError};
use crate::neighbours::unvisited_neighbours;
use crate::renderers::Animation;
use crate::visited::VisitedCells;

/// Apply the recursive backtracker maze generation algorithm to a grid.
///
/// A depth first walk from `entry`: from the cell on top of the path stack carve a passage into a
/// random unvisited neighbour and continue from there. When the top cell has no unvisited
/// neighbours left, pop it and backtrack. The stack stands in for recursion so large grids cannot
/// overflow the call stack.
///
/// Every cell is carved into exactly once, so a fresh grid ends up as a perfect maze: a spanning
/// tree with `size - 1` passages. Returns the passages in the order they were carved.
///
/// Each carve is reported to the animation's renderer, and every step (carve or backtrack) ends
/// with an animation frame.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid,
                                     entry: Cell,
                                     rng: &mut R,
                                     animation: &mut Animation)
                                     -> Result<Vec<(Cell, Cell)>, MazeError> {

    let mut visited = VisitedCells::starting_at(grid, entry)?;
    let mut path_stack = vec![entry];
    let mut carved = Vec::with_capacity(grid.size().saturating_sub(1));

    debug!("Generating {}x{} maze from {}", grid.columns().0, grid.rows().0, entry);

    while let Some(&current) = path_stack.last() {

        let neighbours = unvisited_neighbours(grid, current, &visited)?;

        if neighbours.is_empty() {
            // dead end or fully explored
            let _ = path_stack.pop();
        } else {
            let next = neighbours[rng.gen_range(0..neighbours.len())];

            grid.open_wall(current, next)?;
            let _ = visited.insert(next)?;
            path_stack.push(next);
            carved.push((current, next));

            trace!("carved {} -> {}", current, next);
            animation.renderer.render_wall_removed(current, next);
        }

        animation.frame();
    }

    // every grid is connected, so the walk always reaches every cell
    if !visited.is_complete() {
        return Err(MazeError::InvariantViolation);
    }

    debug!("Generated maze with {} passages, {} cells visited", carved.len(), visited.len());
    Ok(carved)
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use petgraph::algo::{connected_components, is_cyclic_undirected};
    use quickcheck::{quickcheck, TestResult};
    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;
    use crate::cells::Direction;
    use crate::renderers::{EventRecorder, NoPacing, NullRenderer};
    use crate::units::{ColumnsCount, RowsCount};

    fn grid(w: usize, h: usize) -> Grid {
        Grid::new(ColumnsCount(w), RowsCount(h)).unwrap()
    }

    fn generate(g: &mut Grid, entry: Cell, seed: u64) -> Vec<(Cell, Cell)> {
        let mut rng = XorShiftRng::seed_from_u64(seed);
        let mut renderer = NullRenderer;
        let mut pacing = NoPacing;
        let mut animation = Animation::new(&mut renderer, &mut pacing);
        recursive_backtracker(g, entry, &mut rng, &mut animation).expect("generation failed")
    }

    fn is_perfect_maze(g: &Grid) -> bool {
        let graph = g.passage_graph();
        graph.edge_count() == g.size() - 1 &&
        connected_components(&graph) == 1 &&
        !is_cyclic_undirected(&graph)
    }

    fn walls_symmetric(g: &Grid) -> bool {
        g.iter().all(|cell| {
            Direction::ALL.iter().all(|dir| {
                let open = g.is_open(cell, *dir).unwrap();
                match g.neighbour_at_direction(cell, *dir) {
                    Some(neighbour) => open == g.is_open(neighbour, dir.opposite()).unwrap(),
                    None => !open,
                }
            })
        })
    }

    #[test]
    fn single_cell_maze_has_no_passages() {
        let mut g = grid(1, 1);
        let carved = generate(&mut g, Cell::new(0, 0), 1);
        assert!(carved.is_empty());
        assert_eq!(g.passages_count(), 0);
    }

    #[test]
    fn two_cell_maze() {
        let mut g = grid(2, 1);
        let carved = generate(&mut g, Cell::new(0, 0), 7);
        assert_eq!(carved, vec![(Cell::new(0, 0), Cell::new(1, 0))]);
        assert!(g.is_open(Cell::new(0, 0), Direction::Right).unwrap());
        assert!(g.is_open(Cell::new(1, 0), Direction::Left).unwrap());
    }

    #[test]
    fn two_by_two_maze_is_a_spanning_tree() {
        for seed in 0..20 {
            let mut g = grid(2, 2);
            let carved = generate(&mut g, Cell::new(0, 0), seed);
            assert_eq!(carved.len(), 3);
            assert!(is_perfect_maze(&g));
        }
    }

    #[test]
    fn carved_passages_match_grid() {
        let mut g = grid(6, 4);
        let carved = generate(&mut g, Cell::new(0, 0), 42);
        let normalise = |(a, b): (Cell, Cell)| if a <= b { (a, b) } else { (b, a) };
        let from_carving = carved.into_iter().map(normalise).sorted().collect::<Vec<_>>();
        let from_grid = g.iter_passages().sorted().collect::<Vec<_>>();
        assert_eq!(from_carving, from_grid);
    }

    #[test]
    fn each_carve_starts_from_a_visited_cell() {
        let mut g = grid(5, 5);
        let entry = Cell::new(2, 2);
        let carved = generate(&mut g, entry, 3);
        let mut seen = vec![entry];
        for (from, to) in carved {
            assert!(seen.contains(&from));
            assert!(!seen.contains(&to));
            seen.push(to);
        }
        assert_eq!(seen.len(), 25);
    }

    #[test]
    fn same_seed_same_maze() {
        let mut a = grid(8, 5);
        let mut b = grid(8, 5);
        let carved_a = generate(&mut a, Cell::new(0, 0), 1234);
        let carved_b = generate(&mut b, Cell::new(0, 0), 1234);
        assert_eq!(carved_a, carved_b);
    }

    #[test]
    fn renderer_sees_every_carve() {
        let mut g = grid(4, 3);
        let mut rng = XorShiftRng::seed_from_u64(5);
        let mut recorder = EventRecorder::new();
        let mut pacing = NoPacing;
        let carved = {
            let mut animation = Animation::new(&mut recorder, &mut pacing);
            recursive_backtracker(&mut g, Cell::new(0, 0), &mut rng, &mut animation).unwrap()
        };
        assert_eq!(recorder.removed_walls(), carved);
        // one frame per carve plus one per backtrack, and every cell is popped exactly once
        assert_eq!(recorder.presents_count(), carved.len() + g.size());
        assert!(recorder.visits().is_empty());
    }

    #[test]
    fn entry_outside_grid() {
        let mut g = grid(3, 3);
        let mut rng = XorShiftRng::seed_from_u64(0);
        let mut renderer = NullRenderer;
        let mut pacing = NoPacing;
        let mut animation = Animation::new(&mut renderer, &mut pacing);
        let result = recursive_backtracker(&mut g, Cell::new(3, 0), &mut rng, &mut animation);
        assert_eq!(result, Err(MazeError::OutOfBoundsCell));
        assert_eq!(g.passages_count(), 0);
    }

    #[test]
    fn quickcheck_perfect_mazes() {
        fn prop(w: u8, h: u8, entry_x: u8, entry_y: u8, seed: u64) -> TestResult {
            let (w, h) = (w as usize % 12 + 1, h as usize % 12 + 1);
            let entry = Cell::new(entry_x as u32 % w as u32, entry_y as u32 % h as u32);
            let mut g = grid(w, h);
            let carved = generate(&mut g, entry, seed);
            TestResult::from_bool(carved.len() == w * h - 1 &&
                                  is_perfect_maze(&g) &&
                                  walls_symmetric(&g))
        }
        quickcheck(prop as fn(u8, u8, u8, u8, u64) -> TestResult);
    }
}
