//! Maze generation

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{Grid, GridStatus, MazeError, Point, Result};

/// Source of uniform random choices
pub trait Chooser {
    /// Pick an index in `0..len`. Never called with `len == 0`.
    fn choose_index(&mut self, len: usize) -> usize;

    /// Pick one element of `items`
    ///
    /// Returns error, if `items` is empty.
    fn choose_one<'a, T>(&mut self, items: &'a [T]) -> Result<&'a T> {
        if items.is_empty() {
            return Err(MazeError::EmptySequence);
        }
        let index = self.choose_index(items.len());
        items.get(index).ok_or(MazeError::EmptySequence)
    }
}

/// Uniform choices from a seedable random number generator
pub struct RandomChooser {
    random: StdRng,
}

impl RandomChooser {
    /// Seeded chooser, or seeded from system entropy if `seed` is `None`
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }
}

impl Chooser for RandomChooser {
    fn choose_index(&mut self, len: usize) -> usize {
        self.random.gen_range(0..len)
    }
}

/// Always picks the first candidate
///
/// Generation starts from the top left corner and always carves towards
/// the first unvisited neighbor.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstChooser;

impl Chooser for FirstChooser {
    fn choose_index(&mut self, _len: usize) -> usize {
        0
    }
}

/// Perfect maze generator
pub struct MazeGenerator<C = RandomChooser> {
    chooser: C,
    /// Maximum number of carving steps, defaults to twice the cell count
    step_limit: Option<usize>,
}

impl MazeGenerator<RandomChooser> {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_chooser(RandomChooser::new(seed))
    }
}

impl<C: Chooser> MazeGenerator<C> {
    pub fn with_chooser(chooser: C) -> Self {
        Self {
            chooser,
            step_limit: None,
        }
    }

    /// Give up carving after `steps` steps
    pub fn with_step_limit(mut self, steps: usize) -> Self {
        self.step_limit = Some(steps);
        self
    }

    /// Build a `rows` x `cols` grid and carve a maze into it
    pub fn generate_maze(&mut self, rows: usize, cols: usize) -> Result<Grid> {
        let mut grid = Grid::new(rows, cols)?;
        self.generate(&mut grid)?;
        Ok(grid)
    }

    /// Carve a perfect maze into a fresh grid
    ///
    /// A grid that is not fresh is rejected and left untouched. If carving
    /// itself fails, the grid is marked [GridStatus::Invalid].
    pub fn generate(&mut self, grid: &mut Grid) -> Result<()> {
        if !grid.is_fresh() {
            return Err(MazeError::PreconditionViolated(
                "mazes can only be carved into a fresh grid",
            ));
        }

        match self.carve(grid) {
            Ok(steps) => {
                log::debug!(
                    "Carved {}x{} maze in {steps} steps",
                    grid.dimensions().0,
                    grid.dimensions().1
                );
                grid.set_status(GridStatus::Carved);
                Ok(())
            }
            Err(err) => {
                log::error!("Maze generation failed: {err}");
                grid.set_status(GridStatus::Invalid);
                Err(err)
            }
        }
    }

    /// Randomized depth-first search
    ///
    /// Walk from a random cell towards random unvisited neighbors, opening
    /// walls on the way. At a dead end, backtrack until a cell with
    /// unvisited neighbors is found. Each opened wall leads to a cell not
    /// yet in the maze, so the passages form a spanning tree.
    ///
    /// Returns the number of steps taken.
    fn carve(&mut self, grid: &mut Grid) -> Result<usize> {
        let limit = self.step_limit.unwrap_or(2 * grid.len());

        let cells: Vec<Point> = grid.points().collect();
        let start = *self.chooser.choose_one(&cells)?;
        log::debug!("Starting maze generation from {start}");
        grid.mark_visited(start)?;

        let mut stack = vec![start];
        let mut steps = 0;
        let mut unvisited = Vec::with_capacity(4);

        while let Some(&current) = stack.last() {
            if steps >= limit {
                return Err(MazeError::GenerationStalled { steps });
            }
            steps += 1;

            unvisited.clear();
            for neighbor in grid.neighbors(current) {
                if !grid.is_visited(neighbor)? {
                    unvisited.push(neighbor);
                }
            }

            if unvisited.is_empty() {
                log::trace!("Backtracking from {current}");
                stack.pop();
            } else {
                let next = *self.chooser.choose_one(&unvisited)?;
                grid.open_wall(current, next)?;
                grid.mark_visited(next)?;
                stack.push(next);
            }
        }

        Ok(steps)
    }
}
