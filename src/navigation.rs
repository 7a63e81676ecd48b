//! Moving through a carved maze

use crate::{Direction, Grid, GridStatus, MazeError, Point, Result};

/// Result of a single move request
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A wall is in the way, position unchanged
    Blocked,
    /// Moved to a new cell
    Moved(Point),
    /// Moved onto the goal
    ReachedGoal(Point),
}

impl MoveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, MoveOutcome::Blocked)
    }
}

/// Player walking from the top left corner to the bottom right one
#[derive(Clone, Debug)]
pub struct Walker<'a> {
    grid: &'a Grid,
    /// Current position
    position: Point,
    /// Location of the final target
    goal: Point,
    /// Number of moves taken, not counting blocked ones
    moves: usize,
}

impl<'a> Walker<'a> {
    /// Place a walker at the entrance of a carved maze
    pub fn new(grid: &'a Grid) -> Result<Self> {
        if grid.status() != GridStatus::Carved {
            return Err(MazeError::PreconditionViolated(
                "only carved mazes can be walked",
            ));
        }
        let (rows, cols) = grid.dimensions();
        Ok(Self {
            grid,
            position: Point::new(0, 0),
            goal: Point::new(rows - 1, cols - 1),
            moves: 0,
        })
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn is_finished(&self) -> bool {
        self.position == self.goal
    }

    /// Move one cell towards `direction`, if the wall on that side is open
    pub fn try_move(&mut self, direction: Direction) -> Result<MoveOutcome> {
        if !self.grid.is_open(self.position, direction)? {
            return Ok(MoveOutcome::Blocked);
        }

        // Open walls never face outside the grid
        let next = self
            .position
            .step(direction, self.grid.dimensions())
            .ok_or(MazeError::OutOfBounds(self.position))?;
        self.position = next;
        self.moves += 1;

        Ok(if self.is_finished() {
            MoveOutcome::ReachedGoal(next)
        } else {
            MoveOutcome::Moved(next)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::navigation::{MoveOutcome, Walker};
    use crate::{Direction, FirstChooser, Grid, MazeError, MazeGenerator, Point};

    fn serpentine(rows: usize, cols: usize) -> Grid {
        MazeGenerator::with_chooser(FirstChooser)
            .generate_maze(rows, cols)
            .unwrap()
    }

    #[test]
    fn walker_starts_in_corner() {
        let grid = serpentine(4, 3);
        let walker = Walker::new(&grid).unwrap();

        assert_eq!(walker.position(), Point::new(0, 0));
        assert_eq!(walker.goal(), Point::new(3, 2));
        assert_eq!(walker.moves(), 0);
        assert!(!walker.is_finished());
    }

    #[test]
    fn fresh_grid_cannot_be_walked() {
        let grid = Grid::new(3, 3).unwrap();

        assert!(matches!(
            Walker::new(&grid),
            Err(MazeError::PreconditionViolated(_))
        ));
    }

    #[test]
    fn walls_block_moves() {
        let grid = serpentine(3, 3);
        let mut walker = Walker::new(&grid).unwrap();

        for direction in [Direction::Up, Direction::Left, Direction::Right] {
            assert_eq!(walker.try_move(direction).unwrap(), MoveOutcome::Blocked);
        }
        assert_eq!(walker.position(), Point::new(0, 0));
        assert_eq!(walker.moves(), 0);
    }

    #[test]
    fn walk_serpentine_to_goal() {
        let grid = serpentine(3, 3);
        let mut walker = Walker::new(&grid).unwrap();

        use Direction::*;
        let route = [Down, Down, Right, Up, Up, Right, Down];
        for direction in route {
            let outcome = walker.try_move(direction).unwrap();
            assert!(matches!(outcome, MoveOutcome::Moved(_)), "{direction:?}");
        }
        assert_eq!(walker.position(), Point::new(1, 2));

        assert_eq!(
            walker.try_move(Down).unwrap(),
            MoveOutcome::ReachedGoal(Point::new(2, 2))
        );
        assert!(walker.is_finished());
        assert_eq!(walker.moves(), 8);
    }

    #[test]
    fn single_cell_maze_is_already_solved() {
        let grid = serpentine(1, 1);
        let mut walker = Walker::new(&grid).unwrap();

        assert!(walker.is_finished());
        for direction in Direction::ALL {
            assert_eq!(walker.try_move(direction).unwrap(), MoveOutcome::Blocked);
        }
    }

    #[test]
    fn move_allowed_exactly_when_wall_is_open() {
        let grid = MazeGenerator::new(Some(23)).generate_maze(7, 9).unwrap();

        for point in grid.points() {
            for direction in Direction::ALL {
                let mut walker = Walker {
                    grid: &grid,
                    position: point,
                    goal: Point::new(6, 8),
                    moves: 0,
                };
                let open = grid.is_open(point, direction).unwrap();
                let outcome = walker.try_move(direction).unwrap();

                assert_eq!(outcome.has_update(), open, "{point} {direction:?}");
                if open {
                    // The way back is open too
                    assert!(grid
                        .is_open(walker.position(), direction.opposite())
                        .unwrap());
                    assert!(walker.try_move(direction.opposite()).unwrap().has_update());
                    assert_eq!(walker.position(), point);
                }
            }
        }
    }
}
