//! Generate a perfect maze and find your way through it
//!
//! A perfect maze has exactly one path between any two cells. Mazes are
//! carved into a [Grid] by a [MazeGenerator] and walked with a [Walker],
//! from the top left corner to the bottom right one.
//!
//! # Examples
//! ## Random maze
//! ```
//! use perfect_maze::{Direction, Grid, MazeGenerator, Point};
//!
//! let mut grid = Grid::new(5, 5).unwrap();
//! let mut gen = MazeGenerator::new(Some(7));
//! gen.generate(&mut grid).unwrap();
//!
//! // Spanning tree over 25 cells
//! assert_eq!(grid.open_passages(), 24);
//! // The outer border is never opened
//! assert!(!grid.is_open(Point::new(0, 0), Direction::Up).unwrap());
//! println!("{grid}");
//! ```
//!
//! ## Walking the maze
//! ```
//! use perfect_maze::{Direction, FirstChooser, MazeGenerator, MoveOutcome, Point, Walker};
//!
//! // Always taking the first option carves a serpentine through the columns
//! let grid = MazeGenerator::with_chooser(FirstChooser)
//!     .generate_maze(2, 2)
//!     .unwrap();
//! print!("{grid}");
//!
//! let mut walker = Walker::new(&grid).unwrap();
//! assert_eq!(walker.try_move(Direction::Right).unwrap(), MoveOutcome::Blocked);
//! assert_eq!(
//!     walker.try_move(Direction::Down).unwrap(),
//!     MoveOutcome::Moved(Point::new(1, 0))
//! );
//! assert_eq!(
//!     walker.try_move(Direction::Right).unwrap(),
//!     MoveOutcome::ReachedGoal(Point::new(1, 1))
//! );
//! ```

use std::fmt;

use itertools::Itertools;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use petgraph::{Graph, Undirected};

pub use error::*;
pub use maze_generator::{Chooser, FirstChooser, MazeGenerator, RandomChooser};
pub use navigation::{MoveOutcome, Walker};

mod error;
pub mod game;
pub mod maze_generator;
pub mod navigation;
pub mod render;
pub mod terminal;

/// Default maze height, in cells
pub const DEFAULT_ROWS: usize = 20;
/// Default maze width, in cells
pub const DEFAULT_COLS: usize = 20;

/// Location of a cell in the maze
#[derive(PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Take one step towards `direction`.
    ///
    /// Returns `None` if the step would leave a maze of `(rows, cols)`.
    pub fn step(self, direction: Direction, (rows, cols): (usize, usize)) -> Option<Point> {
        let (d_row, d_col) = direction.delta();

        let row = self.row.checked_add_signed(d_row)?;
        if row >= rows {
            return None;
        }

        let col = self.col.checked_add_signed(d_col)?;
        if col >= cols {
            return None;
        }

        Some(Point { row, col })
    }

    /// Direction of an adjacent `other` as seen from `self`
    pub fn direction_to(self, other: Point) -> Option<Direction> {
        Direction::ALL.into_iter().find(|direction| {
            let (d_row, d_col) = direction.delta();
            self.row.checked_add_signed(d_row) == Some(other.row)
                && self.col.checked_add_signed(d_col) == Some(other.col)
        })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Side of a cell, or a move towards it
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in the order neighbors are visited
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(row, col)` offset of one step
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Walls around a cell; `true` means the wall is standing
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Walls {
    pub const CLOSED: Walls = Walls {
        top: true,
        right: true,
        bottom: true,
        left: true,
    };

    pub const fn is_closed(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.top,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub const fn is_open(&self, direction: Direction) -> bool {
        !self.is_closed(direction)
    }
}

/// Read-only view of a single cell
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    /// Reached by the generator. Only meaningful while generating.
    pub visited: bool,
    pub walls: Walls,
}

impl Cell {
    pub const fn point(&self) -> Point {
        Point::new(self.row, self.col)
    }
}

/// Where a grid is in its life cycle
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum GridStatus {
    /// Freshly built, every wall standing
    Fresh,
    /// Generation has completed, the grid holds a perfect maze
    Carved,
    /// Walls opened by hand, not necessarily a maze
    Edited,
    /// Generation failed, wall state must not be trusted
    Invalid,
}

/// Graph node for a single cell
#[derive(Clone, Copy, Debug)]
struct Node {
    point: Point,
    visited: bool,
}

/// Rectangular grid of cells, and the passages opened between them
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    /// Cells are the nodes, open walls the edges between them
    ///
    /// Node index of `(row, col)` is `row * cols + col`. An open wall is a
    /// single undirected edge, so both sides always agree on it.
    graph: Graph<Node, (), Undirected>,
    status: GridStatus,
}

impl Grid {
    /// Build a `rows` x `cols` grid with every wall standing.
    ///
    /// Returns error, if either dimension is zero or the grid would be too
    /// large to index.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let len = rows
            .checked_mul(cols)
            .filter(|&len| len > 0 && len < NodeIndex::<u32>::end().index())
            .ok_or(MazeError::InvalidDimension { rows, cols })?;

        let mut graph = Graph::with_capacity(len, len - 1);
        for (row, col) in (0..rows).cartesian_product(0..cols) {
            graph.add_node(Node {
                point: Point { row, col },
                visited: false,
            });
        }

        Ok(Grid {
            rows,
            cols,
            graph,
            status: GridStatus::Fresh,
        })
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn status(&self) -> GridStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: GridStatus) {
        self.status = status;
    }

    /// Untouched since construction: no walls opened, no cells visited
    pub fn is_fresh(&self) -> bool {
        self.status == GridStatus::Fresh
            && self.graph.edge_count() == 0
            && self.graph.node_weights().all(|node| !node.visited)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.row < self.rows && point.col < self.cols
    }

    /// Snapshot of the cell at `(row, col)`
    pub fn get_cell(&self, row: usize, col: usize) -> Result<Cell> {
        let point = Point { row, col };
        let index = self.node_index(point)?;
        Ok(self.cell_at(index))
    }

    /// Is the wall of `point` facing `direction` open?
    ///
    /// Walls on the outer border of the maze are always closed.
    pub fn is_open(&self, point: Point, direction: Direction) -> Result<bool> {
        let index = self.node_index(point)?;
        Ok(self.is_open_at(index, direction))
    }

    /// Cells adjacent to `point`, in [Direction::ALL] order.
    ///
    /// `point` is expected to lie on the grid.
    pub fn neighbors(&self, point: Point) -> Neighbors {
        Neighbors::new(point, self.dimensions())
    }

    /// Open the wall between two adjacent cells, on both sides at once.
    ///
    /// A fresh grid becomes [GridStatus::Edited] and can no longer be carved.
    pub fn open_wall_between(&mut self, a: Point, b: Point) -> Result<()> {
        self.open_wall(a, b)?;
        if self.status == GridStatus::Fresh {
            self.set_status(GridStatus::Edited);
        }
        Ok(())
    }

    /// Open a wall without touching the grid status
    pub(crate) fn open_wall(&mut self, a: Point, b: Point) -> Result<()> {
        let a_index = self.node_index(a)?;
        let b_index = self.node_index(b)?;
        if a.direction_to(b).is_none() {
            return Err(MazeError::NotAdjacent(a, b));
        }
        self.graph.update_edge(a_index, b_index, ());
        Ok(())
    }

    pub fn is_visited(&self, point: Point) -> Result<bool> {
        let index = self.node_index(point)?;
        Ok(self.graph[index].visited)
    }

    pub(crate) fn mark_visited(&mut self, point: Point) -> Result<()> {
        let index = self.node_index(point)?;
        self.graph[index].visited = true;
        Ok(())
    }

    /// All cell coordinates, row by row
    pub fn points(&self) -> impl Iterator<Item = Point> {
        (0..self.rows)
            .cartesian_product(0..self.cols)
            .map(|(row, col)| Point { row, col })
    }

    /// All cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.graph.node_indices().map(|index| self.cell_at(index))
    }

    /// Open wall pairs, each reported once
    pub fn passages(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (self.graph[edge.source()].point, self.graph[edge.target()].point))
    }

    /// Number of open wall pairs
    pub fn open_passages(&self) -> usize {
        self.graph.edge_count()
    }

    fn node_index(&self, point: Point) -> Result<NodeIndex> {
        if self.contains(point) {
            Ok(NodeIndex::new(point.row * self.cols + point.col))
        } else {
            Err(MazeError::OutOfBounds(point))
        }
    }

    fn is_open_at(&self, index: NodeIndex, direction: Direction) -> bool {
        let point = self.graph[index].point;
        match point.step(direction, self.dimensions()) {
            Some(other) => {
                let other_index = NodeIndex::new(other.row * self.cols + other.col);
                self.graph.find_edge(index, other_index).is_some()
            }
            None => false,
        }
    }

    fn cell_at(&self, index: NodeIndex) -> Cell {
        let Node { point, visited } = self.graph[index];
        Cell {
            row: point.row,
            col: point.col,
            visited,
            walls: Walls {
                top: !self.is_open_at(index, Direction::Up),
                right: !self.is_open_at(index, Direction::Right),
                bottom: !self.is_open_at(index, Direction::Down),
                left: !self.is_open_at(index, Direction::Left),
            },
        }
    }
}

/// Draws the maze as text, four characters wide and two high per cell
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = render::Layout::TEXT;
        let mut canvas = render::TextCanvas::for_grid(self, layout);
        render::draw_maze(&mut canvas, self, layout, render::Color::WHITE);
        writeln!(f, "{canvas}")
    }
}

/// Iterator over the cells adjacent to a center cell
#[derive(Debug)]
pub struct Neighbors {
    center: Point,
    bounds: (usize, usize),
    index: usize,
}

impl Neighbors {
    fn new(center: Point, bounds: (usize, usize)) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = Point;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&direction) = Direction::ALL.get(self.index) {
            self.index += 1;
            if let Some(point) = self.center.step(direction, self.bounds) {
                return Some(point);
            }
        }
        None
    }
}
