use thiserror::Error;

use crate::Point;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Invalid maze dimensions {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },
    #[error("Cells {0} and {1} are not adjacent")]
    NotAdjacent(Point, Point),
    #[error("Cell {0} is outside the maze")]
    OutOfBounds(Point),
    #[error("Cannot choose from an empty sequence")]
    EmptySequence,
    #[error("Precondition violated: {0}")]
    PreconditionViolated(&'static str),
    #[error("Maze generation did not finish within {steps} steps")]
    GenerationStalled { steps: usize },
}

pub type Result<T> = std::result::Result<T, MazeError>;
