use thiserror::Error;

use crate::maze::Cell;

/// Contract violations raised by the grid primitives. Code built on top of
/// the grid should treat these as bugs, not as recoverable conditions.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("cells {a} and {b} are not adjacent")]
    NotAdjacent { a: Cell, b: Cell },
}
