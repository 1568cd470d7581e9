use thiserror::Error;

use crate::pos::Position;

/// Errors raised when constructing or addressing a [`Board`](crate::board::Board).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Either dimension was zero.
    #[error("invalid board dimensions {width}x{height}, both must be at least 1")]
    InvalidDimensions { width: usize, height: usize },

    /// The board would have more cells than can be addressed or allocated.
    #[error("board dimensions {width}x{height} are too large")]
    TooLarge { width: usize, height: usize },

    /// The position does not lie inside the board.
    #[error("position {position} is outside the {width}x{height} board")]
    OutOfBounds {
        position: Position,
        width: usize,
        height: usize,
    },

    /// More random live cells were requested than the board has room for.
    #[error("cannot place {requested} live cells on a board with {capacity} cells")]
    TooManyCells { requested: usize, capacity: usize },
}

/// Reason a rulestring such as `B3/S23` could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleParseError {
    #[error("rulestring is missing its {0} part")]
    MissingPart(char),

    #[error("rulestring has more than one {0} part")]
    DuplicatePart(char),

    #[error("unexpected rulestring part {0:?}")]
    BadPart(String),

    #[error("neighbor count {0} is not in 0..=8")]
    BadCount(char),
}

/// Reason a textual board could not be parsed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    #[error("board text is empty")]
    Empty,

    /// Row `row` has `len` cells where `expected` were expected.
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("unexpected character {0:?} in board text")]
    BadChar(char),

    #[error(transparent)]
    Board(#[from] BoardError),
}
