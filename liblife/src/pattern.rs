//! A small catalogue of well-known patterns that can be stamped onto a board.

use crate::{board::Board, error::BoardError, pos::Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    /// Live cells as `(x, y)` offsets from the pattern's top-left corner.
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
    },
    Pattern {
        name: "beehive",
        cells: &[(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
];

impl Pattern {
    /// Looks a pattern up by name, ignoring case.
    pub fn find(name: &str) -> Option<&'static Pattern> {
        PATTERNS
            .iter()
            .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
    }

    pub fn width(&self) -> usize {
        self.cells.iter().map(|(x, _)| x + 1).max().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.cells.iter().map(|(_, y)| y + 1).max().unwrap_or(0)
    }

    /// Places the pattern with its top-left corner at `origin`.
    ///
    /// Nothing is placed unless every cell of the pattern fits on the board.
    pub fn stamp<P>(&self, board: &mut Board, origin: P) -> Result<(), BoardError>
    where
        P: Into<Position>,
    {
        let origin = origin.into();

        let positions = self.cells.iter().map(|&(x, y)| Position {
            x: origin.x.saturating_add(x),
            y: origin.y.saturating_add(y),
        });

        if let Some(outside) = positions.clone().find(|pos| !board.contains(*pos)) {
            return Err(BoardError::OutOfBounds {
                position: outside,
                width: board.width(),
                height: board.height(),
            });
        }

        for pos in positions {
            board.place_live_cell(pos)?;
        }

        Ok(())
    }
}
