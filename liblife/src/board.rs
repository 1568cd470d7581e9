use std::{fmt, str::FromStr};

use itertools::Itertools;
use rand::Rng;

use crate::{
    error::{BoardError, BoardParseError},
    pos::Position,
};

/// A fixed-size grid of cells for a single generation.
///
/// Cells are stored row-major, so the cell at `(x, y)` lives at index `x + y * width`.
/// Both dimensions are at least one for every board that can be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width < 1 || height < 1 {
            return Err(BoardError::InvalidDimensions { width, height });
        }

        let too_large = BoardError::TooLarge { width, height };
        let area = width.checked_mul(height).ok_or(too_large)?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(area).map_err(|_| too_large)?;
        cells.resize(area, CellState::default());

        Ok(Self::with_cells(width, height, cells))
    }

    /// Creates a board with exactly `alive_cells` live cells at distinct random positions.
    pub fn new_random<R>(
        width: usize,
        height: usize,
        alive_cells: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError>
    where
        R: Rng,
    {
        let mut board = Self::new(width, height)?;

        let capacity = board.cells.len();
        if alive_cells > capacity {
            return Err(BoardError::TooManyCells {
                requested: alive_cells,
                capacity,
            });
        }

        let mut available_indices = (0..capacity).collect_vec();

        for _ in 0..alive_cells {
            let chosen = rng.random_range(0..available_indices.len());
            let index = available_indices.swap_remove(chosen);
            board.cells[index] = CellState::Alive;
        }

        Ok(board)
    }

    /// Callers must pass exactly `width * height` cells with both dimensions non-zero.
    pub(crate) fn with_cells(width: usize, height: usize, cells: Vec<CellState>) -> Self {
        debug_assert_eq!(cells.len(), width * height);

        Self {
            width,
            height,
            cells,
        }
    }

    /// Consumes the board and returns it with every given position alive.
    pub fn with_live_cells<I, P>(mut self, positions: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        for pos in positions {
            self.place_live_cell(pos)?;
        }

        Ok(self)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell<P>(&self, pos: P) -> Option<&CellState>
    where
        P: Into<Position>,
    {
        let index = self.pos_to_index(pos)?;
        self.cells.get(index)
    }

    pub fn is_alive<P>(&self, pos: P) -> Result<bool, BoardError>
    where
        P: Into<Position>,
    {
        let index = self.checked_index(pos.into())?;
        Ok(self.cells[index].is_alive())
    }

    /// Makes the cell alive. Placing onto a live cell leaves it alive.
    pub fn place_live_cell<P>(&mut self, pos: P) -> Result<(), BoardError>
    where
        P: Into<Position>,
    {
        self.set_cell(pos, CellState::Alive)
    }

    pub fn kill_cell<P>(&mut self, pos: P) -> Result<(), BoardError>
    where
        P: Into<Position>,
    {
        self.set_cell(pos, CellState::Dead)
    }

    /// Flips the cell and returns its new state.
    pub fn toggle_cell<P>(&mut self, pos: P) -> Result<CellState, BoardError>
    where
        P: Into<Position>,
    {
        let index = self.checked_index(pos.into())?;
        let cell = &mut self.cells[index];

        *cell = cell.toggled();
        Ok(*cell)
    }

    pub fn set_cell<P>(&mut self, pos: P, state: CellState) -> Result<(), BoardError>
    where
        P: Into<Position>,
    {
        let index = self.checked_index(pos.into())?;
        self.cells[index] = state;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.fill(CellState::Dead);
    }

    pub fn live_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn live_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.enumerate_cells()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(pos, _)| pos)
    }

    pub fn enumerate_cells(&self) -> impl Iterator<Item = (Position, &CellState)> {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.index_to_pos(index), cell))
    }

    pub fn contains<P>(&self, pos: P) -> bool
    where
        P: Into<Position>,
    {
        self.pos_to_index(pos).is_some()
    }

    fn checked_index(&self, pos: Position) -> Result<usize, BoardError> {
        self.pos_to_index(pos).ok_or(BoardError::OutOfBounds {
            position: pos,
            width: self.width,
            height: self.height,
        })
    }

    fn pos_to_index<P>(&self, pos: P) -> Option<usize>
    where
        P: Into<Position>,
    {
        let Position { x, y } = pos.into();

        if x >= self.width {
            return None;
        }

        if y >= self.height {
            return None;
        }

        Some(x + (y * self.width))
    }

    fn index_to_pos(&self, index: usize) -> Position {
        let y = index / self.width;
        let x = index % self.width;
        Position { x, y }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks_exact(self.width) {
            let line: String = row.iter().map(|cell| cell.to_char()).collect();
            writeln!(f, "{line}")?;
        }

        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses one row per line, `O`, `o`, `#` or `*` for live cells and `.`, `_` or a space
    /// for dead ones. Empty lines before the first row and after the last are ignored; a line
    /// of spaces is a row of dead cells.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines = s.lines().collect_vec();

        let first = lines.iter().position(|line| !line.is_empty());
        let last = lines.iter().rposition(|line| !line.is_empty());

        let rows = match (first, last) {
            (Some(first), Some(last)) => &lines[first..=last],
            _ => return Err(BoardParseError::Empty),
        };

        let width = rows[0].chars().count();
        let height = rows.len();

        let mut cells = Vec::with_capacity(width * height);

        for (row_index, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(BoardParseError::RaggedRow {
                    row: row_index,
                    len,
                    expected: width,
                });
            }

            for c in row.chars() {
                cells.push(CellState::from_char(c).ok_or(BoardParseError::BadChar(c))?);
            }
        }

        // Dimensions are validated again by new() before the cells are swapped in.
        let mut board = Board::new(width, height)?;
        board.cells = cells;
        Ok(board)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    Alive,

    #[default]
    Dead,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }

    fn to_char(self) -> char {
        match self {
            CellState::Alive => 'O',
            CellState::Dead => '.',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'O' | 'o' | '#' | '*' => Some(CellState::Alive),
            '.' | '_' | ' ' => Some(CellState::Dead),
            _ => None,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}
