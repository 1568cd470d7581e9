use rayon::iter::{IntoParallelIterator, ParallelIterator};

use board::{Board, CellState};
use pos::Position;
use rule::Rule;
use topology::Topology;

pub mod board;
pub mod error;
pub mod pattern;
pub mod pos;
pub mod rule;
pub mod simulation;
pub mod topology;

/// Computes generations of a [`Board`] under a rule and topology.
///
/// Every transition reads only the board it is given and assembles a brand new board,
/// so no cell ever sees a neighbor's next-generation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Engine {
    pub rule: Rule,
    pub topology: Topology,
}

impl Engine {
    pub fn new(rule: Rule, topology: Topology) -> Self {
        Self { rule, topology }
    }

    pub fn transition(&self, board: &Board) -> Board {
        let next_cells = board
            .enumerate_cells()
            .map(|(cell_pos, cell)| self.next_cell(board, cell_pos, *cell))
            .collect();

        Board::with_cells(board.width(), board.height(), next_cells)
    }

    /// Same as [`Engine::transition`], with rows computed on the rayon thread pool.
    pub fn transition_parallel(&self, board: &Board) -> Board {
        let width = board.width();

        let next_cells = (0..board.height())
            .into_par_iter()
            .flat_map_iter(|y| {
                (0..width).map(move |x| {
                    let cell_pos = Position { x, y };
                    let cell = board.cell(cell_pos).copied().unwrap_or_default();
                    self.next_cell(board, cell_pos, cell)
                })
            })
            .collect();

        Board::with_cells(width, board.height(), next_cells)
    }

    pub fn neighbor_live_count<P>(&self, board: &Board, pos: P) -> usize
    where
        P: Into<Position>,
    {
        self.topology
            .neighbors(board.width(), board.height(), pos.into())
            .into_iter()
            .filter_map(|neighbor_pos| board.cell(neighbor_pos))
            .filter(|neighbor| neighbor.is_alive())
            .count()
    }

    fn next_cell(&self, board: &Board, cell_pos: Position, cell: CellState) -> CellState {
        let alive_neighbor_count = self.neighbor_live_count(board, cell_pos);
        self.rule
            .next_alive(cell.is_alive(), alive_neighbor_count)
            .into()
    }
}

/// Advances `board` by one generation of Conway's Life on a bounded grid.
pub fn transition(board: &Board) -> Board {
    Engine::default().transition(board)
}

#[cfg(test)]
mod tests {
    use super::{Engine, transition};
    use crate::{board::Board, pos::Position, rule::Rule, topology::Topology};

    #[test]
    fn test_neighbor_live_count() {
        let board = Board::new(3, 3)
            .unwrap()
            .with_live_cells([(0, 0), (1, 0), (2, 2), (1, 1)])
            .unwrap();
        let engine = Engine::default();

        assert_eq!(engine.neighbor_live_count(&board, (1, 1)), 3);
        assert_eq!(engine.neighbor_live_count(&board, (0, 0)), 2);
        assert_eq!(engine.neighbor_live_count(&board, (2, 0)), 2);
        assert_eq!(engine.neighbor_live_count(&board, (0, 2)), 1);
    }

    #[test]
    fn test_transition_leaves_input_untouched() {
        let board = Board::new(3, 3)
            .unwrap()
            .with_live_cells([(0, 1), (1, 1), (2, 1)])
            .unwrap();
        let before = board.clone();

        let next = transition(&board);
        assert_eq!(board, before);
        assert_eq!(
            next.live_cells().collect::<Vec<_>>(),
            vec![Position::new(1, 0), Position::new(1, 1), Position::new(1, 2)]
        );
    }

    #[test]
    fn test_custom_rule() {
        // Seeds: every live cell dies, dead cells with two neighbors are born.
        let engine = Engine::new("B2/S".parse::<Rule>().unwrap(), Topology::Bounded);
        let board = Board::new(4, 1).unwrap().with_live_cells([(0, 0), (2, 0)]).unwrap();

        let next = engine.transition(&board);
        assert_eq!(next.live_cells().collect::<Vec<_>>(), vec![Position::new(1, 0)]);
    }

    #[test]
    fn test_toroidal_blinker_across_edge() {
        let engine = Engine::new(Rule::default(), Topology::Toroidal);
        let board = Board::new(5, 5)
            .unwrap()
            .with_live_cells([(4, 2), (0, 2), (1, 2)])
            .unwrap();

        let next = engine.transition(&board);
        assert_eq!(
            next.live_cells().collect::<Vec<_>>(),
            vec![Position::new(0, 1), Position::new(0, 2), Position::new(0, 3)]
        );
        assert_eq!(engine.transition(&next), board);

        // Without wrapping no cell of the split blinker has enough neighbors.
        assert_eq!(transition(&board).live_cell_count(), 0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let board: Board = "
..........
..OO..O...
.OO...O...
..O...O...
..........
......OO..
......OO..
.O........
O.O.......
.O........"
            .parse()
            .unwrap();

        for engine in [
            Engine::default(),
            Engine::new(Rule::default(), Topology::Toroidal),
            Engine::new("B36/S23".parse().unwrap(), Topology::Bounded),
        ] {
            let mut sequential = board.clone();
            let mut parallel = board.clone();

            for _ in 0..8 {
                sequential = engine.transition(&sequential);
                parallel = engine.transition_parallel(&parallel);
                assert_eq!(sequential, parallel);
            }
        }
    }
}
