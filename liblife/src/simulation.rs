use std::{
    collections::{VecDeque, hash_map::DefaultHasher},
    hash::{Hash, Hasher},
    mem,
};

use crate::{Engine, board::Board};

/// How many past generations are remembered for repeat detection.
pub const HISTORY_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Changed,

    /// The new generation equals the one `period` generations back.
    /// A period of 1 is a still life.
    Repeated { period: usize },
}

/// Drives a board through successive generations.
#[derive(Debug, Clone)]
pub struct Simulation {
    board: Board,
    engine: Engine,
    parallel: bool,
    generation: u64,

    /// Recent boards, oldest first, each with its fingerprint for a cheap first comparison.
    history: VecDeque<(u64, Board)>,
}

impl Simulation {
    pub fn new(board: Board, engine: Engine) -> Self {
        Self {
            board,
            engine,
            parallel: false,
            generation: 0,
            history: VecDeque::with_capacity(HISTORY_LEN),
        }
    }

    /// Computes generations with [`Engine::transition_parallel`].
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable access for placing cells between generations. Forgets the repeat history.
    pub fn board_mut(&mut self) -> &mut Board {
        self.history.clear();
        &mut self.board
    }

    /// Swaps in a new board and starts counting generations from zero.
    pub fn replace_board(&mut self, board: Board) {
        self.board = board;
        self.generation = 0;
        self.history.clear();
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn set_engine(&mut self, engine: Engine) {
        self.engine = engine;
        self.history.clear();
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn step(&mut self) -> StepOutcome {
        let next_board = if self.parallel {
            self.engine.transition_parallel(&self.board)
        } else {
            self.engine.transition(&self.board)
        };

        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        let previous_board = mem::replace(&mut self.board, next_board);
        self.history.push_back((fingerprint(&previous_board), previous_board));
        self.generation += 1;

        // Equal fingerprints only suggest a repeat, the boards themselves must match.
        let current = fingerprint(&self.board);
        let repeat = self
            .history
            .iter()
            .rev()
            .position(|(past, past_board)| *past == current && *past_board == self.board);

        match repeat {
            Some(index) => StepOutcome::Repeated { period: index + 1 },
            None => StepOutcome::Changed,
        }
    }

    /// Steps up to `times` generations, stopping at the first repeat.
    /// Returns the outcome of the last step taken, or `None` if `times` is zero.
    pub fn step_n(&mut self, times: usize) -> Option<StepOutcome> {
        let mut outcome = None;

        for _ in 0..times {
            let step_outcome = self.step();
            outcome = Some(step_outcome);

            if let StepOutcome::Repeated { .. } = step_outcome {
                break;
            }
        }

        outcome
    }
}

fn fingerprint(board: &Board) -> u64 {
    let mut hasher = DefaultHasher::new();
    board.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::{Simulation, StepOutcome, fingerprint};
    use crate::{Engine, board::Board, pattern::Pattern};

    fn simulation_with(pattern: &str, size: usize) -> Simulation {
        let mut board = Board::new(size, size).unwrap();
        Pattern::find(pattern).unwrap().stamp(&mut board, (1, 1)).unwrap();
        Simulation::new(board, Engine::default())
    }

    #[test]
    fn test_still_life() {
        let mut simulation = simulation_with("beehive", 6);
        assert_eq!(simulation.step(), StepOutcome::Repeated { period: 1 });
        assert_eq!(simulation.generation(), 1);
    }

    #[test]
    fn test_oscillator_period() {
        let mut simulation = simulation_with("toad", 6);
        assert_eq!(simulation.step(), StepOutcome::Changed);
        assert_eq!(simulation.step(), StepOutcome::Repeated { period: 2 });
    }

    #[test]
    fn test_step_n_stops_on_repeat() {
        let mut simulation = simulation_with("blinker", 5);
        assert_eq!(
            simulation.step_n(10),
            Some(StepOutcome::Repeated { period: 2 })
        );
        assert_eq!(simulation.generation(), 2);
        assert_eq!(simulation.step_n(0), None);
    }

    #[test]
    fn test_mutation_resets_history() {
        let mut simulation = simulation_with("block", 6);
        simulation.step();

        simulation.board_mut().place_live_cell((5, 5)).unwrap();
        // The lone cell dies, leaving a block that was never seen since the edit.
        assert_eq!(simulation.step(), StepOutcome::Changed);
        assert_eq!(simulation.step(), StepOutcome::Repeated { period: 1 });
    }

    #[test]
    fn test_replace_board() {
        let mut simulation = simulation_with("glider", 8).with_parallel(true);
        simulation.step_n(3);
        assert_eq!(simulation.generation(), 3);

        simulation.replace_board(Board::new(2, 2).unwrap());
        assert_eq!(simulation.generation(), 0);
        assert_eq!(simulation.board().width(), 2);
        assert_eq!(simulation.step(), StepOutcome::Repeated { period: 1 });
    }

    #[test]
    fn test_fingerprint_collision_is_not_a_repeat() {
        let mut simulation = simulation_with("blinker", 5);
        let upcoming = Engine::default().transition(simulation.board());

        // A different board filed under the fingerprint of the coming generation.
        let impostor = Board::new(5, 5).unwrap();
        assert_ne!(impostor, upcoming);
        simulation.history.push_back((fingerprint(&upcoming), impostor));

        assert_eq!(simulation.step(), StepOutcome::Changed);
        assert_eq!(simulation.step(), StepOutcome::Repeated { period: 2 });
    }
}
