use std::{fs, path::Path};

use anyhow::Context;
use liblife::{
    Engine, board::Board, rule::Rule, simulation::Simulation, topology::Topology,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub width: usize,
    pub height: usize,

    /// Rulestring such as `B3/S23`.
    pub rule: Rule,
    pub topology: Topology,

    /// Compute each generation on the rayon thread pool.
    pub parallel: bool,

    /// Delay between generations while running, used when `run` isn't given one.
    pub tick_millis: u64,

    /// Number of live cells to scatter randomly over the initial board.
    pub random_fill: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            rule: Rule::default(),
            topology: Topology::default(),
            parallel: false,
            tick_millis: 200,
            random_fill: None,
        }
    }
}

impl Config {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let config_serialized = fs::read(path).context("Couldn't read config")?;
        let config =
            serde_json::from_slice(&config_serialized).context("Couldn't deserialize config")?;
        Ok(config)
    }

    pub fn build_simulation(&self) -> anyhow::Result<Simulation> {
        let board = match self.random_fill {
            Some(alive_cells) => {
                Board::new_random(self.width, self.height, alive_cells, &mut rand::rng())
            }
            None => Board::new(self.width, self.height),
        }
        .context("Invalid board in config")?;

        let engine = Engine::new(self.rule.clone(), self.topology);

        Ok(Simulation::new(board, engine).with_parallel(self.parallel))
    }
}
