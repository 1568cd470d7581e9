use std::{
    env, io,
    sync::{Arc, RwLock},
    time::Duration,
};

use config::Config;
use liblife::simulation::Simulation;
use ticker::TickerHost;

mod cli;
mod config;
mod renderer;
mod ticker;

pub struct State {
    simulation: Simulation,
    ticker: Option<TickerHost>,

    /// Interval used by `run` when none is given.
    tick_interval: Duration,
}

impl State {
    pub fn new(simulation: Simulation, tick_interval: Duration) -> Self {
        Self {
            simulation,
            ticker: None,
            tick_interval,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = match env::args().nth(1) {
        Some(config_path) => Config::load(config_path)?,
        None => Config::default(),
    };

    let simulation = config.build_simulation()?;
    renderer::draw(&simulation, &mut io::stdout())?;

    let state_arc = Arc::new(RwLock::new(State::new(
        simulation,
        Duration::from_millis(config.tick_millis),
    )));

    cli::run_cli(state_arc)
}
