use std::{
    io::{self, Write},
    sync::{Arc, RwLock, RwLockWriteGuard},
    time::Duration,
};

use anyhow::{Context, anyhow, bail};
use colored::Colorize;
use liblife::{
    Engine,
    board::Board,
    pattern::{PATTERNS, Pattern},
    pos::Position,
    rule::Rule,
    simulation::StepOutcome,
    topology::Topology,
};

use crate::{State, renderer, ticker::TickerHost};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub fn run_cli(state_arc: Arc<RwLock<State>>) -> anyhow::Result<()> {
    let mut stdout = io::stdout();

    for line_res in io::stdin().lines() {
        let line = line_res.context("Couldn't read command")?;
        if line.trim().is_empty() {
            continue;
        }

        match handle_cmd(&state_arc, line.split_whitespace(), &mut stdout) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(e) => eprintln!("! {e:?}"),
        }
    }

    let ticker = lock_state(&state_arc)?.ticker.take();
    if let Some(ticker) = ticker {
        ticker.stop();
    }

    Ok(())
}

fn handle_cmd<'a, I, W>(
    state_arc: &Arc<RwLock<State>>,
    mut args: I,
    out: &mut W,
) -> anyhow::Result<Flow>
where
    I: Iterator<Item = &'a str>,
    W: Write,
{
    match args.next().context("No command")? {
        "show" => {
            let state = lock_state(state_arc)?;
            renderer::draw(&state.simulation, out)?;
        }

        "step" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;

            let mut state = lock_state(state_arc)?;
            let outcome = state.simulation.step_n(times);
            renderer::draw(&state.simulation, out)?;

            if let Some(StepOutcome::Repeated { period }) = outcome {
                writeln!(out, "{}", format!("Board repeats with period {period}").yellow())?;
            }
        }

        "run" => {
            let interval = match args.next() {
                Some(millis) => Some(Duration::from_millis(millis.parse::<u64>()?)),
                None => None,
            };

            let mut state = lock_state(state_arc)?;
            let interval = interval.unwrap_or(state.tick_interval);
            state.tick_interval = interval;

            if let Some(ticker) = state.ticker.as_ref().filter(|ticker| ticker.is_running()) {
                ticker.set_rate(interval);
            } else {
                let ticker = TickerHost::start(state_arc.clone(), interval);

                // Whatever was left in the slot has already finished on its own.
                if let Some(finished) = state.ticker.replace(ticker) {
                    finished.stop();
                }
            }
        }

        "stop" => {
            // The ticker needs the lock to finish its last step, so release it before joining.
            let ticker = lock_state(state_arc)?.ticker.take();
            ticker.context("Not running")?.stop();
        }

        "place" => {
            let pos = parse_pos(&mut args)?;
            lock_state(state_arc)?
                .simulation
                .board_mut()
                .place_live_cell(pos)?;
        }

        "kill" => {
            let pos = parse_pos(&mut args)?;
            lock_state(state_arc)?.simulation.board_mut().kill_cell(pos)?;
        }

        "toggle" => {
            let pos = parse_pos(&mut args)?;
            lock_state(state_arc)?.simulation.board_mut().toggle_cell(pos)?;
        }

        "pattern" => {
            let name = args.next().context("missing pattern name")?;
            let pos = parse_pos(&mut args)?;

            let pattern =
                Pattern::find(name).with_context(|| format!("Unknown pattern {name:?}"))?;

            let mut state = lock_state(state_arc)?;
            pattern.stamp(state.simulation.board_mut(), pos)?;
        }

        "patterns" => {
            for pattern in PATTERNS {
                writeln!(
                    out,
                    "{} ({}x{})",
                    pattern.name,
                    pattern.width(),
                    pattern.height()
                )?;
            }
        }

        "random" => {
            let alive_count = args
                .next()
                .context("missing alive count")?
                .parse::<usize>()?;

            let mut state = lock_state(state_arc)?;
            let board = state.simulation.board();

            let random_board =
                Board::new_random(board.width(), board.height(), alive_count, &mut rand::rng())?;
            state.simulation.replace_board(random_board);
        }

        "clear" => {
            lock_state(state_arc)?.simulation.board_mut().clear();
        }

        "resize" => {
            let width = args.next().context("missing width")?.parse::<usize>()?;

            let height = args.next().context("missing height")?.parse::<usize>()?;

            let mut state = lock_state(state_arc)?;

            // Keep every live cell that still fits.
            let resized = Board::new(width, height)?.with_live_cells(
                state
                    .simulation
                    .board()
                    .live_cells()
                    .filter(|pos| pos.x < width && pos.y < height),
            )?;
            state.simulation.replace_board(resized);
        }

        "rule" => {
            let rule = args
                .next()
                .context("missing rulestring")?
                .parse::<Rule>()?;

            let mut state = lock_state(state_arc)?;
            let topology = state.simulation.engine().topology;
            state.simulation.set_engine(Engine::new(rule, topology));
        }

        "topology" => {
            let topology = match args.next().context("missing topology")? {
                "bounded" => Topology::Bounded,
                "toroidal" | "torus" => Topology::Toroidal,
                other => bail!("Unknown topology {other:?}"),
            };

            let mut state = lock_state(state_arc)?;
            let rule = state.simulation.engine().rule.clone();
            state.simulation.set_engine(Engine::new(rule, topology));
        }

        "count" => {
            let state = lock_state(state_arc)?;
            writeln!(out, "{}", state.simulation.board().live_cell_count())?;
        }

        "exit" => {
            return Ok(Flow::Exit);
        }

        _ => bail!("Unknown command"),
    }

    writeln!(out, "OK")?;
    Ok(Flow::Continue)
}

fn parse_pos<'a, I>(args: &mut I) -> anyhow::Result<Position>
where
    I: Iterator<Item = &'a str>,
{
    let x = args.next().context("missing x")?.parse::<usize>()?;
    let y = args.next().context("missing y")?.parse::<usize>()?;
    Ok(Position { x, y })
}

fn lock_state(state_arc: &Arc<RwLock<State>>) -> anyhow::Result<RwLockWriteGuard<'_, State>> {
    state_arc.write().map_err(|_| anyhow!("State lock poisoned"))
}
