use std::{
    io::{self, Write},
    sync::{
        Arc, RwLock,
        mpsc::{self, Sender, TryRecvError},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use colored::Colorize;
use liblife::simulation::StepOutcome;
use sleeper::Sleeper;

use crate::{State, renderer};

pub mod sleeper;

enum TickerMessage {
    Stop,
    Rate(Duration),
}

/// Background thread stepping the simulation at a fixed interval.
///
/// The ticker stops by itself once the board starts repeating.
pub struct TickerHost {
    sender: Sender<TickerMessage>,
    handle: JoinHandle<()>,
}

impl TickerHost {
    pub fn start(state_arc: Arc<RwLock<State>>, interval: Duration) -> Self {
        Self::start_with_output(state_arc, interval, io::stdout())
    }

    /// Like [`TickerHost::start`], drawing each generation to `out` instead of stdout.
    pub fn start_with_output<W>(
        state_arc: Arc<RwLock<State>>,
        interval: Duration,
        mut out: W,
    ) -> Self
    where
        W: Write + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();

        let handle = thread::spawn(move || {
            let mut sleeper = Sleeper::new(interval);

            loop {
                match receiver.try_recv() {
                    Ok(TickerMessage::Stop) | Err(TryRecvError::Disconnected) => break,
                    Ok(TickerMessage::Rate(rate)) => sleeper.target_delta_time = rate,
                    Err(TryRecvError::Empty) => {}
                }

                let Ok(mut state) = state_arc.write() else {
                    break;
                };

                let outcome = state.simulation.step();

                // Skip drawing while behind schedule so the generations can catch up.
                if sleeper.in_time() {
                    if let Err(e) = renderer::draw(&state.simulation, &mut out) {
                        eprintln!("! {e:?}");
                    }
                }

                drop(state);

                if let StepOutcome::Repeated { period } = outcome {
                    let notice = format!("Board repeats with period {period}, stopping");
                    if let Err(e) = writeln!(out, "{}", notice.yellow()) {
                        eprintln!("! {e:?}");
                    }
                    break;
                }

                sleeper.sleep();
            }
        });

        Self { sender, handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stops the ticker and waits for its thread to exit.
    pub fn stop(self) {
        // The thread may already have stopped on its own, dropping the receiver.
        let _ = self.sender.send(TickerMessage::Stop);
        let _ = self.handle.join();
    }

    pub fn set_rate(&self, rate: Duration) {
        let _ = self.sender.send(TickerMessage::Rate(rate));
    }
}
