use std::time::{Duration, Instant};

/// Paces a loop so consecutive `sleep` calls return roughly `target_delta_time` apart.
pub struct Sleeper {
    pub target_delta_time: Duration,
    pub last_instant: Option<Instant>,
}

impl Sleeper {
    pub fn new(target_delta_time: Duration) -> Self {
        Self {
            target_delta_time,
            last_instant: None,
        }
    }

    /// Sleeps for whatever is left of the target delta since the previous call.
    /// Returns false if the loop was already late.
    pub fn sleep(&mut self) -> bool {
        let delta_time = self
            .last_instant
            .map(|last_instant| last_instant.elapsed())
            .unwrap_or_default();

        let slept = if self.target_delta_time > delta_time {
            spin_sleep::sleep(self.target_delta_time - delta_time);
            true
        } else {
            false
        };

        self.last_instant = Some(Instant::now());
        slept
    }

    pub fn in_time(&self) -> bool {
        if let Some(last_instant) = self.last_instant {
            self.target_delta_time > last_instant.elapsed()
        } else {
            true
        }
    }
}
