//! Timed background work: sprite motion and cover fades.
//!
//! Both tasks run on their own thread and advance on the shared 50 ms tick
//! of a monotonic clock. A task checks on every tick that its scene is still
//! in the lifecycle it was spawned in and stops otherwise.

pub mod motion;
pub mod transition;

use std::thread;
use std::time::{Duration, Instant};

/// Animation quantum.
pub const TICK: Duration = Duration::from_millis(50);

/// Sleeps to tick boundaries measured from its creation.
#[derive(Debug)]
pub struct Ticker {
    start: Instant,
    period: Duration,
    last: u64,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self { start: Instant::now(), period, last: 0 }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Blocks until the next tick boundary and returns its index. Late
    /// wake-ups skip ahead instead of replaying missed ticks.
    pub fn wait(&mut self) -> u64 {
        let next = self.start + self.period * (self.last + 1) as u32;
        let now = Instant::now();
        if next > now {
            thread::sleep(next - now);
        }
        let period = self.period.as_nanos().max(1);
        self.last = (self.start.elapsed().as_nanos() / period) as u64;
        self.last
    }
}

/// Runs `job` on a named thread. A failed spawn is logged and dropped.
pub(crate) fn spawn<F>(name: &str, job: F)
where
    F: FnOnce() + Send + 'static,
{
    if let Err(e) = thread::Builder::new().name(name.to_string()).spawn(job) {
        log::error!("could not start {} task: {}", name, e);
    }
}
