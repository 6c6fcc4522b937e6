use std::sync::Arc;
use std::time::Duration;

use reelscript_core::ast::Direction;

use super::{TICK, Ticker};
use crate::scene::Scene;

pub const MIN_DURATION: Duration = Duration::from_millis(500);

/// Linear cover-alpha ramp.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    direction: Direction,
    duration: Duration,
    alpha: f64,
    delta: f64,
}

impl TransitionPlan {
    pub fn new(direction: Direction, duration: Duration) -> Self {
        let duration = duration.max(MIN_DURATION);
        let sign = match direction {
            Direction::In => -1.0,
            Direction::Out => 1.0,
        };
        let delta = 255.0 / duration.as_millis() as f64 * TICK.as_millis() as f64 * sign;
        Self {
            direction,
            duration,
            alpha: Self::start_alpha(direction),
            delta,
        }
    }

    fn start_alpha(direction: Direction) -> f64 {
        match direction {
            Direction::In => 255.0,
            Direction::Out => 0.0,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Alpha to show on this tick, or `None` once the ramp left `0..=255`.
    pub fn advance(&mut self) -> Option<u8> {
        if !(0.0..=255.0).contains(&self.alpha) {
            return None;
        }
        let shown = self.alpha.round() as u8;
        self.alpha += self.delta;
        Some(shown)
    }

    /// Alpha the ramp settles on.
    pub fn final_alpha(&self) -> u8 {
        match self.direction {
            Direction::In => 0,
            Direction::Out => 255,
        }
    }
}

/// Body of a transition task.
pub(crate) fn run(scene: Arc<Scene>, mut plan: TransitionPlan, epoch: u64) {
    let mut ticker = Ticker::new(TICK);
    loop {
        ticker.wait();
        if !scene.is_current(epoch) {
            log::debug!("transition on scene {} dropped after scene change", scene.id());
            return;
        }
        match plan.advance() {
            Some(alpha) => scene.set_opacity(alpha),
            None => break,
        }
    }
    scene.set_opacity(plan.final_alpha());
    log::debug!(
        "transition of {} ms finished after {} ms",
        plan.duration().as_millis(),
        ticker.elapsed().as_millis()
    );
}
