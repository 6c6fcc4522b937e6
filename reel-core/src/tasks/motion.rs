use std::sync::Arc;
use std::time::Duration;

use super::{TICK, Ticker};
use crate::assets::FigureState;
use crate::scene::Scene;
use crate::scene::sprite::SpriteKey;

/// Walk cycle period: the figure swaps feet this often.
const STRIDE: Duration = Duration::from_millis(500);

/// Straight-line translation at constant speed.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionPlan {
    target: (f64, f64),
    /// Displacement per tick.
    step: (f64, f64),
    /// Per-axis distance to the target after the previous tick.
    last: (f64, f64),
}

impl MotionPlan {
    /// `speed` is in px/s; its magnitude is used and raised to at least 1.
    /// Returns `None` when already at the target.
    pub fn new(from: (f64, f64), to: (f64, f64), speed: f64) -> Option<Self> {
        if from == to {
            return None;
        }
        let speed = if speed.is_finite() { speed.abs().max(1.0) } else { 1.0 };
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let ratio = speed / dx.hypot(dy);
        let per_tick = TICK.as_secs_f64();
        Some(Self {
            target: to,
            step: (ratio * dx * per_tick, ratio * dy * per_tick),
            last: (dx.abs(), dy.abs()),
        })
    }

    pub fn target(&self) -> (f64, f64) {
        self.target
    }

    pub fn step(&self) -> (f64, f64) {
        self.step
    }

    /// Moves one tick on from `pos`. Returns `None` once either axis got
    /// farther from the target than on the previous tick.
    pub fn advance(&mut self, pos: (f64, f64)) -> Option<(f64, f64)> {
        let next = (pos.0 + self.step.0, pos.1 + self.step.1);
        let dist = ((next.0 - self.target.0).abs(), (next.1 - self.target.1).abs());
        if dist.0 > self.last.0 || dist.1 > self.last.1 {
            return None;
        }
        self.last = dist;
        Some(next)
    }
}

/// Appearance at `elapsed` into a walk.
pub fn walk_state(elapsed: Duration) -> FigureState {
    if (elapsed.as_millis() / STRIDE.as_millis()) % 2 == 0 {
        FigureState::Left
    } else {
        FigureState::Right
    }
}

enum Step {
    Moved,
    Arrived,
}

/// Body of a motion task. Stops early when the scene leaves the `epoch` it
/// was spawned in, or when a newer motion took over the sprite.
pub(crate) fn run(scene: Arc<Scene>, key: SpriteKey, ticket: u64, mut plan: MotionPlan, epoch: u64) {
    let mut ticker = Ticker::new(TICK);
    loop {
        ticker.wait();
        if !scene.is_current(epoch) {
            log::debug!("motion on scene {} dropped after scene change", scene.id());
            return;
        }
        let state = walk_state(ticker.elapsed());
        let step = scene.drive_sprite(key, ticket, |sprite| match plan.advance(sprite.position()) {
            Some((x, y)) => {
                sprite.set_position(x, y);
                sprite.set_figure_state(state);
                Step::Moved
            }
            None => {
                let (x, y) = plan.target();
                sprite.set_position(x, y);
                sprite.set_figure_state(FigureState::Still);
                Step::Arrived
            }
        });
        match step {
            Some(Step::Moved) => scene.request_repaint(),
            Some(Step::Arrived) => {
                scene.request_repaint();
                log::debug!("motion finished after {} ms", ticker.elapsed().as_millis());
                return;
            }
            None => {
                log::debug!("motion superseded or sprite removed");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(mut plan: MotionPlan, mut pos: (f64, f64)) -> usize {
        let mut ticks = 0;
        while let Some(next) = plan.advance(pos) {
            pos = next;
            ticks += 1;
            assert!(ticks < 10_000, "motion never terminated");
        }
        ticks
    }

    #[test]
    fn same_spot_is_a_no_op() {
        assert!(MotionPlan::new((3.0, 4.0), (3.0, 4.0), 100.0).is_none());
    }

    #[test]
    fn step_follows_speed() {
        let plan = MotionPlan::new((0.0, 200.0), (400.0, 200.0), 400.0).unwrap();
        assert_eq!(plan.step(), (20.0, 0.0));
        assert_eq!(run_to_end(plan, (0.0, 200.0)), 20);
    }

    #[test]
    fn zero_and_negative_speed() {
        let plan = MotionPlan::new((0.0, 0.0), (10.0, 10.0), 0.0).unwrap();
        let (sx, sy) = plan.step();
        assert!((sx.hypot(sy) - 0.05).abs() < 1e-9);

        let plan = MotionPlan::new((0.0, 0.0), (0.0, -30.0), -600.0).unwrap();
        assert_eq!(plan.step(), (0.0, -30.0));
    }

    #[test]
    fn diagonal_terminates() {
        let plan = MotionPlan::new((17.0, 3.0), (-250.0, 411.0), 333.0).unwrap();
        assert!(run_to_end(plan, (17.0, 3.0)) > 0);
    }

    #[test]
    fn walk_cycle_alternates() {
        assert_eq!(walk_state(Duration::from_millis(0)), FigureState::Left);
        assert_eq!(walk_state(Duration::from_millis(499)), FigureState::Left);
        assert_eq!(walk_state(Duration::from_millis(500)), FigureState::Right);
        assert_eq!(walk_state(Duration::from_millis(1000)), FigureState::Left);
    }
}
