use reelscript_core::ast::{Scope, SizeMode};

use crate::assets::{FigureKind, FigureState};

/// Stable handle of a sprite inside one scene. Unlike script ids, keys are
/// never reused, so tasks can find "their" sprite again after other sprites
/// were added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteKey(pub(crate) u64);

#[derive(Debug, Clone)]
pub struct Sprite {
    key: SpriteKey,
    id: String,
    scope: Scope,
    kind: FigureKind,
    x: f64,
    y: f64,
    size: f64,
    state: FigureState,
    /// Ticket of the motion allowed to move this sprite.
    pub(crate) motion: u64,
}

impl Sprite {
    /// A non-positive `size` falls back to 1.
    pub fn new(key: SpriteKey, scope: Scope, name: &str, id: &str, x: f64, y: f64, size: f64) -> Self {
        Self {
            key,
            id: id.to_lowercase(),
            scope,
            kind: FigureKind::resolve(name),
            x,
            y,
            size: if size > 0.0 { size } else { 1.0 },
            state: FigureState::Still,
            motion: 0,
        }
    }

    pub fn key(&self) -> SpriteKey {
        self.key
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn kind(&self) -> FigureKind {
        self.kind
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn state(&self) -> FigureState {
        self.state
    }

    /// Returns whether the size changed. Non-positive results are rejected.
    pub fn resize(&mut self, size: f64, mode: SizeMode) -> bool {
        let next = match mode {
            SizeMode::Relative => self.size * size,
            SizeMode::Absolute => size,
        };
        if next > 0.0 && next.is_finite() {
            self.size = next;
            true
        } else {
            false
        }
    }

    pub fn transform(&mut self, name: &str) {
        self.kind = FigureKind::resolve(name);
    }

    pub fn set_state(&mut self, token: &str) {
        self.state = FigureState::from_token(token);
    }

    pub(crate) fn set_figure_state(&mut self, state: FigureState) {
        self.state = state;
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Top-left corner of a `w`×`h` frame anchored at this sprite: `x` is
    /// the horizontal centre and `y` the baseline.
    pub fn top_left(&self, w: f64, h: f64) -> (f64, f64) {
        (self.x - w / 2.0, self.y - h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rick() -> Sprite {
        Sprite::new(SpriteKey(1), Scope::Local, "Rick", "R", 100.0, 300.0, 2.0)
    }

    #[test]
    fn construction() {
        let s = rick();
        assert_eq!(s.id(), "r");
        assert_eq!(s.kind(), FigureKind::Rick);
        assert_eq!(s.state(), FigureState::Still);
        let odd = Sprite::new(SpriteKey(2), Scope::Global, "ghost", "g", 0.0, 0.0, -3.0);
        assert_eq!(odd.kind(), FigureKind::Mob);
        assert_eq!(odd.size(), 1.0);
    }

    #[test]
    fn resize_rules() {
        let mut s = rick();
        assert!(s.resize(1.0, SizeMode::Relative));
        assert_eq!(s.size(), 2.0);
        assert!(s.resize(0.5, SizeMode::Relative));
        assert_eq!(s.size(), 1.0);
        assert!(!s.resize(0.0, SizeMode::Absolute));
        assert!(!s.resize(-2.0, SizeMode::Relative));
        assert_eq!(s.size(), 1.0);
        assert!(s.resize(3.0, SizeMode::Absolute));
        assert_eq!(s.size(), 3.0);
    }

    #[test]
    fn states_are_always_valid() {
        let mut s = rick();
        for token in ["right", "2", "ACTION1", "9", "", "fly"] {
            s.set_state(token);
            assert!(FigureState::ALL.contains(&s.state()));
        }
        s.set_state("action2");
        assert_eq!(s.state(), FigureState::Action2);
    }

    #[test]
    fn anchor_and_transform() {
        let mut s = rick();
        assert_eq!(s.top_left(40.0, 80.0), (80.0, 220.0));
        s.set_x(10.0);
        s.set_y(20.0);
        assert_eq!(s.position(), (10.0, 20.0));
        s.transform("heather");
        assert_eq!(s.kind(), FigureKind::Heather);
    }
}
