//! The stage of one animation script.
//!
//! A [`Scene`] is shared between the interpreter thread, the motion and
//! transition tasks it spawns, and the front end that paints it and delivers
//! button clicks. All visible state sits behind one mutex; the button result
//! has its own mutex and condition variable so a click can wake the
//! interpreter without touching the stage.

pub mod snapshot;
pub mod sprite;

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use reel_ui::Rect;
use reelscript_core::ast::{Direction, Scope, SizeMode};

use crate::assets::{BackgroundKind, FigureState};
use crate::tasks::motion::{self, MotionPlan};
use crate::tasks::transition::{self, TransitionPlan};
use crate::tasks;
use crate::{CANVAS_HEIGHT, CANVAS_WIDTH};

pub use snapshot::{ButtonView, SceneSnapshot, SpriteView};
use sprite::{Sprite, SpriteKey};

/// Text lines kept on screen.
pub const MAX_TEXT_LINES: usize = 5;

/// How often a blocked button wait re-checks for a close.
const RESULT_POLL: Duration = Duration::from_millis(100);

pub type RepaintHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Default)]
struct Stage {
    sprites: Vec<Sprite>,
    text: VecDeque<String>,
    opacity: u8,
    background: Option<BackgroundKind>,
    buttons: Vec<ButtonView>,
    next_key: u64,
}

impl Stage {
    fn sprite_mut(&mut self, id: &str) -> Option<&mut Sprite> {
        self.sprites.iter_mut().find(|s| s.id() == id)
    }
}

pub struct Scene {
    id: u32,
    path: PathBuf,
    header_background: Option<String>,
    stage: Mutex<Stage>,
    result: Mutex<i64>,
    result_changed: Condvar,
    closed: AtomicBool,
    epoch: AtomicU64,
    repaint: Mutex<Option<RepaintHook>>,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("path", &self.path)
            .field("epoch", &self.epoch())
            .finish_non_exhaustive()
    }
}

impl Scene {
    pub fn new(id: u32, path: impl Into<PathBuf>, header_background: Option<String>) -> Self {
        Self {
            id,
            path: path.into(),
            header_background,
            stage: Mutex::new(Stage { opacity: 255, ..Stage::default() }),
            result: Mutex::new(0),
            result_changed: Condvar::new(),
            closed: AtomicBool::new(false),
            epoch: AtomicU64::new(0),
            repaint: Mutex::new(None),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Background named by the script header, as written there.
    pub fn header_background(&self) -> Option<&str> {
        self.header_background.as_deref()
    }

    fn stage(&self) -> MutexGuard<'_, Stage> {
        self.stage.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn result_guard(&self) -> MutexGuard<'_, i64> {
        self.result.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // ---- lifecycle -------------------------------------------------------

    /// Starts a fresh run of this scene: empty stage, cover at
    /// `initial_opacity`, no pending result. Tasks of a previous run stop.
    pub fn install(&self, initial_opacity: u8) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.closed.store(false, Ordering::SeqCst);
        *self.stage() = Stage { opacity: initial_opacity, ..Stage::default() };
        *self.result_guard() = 0;
        log::info!("scene {} installed", self.id);
    }

    /// Routes repaint requests to a front end.
    pub fn attach(&self, hook: RepaintHook) {
        *self.repaint.lock().unwrap_or_else(|p| p.into_inner()) = Some(hook);
    }

    /// Ends the current run. Running tasks stop at their next tick.
    pub fn detach(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        *self.repaint.lock().unwrap_or_else(|p| p.into_inner()) = None;
    }

    /// Interrupts waits and button blocks; the interpreter then gives up.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        let _guard = self.result_guard();
        self.result_changed.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    pub(crate) fn is_current(&self, epoch: u64) -> bool {
        self.epoch() == epoch
    }

    pub fn request_repaint(&self) {
        let hook = self.repaint.lock().unwrap_or_else(|p| p.into_inner()).clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    /// Sleeps for `duration` unless the scene is closed first. Returns
    /// whether the full duration passed.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        let mut guard = self.result_guard();
        loop {
            if self.is_closed() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            guard = match self.result_changed.wait_timeout(guard, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
    }

    // ---- cover -----------------------------------------------------------

    pub fn transition_in(self: &Arc<Self>, duration: Duration) {
        self.spawn_transition(Direction::In, duration);
    }

    pub fn transition_out(self: &Arc<Self>, duration: Duration) {
        self.spawn_transition(Direction::Out, duration);
    }

    pub fn spawn_transition(self: &Arc<Self>, direction: Direction, duration: Duration) {
        let plan = TransitionPlan::new(direction, duration);
        let scene = Arc::clone(self);
        let epoch = self.epoch();
        log::debug!("transition {:?} over {} ms", direction, plan.duration().as_millis());
        tasks::spawn("transition", move || transition::run(scene, plan, epoch));
    }

    pub fn set_opacity(&self, alpha: u8) {
        self.stage().opacity = alpha;
        self.request_repaint();
    }

    pub fn opacity(&self) -> u8 {
        self.stage().opacity
    }

    // ---- buttons ---------------------------------------------------------

    /// Appends a button below the previous ones in the right-hand column.
    pub fn add_button(&self, label: &str, target: u32) {
        {
            let mut stage = self.stage();
            let k = stage.buttons.len() as f32;
            let bounds = Rect::new(
                CANVAS_WIDTH * 4.0 / 5.0,
                CANVAS_HEIGHT / 5.0 + 50.0 * k,
                CANVAS_WIDTH / 10.0,
                CANVAS_HEIGHT / 20.0,
            );
            stage.buttons.push(ButtonView { label: label.to_string(), target, bounds });
        }
        log::info!("button `{}` -> {} added", label, target);
        self.request_repaint();
    }

    pub fn destroy_buttons(&self) {
        {
            let mut stage = self.stage();
            stage.buttons.clear();
            *self.result_guard() = 0;
        }
        self.request_repaint();
    }

    /// Records a click on the button leading to `result`. Returns `false`,
    /// changing nothing, when no such button is on stage, e.g. for a click
    /// painted before the buttons were destroyed.
    pub fn set_result(&self, result: i64) -> bool {
        let stage = self.stage();
        if !stage.buttons.iter().any(|b| i64::from(b.target) == result) {
            log::debug!("scene {}: no button leads to {}, click ignored", self.id, result);
            return false;
        }
        log::info!("scene {}: button result {}", self.id, result);
        *self.result_guard() = result;
        drop(stage);
        self.result_changed.notify_all();
        true
    }

    pub fn result(&self) -> i64 {
        *self.result_guard()
    }

    /// Blocks until a button sets a nonzero result. `None` if the scene was
    /// closed while waiting.
    pub fn wait_for_result(&self) -> Option<i64> {
        let mut guard = self.result_guard();
        loop {
            if *guard != 0 {
                return Some(*guard);
            }
            if self.is_closed() {
                return None;
            }
            guard = match self.result_changed.wait_timeout(guard, RESULT_POLL) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
    }

    // ---- sprites ---------------------------------------------------------

    #[allow(clippy::too_many_arguments)]
    pub fn add_character(
        &self,
        scope: Scope,
        name: &str,
        id: &str,
        x: f64,
        y: f64,
        size: f64,
        mode: SizeMode,
    ) {
        {
            let mut stage = self.stage();
            stage.next_key += 1;
            let key = SpriteKey(stage.next_key);
            let mut sprite = Sprite::new(key, scope, name, id, x, y, 1.0);
            sprite.resize(size, mode);
            log::debug!("add {} `{}` ({:?}) at ({}, {}) size {}", sprite.kind(), sprite.id(), scope, x, y, sprite.size());
            stage.sprites.push(sprite);
        }
        self.request_repaint();
    }

    /// Removes the first sprite with `id`. Unknown ids are ignored.
    pub fn remove_character(&self, id: &str) {
        let removed = {
            let mut stage = self.stage();
            match stage.sprites.iter().position(|s| s.id() == id) {
                Some(pos) => {
                    stage.sprites.remove(pos);
                    true
                }
                None => false,
            }
        };
        if removed {
            log::debug!("remove `{}`", id);
            self.request_repaint();
        }
    }

    pub fn remove_all(&self) {
        self.stage().sprites.clear();
        log::debug!("remove all sprites");
        self.request_repaint();
    }

    pub fn set_character(&self, id: &str, state: &str) {
        let found = self.stage().sprite_mut(id).map(|s| s.set_state(state)).is_some();
        if found {
            self.request_repaint();
        }
    }

    pub fn resize_character(&self, id: &str, size: f64, mode: SizeMode) {
        let changed = self.stage().sprite_mut(id).is_some_and(|s| s.resize(size, mode));
        if changed {
            log::debug!("resize `{}` by {} ({:?})", id, size, mode);
            self.request_repaint();
        }
    }

    /// Starts moving the first sprite with `id`. A motion already running
    /// on that sprite stops at its next tick.
    pub fn move_character(self: &Arc<Self>, id: &str, x: f64, y: f64, speed: f64) {
        let claimed = {
            let mut stage = self.stage();
            stage.sprite_mut(id).and_then(|sprite| {
                sprite.motion += 1;
                let plan = MotionPlan::new(sprite.position(), (x, y), speed);
                if plan.is_none() {
                    sprite.set_figure_state(FigureState::Still);
                }
                plan.map(|plan| (sprite.key(), sprite.motion, plan))
            })
        };
        let Some((key, ticket, plan)) = claimed else {
            return;
        };
        log::debug!("move `{}` to ({}, {}) at {} px/s", id, x, y, speed);
        let scene = Arc::clone(self);
        let epoch = self.epoch();
        tasks::spawn("motion", move || motion::run(scene, key, ticket, plan, epoch));
    }

    /// Runs `f` on sprite `key` if motion `ticket` still owns it.
    pub(crate) fn drive_sprite<R>(&self, key: SpriteKey, ticket: u64, f: impl FnOnce(&mut Sprite) -> R) -> Option<R> {
        let mut stage = self.stage();
        let sprite = stage.sprites.iter_mut().find(|s| s.key() == key)?;
        if sprite.motion != ticket {
            return None;
        }
        Some(f(sprite))
    }

    /// Copy of the first sprite with `id`.
    pub fn character(&self, id: &str) -> Option<Sprite> {
        self.stage().sprites.iter().find(|s| s.id() == id).cloned()
    }

    // ---- text and background ---------------------------------------------

    /// Appends a line; an empty line clears the box.
    pub fn add_text(&self, line: &str) {
        {
            let mut stage = self.stage();
            if line.is_empty() {
                stage.text.clear();
            } else {
                stage.text.push_back(line.to_string());
                while stage.text.len() > MAX_TEXT_LINES {
                    stage.text.pop_front();
                }
            }
        }
        self.request_repaint();
    }

    pub fn clear_text(&self) {
        self.add_text("");
    }

    pub fn set_background(&self, name: &str) {
        let kind = BackgroundKind::resolve(name);
        self.stage().background = Some(kind);
        log::info!("scene {}: background {}", self.id, kind);
        self.request_repaint();
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        let stage = self.stage();
        SceneSnapshot {
            scene_id: self.id,
            background: stage.background,
            sprites: stage
                .sprites
                .iter()
                .map(|s| {
                    let (x, y) = s.position();
                    SpriteView { id: s.id().to_string(), kind: s.kind(), x, y, size: s.size(), state: s.state() }
                })
                .collect(),
            opacity: stage.opacity,
            text: stage.text.iter().cloned().collect(),
            buttons: stage.buttons.clone(),
        }
    }
}
