mod frame;
mod walk;

use std::fs;
use std::sync::Arc;

use reelscript_core::parse_program;

use crate::scene::Scene;
use frame::Frame;
pub use walk::{NextAction, walk_stmt};

/// Next-scene value meaning "stop the game".
pub const END_OF_GAME: i64 = -1;

/// Runs animation scripts one scene at a time. The counter lives here, so it
/// carries over from one scene to the next.
#[derive(Debug, Default)]
pub struct Executor {
    counter: i64,
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> i64 {
        self.counter
    }

    /// Plays `scene`'s script to its end and returns the id of the scene to
    /// play next. Read failures, missing labels, the end of the file and a
    /// closed scene all yield [`END_OF_GAME`].
    pub fn animate(&mut self, scene: &Arc<Scene>) -> i64 {
        let path = scene.path();
        let src = match fs::read_to_string(path) {
            Ok(src) => src,
            Err(e) => {
                log::error!("cannot read {:?}: {}", path, e);
                return END_OF_GAME;
            }
        };
        let program = match parse_program(&src) {
            Ok(program) => program,
            Err(e) => {
                log::error!("{:?} is no longer an animation file: {}", path, e);
                return END_OF_GAME;
            }
        };
        log::info!("animating scene {} from {:?}", scene.id(), path);

        if let Some(background) = &program.header.background {
            scene.set_background(background);
        }

        let mut frame = Frame::new(program.body.clone(), 0);
        loop {
            if scene.is_closed() {
                log::info!("scene {} closed", scene.id());
                return END_OF_GAME;
            }
            let Some(stmt) = frame.current() else {
                log::debug!("scene {} reached end of file", scene.id());
                return END_OF_GAME;
            };
            match walk_stmt(scene, &mut self.counter, stmt) {
                NextAction::Continue => frame.advance(),
                NextAction::Jump(label) => match program.resume_index(label) {
                    Some(pc) => frame.jump(pc),
                    None => {
                        log::warn!("scene {}: label {} not found", scene.id(), label);
                        return END_OF_GAME;
                    }
                },
                NextAction::Return(next) => {
                    log::info!("scene {} returns {}", scene.id(), next);
                    return next;
                }
                NextAction::Stop => return END_OF_GAME,
            }
        }
    }
}
