use std::sync::Arc;

use crate::config::StageConfig;
use crate::executor::Executor;
use crate::manager::SceneRegistry;
use crate::renderer::Canvas;

/// Plays scenes one after another until a scene names no playable successor.
pub struct Driver<C: Canvas + 'static> {
    registry: SceneRegistry,
    canvas: Arc<C>,
    executor: Executor,
    stage: StageConfig,
}

impl<C: Canvas + 'static> Driver<C> {
    pub fn new(registry: SceneRegistry, canvas: Arc<C>, stage: StageConfig) -> Self {
        Self { registry, canvas, executor: Executor::new(), stage }
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Runs the game and returns the ids of the scenes played, in order.
    pub fn run(&mut self) -> Vec<u32> {
        let mut played = Vec::new();
        let mut next = self.stage.start_scene;
        while let Some(scene) = self.registry.find_scene(next) {
            scene.install(self.stage.initial_opacity);
            let canvas = Arc::clone(&self.canvas);
            scene.attach(Arc::new(move || canvas.request_repaint()));
            self.canvas.install(Arc::clone(&scene));
            scene.request_repaint();

            next = self.executor.animate(&scene);
            played.push(scene.id());
            scene.detach();

            if scene.is_closed() {
                log::info!("scene {} was closed, stopping", scene.id());
                break;
            }
            if next >= 0 && self.registry.find_scene(next).is_none() {
                log::warn!("scene {} does not exist, ending game", next);
            }
        }
        log::info!("game over after {} scene(s)", played.len());
        self.canvas.finish();
        played
    }
}
