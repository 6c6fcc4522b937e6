#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use reel_core::{Canvas, Scene, SceneSnapshot};
use tempfile::TempDir;

/// Writes scripts into a temporary directory that lives as long as it does.
pub struct ScriptDir {
    pub dir: TempDir,
}

impl ScriptDir {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().expect("tempdir") }
    }

    pub fn write(&self, name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, body).expect("write script");
        path
    }

    /// Writes `body` and returns an installed scene for it.
    pub fn scene(&self, id: u32, body: &str) -> Arc<Scene> {
        let path = self.write(&format!("scene{id}.txt"), body);
        let scene = Arc::new(Scene::new(id, path, None));
        scene.install(255);
        scene
    }
}

/// Canvas that records what the driver asks of it.
#[derive(Default)]
pub struct RecordingCanvas {
    pub installed: Mutex<Vec<u32>>,
    pub repaints: AtomicUsize,
    pub finished: AtomicUsize,
    pub frames: Mutex<Vec<SceneSnapshot>>,
    current: Mutex<Option<Arc<Scene>>>,
    /// Close every installed scene right away.
    pub close_on_install: bool,
}

impl RecordingCanvas {
    pub fn closing() -> Self {
        Self { close_on_install: true, ..Self::default() }
    }
}

impl Canvas for RecordingCanvas {
    fn install(&self, scene: Arc<Scene>) {
        self.installed.lock().unwrap().push(scene.id());
        if self.close_on_install {
            scene.close();
        }
        *self.current.lock().unwrap() = Some(scene);
    }

    fn request_repaint(&self) {
        self.repaints.fetch_add(1, Ordering::SeqCst);
        let scene = self.current.lock().unwrap().clone();
        if let Some(scene) = scene {
            self.frames.lock().unwrap().push(scene.snapshot());
        }
    }

    fn finish(&self) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

/// Polls `check` until it holds or `limit` passes.
pub fn eventually(limit: Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + limit;
    loop {
        if check() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(Duration::from_millis(10));
    }
}
