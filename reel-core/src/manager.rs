use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use walkdir::WalkDir;

use reelscript_core::parse_header;

use crate::scene::Scene;

/// Every playable scene, sorted by id.
#[derive(Debug, Default)]
pub struct SceneRegistry {
    scenes: Vec<Arc<Scene>>,
}

impl SceneRegistry {
    /// Scans the files directly inside `dir` and keeps those whose first
    /// line is an animation header. Unreadable files and other files are
    /// skipped; only a missing directory is an error.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        info!("Scanning animation files at: {:?}", dir);
        if !dir.is_dir() {
            anyhow::bail!("script directory {:?} does not exist", dir);
        }

        let mut scenes = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.with_context(|| format!("listing {:?}", dir))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            match probe(path) {
                Ok(Some(scene)) => {
                    info!("Loaded script {:?} as scene {}", path, scene.id());
                    scenes.push(Arc::new(scene));
                }
                Ok(None) => log::debug!("{:?} is not an animation file", path),
                Err(e) => log::warn!("skipping {:?}: {:#}", path, e),
            }
        }

        let registry = Self::from_scenes(scenes);
        info!("Registry loaded. Scenes: {}", registry.len());
        Ok(registry)
    }

    /// Sorts by id. Of several scenes sharing an id the first one is kept.
    pub fn from_scenes(mut scenes: Vec<Arc<Scene>>) -> Self {
        scenes.sort_by_key(|s| s.id());
        scenes.dedup_by(|later, first| {
            let duplicate = later.id() == first.id();
            if duplicate {
                log::warn!(
                    "scene id {} of {:?} already taken by {:?}, ignoring it",
                    later.id(),
                    later.path(),
                    first.path()
                );
            }
            duplicate
        });
        Self { scenes }
    }

    pub fn find_scene(&self, id: i64) -> Option<Arc<Scene>> {
        let id = u32::try_from(id).ok()?;
        self.scenes
            .binary_search_by_key(&id, |s| s.id())
            .ok()
            .map(|idx| Arc::clone(&self.scenes[idx]))
    }

    pub fn ids(&self) -> Vec<u32> {
        self.scenes.iter().map(|s| s.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

/// Reads `path` and checks its header.
fn probe(path: &Path) -> Result<Option<Scene>> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read script: {:?}", path))?;
    let first = content.strip_prefix('\u{feff}').unwrap_or(&content).lines().next().unwrap_or("");
    Ok(parse_header(first)
        .ok()
        .map(|header| Scene::new(header.scene_id, path, header.background)))
}
