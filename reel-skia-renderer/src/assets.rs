//! Loads the art for every asset kind from disk.
//!
//! Layout under the asset root: `<folder>/<name><n>.png` for figures and
//! objects (frames numbered from 0, the first gap ends the set) and
//! `backgrounds/<name>.png` for backgrounds. Names match case-insensitively.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use reel_core::assets::{AssetCatalog, BackgroundKind, FigureKind, FrameSet, ObjectKind};
use skia_safe::{Data, Image};
use walkdir::WalkDir;

/// Image files under the asset root, keyed by `folder/stem` in lower case.
#[derive(Debug, Default)]
pub struct AssetIndex {
    paths: HashMap<String, PathBuf>,
}

impl AssetIndex {
    pub fn scan(root: &Path) -> Self {
        log::info!("Scanning assets in {:?}...", root);
        let mut paths = HashMap::new();

        for entry in WalkDir::new(root).min_depth(2).max_depth(2).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }
            let is_image = path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| matches!(ext.to_lowercase().as_str(), "png" | "jpg" | "jpeg"));
            if !is_image {
                continue;
            }
            let folder = path.parent().and_then(|p| p.file_name()).and_then(|s| s.to_str());
            let stem = path.file_stem().and_then(|s| s.to_str());
            if let (Some(folder), Some(stem)) = (folder, stem) {
                let key = Self::key(folder, stem);
                if let Some(old) = paths.insert(key.clone(), path.to_path_buf()) {
                    log::warn!("Duplicate asset '{}': {:?} replaces {:?}", key, path, old);
                }
            }
        }

        log::info!("Asset scan complete. Indexed {} files.", paths.len());
        Self { paths }
    }

    fn key(folder: &str, stem: &str) -> String {
        format!("{}/{}", folder.to_lowercase(), stem.to_lowercase())
    }

    pub fn get(&self, folder: &str, stem: &str) -> Option<&Path> {
        self.paths.get(&Self::key(folder, stem)).map(PathBuf::as_path)
    }

    /// `<name>0`, `<name>1`, ... up to the first missing index.
    pub fn frames(&self, folder: &str, name: &str) -> Vec<&Path> {
        (0..FrameSet::<()>::SLOTS)
            .map_while(|n| self.get(folder, &format!("{name}{n}")))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Decoded art for every known kind, loaded once at startup.
pub struct AssetManager {
    figures: HashMap<FigureKind, FrameSet<Image>>,
    backgrounds: HashMap<BackgroundKind, Image>,
    objects: HashMap<ObjectKind, FrameSet<Image>>,
}

impl AssetManager {
    pub fn new(root: impl AsRef<Path>) -> Self {
        let index = AssetIndex::scan(root.as_ref());

        let figures = FigureKind::ALL
            .iter()
            .filter_map(|&kind| Some((kind, load_frames(&index, kind.folder(), kind.name())?)))
            .collect();
        let objects = ObjectKind::ALL
            .iter()
            .filter_map(|&kind| Some((kind, load_frames(&index, kind.folder(), kind.name())?)))
            .collect();
        let backgrounds: HashMap<_, _> = BackgroundKind::ALL
            .iter()
            .filter_map(|&kind| {
                let path = index.get(kind.folder(), kind.name())?;
                Some((kind, load_image(path)?))
            })
            .collect();

        let manager = Self { figures, backgrounds, objects };
        log::info!(
            "Loaded art for {} figures, {} backgrounds, {} objects",
            manager.figures.len(),
            manager.backgrounds.len(),
            manager.objects.len()
        );
        manager
    }
}

fn load_frames(index: &AssetIndex, folder: &str, name: &str) -> Option<FrameSet<Image>> {
    let paths = index.frames(folder, name);
    if paths.is_empty() {
        log::warn!("No frames for '{}' in {}/, a placeholder will be drawn", name, folder);
        return None;
    }
    // A frame that fails to decode ends the set like a missing file.
    let images = paths.into_iter().map_while(load_image).collect();
    FrameSet::new(images)
}

fn load_image(path: &Path) -> Option<Image> {
    log::debug!("Loading asset {:?}", path);
    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => {
            log::error!("Failed to read file {:?}: {}", path, e);
            return None;
        }
    };
    let image = Image::from_encoded(Data::new_copy(&bytes));
    if image.is_none() {
        log::error!("Failed to decode image: {:?}", path);
    }
    image
}

impl AssetCatalog for AssetManager {
    type Bitmap = Image;

    fn figure(&self, kind: FigureKind) -> Option<&FrameSet<Image>> {
        self.figures.get(&kind)
    }

    fn background(&self, kind: BackgroundKind) -> Option<&Image> {
        self.backgrounds.get(&kind)
    }

    fn object(&self, kind: ObjectKind) -> Option<&FrameSet<Image>> {
        self.objects.get(&kind)
    }
}
