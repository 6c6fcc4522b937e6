pub mod assets;
pub mod config;
pub mod painter;
pub mod renderer;
pub mod ui;

pub use renderer::{CanvasEvent, SkiaCanvas, SkiaRenderer};
