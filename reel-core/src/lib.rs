pub mod assets;
pub mod config;
pub mod executor;
pub mod manager;
pub mod renderer;
pub mod scene;
pub mod tasks;

pub use executor::Executor;
pub use manager::SceneRegistry;
pub use renderer::Canvas;
pub use renderer::driver::Driver;
pub use renderer::terminal::TerminalCanvas;
pub use scene::{Scene, SceneSnapshot};

/// Logical canvas size every scene is laid out against.
pub const CANVAS_WIDTH: f32 = 1000.0;
pub const CANVAS_HEIGHT: f32 = 500.0;
