use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial window size as a multiple of the 1000x500 canvas, in logical pixels.
    pub scale: f32,
    pub resizable: bool,
    pub font_family: String,
    /// Text box font size in canvas pixels.
    pub font_size: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Reel".to_string(),
            scale: 1.0,
            resizable: true,
            font_family: "monospace".to_string(),
            font_size: 18.0,
        }
    }
}

impl WindowConfig {
    pub fn load() -> Self {
        reel_shared::config::get("window")
    }

    /// Initial inner size in logical pixels.
    pub fn window_size(&self) -> (u32, u32) {
        let scale = if self.scale.is_finite() && self.scale > 0.0 { self.scale } else { 1.0 };
        (
            (reel_core::CANVAS_WIDTH * scale).round() as u32,
            (reel_core::CANVAS_HEIGHT * scale).round() as u32,
        )
    }
}
