use reel_ui::Rect;

use crate::assets::{BackgroundKind, FigureKind, FigureState};

/// Copy of everything a painter needs for one frame, taken under the stage
/// lock so a frame never mixes two stage states.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSnapshot {
    pub scene_id: u32,
    pub background: Option<BackgroundKind>,
    /// Draw order.
    pub sprites: Vec<SpriteView>,
    pub opacity: u8,
    pub text: Vec<String>,
    pub buttons: Vec<ButtonView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteView {
    pub id: String,
    pub kind: FigureKind,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub state: FigureState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonView {
    pub label: String,
    pub target: u32,
    pub bounds: Rect,
}
