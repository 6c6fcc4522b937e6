pub mod input;
pub mod types;
pub mod widgets;

pub use types::{Alignment, Color, Rect};
use input::Interaction;

/// Drawing backend the widgets paint through, in canvas coordinates.
pub trait UiRenderer {
    /// Filled rectangle.
    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Rectangle outline of the given stroke width, kept inside `rect`.
    fn draw_border(&mut self, rect: Rect, color: Color, width: f32);

    /// One line of text, vertically centred in `rect`.
    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, size: f32, align: Alignment);

    /// Queries the pointer state over `rect`.
    fn interact(&self, rect: Rect) -> Interaction;
}
