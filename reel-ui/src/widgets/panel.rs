use crate::{Color, Rect, UiRenderer};

/// Filled box with an optional stroke, drawn inside its rect.
pub struct Panel {
    fill: Color,
    stroke: Option<(Color, f32)>,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel {
    pub fn new() -> Self {
        Self { fill: Color::WHITE, stroke: None }
    }

    pub fn stroke(mut self, color: Color, width: f32) -> Self {
        self.stroke = Some((color, width));
        self
    }

    /// Draws the panel and returns the area left inside the stroke.
    pub fn show(self, ui: &mut impl UiRenderer, rect: Rect) -> Rect {
        ui.draw_rect(rect, self.fill);
        match self.stroke {
            Some((color, width)) => {
                ui.draw_border(rect, color, width);
                rect.shrink(width)
            }
            None => rect,
        }
    }
}
