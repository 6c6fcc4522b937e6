use crate::widgets::Panel;
use crate::{Alignment, Color, Rect, UiRenderer};

/// The dialogue box: a stroked white panel with one text line per row.
pub struct TextBox<'a> {
    lines: &'a [String],
    font_size: f32,
    stroke: f32,
    indent: f32,
}

impl<'a> TextBox<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        Self {
            lines,
            font_size: 18.0,
            stroke: 6.0,
            indent: 4.0,
        }
    }

    /// Also the row height.
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Draws the box and its lines. Rows starting below the box are dropped.
    pub fn show(self, ui: &mut impl UiRenderer, rect: Rect) {
        let inner = Panel::new().stroke(Color::BLACK, self.stroke).show(ui, rect);
        let text_area = Rect::new(inner.x + self.indent, inner.y, inner.w - 2.0 * self.indent, inner.h);
        for (i, line) in self.lines.iter().enumerate() {
            let row = text_area.row(i, self.font_size);
            if row.y >= inner.y + inner.h {
                break;
            }
            ui.draw_text(line, row, Color::BLACK, self.font_size, Alignment::Start);
        }
    }
}
