use crate::input::Interaction;
use crate::{Alignment, Color, Rect, UiRenderer};

/// Push button: a light box with a thin black border and centred label.
/// Hovering lightens it, pressing darkens it.
pub struct Button<'a> {
    text: &'a str,
    font_size: f32,
}

impl<'a> Button<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, font_size: 14.0 }
    }

    pub fn size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Draws the button and reports whether it was clicked this frame.
    pub fn show(self, ui: &mut impl UiRenderer, rect: Rect) -> bool {
        let interaction = ui.interact(rect);
        let fill = match interaction {
            Interaction::Held | Interaction::Clicked => Color::GRAY,
            Interaction::Hovered => Color::WHITE,
            Interaction::None => Color::LIGHT_GRAY,
        };
        ui.draw_rect(rect, fill);
        ui.draw_border(rect, Color::BLACK, 1.0);
        ui.draw_text(self.text, rect, Color::BLACK, self.font_size, Alignment::Center);

        interaction.is_clicked()
    }
}
