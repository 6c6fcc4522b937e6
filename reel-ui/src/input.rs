use crate::Rect;

/// Pointer state seen by one frame, in canvas coordinates.
#[derive(Debug, Default, Clone, Copy)]
pub struct UiContext {
    pos: (f32, f32),
    /// The left button went down since the last frame.
    pressed: bool,
    held: bool,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.pos = (x, y);
    }

    pub fn press(&mut self) {
        self.pressed = true;
        self.held = true;
    }

    /// The press edge survives a release until a frame has seen it, so a
    /// quick click between two frames still counts.
    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn end_frame(&mut self) {
        self.pressed = false;
    }

    pub fn interact(&self, rect: Rect) -> Interaction {
        if !rect.contains(self.pos.0, self.pos.1) {
            return Interaction::None;
        }
        match (self.pressed, self.held) {
            (true, _) => Interaction::Clicked,
            (false, true) => Interaction::Held,
            (false, false) => Interaction::Hovered,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    None,
    Hovered,
    Clicked,
    Held,
}

impl Interaction {
    pub fn is_clicked(&self) -> bool {
        matches!(self, Interaction::Clicked)
    }
}
