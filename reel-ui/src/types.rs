/// Straight 8-bit RGBA.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };
    pub const GRAY: Self = Self { r: 128, g: 128, b: 128, a: 255 };
    pub const LIGHT_GRAY: Self = Self { r: 220, g: 220, b: 220, a: 255 };

    pub fn with_alpha(mut self, a: u8) -> Self {
        self.a = a;
        self
    }
}

/// Horizontal placement of text inside its rect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Start,
    Center,
}

/// Axis-aligned box in canvas pixels, `y` growing downwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// A `w`×`h` box standing on `(center_x, bottom)`.
    pub fn standing_on(center_x: f32, bottom: f32, w: f32, h: f32) -> Self {
        Self::new(center_x - w / 2.0, bottom - h, w, h)
    }

    /// Half-open on the right and bottom edges, so adjacent rects never both
    /// claim a point.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    /// Returns (the cut-off bottom strip, the rest above it).
    pub fn split_bottom(&self, height: f32) -> (Rect, Rect) {
        let h = height.min(self.h);
        let rest_h = self.h - h;
        (
            Rect::new(self.x, self.y + rest_h, self.w, h),
            Rect::new(self.x, self.y, self.w, rest_h),
        )
    }

    /// Inset on all four sides. Collapses to an empty rect at the corner when
    /// the inset eats the whole box.
    pub fn shrink(&self, amount: f32) -> Rect {
        if self.w <= amount * 2.0 || self.h <= amount * 2.0 {
            return Rect::new(self.x, self.y, 0.0, 0.0);
        }
        Rect::new(self.x + amount, self.y + amount, self.w - amount * 2.0, self.h - amount * 2.0)
    }

    /// The `index`-th of a column of `h`-tall rows starting at the top edge.
    pub fn row(&self, index: usize, h: f32) -> Rect {
        Rect::new(self.x, self.y + h * index as f32, self.w, h)
    }
}
