use reel_ui::input::{Interaction, UiContext};
use reel_ui::{Alignment, Color, Rect, UiRenderer};
use skia_safe::textlayout::{FontCollection, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};
use skia_safe::{Canvas, FontStyle, Paint, Point, Rect as SkRect};

/// Draws reel-ui widgets onto a skia canvas in canvas coordinates.
pub struct SkiaUi<'a> {
    pub(crate) canvas: &'a Canvas,
    input: &'a UiContext,
    fonts: &'a FontCollection,
    family: &'a str,
}

impl<'a> SkiaUi<'a> {
    pub fn new(canvas: &'a Canvas, input: &'a UiContext, fonts: &'a FontCollection, family: &'a str) -> Self {
        Self { canvas, input, fonts, family }
    }
}

pub(crate) fn to_skia_rect(r: Rect) -> SkRect {
    SkRect::new(r.x, r.y, r.x + r.w, r.y + r.h)
}

pub(crate) fn to_skia_color(c: Color) -> skia_safe::Color {
    skia_safe::Color::from_argb(c.a, c.r, c.g, c.b)
}

impl UiRenderer for SkiaUi<'_> {
    fn draw_rect(&mut self, rect: Rect, color: Color) {
        let mut paint = Paint::default();
        paint.set_color(to_skia_color(color));
        self.canvas.draw_rect(to_skia_rect(rect), &paint);
    }

    fn draw_border(&mut self, rect: Rect, color: Color, width: f32) {
        // Keep the stroke inside the rect.
        let inner = rect.shrink(width / 2.0);
        let mut paint = Paint::default();
        paint.set_style(skia_safe::paint::Style::Stroke);
        paint.set_stroke_width(width);
        paint.set_color(to_skia_color(color));
        self.canvas.draw_rect(to_skia_rect(inner), &paint);
    }

    fn draw_text(&mut self, text: &str, rect: Rect, color: Color, size: f32, align: Alignment) {
        let mut ts = TextStyle::new();
        ts.set_color(to_skia_color(color));
        ts.set_font_size(size);
        ts.set_font_families(&[self.family]);
        ts.set_font_style(FontStyle::bold());

        let mut ps = ParagraphStyle::new();
        ps.set_text_style(&ts);
        ps.set_text_align(match align {
            Alignment::Start => TextAlign::Left,
            Alignment::Center => TextAlign::Center,
        });
        ps.set_max_lines(1);

        let mut builder = ParagraphBuilder::new(&ps, self.fonts);
        builder.push_style(&ts);
        builder.add_text(text);

        let mut paragraph = builder.build();
        paragraph.layout(rect.w);

        let y = rect.y + (rect.h - paragraph.height()) / 2.0;
        paragraph.paint(self.canvas, Point::new(rect.x, y));
    }

    fn interact(&self, rect: Rect) -> Interaction {
        self.input.interact(rect)
    }
}
