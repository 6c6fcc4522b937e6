use reel_core::assets::AssetCatalog;
use reel_core::scene::{SceneSnapshot, SpriteView};
use reel_core::{CANVAS_HEIGHT, CANVAS_WIDTH};
use reel_ui::input::UiContext;
use reel_ui::widgets::{Button, TextBox};
use reel_ui::{Alignment, Color, Rect, UiRenderer};
use skia_safe::textlayout::FontCollection;
use skia_safe::{Canvas, FontMgr, Image, Paint, SamplingOptions};

use crate::config::WindowConfig;
use crate::ui::{SkiaUi, to_skia_color, to_skia_rect};

/// Unscaled size of the box drawn for a figure without art.
const PLACEHOLDER: (f32, f32) = (60.0, 120.0);
/// Share of the canvas height taken by the text box.
const TEXT_BOX_SHARE: f32 = 0.2;

/// Paints a [`SceneSnapshot`] onto a 1000x500 canvas.
pub struct Painter {
    fonts: FontCollection,
    family: String,
    font_size: f32,
}

impl Painter {
    pub fn new(config: &WindowConfig) -> Self {
        let mut fonts = FontCollection::new();
        fonts.set_default_font_manager(FontMgr::default(), None);
        Self {
            fonts,
            family: config.font_family.clone(),
            font_size: config.font_size,
        }
    }

    /// Draws one frame and returns the target of a button clicked in it.
    pub fn paint<A>(&self, canvas: &Canvas, snap: &SceneSnapshot, assets: &A, input: &UiContext) -> Option<u32>
    where
        A: AssetCatalog<Bitmap = Image>,
    {
        let full = Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
        let mut ui = SkiaUi::new(canvas, input, &self.fonts, &self.family);

        match snap.background.and_then(|bg| assets.background(bg)) {
            Some(image) => draw_image(canvas, image, full),
            None => ui.draw_rect(full, Color::BLACK),
        }

        for sprite in &snap.sprites {
            self.draw_sprite(&mut ui, sprite, assets);
        }

        if snap.opacity > 0 {
            ui.draw_rect(full, Color::BLACK.with_alpha(snap.opacity));
        }

        let (_, text_box) = full.split_bottom(CANVAS_HEIGHT * TEXT_BOX_SHARE);
        TextBox::new(&snap.text).font_size(self.font_size).show(&mut ui, text_box);

        let mut clicked = None;
        for button in &snap.buttons {
            if Button::new(&button.label).size(self.font_size * 0.75).show(&mut ui, button.bounds) {
                clicked = Some(button.target);
            }
        }
        clicked
    }

    fn draw_sprite<A>(&self, ui: &mut SkiaUi<'_>, sprite: &SpriteView, assets: &A)
    where
        A: AssetCatalog<Bitmap = Image>,
    {
        let scale = sprite.size as f32;
        match assets.figure_frame(sprite.kind, sprite.state) {
            Some(image) => {
                let (w, h) = (image.width() as f32 * scale, image.height() as f32 * scale);
                draw_image(ui.canvas, image, sprite_rect(sprite, w, h));
            }
            None => {
                let (w, h) = (PLACEHOLDER.0 * scale, PLACEHOLDER.1 * scale);
                let rect = sprite_rect(sprite, w, h);
                ui.draw_rect(rect, Color::GRAY.with_alpha(160));
                ui.draw_border(rect, Color::WHITE, 2.0);
                ui.draw_text(&sprite.id, rect, Color::WHITE, self.font_size, Alignment::Center);
            }
        }
    }
}

/// Frame rect for a sprite: `x` is the horizontal centre, `y` the baseline.
pub fn sprite_rect(sprite: &SpriteView, w: f32, h: f32) -> Rect {
    Rect::standing_on(sprite.x as f32, sprite.y as f32, w, h)
}

fn draw_image(canvas: &Canvas, image: &Image, dst: Rect) {
    let mut paint = Paint::default();
    paint.set_color(to_skia_color(Color::WHITE));
    canvas.draw_image_rect_with_sampling_options(image, None, to_skia_rect(dst), SamplingOptions::default(), &paint);
}
