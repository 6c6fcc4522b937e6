use reel_ui::input::{Interaction, UiContext};
use reel_ui::widgets::{Button, Panel, TextBox};
use reel_ui::{Alignment, Color, Rect, UiRenderer};

#[derive(Default)]
struct Recorder {
    ctx: UiContext,
    ops: Vec<String>,
}

impl UiRenderer for Recorder {
    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(format!("rect {} {} {:?}", rect.x, rect.y, color));
    }

    fn draw_border(&mut self, _rect: Rect, _color: Color, width: f32) {
        self.ops.push(format!("border {width}"));
    }

    fn draw_text(&mut self, text: &str, rect: Rect, _color: Color, size: f32, align: Alignment) {
        self.ops.push(format!("text {text} {size} {align:?} at {}", rect.y));
    }

    fn interact(&self, rect: Rect) -> Interaction {
        self.ctx.interact(rect)
    }
}

const BUTTON: Rect = Rect { x: 800.0, y: 100.0, w: 100.0, h: 25.0 };

#[test]
fn click_counts_for_one_frame_inside_only() {
    let mut ui = Recorder::default();

    ui.ctx.move_to(850.0, 110.0);
    ui.ctx.press();
    assert!(Button::new("Yes").show(&mut ui, BUTTON));
    assert_eq!(ui.ops.last().map(String::as_str), Some("text Yes 14 Center at 100"));

    ui.ctx.end_frame();
    assert!(!Button::new("Yes").show(&mut ui, BUTTON));
    assert_eq!(ui.ctx.interact(BUTTON), Interaction::Held);

    ui.ctx.release();
    ui.ctx.move_to(10.0, 10.0);
    ui.ctx.press();
    assert!(!Button::new("Yes").show(&mut ui, BUTTON));
}

#[test]
fn quick_click_between_frames_is_kept() {
    let mut ctx = UiContext::new();
    ctx.move_to(810.0, 110.0);
    ctx.press();
    ctx.release();
    assert_eq!(ctx.interact(BUTTON), Interaction::Clicked);
    ctx.end_frame();
    assert_eq!(ctx.interact(BUTTON), Interaction::Hovered);
}

#[test]
fn panel_returns_inner_area() {
    let mut ui = Recorder::default();
    let inner = Panel::new()
        .stroke(Color::BLACK, 6.0)
        .show(&mut ui, Rect::new(0.0, 400.0, 1000.0, 100.0));
    assert_eq!(inner, Rect::new(6.0, 406.0, 988.0, 88.0));
    assert_eq!(ui.ops, vec![format!("rect 0 400 {:?}", Color::WHITE), "border 6".to_string()]);
}

#[test]
fn text_box_stacks_lines_inside_the_stroke() {
    let mut ui = Recorder::default();
    let lines: Vec<String> = ["one ", "two "].iter().map(|s| s.to_string()).collect();
    TextBox::new(&lines).show(&mut ui, Rect::new(0.0, 400.0, 1000.0, 100.0));
    assert_eq!(&ui.ops[2..], &["text one  18 Start at 406", "text two  18 Start at 424"]);
}

#[test]
fn text_box_fits_five_default_lines() {
    let mut ui = Recorder::default();
    let lines: Vec<String> = (0..5).map(|i| format!("line {i}")).collect();
    TextBox::new(&lines).show(&mut ui, Rect::new(0.0, 400.0, 1000.0, 100.0));
    assert_eq!(ui.ops.len(), 2 + 5);
}

#[test]
fn text_box_drops_rows_that_do_not_fit() {
    let mut ui = Recorder::default();
    let lines: Vec<String> = (0..5).map(|i| format!("line {i}")).collect();
    TextBox::new(&lines).font_size(30.0).show(&mut ui, Rect::new(0.0, 400.0, 1000.0, 100.0));
    // Rows start at 406, 436 and 466; the fourth would start past 494.
    assert_eq!(ui.ops.len(), 2 + 3);
}
