use reel_ui::Rect;

#[test]
fn text_box_strip() {
    let canvas = Rect::new(0.0, 0.0, 1000.0, 500.0);
    let (text_box, stage) = canvas.split_bottom(100.0);
    assert_eq!(text_box, Rect::new(0.0, 400.0, 1000.0, 100.0));
    assert_eq!(stage, Rect::new(0.0, 0.0, 1000.0, 400.0));

    let (all, none) = stage.split_bottom(1000.0);
    assert_eq!(all, stage);
    assert_eq!(none.h, 0.0);
}

#[test]
fn figures_stand_on_their_anchor() {
    let r = Rect::standing_on(100.0, 300.0, 40.0, 80.0);
    assert_eq!(r, Rect::new(80.0, 220.0, 40.0, 80.0));
    assert!(r.contains(80.0, 220.0));
    assert!(!r.contains(120.0, 250.0));
    assert!(!r.contains(100.0, 300.0));
}

#[test]
fn shrink_and_rows() {
    let r = Rect::new(10.0, 10.0, 100.0, 50.0);
    assert_eq!(r.shrink(5.0), Rect::new(15.0, 15.0, 90.0, 40.0));
    assert_eq!(r.shrink(30.0), Rect::new(10.0, 10.0, 0.0, 0.0));
    assert_eq!(r.row(0, 18.0), Rect::new(10.0, 10.0, 100.0, 18.0));
    assert_eq!(r.row(2, 18.0), Rect::new(10.0, 46.0, 100.0, 18.0));
}
