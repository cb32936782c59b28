use super::*;
use crate::foundation::core::Color;

#[test]
fn records_calls_in_order_and_counts_draws() {
    let mut s = RecordingSurface::new();
    s.save();
    s.set_transform(Affine::translate((10.0, 5.0)));
    s.draw_rect(Rect::new(-5.0, -5.0, 5.0, 5.0), &Paint::fill(Color::BLACK));
    s.restore();

    assert_eq!(s.commands().len(), 4);
    assert_eq!(s.commands()[0], DrawCommand::Save);
    assert_eq!(s.draw_count(), 1);
    assert_eq!(s.save_depth(), 0);
    assert_eq!(s.max_save_depth(), 1);
}

#[test]
fn caches_get_distinct_ids() {
    let mut s = RecordingSurface::new();
    let a = s.create_cache(Size::new(10.0, 10.0));
    let b = s.create_cache(Size::new(10.0, 10.0));
    assert_ne!(a, b);
}

#[test]
fn commands_serialize_with_op_tag() {
    let mut s = RecordingSurface::new();
    s.set_global_alpha(0.5);
    let json = serde_json::to_string(s.commands()).unwrap();
    assert!(json.contains("\"op\":\"set_global_alpha\""), "{json}");
    let back: Vec<DrawCommand> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, s.commands());
}
