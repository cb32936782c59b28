use super::*;

#[test]
fn rect_contains_centred_bounds() {
    let kind = ActorKind::rect();
    assert!(kind.contains(20.0, 10.0, Point::new(9.9, -4.9)));
    assert!(!kind.contains(20.0, 10.0, Point::new(10.1, 0.0)));
    assert!(!kind.contains(20.0, 10.0, Point::new(0.0, 5.1)));
}

#[test]
fn circle_uses_radius_or_half_width() {
    let explicit = ActorKind::circle(5.0);
    assert!(explicit.contains(100.0, 100.0, Point::new(3.0, 4.0)));
    assert!(!explicit.contains(100.0, 100.0, Point::new(4.0, 4.0)));

    let implicit = ActorKind::circle(0.0);
    assert!(implicit.contains(20.0, 20.0, Point::new(0.0, 9.5)));
    assert!(!implicit.contains(20.0, 20.0, Point::new(8.0, 8.0)));
}

#[test]
fn polygon_uses_its_outline() {
    let kind = ActorKind::polygon(vec![
        Point::new(-10.0, -10.0),
        Point::new(10.0, -10.0),
        Point::new(-10.0, 10.0),
    ]);
    assert!(kind.contains(20.0, 20.0, Point::new(-5.0, -5.0)));
    assert!(!kind.contains(20.0, 20.0, Point::new(5.0, 5.0)));
}

#[test]
fn degenerate_polygon_falls_back_to_bounds() {
    let kind = ActorKind::polygon(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
    assert!(kind.contains(4.0, 4.0, Point::new(1.5, -1.5)));
}

#[test]
fn kind_names_are_stable() {
    assert_eq!(ActorKind::default().name(), "sprite");
    assert_eq!(ActorKind::label("hi").name(), "label");
    assert_eq!(ActorKind::circle(1.0).name(), "arc");
}

#[test]
fn local_bounds_are_centred() {
    assert_eq!(local_bounds(10.0, 4.0), Rect::new(-5.0, -2.0, 5.0, 2.0));
    assert_eq!(polygon_path(&[]).elements().len(), 0);
}
