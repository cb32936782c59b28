use super::*;

#[test]
fn new_actor_defaults() {
    let a = Actor::new(ActorKind::rect());
    assert_eq!((a.scale_x, a.scale_y), (1.0, 1.0));
    assert_eq!(a.opacity, 1.0);
    assert!(a.visible && a.active && a.hit);
    assert!(!a.touchable);
    assert!(a.use_parent_opacity);
    assert_eq!(a.vx_damping, 1.0);
    assert!(a.is_transform_dirty());
    assert!(a.in_view());
    assert!(a.parent().is_none() && a.scene().is_none());
    assert!(a.body().is_none());
}

#[test]
fn builders_set_fields() {
    let a = Actor::new(ActorKind::rect())
        .with_name("door")
        .with_tag("props")
        .with_pos(3.0, 4.0)
        .with_size(10.0, 20.0)
        .with_scale(2.0, 0.5)
        .with_rotation(1.0)
        .with_origin(0.5, -0.5)
        .with_layer(-2)
        .with_opacity(0.25)
        .with_velocity(7.0, -7.0)
        .with_touchable(true)
        .with_dock(DockX::Right, DockY::Top, [1.0, 2.0, 3.0, 4.0])
        .with_cache();
    assert_eq!(a.name, "door");
    assert_eq!(a.tag, "props");
    assert_eq!((a.x, a.y, a.w, a.h), (3.0, 4.0, 10.0, 20.0));
    assert_eq!((a.scale_x, a.scale_y), (2.0, 0.5));
    assert_eq!((a.ox, a.oy), (0.5, -0.5));
    assert_eq!(a.layer, -2);
    assert_eq!((a.vx, a.vy), (7.0, -7.0));
    assert!(a.touchable && a.cache);
    assert_eq!(a.dock_x, DockX::Right);
    assert_eq!(a.margin, Margins::new(1.0, 2.0, 3.0, 4.0));
}

#[test]
fn depth_zero_and_one_mean_no_projection() {
    assert!(!Actor::default().depth_active());
    assert!(!Actor::default().with_depth(1.0).depth_active());
    assert!(Actor::default().with_depth(2.0).depth_active());
}

#[test]
fn on_tick_builder_installs_handler() {
    let a = Actor::default().on_tick(|_, _, _| Ok(()));
    assert!(a.handlers.on_tick.is_some());
    assert!(a.handlers.on_hover.is_none());
}

#[test]
fn attachments_are_optional() {
    let a = Actor::default()
        .with_sprite(SpriteState::image("hero.png"))
        .with_virtual_canvas(VirtualCanvas::default());
    assert_eq!(a.sprite.as_ref().and_then(|s| s.image.as_deref()), Some("hero.png"));
    assert!(a.virtual_canvas.is_some());
    assert!(a.joints().is_empty());
}
