use super::*;
use crate::test_support::{rect_actor, world_with_scene};
use crate::{Property, Scene, Target};

fn scene_world(w: f64, h: f64) -> (World, crate::SceneId) {
    let mut world = World::default();
    let scene = world.add_scene(Scene::new("s", w, h));
    (world, scene)
}

#[test]
fn dock_left_with_margin() {
    let (mut world, scene) = scene_world(500.0, 500.0);
    let id = world
        .add_actor(
            scene,
            rect_actor("a", 0.0, 0.0, 100.0, 50.0).with_dock(DockX::Left, DockY::None, [10.0, 0.0, 0.0, 0.0]),
        )
        .unwrap();
    world.dock(id);
    let a = world.actor(id).unwrap();
    assert_eq!(a.x, -190.0);
    assert_eq!(a.y, 0.0);
}

#[test]
fn dock_other_edges() {
    let (mut world, scene) = scene_world(500.0, 300.0);
    let m = Margins::new(10.0, 20.0, 5.0, 15.0);
    let right = world
        .add_actor(scene, rect_actor("r", 0.0, 0.0, 100.0, 50.0).with_dock(DockX::Right, DockY::Bottom, m))
        .unwrap();
    let center = world
        .add_actor(scene, rect_actor("c", 7.0, 7.0, 100.0, 50.0).with_dock(DockX::Center, DockY::Top, m))
        .unwrap();
    world.dock(right);
    world.dock(center);

    let r = world.actor(right).unwrap();
    assert_eq!((r.x, r.y), (180.0, 110.0));
    let c = world.actor(center).unwrap();
    assert_eq!((c.x, c.y), (-10.0, -120.0));
}

#[test]
fn docking_uses_scaled_size_and_leaves_offsets() {
    let (mut world, scene) = scene_world(500.0, 500.0);
    let mut actor = rect_actor("a", 0.0, 0.0, 50.0, 50.0)
        .with_scale(2.0, 1.0)
        .with_dock(DockX::Left, DockY::None, [0.0; 4]);
    actor.x2 = 3.0;
    let id = world.add_actor(scene, actor).unwrap();
    world.dock(id);
    let a = world.actor(id).unwrap();
    assert_eq!(a.x, -200.0);
    assert_eq!(a.x2, 3.0);
}

#[test]
fn children_dock_to_their_parent() {
    let (mut world, scene) = scene_world(500.0, 500.0);
    let parent = world.add_actor(scene, rect_actor("p", 0.0, 0.0, 200.0, 100.0)).unwrap();
    let child = world
        .add_child(
            parent,
            rect_actor("c", 0.0, 0.0, 20.0, 20.0).with_dock(DockX::Right, DockY::Top, [0.0; 4]),
        )
        .unwrap();
    world.dock(child);
    let c = world.actor(child).unwrap();
    assert_eq!((c.x, c.y), (90.0, -40.0));
}

#[test]
fn screen_docking_follows_the_camera() {
    let (mut world, scene) = world_with_scene();
    world.set_property(Target::Scene(scene), &Property::CameraX, 100.0);
    let mut actor = rect_actor("hud", 0.0, 0.0, 100.0, 100.0).with_dock(DockX::Left, DockY::Top, [0.0; 4]);
    actor.dock_screen = true;
    let id = world.add_actor(scene, actor).unwrap();
    world.dock(id);
    let a = world.actor(id).unwrap();
    assert_eq!((a.x, a.y), (-350.0, -450.0));
}

fn stacked_canvas(world: &mut World, scene: crate::SceneId, stacking: Stacking) -> ActorId {
    world
        .add_actor(
            scene,
            rect_actor("list", 0.0, 0.0, 300.0, 300.0).with_virtual_canvas(VirtualCanvas::stacked(stacking)),
        )
        .unwrap()
}

#[test]
fn horizontal_stacking_and_auto_range() {
    let (mut world, scene) = world_with_scene();
    let list = stacked_canvas(&mut world, scene, Stacking::Horizontal);
    let a = world.add_child(list, rect_actor("a", 0.0, 0.0, 200.0, 20.0)).unwrap();
    let b = world
        .add_child(
            list,
            rect_actor("b", 0.0, 0.0, 200.0, 20.0).with_dock(DockX::None, DockY::Top, [0.0; 4]),
        )
        .unwrap();
    world.update_virtual(list, 0.0);

    assert_eq!(world.actor(a).unwrap().x, -50.0);
    let b = world.actor(b).unwrap();
    assert_eq!((b.x, b.y), (150.0, -140.0));
    let range = world.actor(list).unwrap().virtual_canvas.as_ref().unwrap().range;
    assert_eq!((range.min_x, range.max_x), (-100.0, 0.0));
    assert_eq!((range.min_y, range.max_y), (0.0, 0.0));
}

#[test]
fn vertical_stacking_honours_margins() {
    let (mut world, scene) = world_with_scene();
    let list = stacked_canvas(&mut world, scene, Stacking::Vertical);
    let a = world
        .add_child(
            list,
            rect_actor("a", 0.0, 0.0, 20.0, 40.0).with_dock(DockX::Right, DockY::None, [0.0, 5.0, 10.0, 10.0]),
        )
        .unwrap();
    let b = world.add_child(list, rect_actor("b", 0.0, 0.0, 20.0, 40.0)).unwrap();
    world.update_virtual(list, 0.0);

    let a = world.actor(a).unwrap();
    assert_eq!((a.x, a.y), (135.0, -120.0));
    assert_eq!(world.actor(b).unwrap().y, -70.0);
}

#[test]
fn scroll_by_clamps_to_range() {
    let (mut world, scene) = world_with_scene();
    let list = stacked_canvas(&mut world, scene, Stacking::Horizontal);
    world.add_child(list, rect_actor("a", 0.0, 0.0, 600.0, 20.0)).unwrap();
    world.update_virtual(list, 0.0);

    if let Some(vc) = world.actor_mut(list).and_then(|a| a.virtual_canvas.as_mut()) {
        vc.scroll_vx = -50.0;
    }
    world.scroll_by(list, -1000.0, 0.0);
    let vc = world.actor(list).unwrap().virtual_canvas.as_ref().unwrap();
    assert_eq!(vc.scroll_pos_x, -300.0);
    assert_eq!(vc.scroll_vx, 0.0);
}

#[test]
fn momentum_decays_unless_dragging() {
    let (mut world, scene) = world_with_scene();
    let canvas = VirtualCanvas {
        scroll_vx: 100.0,
        damping: 0.5,
        range: ScrollRange {
            min_x: -1000.0,
            max_x: 1000.0,
            ..ScrollRange::default()
        },
        ..VirtualCanvas::default()
    };
    let id = world
        .add_actor(scene, rect_actor("c", 0.0, 0.0, 100.0, 100.0).with_virtual_canvas(canvas))
        .unwrap();

    world.update_virtual(id, 0.1);
    world.update_virtual(id, 0.1);
    let vc = world.actor(id).unwrap().virtual_canvas.as_ref().unwrap();
    assert!((vc.scroll_pos_x - 15.0).abs() < 1e-9);
    assert_eq!(vc.scroll_vx, 25.0);

    if let Some(vc) = world.actor_mut(id).and_then(|a| a.virtual_canvas.as_mut()) {
        vc.dragging = true;
    }
    world.update_virtual(id, 0.1);
    let vc = world.actor(id).unwrap().virtual_canvas.as_ref().unwrap();
    assert!((vc.scroll_pos_x - 15.0).abs() < 1e-9);
    assert!(vc.is_dragging());
}

#[test]
fn offscreen_children_are_culled() {
    let (mut world, scene) = world_with_scene();
    let id = world
        .add_actor(
            scene,
            rect_actor("c", 0.0, 0.0, 100.0, 100.0).with_virtual_canvas(VirtualCanvas::default()),
        )
        .unwrap();
    let near = world.add_child(id, rect_actor("near", 55.0, 0.0, 20.0, 20.0)).unwrap();
    let far = world.add_child(id, rect_actor("far", 300.0, 0.0, 20.0, 20.0)).unwrap();
    world.update_virtual(id, 0.0);
    assert!(world.actor(near).unwrap().in_view());
    assert!(!world.actor(far).unwrap().in_view());

    if let Some(vc) = world.actor_mut(id).and_then(|a| a.virtual_canvas.as_mut()) {
        vc.cull_offscreen = false;
    }
    world.update_virtual(id, 0.0);
    assert!(world.actor(far).unwrap().in_view());
}
