use super::*;
use crate::foundation::core::ActorId;
use crate::test_support::{rect_actor, world_with_scene};

fn setup() -> (World, ActorId) {
    let (mut world, scene) = world_with_scene();
    let id = world
        .add_actor(scene, rect_actor("box", 0.0, 0.0, 10.0, 10.0))
        .unwrap();
    (world, id)
}

fn slide(id: ActorId, name: &str) -> Timeline {
    let mut t = Timeline::new(name);
    t.add_keyframes(id, Property::X, vec![0.0, 100.0], vec![0.0, 1.0], None)
        .unwrap();
    t
}

#[test]
fn timeline_reports_playing_then_idle() {
    let (mut world, id) = setup();
    let mut t = slide(id, "slide");
    assert_eq!(t.update(0.5, &mut world), TimelineStatus::Playing);
    assert!(t.is_playing());
    assert_eq!(t.update(1.0, &mut world), TimelineStatus::Idle);
    assert!(!t.is_playing());
    assert_eq!(t.len(), 1);
}

#[test]
fn finished_animations_leave_the_timeline() {
    let (mut world, id) = setup();
    let mut t = Timeline::new("fade");
    t.add(
        KeyframeAnimation::new(id, Property::Opacity, vec![1.0, 0.0], vec![0.0, 1.0])
            .unwrap()
            .with_destroy(true),
    );
    assert_eq!(t.update(2.0, &mut world), TimelineStatus::Idle);
    assert!(t.is_empty());
    assert_eq!(t.update(0.1, &mut world), TimelineStatus::Empty);
}

#[test]
fn find_and_remove_by_target() {
    let (_, id) = setup();
    let mut t = slide(id, "slide");
    t.add_keyframes(id, Property::Y, vec![0.0, 1.0], vec![0.0, 1.0], None)
        .unwrap();
    assert!(t.find(Target::Actor(id), &Property::Y).is_some());
    assert!(t.find(Target::Actor(id), &Property::Rotation).is_none());
    t.remove_target(Target::Actor(id));
    assert!(t.is_empty());
}

#[test]
fn group_controls_reach_every_animation() {
    let (mut world, id) = setup();
    let mut t = slide(id, "slide");
    t.pause();
    assert_eq!(t.update(0.5, &mut world), TimelineStatus::Idle);
    t.play();
    t.set_repeats(0);
    t.update(5.0, &mut world);
    assert!(t.anims()[0].is_playing());
    t.set_time_scale(0.5);
    assert_eq!(t.anims()[0].time_scale, 0.5);
}

#[test]
fn manager_drops_empty_timelines() {
    let (mut world, id) = setup();
    let mut m = TimelineManager::new();
    let kept = m.add(slide(id, "kept"));
    let empty = m.add(Timeline::new("empty"));
    assert_ne!(kept, empty);

    m.update(0.1, &mut world);
    assert_eq!(m.len(), 1);
    assert!(m.get(kept).is_some());
    assert!(m.get(empty).is_none());
}

#[test]
fn manager_named_ops() {
    let (mut world, id) = setup();
    let mut m = TimelineManager::new();
    m.add(slide(id, "a"));
    m.add(slide(id, "b"));

    m.pause_named("a");
    m.update(0.5, &mut world);
    assert_eq!(m.find("a").map(Timeline::is_playing), Some(false));
    assert_eq!(m.find("b").map(Timeline::is_playing), Some(true));

    m.remove_named("b");
    assert!(m.find("b").is_none());
    assert_eq!(m.len(), 1);

    m.clear();
    assert!(m.is_empty());
}

#[test]
fn detached_placeholder_defers_unknown_names() {
    let (_, id) = setup();
    let mut live = TimelineManager::new();
    live.add(slide(id, "intro"));
    live.find_mut("intro").unwrap().pause();

    let mut placeholder = TimelineManager::detached();
    placeholder.play_named("intro");
    placeholder.add(slide(id, "added"));

    live.absorb(placeholder);
    assert_eq!(live.len(), 2);
    assert!(live.find("intro").unwrap().anims()[0].is_playing());
    assert!(live.find("added").is_some());
}

#[test]
fn detached_clear_and_remove_by_id_apply_on_absorb() {
    let (_, id) = setup();
    let mut live = TimelineManager::new();
    let first = live.add(slide(id, "first"));
    live.add(slide(id, "second"));

    let mut placeholder = TimelineManager::detached();
    assert!(placeholder.remove(first).is_none());
    live.absorb(placeholder);
    assert!(live.get(first).is_none());
    assert_eq!(live.len(), 1);

    let mut placeholder = TimelineManager::detached();
    placeholder.clear();
    placeholder.add(slide(id, "fresh"));
    live.absorb(placeholder);
    assert_eq!(live.len(), 1);
    assert!(live.find("fresh").is_some());
}
