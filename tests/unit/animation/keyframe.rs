use super::*;
use crate::foundation::core::ActorId;
use crate::test_support::{bump, rect_actor, world_with_scene};

fn setup() -> (World, ActorId) {
    let (mut world, scene) = world_with_scene();
    let id = world
        .add_actor(scene, rect_actor("box", 0.0, 0.0, 10.0, 10.0))
        .unwrap();
    (world, id)
}

fn x_of(world: &World, id: ActorId) -> f64 {
    world.actor(id).unwrap().x
}

#[test]
fn linear_tween_reaches_midpoint_then_end() {
    let (mut world, id) = setup();
    let mut anim = KeyframeAnimation::new(id, Property::X, vec![0.0, 100.0], vec![0.0, 2.0]).unwrap();

    assert_eq!(anim.update(1.0, &mut world), AnimStatus::Active);
    assert!((x_of(&world, id) - 50.0).abs() < 1e-9);

    assert_eq!(anim.update(1.0, &mut world), AnimStatus::Inactive);
    assert_eq!(x_of(&world, id), 100.0);
    assert_eq!(anim.state(), PlayState::Paused);
    assert_eq!(anim.repeats_left(), 0);
}

#[test]
fn destroy_flag_reports_finished() {
    let (mut world, id) = setup();
    let mut anim = KeyframeAnimation::new(id, Property::X, vec![0.0, 100.0], vec![0.0, 2.0])
        .unwrap()
        .with_destroy(true);
    anim.update(1.0, &mut world);
    assert_eq!(anim.update(1.5, &mut world), AnimStatus::Finished);
    assert_eq!(x_of(&world, id), 100.0);
}

#[test]
fn segment_easing_is_applied() {
    let (mut world, id) = setup();
    let mut anim = KeyframeAnimation::new(id, Property::X, vec![0.0, 100.0], vec![0.0, 2.0])
        .unwrap()
        .with_easing(vec![Ease::InQuad])
        .unwrap();
    anim.update(1.0, &mut world);
    assert!((x_of(&world, id) - 25.0).abs() < 1e-9);
}

#[test]
fn step_mode_holds_previous_keyframe() {
    let (mut world, id) = setup();
    let mut anim = KeyframeAnimation::new(
        id,
        Property::X,
        vec![0.0, 10.0, 20.0],
        vec![0.0, 1.0, 2.0],
    )
    .unwrap()
    .with_tween(false);
    anim.update(1.5, &mut world);
    assert_eq!(x_of(&world, id), 10.0);
}

#[test]
fn repeat_adds_passes_after_the_first() {
    let (mut world, id) = setup();
    let mut anim = KeyframeAnimation::new(id, Property::X, vec![0.0, 10.0], vec![0.0, 1.0])
        .unwrap()
        .with_repeat(2)
        .on_repeat(|w| {
            bump(w, "repeats");
            Ok(())
        });

    for _ in 0..8 {
        assert_eq!(anim.update(0.25, &mut world), AnimStatus::Active);
    }
    assert_eq!(world.vars.get("repeats"), Some(&2.0));
    assert_eq!(anim.repeats_left(), 0);

    assert_eq!(anim.update(0.25, &mut world), AnimStatus::Active);
    assert!(anim.is_playing());
    assert!((x_of(&world, id) - 2.5).abs() < 1e-9);

    assert_eq!(anim.update(0.75, &mut world), AnimStatus::Inactive);
    assert_eq!(anim.state(), PlayState::Paused);
    assert_eq!(x_of(&world, id), 10.0);
    assert_eq!(world.vars.get("repeats"), Some(&2.0));
}

#[test]
fn single_repeat_wraps_back_to_first_frame() {
    let (mut world, id) = setup();
    let mut anim = KeyframeAnimation::new(id, Property::X, vec![0.0, 100.0], vec![0.0, 1.0])
        .unwrap()
        .with_repeat(1);
    assert_eq!(anim.update(1.1, &mut world), AnimStatus::Active);
    assert!(anim.is_playing());
    assert_eq!(x_of(&world, id), 0.0);
    assert!((anim.time() - 0.1).abs() < 1e-9);
    assert!(!anim.repeats_forever());
}

#[test]
fn zero_repeat_loops_forever() {
    let (mut world, id) = setup();
    let mut anim = KeyframeAnimation::new(id, Property::X, vec![0.0, 10.0], vec![0.0, 1.0])
        .unwrap()
        .with_repeat(0);
    assert!(anim.repeats_forever());
    for _ in 0..50 {
        assert_eq!(anim.update(0.3, &mut world), AnimStatus::Active);
    }
    assert!(anim.is_playing());
}

#[test]
fn delay_holds_first_frame() {
    let (mut world, id) = setup();
    world.set_position(id, 42.0, 0.0);
    let mut anim = KeyframeAnimation::new(id, Property::X, vec![5.0, 10.0], vec![0.0, 1.0])
        .unwrap()
        .with_delay(1.0);
    assert_eq!(anim.update(0.5, &mut world), AnimStatus::Active);
    assert_eq!(x_of(&world, id), 5.0);
    anim.update(1.0, &mut world);
    assert!((x_of(&world, id) - 7.5).abs() < 1e-9);
}

#[test]
fn keyframe_actions_fire_once_per_pass() {
    let (mut world, id) = setup();
    let mut anim = KeyframeAnimation::new(
        id,
        Property::X,
        vec![0.0, 10.0, 20.0],
        vec![0.0, 1.0, 2.0],
    )
    .unwrap();
    anim.set_action(1, |w| {
        bump(w, "middle");
        Ok(())
    })
    .unwrap();
    anim.set_action(2, |w| {
        bump(w, "last");
        Ok(())
    })
    .unwrap();

    anim.update(0.5, &mut world);
    assert_eq!(world.vars.get("middle"), None);
    anim.update(0.7, &mut world);
    anim.update(0.1, &mut world);
    assert_eq!(world.vars.get("middle"), Some(&1.0));
    anim.update(1.0, &mut world);
    assert_eq!(world.vars.get("last"), Some(&1.0));

    assert!(anim.set_action(7, |_| Ok(())).is_err());
}

#[test]
fn set_time_seeks_without_actions() {
    let (mut world, id) = setup();
    let mut anim = KeyframeAnimation::new(id, Property::X, vec![0.0, 100.0], vec![0.0, 2.0]).unwrap();
    anim.set_action(0, |w| {
        bump(w, "start");
        Ok(())
    })
    .unwrap();
    anim.set_time(0.5, &mut world);
    assert!((x_of(&world, id) - 25.0).abs() < 1e-9);
    assert_eq!(world.vars.get("start"), None);
}

#[test]
fn relative_mode_offsets_by_initial_value() {
    let (mut world, id) = setup();
    world.set_position(id, 5.0, 0.0);
    let mut anim = KeyframeAnimation::new(id, Property::X, vec![0.0, 10.0], vec![0.0, 1.0]).unwrap();
    anim.set_relative(true, &world);
    assert!(anim.is_relative());
    anim.update(1.0, &mut world);
    assert_eq!(x_of(&world, id), 15.0);
}

#[test]
fn paused_animation_does_not_write() {
    let (mut world, id) = setup();
    let mut anim = KeyframeAnimation::new(id, Property::X, vec![0.0, 100.0], vec![0.0, 2.0]).unwrap();
    anim.pause();
    assert_eq!(anim.update(1.0, &mut world), AnimStatus::Inactive);
    assert_eq!(x_of(&world, id), 0.0);
    anim.play();
    anim.update(1.0, &mut world);
    assert!((x_of(&world, id) - 50.0).abs() < 1e-9);
}

#[test]
fn time_scale_speeds_up_playback() {
    let (mut world, id) = setup();
    let mut anim = KeyframeAnimation::new(id, Property::X, vec![0.0, 100.0], vec![0.0, 2.0])
        .unwrap()
        .with_time_scale(2.0);
    anim.update(0.5, &mut world);
    assert!((x_of(&world, id) - 50.0).abs() < 1e-9);
}

#[test]
fn deactivate_on_end_hides_target() {
    let (mut world, id) = setup();
    let mut anim = KeyframeAnimation::new(id, Property::Opacity, vec![1.0, 0.0], vec![0.0, 1.0])
        .unwrap()
        .with_deactivate(true);
    anim.update(2.0, &mut world);
    let actor = world.actor(id).unwrap();
    assert!(!actor.visible);
    assert!(!actor.active);
}

#[test]
fn failing_end_callback_is_contained() {
    let (mut world, id) = setup();
    let mut anim = KeyframeAnimation::new(id, Property::X, vec![0.0, 1.0], vec![0.0, 1.0])
        .unwrap()
        .on_end(|_| Err(SceneryError::callback("boom")));
    assert_eq!(anim.update(2.0, &mut world), AnimStatus::Inactive);
    assert_eq!(x_of(&world, id), 1.0);
}

#[test]
fn restart_rewinds_and_replays() {
    let (mut world, id) = setup();
    let mut anim = KeyframeAnimation::new(id, Property::X, vec![0.0, 100.0], vec![0.0, 2.0]).unwrap();
    anim.update(3.0, &mut world);
    assert!(!anim.is_playing());
    anim.restart();
    assert!(anim.is_playing());
    assert_eq!(anim.repeats_left(), 0);
    anim.update(1.0, &mut world);
    assert!((x_of(&world, id) - 50.0).abs() < 1e-9);
}

#[test]
fn construction_validates_keyframes() {
    let (_, id) = setup();
    assert!(KeyframeAnimation::new(id, Property::X, vec![], vec![]).is_err());
    assert!(KeyframeAnimation::new(id, Property::X, vec![0.0, 1.0], vec![0.0]).is_err());
    assert!(KeyframeAnimation::new(id, Property::X, vec![0.0, 1.0], vec![1.0, 0.5]).is_err());
    let anim = KeyframeAnimation::new(id, Property::X, vec![0.0, 1.0], vec![0.0, 1.0]).unwrap();
    assert!(anim.with_easing(vec![Ease::Linear, Ease::InQuad]).is_err());
}
