use std::time::Duration;

use super::*;
use crate::physics::BodyDef;
use crate::render::recording::{DrawCommand, RecordingSurface};
use crate::tasks::task::Task;
use crate::test_support::{FakePhysics, rect_actor};
use crate::{ScaleMethod, Vec2};

fn square_app() -> App {
    App::new(AppConfig {
        design_width: 1000.0,
        design_height: 1000.0,
        canvas_width: 1000.0,
        canvas_height: 1000.0,
        scale_method: ScaleMethod::FitBest,
        ..AppConfig::default()
    })
    .unwrap()
}

#[test]
fn new_validates_and_applies_config() {
    assert!(
        App::new(AppConfig {
            max_dt: 0.0,
            ..AppConfig::default()
        })
        .is_err()
    );
    let app = App::new(AppConfig {
        canvas_width: 2048.0,
        debug: true,
        ..AppConfig::default()
    })
    .unwrap();
    assert_eq!(app.world.display.canvas_width, 2048.0);
    assert!(app.world.debug);
    assert_eq!(app.config().canvas_width, 2048.0);
    assert_eq!(app.clock().target_frame_rate, 60.0);
}

#[test]
fn app_managers_run_before_scenes() {
    let mut app = square_app();
    let scene = app.world.create_scene("main");
    let id = app
        .world
        .add_actor(scene, rect_actor("ball", 0.0, 0.0, 10.0, 10.0).with_velocity(100.0, 0.0))
        .unwrap();
    app.world.managers.tasks.add(Task::new("peek", move |ctx| {
        let x = ctx.world.actor(id).map_or(-1.0, |a| a.x);
        ctx.world.vars.insert("seen_x".into(), x);
        Ok(())
    }));

    app.update(0.1).unwrap();
    assert_eq!(app.world.vars.get("seen_x"), Some(&0.0));
    assert!((app.world.actor(id).unwrap().x - 10.0).abs() < 1e-9);
    assert!((app.world.dt() - 0.1).abs() < 1e-12);
}

#[test]
fn scenes_removed_during_update_are_gone_after_it() {
    let mut app = square_app();
    let scene = app.world.create_scene("intro");
    app.world.managers.tasks.add(Task::new("close", move |ctx| {
        ctx.world.remove_scene(scene);
        Ok(())
    }));
    app.update(0.1).unwrap();
    assert!(app.world.scene(scene).is_none());
    assert!(app.world.focus_scene.is_none());
}

#[test]
fn scene_order_is_refreshed_each_update() {
    let mut app = square_app();
    let a = app.world.create_scene("a");
    let b = app.world.create_scene("b");
    app.world.set_scene_layer(a, 3);
    app.update(0.0).unwrap();
    assert_eq!(app.world.scene_ids(), &[b, a]);
}

#[test]
fn shared_physics_moves_bodies() {
    let mut app = square_app();
    let scene = app.world.create_scene("main");
    app.world
        .set_shared_physics(Some(Box::new(FakePhysics::default())));
    let id = app
        .world
        .add_actor(scene, rect_actor("crate", 0.0, 0.0, 10.0, 10.0))
        .unwrap();
    let body = app.world.attach_body(id, &BodyDef::default(), &[]).unwrap();
    app.world
        .physics_for(None)
        .unwrap()
        .set_linear_velocity(body, Vec2::new(1.0, 0.0));

    app.update(0.5).unwrap();
    assert!((app.world.actor(id).unwrap().x - 10.0).abs() < 1e-9);
}

#[test]
fn adaptive_physics_keeps_pace_with_wall_clock() {
    let mut app = App::new(AppConfig {
        adaptive_physics: true,
        ..AppConfig::default()
    })
    .unwrap();
    let scene = app.world.create_scene("main");
    app.world
        .set_shared_physics(Some(Box::new(FakePhysics::default())));
    let id = app
        .world
        .add_actor(scene, rect_actor("crate", 0.0, 0.0, 10.0, 10.0))
        .unwrap();
    let body = app.world.attach_body(id, &BodyDef::default(), &[]).unwrap();

    let frame = Duration::from_secs_f64(1.0 / 30.0);
    for _ in 0..30 {
        app.clock.advance(Some(frame));
    }
    assert_eq!(app.clock.physics_steps(true), 2);

    app.world
        .physics_for(None)
        .unwrap()
        .set_linear_velocity(body, Vec2::new(1.0, 0.0));
    let world_scale = app.world.physics_settings.world_scale;
    let mut elapsed = 0.0;
    for _ in 0..30 {
        let dt = app.clock.advance(Some(frame));
        assert_eq!(dt, 1.0 / 60.0);
        app.update(dt).unwrap();
        elapsed += frame.as_secs_f64();
    }
    let simulated = app.world.actor(id).unwrap().x / world_scale;
    assert!((simulated - elapsed).abs() < 1e-6);
}

#[test]
fn physics_failures_reach_the_caller() {
    let mut app = square_app();
    app.world.create_scene("main");
    let mut physics = FakePhysics::default();
    physics.fail_step = true;
    app.world.set_shared_physics(Some(Box::new(physics)));
    assert!(app.update(0.1).is_err());
}

#[test]
fn frame_updates_then_draws() {
    let mut app = square_app();
    let scene = app.world.create_scene("main");
    app.world
        .add_actor(scene, rect_actor("box", 0.0, 0.0, 10.0, 10.0))
        .unwrap();
    let mut surface = RecordingSurface::new();
    let dt = app.frame(&mut surface).unwrap();
    assert_eq!(dt, 1.0 / 60.0);
    assert_eq!(
        surface.count(|c| matches!(c, DrawCommand::DrawRect { .. })),
        1
    );
    assert_eq!(app.clock().frames(), 1);
}
