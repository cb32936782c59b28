use super::*;
use crate::actions::list::ActionList;
use crate::foundation::core::Owner;
use crate::graph::world::World;
use crate::physics::BodyDef;
use crate::test_support::{FakePhysics, bump, count, rect_actor, world_with_scene};

fn with_body(awake: bool) -> (World, ActorId, BodyHandle) {
    let (mut world, scene) = world_with_scene();
    world.set_shared_physics(Some(Box::new(FakePhysics::default())));
    let id = world
        .add_actor(scene, rect_actor("crate", 0.0, 0.0, 10.0, 10.0))
        .unwrap();
    let def = BodyDef {
        awake,
        ..BodyDef::default()
    };
    let body = world.attach_body(id, &def, &[]).unwrap();
    (world, id, body)
}

fn ctx(world: &mut World, id: ActorId, dt: f64) -> ActionCtx<'_> {
    ActionCtx {
        world,
        owner: Owner::Actor(id),
        dt,
    }
}

#[test]
fn impulse_wakes_the_body() {
    let (mut world, id, body) = with_body(false);
    ApplyImpulse::new(3.0, -1.0)
        .on_init(&mut ctx(&mut world, id, 0.1))
        .unwrap();
    let physics = world.physics_for(None).unwrap();
    assert!(physics.is_awake(body));
    assert_eq!(physics.linear_velocity(body), Some(Vec2::new(3.0, -1.0)));
}

#[test]
fn force_runs_for_its_duration() {
    let (mut world, id, body) = with_body(false);
    let mut action = ApplyForce::new(0.0, 10.0, 0.2);
    let mut ctx = ctx(&mut world, id, 0.1);
    action.on_init(&mut ctx).unwrap();
    assert!(action.on_tick(&mut ctx).unwrap());
    assert!(!action.on_tick(&mut ctx).unwrap());
    assert!(world.physics_for(None).unwrap().is_awake(body));
}

#[test]
fn set_velocity_targets_the_body() {
    let (mut world, id, body) = with_body(true);
    SetVelocity {
        linear: Some(Vec2::new(1.0, 2.0)),
        angular: Some(0.5),
    }
    .on_init(&mut ctx(&mut world, id, 0.1))
    .unwrap();
    let physics = world.physics_for(None).unwrap();
    assert_eq!(physics.linear_velocity(body), Some(Vec2::new(1.0, 2.0)));
    assert_eq!(physics.angular_velocity(body), Some(0.5));
    assert_eq!(world.actor(id).unwrap().vx, 0.0);
}

#[test]
fn set_velocity_without_body_moves_the_actor() {
    let (mut world, scene) = world_with_scene();
    let id = world
        .add_actor(scene, rect_actor("ghost", 0.0, 0.0, 1.0, 1.0))
        .unwrap();
    SetVelocity {
        linear: Some(Vec2::new(4.0, -4.0)),
        angular: None,
    }
    .on_init(&mut ctx(&mut world, id, 0.1))
    .unwrap();
    let a = world.actor(id).unwrap();
    assert_eq!((a.vx, a.vy, a.vr), (4.0, -4.0, 0.0));
}

#[test]
fn missing_body_fails_but_list_moves_on() {
    let (mut world, scene) = world_with_scene();
    let id = world
        .add_actor(scene, rect_actor("ghost", 0.0, 0.0, 1.0, 1.0))
        .unwrap();
    assert!(
        ApplyImpulse::new(1.0, 0.0)
            .on_init(&mut ctx(&mut world, id, 0.1))
            .is_err()
    );

    world.action_lists(Owner::Actor(id)).unwrap().add(
        ActionList::new("kick")
            .then(ApplyImpulse::new(1.0, 0.0))
            .then(crate::actions::general::Call(
                |ctx: &mut ActionCtx<'_>| -> SceneryResult<()> {
                    bump(ctx.world, "after");
                    Ok(())
                },
            )),
    );
    world.run_managers(Owner::Actor(id), 0.1);
    world.run_managers(Owner::Actor(id), 0.1);
    assert_eq!(count(&world, "after"), 1.0);
}
