use super::*;
use crate::test_support::{bump, count, world_with_scene};

fn counting(name: &str) -> Task {
    Task::new(name, |ctx| {
        bump(ctx.world, "runs");
        Ok(())
    })
}

#[test]
fn delayed_task_fires_repeat_times_then_completes() {
    let (mut world, _) = world_with_scene();
    let mut task = counting("t")
        .with_delay(2.0)
        .with_repeat(3)
        .on_complete(|ctx| {
            bump(ctx.world, "done");
            Ok(())
        });

    assert_eq!(task.tick(&mut world, Owner::App, 1.0), TaskTick::Idle);
    assert_eq!(task.state(), TaskState::Dormant);
    assert_eq!(task.tick(&mut world, Owner::App, 1.0), TaskTick::Ran);
    assert_eq!(task.state(), TaskState::Running);
    assert_eq!(task.tick(&mut world, Owner::App, 0.5), TaskTick::Ran);
    assert_eq!(task.tick(&mut world, Owner::App, 0.5), TaskTick::Completed);

    assert_eq!(count(&world, "runs"), 3.0);
    assert_eq!(count(&world, "done"), 1.0);
    assert_eq!(task.state(), TaskState::Stopped);
    assert_eq!(task.tick(&mut world, Owner::App, 1.0), TaskTick::Idle);
    assert_eq!(count(&world, "runs"), 3.0);
}

#[test]
fn zero_repeat_runs_forever() {
    let (mut world, _) = world_with_scene();
    let mut task = counting("t");
    for _ in 0..20 {
        assert_eq!(task.tick(&mut world, Owner::App, 0.1), TaskTick::Ran);
    }
    assert_eq!(task.loops(), 20);
}

#[test]
fn wait_is_a_fixed_period() {
    let (mut world, _) = world_with_scene();
    let mut task = counting("t").with_wait(1.0);
    task.tick(&mut world, Owner::App, 0.0);
    for _ in 0..8 {
        task.tick(&mut world, Owner::App, 0.75);
    }
    // 6.0s elapsed: the remainder carries over between periods
    assert_eq!(count(&world, "runs"), 6.0);
}

#[test]
fn negative_delay_runs_once_and_stays() {
    let (mut world, _) = world_with_scene();
    let mut task = counting("t").with_delay(-1.0).with_repeat(5);
    assert_eq!(task.tick(&mut world, Owner::App, 0.1), TaskTick::Ran);
    assert_eq!(task.state(), TaskState::Stopped);
    assert_eq!(task.tick(&mut world, Owner::App, 0.1), TaskTick::Idle);
    assert_eq!(count(&world, "runs"), 1.0);
}

#[test]
fn pause_and_play() {
    let (mut world, _) = world_with_scene();
    let mut task = counting("t");
    task.tick(&mut world, Owner::App, 0.1);
    task.pause();
    assert_eq!(task.tick(&mut world, Owner::App, 0.1), TaskTick::Idle);
    task.play();
    task.tick(&mut world, Owner::App, 0.1);
    assert_eq!(count(&world, "runs"), 2.0);

    task.stop();
    task.pause();
    assert_eq!(task.state(), TaskState::Stopped);
}

#[test]
fn restart_returns_to_dormant() {
    let (mut world, _) = world_with_scene();
    let mut task = counting("t").with_delay(1.0);
    task.tick(&mut world, Owner::App, 2.0);
    assert_eq!(task.loops(), 1);
    task.restart();
    assert_eq!(task.state(), TaskState::Dormant);
    assert_eq!(task.loops(), 0);
    assert_eq!(task.tick(&mut world, Owner::App, 0.5), TaskTick::Idle);
}

#[test]
fn finish_completes_early() {
    let (mut world, _) = world_with_scene();
    let mut task = Task::new("t", |ctx| {
        if ctx.loops == 1 {
            ctx.finish();
        }
        Ok(())
    })
    .with_repeat(10);
    assert_eq!(task.tick(&mut world, Owner::App, 0.1), TaskTick::Ran);
    assert_eq!(task.tick(&mut world, Owner::App, 0.1), TaskTick::Completed);
}

#[test]
fn payload_is_reachable_from_the_callback() {
    let (mut world, _) = world_with_scene();
    let mut task = Task::new("t", |ctx| {
        if let Some(n) = ctx.data_mut::<u32>() {
            *n += 1;
        }
        Ok(())
    })
    .with_data(10_u32);
    task.tick(&mut world, Owner::App, 0.1);
    task.tick(&mut world, Owner::App, 0.1);
    assert_eq!(task.data::<u32>(), Some(&12));
    assert_eq!(task.data::<String>(), None);
}

#[test]
fn failing_callback_keeps_the_task() {
    let (mut world, _) = world_with_scene();
    let mut task = Task::new("t", |_| Err(crate::SceneryError::callback("nope"))).with_repeat(2);
    assert_eq!(task.tick(&mut world, Owner::App, 0.1), TaskTick::Ran);
    assert_eq!(task.tick(&mut world, Owner::App, 0.1), TaskTick::Completed);
}
