use super::*;
use crate::tasks::task::TaskState;
use crate::test_support::{bump, count, world_with_scene};

fn counting(name: &'static str) -> Task {
    Task::new(name, move |ctx| {
        bump(ctx.world, name);
        Ok(())
    })
}

#[test]
fn all_tasks_run_concurrently() {
    let (mut world, _) = world_with_scene();
    let mut tasks = TaskManager::new();
    tasks.add(counting("a"));
    tasks.add(counting("b").with_repeat(1));
    tasks.execute(&mut world, Owner::App, 0.1);
    assert_eq!((count(&world, "a"), count(&world, "b")), (1.0, 1.0));
    assert_eq!(tasks.len(), 1);
    assert!(tasks.find("b").is_none());
}

#[test]
fn run_once_sentinel_is_not_removed() {
    let (mut world, _) = world_with_scene();
    let mut tasks = TaskManager::new();
    tasks.add(counting("a").with_delay(-1.0));
    tasks.execute(&mut world, Owner::App, 0.1);
    tasks.execute(&mut world, Owner::App, 0.1);
    assert_eq!(count(&world, "a"), 1.0);
    assert_eq!(tasks.find("a").map(Task::state), Some(TaskState::Stopped));
}

#[test]
fn named_operations() {
    let (mut world, _) = world_with_scene();
    let mut tasks = TaskManager::new();
    tasks.add(counting("a"));
    tasks.add(counting("b"));
    tasks.pause_named("a");
    tasks.execute(&mut world, Owner::App, 0.1);
    assert_eq!((count(&world, "a"), count(&world, "b")), (0.0, 1.0));

    tasks.play_named("a");
    tasks.remove_named("b");
    tasks.execute(&mut world, Owner::App, 0.1);
    assert_eq!((count(&world, "a"), count(&world, "b")), (1.0, 1.0));
    assert_eq!(tasks.len(), 1);

    tasks.restart_named("a");
    assert_eq!(tasks.find("a").map(Task::loops), Some(0));
    tasks.pause();
    assert_eq!(tasks.find("a").map(Task::state), Some(TaskState::Paused));
    tasks.play();
    assert_eq!(tasks.find("a").map(Task::state), Some(TaskState::Running));
}

#[test]
fn detached_placeholder_defers_unknown_names() {
    let mut live = TaskManager::new();
    live.add(counting("a"));

    let mut placeholder = TaskManager::detached();
    placeholder.add(counting("b"));
    placeholder.remove_named("a");
    live.absorb(placeholder);

    assert!(live.find("a").is_none());
    assert!(live.find("b").is_some());
}

#[test]
fn clear_on_placeholder_clears_the_live_manager() {
    let mut live = TaskManager::new();
    live.add(counting("a"));
    let mut placeholder = TaskManager::detached();
    placeholder.clear();
    placeholder.add(counting("c"));
    live.absorb(placeholder);
    assert_eq!(live.len(), 1);
    assert!(live.find("c").is_some());
}

#[test]
fn task_can_remove_itself_by_name() {
    let (mut world, _) = world_with_scene();
    world.managers.tasks.add(Task::new("self", |ctx| {
        bump(ctx.world, "self");
        let (world, owner) = (&mut *ctx.world, ctx.owner);
        if let Some(tasks) = world.tasks(owner) {
            tasks.remove_named("self");
        }
        Ok(())
    }));
    world.run_managers(Owner::App, 0.1);
    world.run_managers(Owner::App, 0.1);
    assert_eq!(count(&world, "self"), 1.0);
    assert!(world.managers.tasks.is_empty());
}
