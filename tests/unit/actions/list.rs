use super::*;
use crate::actions::general::Call;
use crate::test_support::{bump, count, rect_actor, world_with_scene};

fn hit(key: &'static str) -> Call<impl FnMut(&mut ActionCtx<'_>) -> SceneryResult<()>> {
    Call(move |ctx: &mut ActionCtx<'_>| -> SceneryResult<()> {
        bump(ctx.world, key);
        Ok(())
    })
}

/// Counts `on_init` calls in `inits` and keeps running for `ticks` ticks.
struct Counted {
    ticks: u32,
    left: u32,
}

impl Action for Counted {
    fn on_init(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        bump(ctx.world, "inits");
        self.left = self.ticks;
        Ok(())
    }

    fn on_tick(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<bool> {
        bump(ctx.world, "ticks");
        self.left = self.left.saturating_sub(1);
        Ok(self.left > 0)
    }
}

#[test]
fn one_tick_actions_cycle_forever_with_zero_repeat() {
    let (mut world, _) = world_with_scene();
    let mut list = ActionList::new("loop")
        .with_repeat(0)
        .then(hit("a"))
        .then(hit("b"))
        .then(hit("c"));
    let mut ctx = ActionCtx {
        world: &mut world,
        owner: Owner::App,
        dt: 0.1,
    };
    for _ in 0..7 {
        assert!(!list.execute(&mut ctx));
    }
    assert_eq!(list.current(), 1);
    assert!(list.is_playing());
    assert_eq!(
        (count(&world, "a"), count(&world, "b"), count(&world, "c")),
        (3.0, 2.0, 2.0)
    );
}

#[test]
fn repeat_counts_total_passes() {
    let (mut world, _) = world_with_scene();
    let mut list = ActionList::new("twice")
        .with_repeat(2)
        .then(hit("a"))
        .then(hit("b"));
    let mut ctx = ActionCtx {
        world: &mut world,
        owner: Owner::App,
        dt: 0.1,
    };
    let done: Vec<bool> = (0..5).map(|_| list.execute(&mut ctx)).collect();
    assert_eq!(done, vec![false, false, false, true, false]);
    assert!(!list.is_playing());
    assert_eq!(list.repeats_left(), 0);
    assert_eq!(count(&world, "a"), 2.0);
}

#[test]
fn running_actions_hold_the_list_and_init_once_per_pass() {
    let (mut world, _) = world_with_scene();
    let mut list = ActionList::new("l")
        .with_repeat(2)
        .then(Counted { ticks: 3, left: 0 });
    let mut ctx = ActionCtx {
        world: &mut world,
        owner: Owner::App,
        dt: 0.1,
    };
    for _ in 0..6 {
        list.execute(&mut ctx);
    }
    assert!(!list.is_playing());
    assert_eq!((count(&world, "inits"), count(&world, "ticks")), (2.0, 6.0));
}

#[test]
fn failing_hooks_complete_the_action() {
    let (mut world, _) = world_with_scene();
    let mut list = ActionList::new("l")
        .then(FnAction(|_: &mut ActionCtx<'_>| -> SceneryResult<bool> {
            Err(SceneryError::callback("broken"))
        }))
        .then(hit("after"));
    let mut ctx = ActionCtx {
        world: &mut world,
        owner: Owner::App,
        dt: 0.1,
    };
    assert!(!list.execute(&mut ctx));
    assert_eq!(list.current(), 1);
    assert!(list.execute(&mut ctx));
    assert_eq!(count(&world, "after"), 1.0);
}

#[test]
fn paused_and_empty_lists_do_nothing() {
    let (mut world, _) = world_with_scene();
    let mut ctx = ActionCtx {
        world: &mut world,
        owner: Owner::App,
        dt: 0.1,
    };
    let mut empty = ActionList::new("empty");
    assert!(!empty.execute(&mut ctx));

    let mut list = ActionList::new("l").then(hit("a"));
    list.pause();
    assert!(!list.execute(&mut ctx));
    list.play();
    assert!(list.execute(&mut ctx));
    list.restart();
    assert!(list.is_playing());
    assert!(list.execute(&mut ctx));
    assert_eq!(count(&world, "a"), 2.0);
}

#[test]
fn manager_drops_finished_self_destroying_lists() {
    let (mut world, _) = world_with_scene();
    let mut lists = ActionListManager::new();
    lists.add(ActionList::new("keep").then(hit("k")));
    lists.add(ActionList::new("drop").with_destroy(true).then(hit("d")));
    lists.execute(&mut world, Owner::App, 0.1);
    assert_eq!(lists.len(), 1);
    assert!(lists.find("keep").is_some_and(|l| !l.is_playing()));
    assert_eq!((count(&world, "k"), count(&world, "d")), (1.0, 1.0));
}

#[test]
fn named_controls() {
    let (mut world, _) = world_with_scene();
    let mut lists = ActionListManager::new();
    lists.add(ActionList::new("a").with_repeat(0).then(hit("a")));
    lists.pause_named("a");
    lists.execute(&mut world, Owner::App, 0.1);
    assert_eq!(count(&world, "a"), 0.0);
    lists.play_named("a");
    lists.execute(&mut world, Owner::App, 0.1);
    assert_eq!(count(&world, "a"), 1.0);
    lists.restart_named("a");
    assert_eq!(lists.find("a").map(ActionList::current), Some(0));
    lists.remove_named("a");
    assert!(lists.is_empty());
}

#[test]
fn requests_during_execution_are_merged_afterwards() {
    let (mut world, scene) = world_with_scene();
    let id = world.add_actor(scene, rect_actor("a", 0.0, 0.0, 1.0, 1.0)).unwrap();
    let owner = Owner::Actor(id);
    let spawner = ActionList::new("spawner").then(Call(|ctx: &mut ActionCtx<'_>| -> SceneryResult<()> {
        if let Some(lists) = ctx.world.action_lists(ctx.owner) {
            lists.add(ActionList::new("spawned").then(hit("spawned")));
            lists.remove_named("spawner");
        }
        Ok(())
    }));
    world.action_lists(owner).unwrap().add(spawner);

    world.run_managers(owner, 0.1);
    let lists = world.action_lists(owner).unwrap();
    assert!(lists.find("spawner").is_none());
    assert!(lists.find("spawned").is_some());

    world.run_managers(owner, 0.1);
    assert_eq!(count(&world, "spawned"), 1.0);
}

#[test]
fn context_resolves_owner() {
    let (mut world, scene) = world_with_scene();
    let id = world.add_actor(scene, rect_actor("a", 0.0, 0.0, 1.0, 1.0)).unwrap();

    let ctx = ActionCtx {
        world: &mut world,
        owner: Owner::App,
        dt: 0.0,
    };
    assert!(ctx.actor().is_err());
    assert!(ctx.target().is_err());
    assert_eq!(ctx.scene().unwrap(), scene);

    let ctx = ActionCtx {
        world: &mut world,
        owner: Owner::Actor(id),
        dt: 0.0,
    };
    assert_eq!(ctx.actor().unwrap(), id);
    assert_eq!(ctx.scene().unwrap(), scene);
    assert_eq!(ctx.target().unwrap(), Target::Actor(id));
}
