use std::fmt;

use smallvec::SmallVec;

use crate::{
    animation::property::Target,
    foundation::core::{ActorId, NamedOp, Owner, SceneId},
    foundation::error::{SceneryError, SceneryResult},
    graph::world::World,
};

/// What an action sees while it runs: the world, the owner of its list and the frame delta.
pub struct ActionCtx<'a> {
    pub world: &'a mut World,
    pub owner: Owner,
    pub dt: f64,
}

impl ActionCtx<'_> {
    /// The owning actor, or an error for lists owned by a scene or the app.
    pub fn actor(&self) -> SceneryResult<ActorId> {
        match self.owner {
            Owner::Actor(id) if self.world.contains_actor(id) => Ok(id),
            Owner::Actor(id) => Err(SceneryError::not_found(format!("actor {id:?}"))),
            _ => Err(SceneryError::invalid_argument(
                "action needs an actor owner",
            )),
        }
    }

    /// The owning scene, or the scene of the owning actor.
    pub fn scene(&self) -> SceneryResult<SceneId> {
        let scene = match self.owner {
            Owner::Scene(id) => Some(id),
            Owner::Actor(id) => self.world.actor(id).and_then(|a| a.scene()),
            Owner::App => self.world.focus_scene,
        };
        scene.ok_or_else(|| SceneryError::not_found("no scene for this action"))
    }

    /// The owner as a property target; the app has none.
    pub fn target(&self) -> SceneryResult<Target> {
        match self.owner {
            Owner::Actor(id) => Ok(Target::Actor(id)),
            Owner::Scene(id) => Ok(Target::Scene(id)),
            Owner::App => Err(SceneryError::invalid_argument(
                "the app has no properties to animate",
            )),
        }
    }
}

/// One step of an [`ActionList`].
///
/// Both hooks are optional. An action without `on_tick` completes on the tick it starts.
pub trait Action {
    /// Runs once before the first tick of every pass through the list.
    fn on_init(&mut self, _ctx: &mut ActionCtx<'_>) -> SceneryResult<()> {
        Ok(())
    }

    /// Returns `true` while the action is still running.
    fn on_tick(&mut self, _ctx: &mut ActionCtx<'_>) -> SceneryResult<bool> {
        Ok(false)
    }
}

/// Adapts a closure into a ticking action.
pub struct FnAction<F>(pub F);

impl<F> Action for FnAction<F>
where
    F: FnMut(&mut ActionCtx<'_>) -> SceneryResult<bool>,
{
    fn on_tick(&mut self, ctx: &mut ActionCtx<'_>) -> SceneryResult<bool> {
        (self.0)(ctx)
    }
}

struct Slot {
    action: Box<dyn Action>,
    initialised: bool,
}

/// A sequence of actions run one at a time.
pub struct ActionList {
    pub name: String,
    /// Remove the list from its manager once its repeats are used up.
    pub destroy: bool,
    slots: Vec<Slot>,
    current: usize,
    repeat: u32,
    repeats_left: u32,
    playing: bool,
}

impl fmt::Debug for ActionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionList")
            .field("name", &self.name)
            .field("actions", &self.slots.len())
            .field("current", &self.current)
            .field("repeats_left", &self.repeats_left)
            .field("playing", &self.playing)
            .finish()
    }
}

impl ActionList {
    /// A playing list that runs through its actions once.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            destroy: false,
            slots: Vec::new(),
            current: 0,
            repeat: 1,
            repeats_left: 1,
            playing: true,
        }
    }

    /// Total passes; `0` repeats forever.
    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self.repeats_left = repeat;
        self
    }

    pub fn with_destroy(mut self, destroy: bool) -> Self {
        self.destroy = destroy;
        self
    }

    pub fn then(mut self, action: impl Action + 'static) -> Self {
        self.push(action);
        self
    }

    pub fn push(&mut self, action: impl Action + 'static) {
        self.push_boxed(Box::new(action));
    }

    pub fn push_boxed(&mut self, action: Box<dyn Action>) {
        self.slots.push(Slot {
            action,
            initialised: false,
        });
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Index of the action that runs next.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn repeat(&self) -> u32 {
        self.repeat
    }

    pub fn repeats_left(&self) -> u32 {
        self.repeats_left
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Back to the first action with fresh repeats; every action initialises again.
    pub fn restart(&mut self) {
        self.current = 0;
        self.repeats_left = self.repeat;
        self.playing = true;
        for slot in &mut self.slots {
            slot.initialised = false;
        }
    }

    /// Ticks the current action once. Returns `true` when the last pass just finished.
    pub fn execute(&mut self, ctx: &mut ActionCtx<'_>) -> bool {
        if !self.playing || self.slots.is_empty() {
            return false;
        }
        let slot = &mut self.slots[self.current];
        if !slot.initialised {
            slot.initialised = true;
            if let Err(err) = slot.action.on_init(ctx) {
                tracing::warn!(list = %self.name, action = self.current, %err, "action init failed");
            }
        }
        let running = match slot.action.on_tick(ctx) {
            Ok(running) => running,
            Err(err) => {
                tracing::warn!(list = %self.name, action = self.current, %err, "action tick failed");
                false
            }
        };
        if running {
            return false;
        }

        slot.initialised = false;
        self.current += 1;
        if self.current < self.slots.len() {
            return false;
        }
        self.current = 0;
        if self.repeat == 0 {
            return false;
        }
        self.repeats_left = self.repeats_left.saturating_sub(1);
        if self.repeats_left == 0 {
            self.playing = false;
            return true;
        }
        false
    }
}

/// Owns the action lists of one app, scene or actor.
///
/// Works like [`crate::TimelineManager`]: while the owner runs it, requests made through the
/// owner land on a detached placeholder and are merged back afterwards.
#[derive(Default)]
pub struct ActionListManager {
    lists: Vec<ActionList>,
    pending: SmallVec<[NamedOp; 2]>,
    detached: bool,
    cleared: bool,
}

impl fmt::Debug for ActionListManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.lists.iter().map(|l| &l.name))
            .finish()
    }
}

impl ActionListManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn detached() -> Self {
        Self {
            detached: true,
            ..Self::default()
        }
    }

    pub fn add(&mut self, list: ActionList) -> &mut ActionList {
        self.lists.push(list);
        let idx = self.lists.len() - 1;
        &mut self.lists[idx]
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionList> {
        self.lists.iter()
    }

    pub fn find(&self, name: &str) -> Option<&ActionList> {
        self.lists.iter().find(|l| l.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut ActionList> {
        self.lists.iter_mut().find(|l| l.name == name)
    }

    pub fn remove_named(&mut self, name: &str) {
        self.named_op(NamedOp::Remove(name.to_string()));
    }

    pub fn play_named(&mut self, name: &str) {
        self.named_op(NamedOp::Play(name.to_string()));
    }

    pub fn pause_named(&mut self, name: &str) {
        self.named_op(NamedOp::Pause(name.to_string()));
    }

    pub fn restart_named(&mut self, name: &str) {
        self.named_op(NamedOp::Restart(name.to_string()));
    }

    pub fn clear(&mut self) {
        self.lists.clear();
        self.pending.clear();
        if self.detached {
            self.cleared = true;
        }
    }

    /// Executes every list once, then drops the self-destroying lists that finished.
    pub fn execute(&mut self, world: &mut World, owner: Owner, dt: f64) {
        let mut ctx = ActionCtx { world, owner, dt };
        let mut finished: SmallVec<[usize; 4]> = SmallVec::new();
        for (idx, list) in self.lists.iter_mut().enumerate() {
            if list.execute(&mut ctx) && list.destroy {
                finished.push(idx);
            }
        }
        for idx in finished.into_iter().rev() {
            self.lists.remove(idx);
        }
    }

    pub(crate) fn absorb(&mut self, mut other: ActionListManager) {
        if other.cleared {
            self.clear();
        }
        self.lists.append(&mut other.lists);
        for op in other.pending.drain(..) {
            self.named_op(op);
        }
    }

    fn named_op(&mut self, op: NamedOp) {
        if self.detached && self.find(op.name()).is_none() {
            self.pending.push(op);
            return;
        }
        match op {
            NamedOp::Remove(name) => self.lists.retain(|l| l.name != name),
            NamedOp::Play(name) => {
                if let Some(l) = self.find_mut(&name) {
                    l.play();
                }
            }
            NamedOp::Pause(name) => {
                if let Some(l) = self.find_mut(&name) {
                    l.pause();
                }
            }
            NamedOp::Restart(name) => {
                if let Some(l) = self.find_mut(&name) {
                    l.restart();
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/actions/list.rs"]
mod tests;
