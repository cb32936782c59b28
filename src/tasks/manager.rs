use std::fmt;

use smallvec::SmallVec;

use crate::{
    foundation::core::{NamedOp, Owner},
    graph::world::World,
    tasks::task::{Task, TaskTick},
};

/// Owns the tasks of one app, scene or actor and runs all of them on every update.
///
/// Completed tasks are removed once the pass over all tasks is done. A detached placeholder
/// stands in for the manager while its owner runs it.
#[derive(Default)]
pub struct TaskManager {
    tasks: Vec<Task>,
    pending: SmallVec<[NamedOp; 2]>,
    detached: bool,
    cleared: bool,
}

impl fmt::Debug for TaskManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.tasks.iter().map(|t| (&t.name, t.state())))
            .finish()
    }
}

impl TaskManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn detached() -> Self {
        Self {
            detached: true,
            ..Self::default()
        }
    }

    pub fn add(&mut self, task: Task) -> &mut Task {
        self.tasks.push(task);
        let idx = self.tasks.len() - 1;
        &mut self.tasks[idx]
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn find(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.name == name)
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

    pub fn pause(&mut self) {
        self.tasks.iter_mut().for_each(Task::pause);
    }

    pub fn play(&mut self) {
        self.tasks.iter_mut().for_each(Task::play);
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
        self.pending.clear();
        if self.detached {
            self.cleared = true;
        }
    }

    pub fn execute(&mut self, world: &mut World, owner: Owner, dt: f64) {
        let mut completed: SmallVec<[usize; 4]> = SmallVec::new();
        for (idx, task) in self.tasks.iter_mut().enumerate() {
            if task.tick(world, owner, dt) == TaskTick::Completed {
                completed.push(idx);
            }
        }
        for idx in completed.into_iter().rev() {
            self.tasks.remove(idx);
        }
    }

    pub(crate) fn absorb(&mut self, mut other: TaskManager) {
        if other.cleared {
            self.clear();
        }
        self.tasks.append(&mut other.tasks);
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
            NamedOp::Remove(name) => self.tasks.retain(|t| t.name != name),
            NamedOp::Play(name) => {
                if let Some(t) = self.find_mut(&name) {
                    t.play();
                }
            }
            NamedOp::Pause(name) => {
                if let Some(t) = self.find_mut(&name) {
                    t.pause();
                }
            }
            NamedOp::Restart(name) => {
                if let Some(t) = self.find_mut(&name) {
                    t.restart();
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tasks/manager.rs"]
mod tests;
