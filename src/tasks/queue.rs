use std::collections::VecDeque;

use crate::{
    foundation::core::Owner,
    graph::world::World,
    tasks::task::{Task, TaskTick},
};

/// Runs tasks strictly one after another: only the head task is live.
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: VecDeque<Task>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, task: Task) -> Self {
        self.push(task);
        self
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push_back(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The task currently being run.
    pub fn head(&self) -> Option<&Task> {
        self.tasks.front()
    }

    pub fn head_mut(&mut self) -> Option<&mut Task> {
        self.tasks.front_mut()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Ticks the head task; once it completes the next task becomes live on the following call.
    pub fn execute(&mut self, world: &mut World, owner: Owner, dt: f64) -> TaskTick {
        let Some(head) = self.tasks.front_mut() else {
            return TaskTick::Idle;
        };
        let tick = head.tick(world, owner, dt);
        if tick == TaskTick::Completed {
            self.tasks.pop_front();
        }
        tick
    }

    /// Wraps the queue into a task so a [`crate::TaskManager`] can drive it. The wrapping task
    /// completes when the queue runs dry.
    pub fn into_task(mut self, name: impl Into<String>) -> Task {
        let name = name.into();
        Task::new(name, move |ctx| {
            self.execute(ctx.world, ctx.owner, ctx.dt);
            if self.is_empty() {
                ctx.finish();
            }
            Ok(())
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tasks/queue.rs"]
mod tests;
