use std::{any::Any, fmt};

use crate::{
    foundation::core::Owner,
    foundation::error::SceneryResult,
    graph::world::World,
};

/// What a task function sees when it runs.
pub struct TaskCtx<'a> {
    pub world: &'a mut World,
    pub owner: Owner,
    pub name: &'a str,
    pub data: Option<&'a mut (dyn Any + 'static)>,
    /// Completed runs before this one.
    pub loops: u32,
    pub dt: f64,
    finished: bool,
}

impl TaskCtx<'_> {
    /// The task payload, if it has one of type `T`.
    pub fn data_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.data.as_deref_mut().and_then(|d| d.downcast_mut::<T>())
    }

    /// Completes the task after this run, whatever its remaining repeats.
    pub fn finish(&mut self) {
        self.finished = true;
    }
}

pub type TaskFn = Box<dyn FnMut(&mut TaskCtx<'_>) -> SceneryResult<()>>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TaskState {
    /// Waiting out its start delay.
    #[default]
    Dormant,
    Running,
    Paused,
    Stopped,
}

/// Outcome of one task tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskTick {
    Idle,
    Ran,
    /// Used up its repeats; the owning collection drops it.
    Completed,
}

/// A delayed, optionally periodic and repeating callback.
pub struct Task {
    pub name: String,
    func: TaskFn,
    on_complete: Option<TaskFn>,
    data: Option<Box<dyn Any>>,
    delay: f64,
    repeat: u32,
    wait: f64,
    state: TaskState,
    running_time: f64,
    last_time: f64,
    loops: u32,
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("delay", &self.delay)
            .field("repeat", &self.repeat)
            .field("wait", &self.wait)
            .field("loops", &self.loops)
            .finish_non_exhaustive()
    }
}

impl Task {
    /// Runs on every update, forever, starting immediately.
    pub fn new(
        name: impl Into<String>,
        func: impl FnMut(&mut TaskCtx<'_>) -> SceneryResult<()> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Box::new(func),
            on_complete: None,
            data: None,
            delay: 0.0,
            repeat: 0,
            wait: 0.0,
            state: TaskState::Dormant,
            running_time: 0.0,
            last_time: 0.0,
            loops: 0,
        }
    }

    /// Seconds before the first run. A negative delay runs the task once and then leaves it
    /// stopped in its collection.
    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    /// Number of runs; `0` runs forever.
    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    /// Seconds between runs; `0` runs on every update.
    pub fn with_wait(mut self, wait: f64) -> Self {
        self.wait = wait.max(0.0);
        self
    }

    pub fn with_data(mut self, data: impl Any) -> Self {
        self.data = Some(Box::new(data));
        self
    }

    pub fn on_complete(
        mut self,
        f: impl FnMut(&mut TaskCtx<'_>) -> SceneryResult<()> + 'static,
    ) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn loops(&self) -> u32 {
        self.loops
    }

    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn repeat(&self) -> u32 {
        self.repeat
    }

    pub fn wait(&self) -> f64 {
        self.wait
    }

    pub fn data<T: 'static>(&self) -> Option<&T> {
        self.data.as_deref().and_then(|d| d.downcast_ref::<T>())
    }

    /// Forces the task into `Running`, whatever its state.
    pub fn play(&mut self) {
        self.state = TaskState::Running;
    }

    pub fn pause(&mut self) {
        if self.state != TaskState::Stopped {
            self.state = TaskState::Paused;
        }
    }

    pub fn stop(&mut self) {
        self.state = TaskState::Stopped;
    }

    /// Back to `Dormant` with cleared counters.
    pub fn restart(&mut self) {
        self.state = TaskState::Dormant;
        self.running_time = 0.0;
        self.last_time = 0.0;
        self.loops = 0;
    }

    pub(crate) fn tick(&mut self, world: &mut World, owner: Owner, dt: f64) -> TaskTick {
        let mut elapsed = dt;
        if self.state == TaskState::Dormant {
            self.running_time += dt;
            let start = self.delay.max(0.0);
            if self.running_time < start {
                return TaskTick::Idle;
            }
            elapsed = self.running_time - start;
            self.state = TaskState::Running;
        }
        if self.state != TaskState::Running {
            return TaskTick::Idle;
        }

        if self.wait > 0.0 {
            self.last_time += elapsed;
            if self.last_time < self.wait {
                return TaskTick::Idle;
            }
            self.last_time -= self.wait;
        }

        let finished = self.invoke(world, owner, dt, false);

        if self.delay < 0.0 && !finished {
            self.state = TaskState::Stopped;
            return TaskTick::Ran;
        }
        self.loops += 1;
        if finished || (self.repeat > 0 && self.loops >= self.repeat) {
            self.state = TaskState::Stopped;
            self.invoke(world, owner, dt, true);
            return TaskTick::Completed;
        }
        TaskTick::Ran
    }

    /// Returns whether the callback asked to finish the task.
    fn invoke(&mut self, world: &mut World, owner: Owner, dt: f64, complete: bool) -> bool {
        let func = if complete {
            match self.on_complete.as_mut() {
                Some(f) => f,
                None => return false,
            }
        } else {
            &mut self.func
        };
        let mut ctx = TaskCtx {
            world,
            owner,
            name: &self.name,
            data: self.data.as_deref_mut(),
            loops: self.loops,
            dt,
            finished: false,
        };
        if let Err(err) = func(&mut ctx) {
            let what = if complete { "on_complete" } else { "task" };
            tracing::warn!(task = %self.name, callback = what, %err, "task callback failed");
        }
        ctx.finished
    }
}

#[cfg(test)]
#[path = "../../tests/unit/tasks/task.rs"]
mod tests;
