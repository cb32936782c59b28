pub(crate) mod manager;
pub(crate) mod queue;
pub(crate) mod task;
