pub(crate) mod camera;
pub(crate) mod general;
pub(crate) mod list;
pub(crate) mod movement;
pub(crate) mod physics;
