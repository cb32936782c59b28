pub(crate) mod actor;
pub(crate) mod atlas;
pub(crate) mod camera;
pub(crate) mod draw;
pub(crate) mod kind;
pub(crate) mod layout;
pub(crate) mod particles;
pub(crate) mod scene;
pub(crate) mod transform;
pub(crate) mod update;
pub(crate) mod world;
