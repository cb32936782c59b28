pub(crate) mod ease;
pub(crate) mod keyframe;
pub(crate) mod property;
pub(crate) mod timeline;
