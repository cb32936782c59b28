pub(crate) mod recording;
pub(crate) mod surface;
