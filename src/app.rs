pub(crate) mod config;
pub(crate) mod driver;
pub(crate) mod input;
pub(crate) mod timing;
