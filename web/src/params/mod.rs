pub(crate) mod application;
pub(crate) mod user;
