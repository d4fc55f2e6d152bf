pub(crate) mod chrome;
pub(crate) mod separator;
