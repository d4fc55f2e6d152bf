pub(crate) mod printer;
pub(crate) mod virt;
