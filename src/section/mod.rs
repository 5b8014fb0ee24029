pub(crate) mod fade;
pub(crate) mod index;
pub(crate) mod signal;
