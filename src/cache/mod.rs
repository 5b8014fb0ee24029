pub(crate) mod factory;
pub(crate) mod key;
pub(crate) mod store;
