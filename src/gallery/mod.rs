pub(crate) mod viewer;
