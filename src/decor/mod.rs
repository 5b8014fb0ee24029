pub(crate) mod components;
