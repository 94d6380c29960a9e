pub(crate) mod filesystem;
