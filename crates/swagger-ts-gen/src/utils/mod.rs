pub mod paths;
pub mod spec;
