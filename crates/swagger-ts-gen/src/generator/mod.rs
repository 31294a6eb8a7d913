pub(crate) mod ast;
pub(crate) mod codegen;
pub(crate) mod context;
pub(crate) mod converter;
pub mod filters;
pub mod metrics;
pub mod options;
pub mod orchestrator;
pub(crate) mod resolver;
pub(crate) mod schema_registry;

#[cfg(test)]
mod tests;
