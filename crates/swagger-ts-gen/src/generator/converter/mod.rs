//! Conversion of Swagger nodes into the TypeScript declaration algebra.

pub(crate) mod operations;
pub(crate) mod parameters;
pub(crate) mod schemas;
pub(crate) mod url_builder;

pub(crate) use operations::OperationEmitter;
pub(crate) use schemas::{schema_documentation, synthesize};

#[cfg(test)]
mod tests;
