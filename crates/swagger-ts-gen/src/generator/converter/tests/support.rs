use http::Method;
use serde_json::Value;

use crate::{
  generator::{
    ast::{FunctionDecl, ParameterDecl},
    context::GenerationContext,
    converter::{OperationEmitter, parameters::declare_parameter},
    metrics::GenerationWarning,
    options::GeneratorOptions,
  },
  swagger::{Document, Parameter, Schema},
};

pub(super) const PETSTORE: &str = include_str!("../../../../fixtures/petstore.json");

pub(super) fn petstore() -> Document {
  Document::from_json(PETSTORE).expect("petstore fixture should parse")
}

pub(super) fn document(value: Value) -> Document {
  Document::from_value(value).expect("test document should parse")
}

pub(super) fn empty_document() -> Document {
  document(serde_json::json!({ "swagger": "2.0", "paths": {} }))
}

pub(super) fn schema(value: Value) -> Schema {
  serde_json::from_value(value).expect("test schema should deserialize")
}

pub(super) fn parameter(value: Value) -> Parameter {
  serde_json::from_value(value).expect("test parameter should deserialize")
}

pub(super) fn declared(value: Value, context: &mut GenerationContext) -> ParameterDecl {
  declare_parameter(&parameter(value), context)
}

/// Emits the operation at `method path` with a fresh context.
pub(super) fn emit_with(
  document: &Document,
  method: Method,
  path: &str,
  options: &GeneratorOptions,
) -> (Option<FunctionDecl>, Vec<GenerationWarning>) {
  let mut context = GenerationContext::new(document);
  let emitter = OperationEmitter::new(document.base_path.as_deref(), options);
  let item = &document.paths[path];
  let function = emitter.emit(&method, path, item, &item.operations[&method], &mut context);
  (function, context.take_warnings())
}

pub(super) fn emit(document: &Document, method: Method, path: &str) -> FunctionDecl {
  let (function, warnings) = emit_with(document, method, path, &GeneratorOptions::default());
  assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
  function.expect("operation should be emitted")
}
