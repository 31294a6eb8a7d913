use serde_json::Value;

use crate::{
  generator::{
    ast::{FunctionDecl, ImportDecl},
    options::GeneratorOptions,
    orchestrator::{GeneratedOutput, Orchestrator},
  },
  swagger::Document,
};

pub(super) const PETSTORE: &str = include_str!("../../../fixtures/petstore.json");

pub(super) fn petstore() -> Document {
  Document::from_json(PETSTORE).expect("petstore fixture should parse")
}

pub(super) fn parse(value: Value) -> Document {
  Document::from_value(value).expect("test document should parse")
}

pub(super) fn generate(document: Document, options: GeneratorOptions) -> GeneratedOutput {
  Orchestrator::new(document, options).generate()
}

pub(super) fn function_names(output: &GeneratedOutput) -> Vec<&str> {
  output
    .operations
    .functions
    .iter()
    .map(|function| function.name.as_str())
    .collect()
}

pub(super) fn alias_names(output: &GeneratedOutput) -> Vec<&str> {
  output
    .definitions
    .aliases
    .iter()
    .map(|alias| alias.name.as_str())
    .collect()
}

pub(super) fn type_imports(output: &GeneratedOutput) -> Option<&[String]> {
  output.operations.imports.iter().find_map(|import| match import {
    ImportDecl::TypeOnly { names, .. } => Some(names.as_slice()),
    ImportDecl::Default { .. } => None,
  })
}

pub(super) fn function<'o>(output: &'o GeneratedOutput, name: &str) -> &'o FunctionDecl {
  output
    .operations
    .functions
    .iter()
    .find(|function| function.name == name)
    .unwrap_or_else(|| panic!("function {name} should be generated"))
}
