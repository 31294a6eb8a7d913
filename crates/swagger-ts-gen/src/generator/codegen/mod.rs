//! TypeScript text back-end for the declaration algebra.

mod docs;
mod expressions;
mod types;

use std::fmt::Write;

use self::{docs::write_doc_block, types::write_type};
use crate::{
  generator::{
    ast::{DefinitionsUnit, FunctionDecl, ImportDecl, OperationsUnit, ParameterDecl, TypeAliasDecl},
    orchestrator::CodeMetadata,
  },
  naming::identifiers::is_identifier,
};

#[cfg(test)]
mod tests;

const INDENT: &str = "  ";

/// The runtime module every generated operations unit imports by default.
pub const HTTP_CLIENT_RUNTIME: &str = include_str!("../../../runtime/httpClient.ts");

/// A double-quoted, JSON-escaped string literal.
pub(crate) fn string_literal(value: &str) -> String {
  serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

/// An object key: bare when it is a valid identifier, quoted otherwise.
pub(crate) fn quote_key(key: &str) -> String {
  if is_identifier(key) {
    key.to_string()
  } else {
    string_literal(key)
  }
}

pub fn file_header(metadata: &CodeMetadata, source_path: &str) -> String {
  let description = metadata
    .description
    .as_deref()
    .map(str::trim)
    .filter(|d| !d.is_empty())
    .map_or_else(
      || " * No description provided".to_string(),
      |d| {
        d.lines()
          .map(|line| format!(" * {}", line.replace("*/", "*\\/")).trim_end().to_string())
          .collect::<Vec<_>>()
          .join("\n")
      },
    );

  format!(
    r"/**
 * AUTO-GENERATED CODE - DO NOT EDIT!
 *
 * {}
 * Source: {}
 * Version: {}
 * Generated by `swagger-ts-gen`
 *
{}
 */
/* eslint-disable */

",
    metadata.title, source_path, metadata.version, description
  )
}

pub fn render_operations(unit: &OperationsUnit) -> String {
  let mut out = String::new();
  for import in &unit.imports {
    out.push_str(&render_import(import));
    out.push('\n');
  }

  for function in &unit.functions {
    out.push('\n');
    render_function(&mut out, function);
  }
  out
}

pub fn render_definitions(unit: &DefinitionsUnit) -> String {
  if unit.aliases.is_empty() {
    return "export {};\n".to_string();
  }

  let mut out = String::new();
  for (i, alias) in unit.aliases.iter().enumerate() {
    if i > 0 {
      out.push('\n');
    }
    render_alias(&mut out, alias);
  }
  out
}

fn render_import(import: &ImportDecl) -> String {
  match import {
    ImportDecl::Default { name, module } => format!("import {name} from {};", string_literal(module)),
    ImportDecl::TypeOnly { names, module } => {
      format!("import type {{ {} }} from {};", names.join(", "), string_literal(module))
    }
  }
}

fn render_parameter(param: &ParameterDecl) -> String {
  let marker = if param.optional { "?" } else { "" };
  match &param.initializer {
    Some(initializer) => format!("{}{marker}: {} = {initializer}", param.name, param.type_node),
    None => format!("{}{marker}: {}", param.name, param.type_node),
  }
}

pub(crate) fn render_function(out: &mut String, function: &FunctionDecl) {
  write_doc_block(out, "", function.docs.body.lines(), &function.docs.tags);

  let parameters = function
    .parameters
    .iter()
    .map(render_parameter)
    .collect::<Vec<_>>()
    .join(", ");

  let _ = writeln!(
    out,
    "export const {} = ({parameters}): {} => {{",
    function.name, function.return_type
  );
  for statement in &function.body {
    let _ = writeln!(out, "{INDENT}{statement}");
  }
  out.push_str("};\n");
}

pub(crate) fn render_alias(out: &mut String, alias: &TypeAliasDecl) {
  write_doc_block(out, "", alias.docs.lines(), &[]);
  let _ = write!(out, "export type {} = ", alias.name);
  let _ = write_type(out, &alias.type_node, 0);
  out.push_str(";\n");
}
