use std::collections::HashSet;

use serde_json::Value;

use super::{operations::HTTP_CLIENT_IDENT, schemas::synthesize_node, url_builder::QS_IDENT};
use crate::{
  generator::{
    ast::{LiteralType, ParameterDecl, TypeNode},
    context::GenerationContext,
    metrics::GenerationWarning,
    resolver,
  },
  naming::identifiers::{ensure_unique, to_identifier},
  swagger::{ObjectOrReference, Operation, Parameter, ParameterIn, PathItem},
};

/// Resolved parameters split by location. `body` holds at most one entry after correction.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct GroupedParameters {
  pub(crate) path: Vec<Parameter>,
  pub(crate) body: Vec<Parameter>,
  pub(crate) form_data: Vec<Parameter>,
  pub(crate) query: Vec<Parameter>,
  pub(crate) header: Vec<Parameter>,
}

/// Declarations in group order, before the signature sort.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ParameterSet {
  pub(crate) path: Vec<ParameterDecl>,
  pub(crate) body: Option<ParameterDecl>,
  pub(crate) form_data: Vec<ParameterDecl>,
  pub(crate) query: Vec<ParameterDecl>,
}

impl ParameterSet {
  /// Group order (path, body, formData, query) stably sorted by weight.
  pub(crate) fn signature(&self) -> Vec<ParameterDecl> {
    let mut ordered: Vec<ParameterDecl> = self
      .path
      .iter()
      .chain(self.body.iter())
      .chain(self.form_data.iter())
      .chain(self.query.iter())
      .cloned()
      .collect();
    ordered.sort_by_key(ParameterDecl::weight);
    ordered
  }
}

/// Path-level parameters followed by the operation's own, with refs resolved.
///
/// An operation parameter replaces a path-level one with the same name and location.
pub(crate) fn collect_parameters(
  path_item: &PathItem,
  operation: &Operation,
  context: &mut GenerationContext,
) -> Vec<Parameter> {
  let mut merged: Vec<Parameter> = resolve_all(&path_item.parameters, context);

  for parameter in resolve_all(&operation.parameters, context) {
    match merged
      .iter_mut()
      .find(|existing| existing.name == parameter.name && existing.location == parameter.location)
    {
      Some(existing) => *existing = parameter,
      None => merged.push(parameter),
    }
  }

  merged
}

fn resolve_all(parameters: &[ObjectOrReference<Parameter>], context: &mut GenerationContext) -> Vec<Parameter> {
  parameters
    .iter()
    .filter_map(|parameter| match parameter {
      ObjectOrReference::Object(parameter) => Some(parameter.clone()),
      ObjectOrReference::Ref { ref_path } => {
        let resolved = resolver::resolve_parameter(context.document, ref_path);
        if resolved.is_none() {
          context.warn(GenerationWarning::DanglingReference {
            ref_path: ref_path.clone(),
          });
        }
        resolved
      }
    })
    .collect()
}

pub(crate) fn group(
  parameters: Vec<Parameter>,
  operation_label: &str,
  context: &mut GenerationContext,
) -> GroupedParameters {
  let mut grouped = GroupedParameters::default();
  for parameter in parameters {
    match parameter.location {
      ParameterIn::Path => grouped.path.push(parameter),
      ParameterIn::Body => grouped.body.push(parameter),
      ParameterIn::FormData => grouped.form_data.push(parameter),
      ParameterIn::Query => grouped.query.push(parameter),
      ParameterIn::Header => grouped.header.push(parameter),
      ParameterIn::Other => {}
    }
  }

  if grouped.body.len() > 1 {
    let count = grouped.body.len();
    let kept = select_body(std::mem::take(&mut grouped.body), context);
    context.warn(GenerationWarning::MultipleBodyParameters {
      operation: operation_label.to_string(),
      count,
      kept: kept.name.clone(),
    });
    grouped.body.push(kept);
  }

  grouped
}

/// Keeps the first body whose schema is inline or whose `$ref` resolves, else the first declared.
fn select_body(mut candidates: Vec<Parameter>, context: &GenerationContext) -> Parameter {
  let position = candidates
    .iter()
    .position(|candidate| match candidate.schema.as_ref().and_then(|s| s.ref_path.as_deref()) {
      Some(ref_path) => resolver::resolve_schema(context.document, ref_path).is_some(),
      None => true,
    })
    .unwrap_or(0);
  candidates.remove(position)
}

/// Declares bindings for the signature groups. Names the module already imports are taken up front.
pub(crate) fn declare(grouped: &GroupedParameters, context: &mut GenerationContext) -> ParameterSet {
  let mut used: HashSet<String> = [HTTP_CLIENT_IDENT, QS_IDENT].into_iter().map(String::from).collect();
  let path = declare_unique(&grouped.path, &mut used, context);
  let body = declare_unique(&grouped.body, &mut used, context).into_iter().next();
  let form_data = declare_unique(&grouped.form_data, &mut used, context);
  let query = declare_unique(&grouped.query, &mut used, context);

  ParameterSet {
    path,
    body,
    form_data,
    query,
  }
}

fn declare_unique(
  parameters: &[Parameter],
  used: &mut HashSet<String>,
  context: &mut GenerationContext,
) -> Vec<ParameterDecl> {
  parameters
    .iter()
    .map(|parameter| {
      let mut decl = declare_parameter(parameter, context);
      decl.name = ensure_unique(&decl.name, used);
      used.insert(decl.name.clone());
      decl
    })
    .collect()
}

pub(crate) fn declare_parameter(parameter: &Parameter, context: &mut GenerationContext) -> ParameterDecl {
  let initializer = match &parameter.default {
    Some(Value::String(s)) => Some(LiteralType::String(s.clone())),
    Some(Value::Number(n)) => Some(LiteralType::Number(n.to_string())),
    _ => None,
  };

  ParameterDecl {
    name: to_identifier(&parameter.name),
    original_name: parameter.name.clone(),
    location: parameter.location,
    type_node: parameter_type(parameter, context),
    optional: !(parameter.required || initializer.is_some()),
    initializer,
    description: parameter.description.clone(),
    collection_format: parameter.collection_format(),
  }
}

fn parameter_type(parameter: &Parameter, context: &mut GenerationContext) -> TypeNode {
  match parameter.location {
    ParameterIn::Body => synthesize_node(parameter.schema.as_ref(), context),
    ParameterIn::FormData if parameter.param_type.as_ref().and_then(Value::as_str) == Some("file") => TypeNode::Any,
    _ => synthesize_node(Some(&parameter.as_schema()), context),
  }
}
