use http::Method;

use super::{
  parameters::{self, ParameterSet},
  schemas::synthesize_node,
  url_builder::UrlBuilder,
};
use crate::{
  generator::{
    ast::{DocTag, Documentation, Expr, FunctionDecl, JsDoc, ObjectProperty, ParameterDecl, Statement, TypeNode},
    context::GenerationContext,
    metrics::GenerationWarning,
    options::{GeneratorOptions, OperationKey},
    resolver,
  },
  naming::identifiers::to_identifier,
  swagger::{ObjectOrReference, Operation, PathItem, Response},
};

pub(crate) const HTTP_CLIENT_IDENT: &str = "httpClient";

/// Response keys tried, in order, when picking the success response.
const SUCCESS_RESPONSE_KEYS: [&str; 2] = ["200", "default"];

pub(crate) struct OperationEmitter<'o> {
  options: &'o GeneratorOptions,
  url_builder: UrlBuilder<'o>,
}

impl<'o> OperationEmitter<'o> {
  pub(crate) fn new(base_path: Option<&'o str>, options: &'o GeneratorOptions) -> Self {
    Self {
      options,
      url_builder: UrlBuilder {
        base_path,
        rewrite_rules: &options.rewrite_rules,
      },
    }
  }

  /// The exported name: the configured override, else the document's operationId, normalized.
  pub(crate) fn operation_name(&self, key: &OperationKey, operation: &Operation) -> Option<String> {
    self
      .options
      .operation_id_overrides
      .get(key)
      .or(operation.operation_id.as_ref())
      .map(String::as_str)
      .map(to_identifier)
  }

  pub(crate) fn emit(
    &self,
    method: &Method,
    path: &str,
    path_item: &PathItem,
    operation: &Operation,
    context: &mut GenerationContext,
  ) -> Option<FunctionDecl> {
    let key = OperationKey::new(method.clone(), path);
    let label = key.to_string();

    let Some(name) = self.operation_name(&key, operation) else {
      context.warn(GenerationWarning::MissingOperationId { operation: label });
      return None;
    };

    let collected = parameters::collect_parameters(path_item, operation, context);
    let grouped = parameters::group(collected, &label, context);
    let declared = parameters::declare(&grouped, context);

    let url = self
      .url_builder
      .build(path, &declared.path, &declared.query, &label, context);
    let mut arguments = vec![url];
    if let Some(payload) = payload_argument(&declared) {
      arguments.push(payload);
    }

    let call = Expr::ident(HTTP_CLIENT_IDENT)
      .member(method.as_str().to_ascii_lowercase())
      .call(arguments);

    let success = success_response(operation, context);
    let return_type = match success.as_ref().and_then(|response| response.schema.as_ref()) {
      Some(schema) => synthesize_node(Some(schema), context),
      None => TypeNode::Void,
    };

    let parameters = declared.signature();
    let docs = operation_docs(operation, &parameters, success.as_ref());

    Some(FunctionDecl {
      name,
      method: method.clone(),
      path: path.to_string(),
      parameters,
      return_type: TypeNode::promise_of(return_type),
      body: vec![Statement::Return(call)],
      docs,
    })
  }
}

/// `{ body: b }` or `{ formData: { k: v, ... } }`, body winning when both exist.
fn payload_argument(declared: &ParameterSet) -> Option<Expr> {
  if let Some(body) = &declared.body {
    return Some(Expr::Object(vec![ObjectProperty::new("body", Expr::ident(&body.name))]));
  }

  if declared.form_data.is_empty() {
    return None;
  }

  let fields = declared
    .form_data
    .iter()
    .map(|param| ObjectProperty::new(&param.original_name, Expr::ident(&param.name)))
    .collect();
  Some(Expr::Object(vec![ObjectProperty::new("formData", Expr::Object(fields))]))
}

fn success_response(operation: &Operation, context: &mut GenerationContext) -> Option<Response> {
  let entry = SUCCESS_RESPONSE_KEYS
    .iter()
    .find_map(|key| operation.responses.get(*key))?;

  match entry {
    ObjectOrReference::Object(response) => Some(response.clone()),
    ObjectOrReference::Ref { ref_path } => {
      let resolved = resolver::resolve_response(context.document, ref_path);
      if resolved.is_none() {
        context.warn(GenerationWarning::DanglingReference {
          ref_path: ref_path.clone(),
        });
      }
      resolved
    }
  }
}

fn operation_docs(operation: &Operation, parameters: &[ParameterDecl], success: Option<&Response>) -> JsDoc {
  let body = Documentation::from_parts([operation.summary.as_deref(), operation.description.as_deref()]);

  let mut tags = Vec::with_capacity(parameters.len() + 2);
  if operation.deprecated {
    tags.push(DocTag::Deprecated);
  }
  tags.extend(parameters.iter().map(|param| DocTag::Param {
    name: param.name.clone(),
    description: param.description.clone(),
  }));
  if let Some(response) = success {
    tags.push(DocTag::Returns(response.description.clone()));
  }

  JsDoc { body, tags }
}
