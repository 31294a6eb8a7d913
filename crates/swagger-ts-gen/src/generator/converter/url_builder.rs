use std::sync::LazyLock;

use regex::Regex;

use crate::{
  generator::{
    ast::{Expr, ObjectProperty, ParameterDecl, TemplateLiteral, TemplateSpan},
    context::GenerationContext,
    metrics::GenerationWarning,
    options::RewriteRules,
  },
  naming::identifiers::normalize,
  swagger::CollectionFormat,
  utils::paths::posix_join,
};

/// Binding of the query-string serializer in generated modules.
pub(crate) const QS_IDENT: &str = "qs";

static QUERY_FRAGMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\?.*\}").unwrap());
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").unwrap());

/// Drops RFC 6570 query markers such as `{?limit,offset}` from a path template.
pub(crate) fn strip_query_fragment(path: &str) -> String {
  QUERY_FRAGMENT_RE.replace_all(path, "").into_owned()
}

/// Builds the request URL expression for one operation.
pub(crate) struct UrlBuilder<'o> {
  pub(crate) base_path: Option<&'o str>,
  pub(crate) rewrite_rules: &'o RewriteRules,
}

impl UrlBuilder<'_> {
  /// The concrete path template after fragment stripping, base-path joining and rewriting.
  pub(crate) fn resolve_path(&self, path_template: &str) -> String {
    let stripped = strip_query_fragment(path_template);
    let joined = posix_join(&[self.base_path.unwrap_or_default(), stripped.as_str()]);
    self.rewrite_rules.apply(&joined).into_owned()
  }

  pub(crate) fn build(
    &self,
    path_template: &str,
    path_params: &[ParameterDecl],
    query_params: &[ParameterDecl],
    operation_label: &str,
    context: &mut GenerationContext,
  ) -> Expr {
    let path = self.resolve_path(path_template);
    let url = path_expression(&path, path_params, operation_label, context);

    if query_params.is_empty() {
      return url;
    }

    url.add(Expr::Template(TemplateLiteral {
      head: "?".to_string(),
      spans: vec![TemplateSpan {
        expression: query_expression(query_params, operation_label, context),
        literal: String::new(),
      }],
    }))
  }
}

fn path_expression(
  path: &str,
  path_params: &[ParameterDecl],
  operation_label: &str,
  context: &mut GenerationContext,
) -> Expr {
  let mut head: Option<String> = None;
  let mut spans: Vec<TemplateSpan> = Vec::new();
  let mut pending = String::new();
  let mut last_end = 0;

  for captures in PLACEHOLDER_RE.captures_iter(path) {
    let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
      continue;
    };
    pending.push_str(&path[last_end..whole.start()]);
    last_end = whole.end();

    match path_params.iter().find(|param| param.original_name == name.as_str()) {
      Some(param) => {
        let literal = std::mem::take(&mut pending);
        match spans.last_mut() {
          Some(span) => span.literal = literal,
          None => head = Some(literal),
        }
        spans.push(TemplateSpan {
          expression: Expr::ident(&param.name),
          literal: String::new(),
        });
      }
      None => {
        context.warn(GenerationWarning::UndeclaredPathParameter {
          operation: operation_label.to_string(),
          name: name.as_str().to_string(),
        });
        pending.push_str(whole.as_str());
      }
    }
  }
  pending.push_str(&path[last_end..]);

  if path_params.is_empty() {
    return Expr::string(path);
  }

  match spans.last_mut() {
    Some(span) => span.literal = pending,
    None => head = Some(pending),
  }

  Expr::Template(TemplateLiteral {
    head: head.unwrap_or_default(),
    spans,
  })
}

/// `qs.stringify({ key: value, ... }, { arrayFormat: "repeat" })`
fn query_expression(query_params: &[ParameterDecl], operation_label: &str, context: &mut GenerationContext) -> Expr {
  let properties = query_params
    .iter()
    .map(|param| {
      let value = Expr::ident(&param.name);
      let value = match &param.collection_format {
        Some(CollectionFormat::Unsupported(format)) => {
          context.warn(GenerationWarning::UnsupportedCollectionFormat {
            operation: operation_label.to_string(),
            parameter: param.original_name.clone(),
            format: format.clone(),
          });
          value
        }
        Some(format) => match format.separator() {
          Some(separator) => value.optional_member("join").call(vec![Expr::string(separator)]),
          None => value,
        },
        None => value,
      };
      ObjectProperty::new(normalize(&param.original_name), value)
    })
    .collect();

  Expr::ident(QS_IDENT).member("stringify").call(vec![
    Expr::Object(properties),
    Expr::Object(vec![ObjectProperty::new("arrayFormat", Expr::string("repeat"))]),
  ])
}
