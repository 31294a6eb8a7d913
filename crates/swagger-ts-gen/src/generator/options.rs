use std::{borrow::Cow, collections::HashMap, fmt, str::FromStr};

use http::Method;
use regex::Regex;

use crate::generator::filters::OperationFilter;

pub const DEFAULT_HTTP_CLIENT_MODULE: &str = "./httpClient";
pub const DEFAULT_DEFINITIONS_MODULE: &str = "./definitions";

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
  #[error("invalid pattern '{pattern}': {source}")]
  InvalidPattern {
    pattern: String,
    #[source]
    source: regex::Error,
  },
  #[error("invalid operation key '{key}': expected 'METHOD /path'")]
  InvalidOperationKey { key: String },
  #[error("invalid {kind} '{entry}': expected KEY=VALUE")]
  InvalidAssignment { kind: &'static str, entry: String },
}

/// Identifies an operation by verb and path template, e.g. `GET /pet/{petId}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationKey {
  pub method: Method,
  pub path: String,
}

impl OperationKey {
  pub fn new(method: Method, path: impl Into<String>) -> Self {
    Self {
      method,
      path: path.into(),
    }
  }
}

impl fmt::Display for OperationKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.method, self.path)
  }
}

impl FromStr for OperationKey {
  type Err = GeneratorError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || GeneratorError::InvalidOperationKey { key: s.to_string() };
    let (method, path) = s.trim().split_once(char::is_whitespace).ok_or_else(invalid)?;
    let path = path.trim();
    if !path.starts_with('/') {
      return Err(invalid());
    }
    let method = Method::from_str(&method.to_ascii_uppercase()).map_err(|_| invalid())?;
    Ok(Self::new(method, path))
  }
}

#[derive(Debug, Clone)]
pub struct RewriteRule {
  pattern: Regex,
  replacement: String,
}

/// Ordered `pattern -> replacement` rules. Only the first matching rule applies, once.
#[derive(Debug, Clone, Default)]
pub struct RewriteRules(Vec<RewriteRule>);

impl RewriteRules {
  pub fn parse<P, R>(entries: impl IntoIterator<Item = (P, R)>) -> Result<Self, GeneratorError>
  where
    P: AsRef<str>,
    R: Into<String>,
  {
    entries
      .into_iter()
      .map(|(pattern, replacement)| {
        let pattern = pattern.as_ref();
        let regex = Regex::new(pattern).map_err(|source| GeneratorError::InvalidPattern {
          pattern: pattern.to_string(),
          source,
        })?;
        Ok(RewriteRule {
          pattern: regex,
          replacement: replacement.into(),
        })
      })
      .collect::<Result<Vec<_>, _>>()
      .map(Self)
  }

  /// `$1`-style capture references in the replacement are expanded.
  pub fn apply<'p>(&self, path: &'p str) -> Cow<'p, str> {
    self
      .0
      .iter()
      .find(|rule| rule.pattern.is_match(path))
      .map_or(Cow::Borrowed(path), |rule| {
        rule.pattern.replace(path, rule.replacement.as_str())
      })
  }
}

/// Splits `KEY=VALUE` on the first `=`.
pub fn parse_assignment<'e>(kind: &'static str, entry: &'e str) -> Result<(&'e str, &'e str), GeneratorError> {
  entry
    .split_once('=')
    .filter(|(key, _)| !key.trim().is_empty())
    .ok_or_else(|| GeneratorError::InvalidAssignment {
      kind,
      entry: entry.to_string(),
    })
}

#[derive(Debug, Clone, bon::Builder)]
pub struct GeneratorOptions {
  #[builder(default)]
  pub filter: OperationFilter,
  #[builder(default)]
  pub operation_id_overrides: HashMap<OperationKey, String>,
  #[builder(default)]
  pub rewrite_rules: RewriteRules,
  #[builder(default = DEFAULT_HTTP_CLIENT_MODULE.to_string(), into)]
  pub http_client_module: String,
  #[builder(default = DEFAULT_DEFINITIONS_MODULE.to_string(), into)]
  pub definitions_module: String,
}

impl Default for GeneratorOptions {
  fn default() -> Self {
    Self::builder().build()
  }
}
