use std::{fmt, sync::Arc};

use regex::Regex;

use crate::{generator::options::GeneratorError, swagger::Operation};

pub type FilterPredicate = dyn Fn(&str, &Operation) -> bool + Send + Sync;

/// One include or exclude criterion.
#[derive(Clone)]
pub enum Filter {
  /// Comma-separated values. Paths match by substring, tags by membership.
  List(Vec<String>),
  Pattern(Regex),
  Predicate(Arc<FilterPredicate>),
}

impl fmt::Debug for Filter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::List(values) => f.debug_tuple("List").field(values).finish(),
      Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
      Self::Predicate(_) => f.write_str("Predicate(..)"),
    }
  }
}

impl Filter {
  /// `/pattern/` becomes a regex, anything else a comma-separated list.
  pub fn parse(raw: &str) -> Result<Self, GeneratorError> {
    if raw.len() >= 2
      && let Some(pattern) = raw.strip_prefix('/').and_then(|rest| rest.strip_suffix('/'))
    {
      return Self::pattern(pattern);
    }
    Ok(Self::list(raw.split(',')))
  }

  pub fn list<S: AsRef<str>>(values: impl IntoIterator<Item = S>) -> Self {
    Self::List(
      values
        .into_iter()
        .map(|value| value.as_ref().trim().to_string())
        .filter(|value| !value.is_empty())
        .collect(),
    )
  }

  pub fn pattern(pattern: &str) -> Result<Self, GeneratorError> {
    Regex::new(pattern)
      .map(Self::Pattern)
      .map_err(|source| GeneratorError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
      })
  }

  pub fn predicate(predicate: impl Fn(&str, &Operation) -> bool + Send + Sync + 'static) -> Self {
    Self::Predicate(Arc::new(predicate))
  }

  fn matches_path(&self, path: &str, operation: &Operation) -> bool {
    match self {
      Self::List(values) => values.iter().any(|value| path.contains(value.as_str())),
      Self::Pattern(regex) => regex.is_match(path),
      Self::Predicate(predicate) => predicate(path, operation),
    }
  }

  fn matches_tags(&self, path: &str, operation: &Operation) -> bool {
    match self {
      Self::List(values) => operation.tags.iter().any(|tag| values.contains(tag)),
      Self::Pattern(regex) => operation.tags.iter().any(|tag| regex.is_match(tag)),
      Self::Predicate(predicate) => predicate(path, operation),
    }
  }
}

/// Decides which operations take part in generation.
///
/// An operation survives iff it is included (by path or by tag) and not excluded (by path or by tag).
/// With no include filter at all everything is included; when only one include filter is given it alone
/// decides inclusion.
#[derive(Debug, Clone, Default)]
pub struct OperationFilter {
  pub include_path: Option<Filter>,
  pub include_tags: Option<Filter>,
  pub exclude_path: Option<Filter>,
  pub exclude_tags: Option<Filter>,
}

impl OperationFilter {
  pub fn accepts(&self, path: &str, operation: &Operation) -> bool {
    let included = match (&self.include_path, &self.include_tags) {
      (None, None) => true,
      (include_path, include_tags) => {
        include_path.as_ref().is_some_and(|f| f.matches_path(path, operation))
          || include_tags.as_ref().is_some_and(|f| f.matches_tags(path, operation))
      }
    };

    let excluded = self.exclude_path.as_ref().is_some_and(|f| f.matches_path(path, operation))
      || self.exclude_tags.as_ref().is_some_and(|f| f.matches_tags(path, operation));

    included && !excluded
  }
}
