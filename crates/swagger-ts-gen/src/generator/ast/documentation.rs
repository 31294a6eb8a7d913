/// Free text attached to a declaration, one entry per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Documentation {
  lines: Vec<String>,
}

impl Documentation {
  #[must_use]
  pub fn from_raw(input: &str) -> Self {
    let formatted = input.replace("\\n", "\n");
    Self {
      lines: formatted.lines().map(|line| line.trim_end().to_string()).collect(),
    }
  }

  /// Joins the present parts with a newline, skipping empty ones.
  #[must_use]
  pub fn from_parts<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> Self {
    let joined = parts
      .into_iter()
      .flatten()
      .filter(|part| !part.trim().is_empty())
      .collect::<Vec<_>>()
      .join("\n");
    Self::from_raw(&joined)
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  #[must_use]
  pub fn lines(&self) -> &[String] {
    &self.lines
  }
}

/// A JSDoc block tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocTag {
  Param { name: String, description: Option<String> },
  Deprecated,
  Returns(Option<String>),
}

/// Body text followed by block tags, rendered as one `/** ... */` comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsDoc {
  pub body: Documentation,
  pub tags: Vec<DocTag>,
}
