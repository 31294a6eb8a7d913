use std::collections::BTreeSet;

use crate::{generator::metrics::GenerationWarning, swagger::Document};

/// Per-run state threaded through every conversion step.
pub(crate) struct GenerationContext<'a> {
  pub(crate) document: &'a Document,
  visited: BTreeSet<String>,
  warnings: Vec<GenerationWarning>,
}

impl<'a> GenerationContext<'a> {
  pub(crate) fn new(document: &'a Document) -> Self {
    Self {
      document,
      visited: BTreeSet::new(),
      warnings: Vec::new(),
    }
  }

  /// Marks `ref_path` as being resolved. Returns `false` when that already happened in this run.
  pub(crate) fn begin_resolution(&mut self, ref_path: &str) -> bool {
    self.visited.insert(ref_path.to_string())
  }

  pub(crate) fn visited(&self) -> &BTreeSet<String> {
    &self.visited
  }

  pub(crate) fn warn(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }

  pub(crate) fn take_warnings(&mut self) -> Vec<GenerationWarning> {
    std::mem::take(&mut self.warnings)
  }
}
