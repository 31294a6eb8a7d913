use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub operations_generated: usize,
  pub operations_filtered: usize,
  pub operations_skipped: usize,
  pub definitions_generated: usize,
  pub orphaned_definitions_count: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  pub fn record_operations(&mut self, count: usize) {
    self.operations_generated += count;
  }

  pub fn record_filtered_operation(&mut self) {
    self.operations_filtered += 1;
  }

  pub fn record_definitions(&mut self, count: usize) {
    self.definitions_generated += count;
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  pub fn record_orphaned_definitions(&mut self, count: usize) {
    self.orphaned_definitions_count += count;
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    for warning in warnings {
      if warning.is_skipped_item() {
        self.operations_skipped += 1;
      }
      self.warnings.push(warning);
    }
  }
}

/// A recoverable condition met during generation. Operation-scoped variants carry a `METHOD /path` label.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "[{operation}] no operationId, operation skipped")]
  MissingOperationId { operation: String },
  #[strum(to_string = "[{operation}] '{name}' is already generated by an earlier operation, operation skipped")]
  DuplicateOperation { operation: String, name: String },
  #[strum(to_string = "[{operation}] {count} body parameters declared, keeping '{kept}'")]
  MultipleBodyParameters {
    operation: String,
    count: usize,
    kept: String,
  },
  #[strum(to_string = "[{operation}] path placeholder '{name}' has no matching path parameter")]
  UndeclaredPathParameter { operation: String, name: String },
  #[strum(to_string = "[{operation}] collectionFormat '{format}' of '{parameter}' is not supported, sending the raw value")]
  UnsupportedCollectionFormat {
    operation: String,
    parameter: String,
    format: String,
  },
  #[strum(to_string = "Reference '{ref_path}' does not resolve")]
  DanglingReference { ref_path: String },
  #[strum(to_string = "Unsupported schema type '{type_token}', using 'any'")]
  UnsupportedType { type_token: String },
  #[strum(to_string = "'{second}' and '{first}' both name type '{name}', keeping '{first}'")]
  NameCollision {
    name: String,
    first: String,
    second: String,
  },
}

impl GenerationWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(
      self,
      Self::MissingOperationId { .. } | Self::DuplicateOperation { .. }
    )
  }
}
