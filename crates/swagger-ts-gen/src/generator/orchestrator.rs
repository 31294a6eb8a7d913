//! Orchestration for the Swagger 2.0 to TypeScript generation pipeline.
//!
//! The `Orchestrator` owns the parsed document and the generation options, and exposes the whole
//! pipeline (filtering, operation emission, definition closure, rendering) behind a few calls.
//!
//! ## Usage
//!
//! ```no_run
//! # fn example() -> anyhow::Result<()> {
//! let document = Document::from_json(&std::fs::read_to_string("swagger.json")?)?;
//! let orchestrator = Orchestrator::new(document, GeneratorOptions::default());
//! let output = orchestrator.generate_with_header("swagger.json");
//!
//! std::fs::write("api.ts", output.api_code)?;
//! std::fs::write("definitions.ts", output.definitions_code)?;
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeSet, HashSet};

use http::Method;

use crate::{
  generator::{
    ast::{DefinitionsUnit, FunctionDecl, ImportDecl, OperationsUnit, TypeAliasDecl},
    codegen,
    context::GenerationContext,
    converter::{OperationEmitter, operations::HTTP_CLIENT_IDENT, url_builder::QS_IDENT},
    metrics::{GenerationStats, GenerationWarning},
    options::{GeneratorOptions, OperationKey},
    schema_registry::SchemaRegistry,
  },
  naming::identifiers::type_name_from_ref,
  swagger::Document,
};

/// Module specifier of the query-string serializer imported by operations with query parameters.
const QS_MODULE: &str = "qs";

pub struct Orchestrator {
  document: Document,
  options: GeneratorOptions,
}

/// Metadata about the document for file header generation.
#[derive(Debug, Clone)]
pub struct CodeMetadata {
  pub title: String,
  pub version: String,
  pub description: Option<String>,
}

/// The generated units before rendering.
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
  pub operations: OperationsUnit,
  pub definitions: DefinitionsUnit,
  pub stats: GenerationStats,
}

/// Rendered TypeScript sources, each starting with the auto-generated header.
#[derive(Debug, Clone)]
pub struct GeneratedFinalOutput {
  pub api_code: String,
  pub definitions_code: String,
  pub stats: GenerationStats,
}

/// One row of `list operations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSummary {
  pub method: Method,
  pub path: String,
  pub name: Option<String>,
  pub tags: Vec<String>,
  pub included: bool,
}

impl Orchestrator {
  pub fn new(document: Document, options: GeneratorOptions) -> Self {
    Self { document, options }
  }

  pub fn metadata(&self) -> CodeMetadata {
    CodeMetadata {
      title: self.document.info.title.clone(),
      version: self.document.info.version.clone(),
      description: self.document.info.description.clone(),
    }
  }

  /// Runs the pipeline with a fresh context:
  /// 1. Emits one function per operation that passes the filter, in document order
  /// 2. Walks the ref closure of the emitted signatures
  /// 3. Aggregates imports and statistics
  pub fn generate(&self) -> GeneratedOutput {
    let mut context = GenerationContext::new(&self.document);
    let mut stats = GenerationStats::default();

    let functions = self.emit_operations(&mut context, &mut stats);

    let roots: BTreeSet<String> = functions.iter().flat_map(FunctionDecl::dependencies).collect();
    let registry = SchemaRegistry::build(&roots, &mut context);
    stats.record_cycles(registry.detect_cycles());
    stats.record_orphaned_definitions(SchemaRegistry::orphaned_count(&context));

    let aliases = deduplicate_aliases(registry.into_aliases(), &mut context);
    let imports = self.operation_imports(&functions, &roots);

    stats.record_operations(functions.len());
    stats.record_definitions(aliases.len());
    stats.record_warnings(context.take_warnings());

    GeneratedOutput {
      operations: OperationsUnit { imports, functions },
      definitions: DefinitionsUnit { aliases },
      stats,
    }
  }

  pub fn generate_with_header(&self, source_path: &str) -> GeneratedFinalOutput {
    let GeneratedOutput {
      operations,
      definitions,
      stats,
    } = self.generate();
    let header = codegen::file_header(&self.metadata(), source_path);

    GeneratedFinalOutput {
      api_code: format!("{header}{}", codegen::render_operations(&operations)),
      definitions_code: format!("{header}{}", codegen::render_definitions(&definitions)),
      stats,
    }
  }

  /// Every operation in document order, with its exported name and whether the filter keeps it.
  pub fn list_operations(&self) -> Vec<OperationSummary> {
    let emitter = &OperationEmitter::new(self.document.base_path.as_deref(), &self.options);
    self
      .document
      .paths
      .iter()
      .flat_map(|(path, item)| {
        item.operations.iter().map(move |(method, operation)| OperationSummary {
          method: method.clone(),
          path: path.clone(),
          name: emitter.operation_name(&OperationKey::new(method.clone(), path), operation),
          tags: operation.tags.clone(),
          included: self.options.filter.accepts(path, operation),
        })
      })
      .collect()
  }

  fn emit_operations(&self, context: &mut GenerationContext, stats: &mut GenerationStats) -> Vec<FunctionDecl> {
    let emitter = OperationEmitter::new(self.document.base_path.as_deref(), &self.options);
    let mut functions: Vec<FunctionDecl> = Vec::new();
    let mut used_names = HashSet::new();

    for (path, item) in &self.document.paths {
      for (method, operation) in &item.operations {
        if !self.options.filter.accepts(path, operation) {
          stats.record_filtered_operation();
          continue;
        }

        let Some(function) = emitter.emit(method, path, item, operation, context) else {
          continue;
        };

        if !used_names.insert(function.name.clone()) {
          context.warn(GenerationWarning::DuplicateOperation {
            operation: OperationKey::new(method.clone(), path).to_string(),
            name: function.name,
          });
          continue;
        }

        functions.push(function);
      }
    }

    functions
  }

  fn operation_imports(&self, functions: &[FunctionDecl], roots: &BTreeSet<String>) -> Vec<ImportDecl> {
    let mut imports = vec![ImportDecl::Default {
      name: HTTP_CLIENT_IDENT.to_string(),
      module: self.options.http_client_module.clone(),
    }];

    if functions.iter().any(|function| function.references(QS_IDENT)) {
      imports.push(ImportDecl::Default {
        name: QS_IDENT.to_string(),
        module: QS_MODULE.to_string(),
      });
    }

    let type_names: BTreeSet<String> = roots.iter().map(|ref_path| type_name_from_ref(ref_path)).collect();
    if !type_names.is_empty() {
      imports.push(ImportDecl::TypeOnly {
        names: type_names.into_iter().collect(),
        module: self.options.definitions_module.clone(),
      });
    }

    imports
  }
}

/// Keeps the first alias per identifier (in discovery order), then orders by identifier.
fn deduplicate_aliases(aliases: Vec<TypeAliasDecl>, context: &mut GenerationContext) -> Vec<TypeAliasDecl> {
  let mut kept: Vec<TypeAliasDecl> = Vec::with_capacity(aliases.len());

  for alias in aliases {
    if let Some(first) = kept.iter().find(|existing| existing.name == alias.name) {
      context.warn(GenerationWarning::NameCollision {
        name: alias.name.clone(),
        first: first.ref_path.clone(),
        second: alias.ref_path,
      });
      continue;
    }
    kept.push(alias);
  }

  kept.sort_by(|a, b| a.name.cmp(&b.name));
  kept
}
