use std::collections::{BTreeMap, BTreeSet};

use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use crate::{
  generator::{
    ast::{Documentation, TypeAliasDecl, TypeNode},
    context::GenerationContext,
    converter::{schema_documentation, synthesize},
    metrics::GenerationWarning,
    resolver::{self, DEFINITIONS_PREFIX},
  },
  naming::identifiers::type_name_from_ref,
};

/// Definitions reachable from a set of root refs, plus the ref graph between them.
#[derive(Debug, Default)]
pub(crate) struct SchemaRegistry {
  aliases: Vec<TypeAliasDecl>,
  dependencies: BTreeMap<String, BTreeSet<String>>,
}

impl SchemaRegistry {
  /// Walks the transitive closure of `roots` depth-first.
  ///
  /// A ref is expanded at most once per run; a ref that does not resolve still yields an `unknown` alias.
  pub(crate) fn build(roots: &BTreeSet<String>, context: &mut GenerationContext) -> Self {
    let mut registry = Self::default();
    let mut stack: Vec<String> = roots.iter().rev().cloned().collect();

    while let Some(ref_path) = stack.pop() {
      if !context.begin_resolution(&ref_path) {
        continue;
      }

      let name = type_name_from_ref(&ref_path);
      let Some(schema) = resolver::resolve_schema(context.document, &ref_path) else {
        context.warn(GenerationWarning::DanglingReference {
          ref_path: ref_path.clone(),
        });
        registry.dependencies.entry(ref_path.clone()).or_default();
        registry.aliases.push(TypeAliasDecl {
          name,
          ref_path,
          type_node: TypeNode::Unknown,
          docs: Documentation::default(),
        });
        continue;
      };

      let docs = schema_documentation(&schema);
      let synthesized = synthesize(Some(&schema), context);

      stack.extend(synthesized.dependencies.iter().rev().cloned());
      registry
        .dependencies
        .insert(ref_path.clone(), synthesized.dependencies);
      registry.aliases.push(TypeAliasDecl {
        name,
        ref_path,
        type_node: synthesized.node,
        docs,
      });
    }

    registry
  }

  pub(crate) fn into_aliases(self) -> Vec<TypeAliasDecl> {
    self.aliases
  }

  /// Strongly connected ref groups, including self-references.
  pub(crate) fn detect_cycles(&self) -> Vec<Vec<String>> {
    let mut graph = DiGraphMap::<&str, ()>::new();
    for (node, deps) in &self.dependencies {
      graph.add_node(node.as_str());
      for dep in deps {
        graph.add_edge(node.as_str(), dep.as_str(), ());
      }
    }

    let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
      .into_iter()
      .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
      .map(|scc| {
        let mut members: Vec<String> = scc.into_iter().map(String::from).collect();
        members.sort();
        members
      })
      .collect();
    cycles.sort();
    cycles
  }

  /// Number of `#/definitions` entries the walk never reached.
  pub(crate) fn orphaned_count(context: &GenerationContext) -> usize {
    context
      .document
      .definitions
      .keys()
      .filter(|name| {
        let ref_path = format!("{DEFINITIONS_PREFIX}{}", name.replace('~', "~0").replace('/', "~1"));
        !context.visited().contains(&ref_path)
      })
      .count()
  }
}
