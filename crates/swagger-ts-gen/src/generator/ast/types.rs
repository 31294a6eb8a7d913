use std::collections::BTreeSet;

use super::Documentation;

/// A TypeScript type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
  Any,
  Unknown,
  Void,
  Boolean,
  String,
  Number,
  Literal(LiteralType),
  /// `{}`, an object with no known shape.
  EmptyObject,
  Union(Vec<TypeNode>),
  Array(Box<TypeNode>),
  /// `Record<string, T>`.
  Record(Box<TypeNode>),
  Object(Vec<PropertySignature>),
  Reference(TypeReference),
  Promise(Box<TypeNode>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralType {
  String(String),
  /// Kept in its source spelling.
  Number(String),
  Boolean(bool),
}

/// A named type together with the `$ref` it was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
  pub name: String,
  pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySignature {
  pub name: String,
  pub optional: bool,
  pub type_node: TypeNode,
  pub docs: Documentation,
}

impl TypeNode {
  #[must_use]
  pub fn array_of(element: TypeNode) -> Self {
    Self::Array(Box::new(element))
  }

  #[must_use]
  pub fn promise_of(inner: TypeNode) -> Self {
    Self::Promise(Box::new(inner))
  }

  /// Every `$ref` target mentioned anywhere inside this type.
  #[must_use]
  pub fn dependencies(&self) -> BTreeSet<String> {
    let mut refs = BTreeSet::new();
    self.collect_dependencies(&mut refs);
    refs
  }

  fn collect_dependencies(&self, refs: &mut BTreeSet<String>) {
    match self {
      Self::Reference(reference) => {
        refs.insert(reference.target.clone());
      }
      Self::Union(members) => members.iter().for_each(|m| m.collect_dependencies(refs)),
      Self::Array(inner) | Self::Record(inner) | Self::Promise(inner) => inner.collect_dependencies(refs),
      Self::Object(properties) => properties.iter().for_each(|p| p.type_node.collect_dependencies(refs)),
      Self::Any
      | Self::Unknown
      | Self::Void
      | Self::Boolean
      | Self::String
      | Self::Number
      | Self::Literal(_)
      | Self::EmptyObject => {}
    }
  }
}
