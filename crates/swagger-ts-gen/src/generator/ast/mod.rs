mod documentation;
mod expressions;
mod types;

use std::collections::BTreeSet;

pub use documentation::{DocTag, Documentation, JsDoc};
pub use expressions::{Expr, ObjectProperty, Statement, TemplateLiteral, TemplateSpan};
use http::Method;
pub use types::{LiteralType, PropertySignature, TypeNode, TypeReference};

use crate::swagger::{CollectionFormat, ParameterIn};

/// One formal parameter of a generated operation function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDecl {
  /// The binding name inside the generated function.
  pub name: String,
  /// The wire name as written in the document.
  pub original_name: String,
  pub location: ParameterIn,
  pub type_node: TypeNode,
  pub optional: bool,
  pub initializer: Option<LiteralType>,
  pub description: Option<String>,
  pub collection_format: Option<CollectionFormat>,
}

impl ParameterDecl {
  /// Ordering weight: required parameters first, then defaulted ones, then optional ones.
  #[must_use]
  pub fn weight(&self) -> u8 {
    u8::from(self.initializer.is_some()) + if self.optional { 2 } else { 0 }
  }
}

/// An exported operation: `export const name = (params): Promise<T> => { body };`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
  pub name: String,
  pub method: Method,
  pub path: String,
  pub parameters: Vec<ParameterDecl>,
  pub return_type: TypeNode,
  pub body: Vec<Statement>,
  pub docs: JsDoc,
}

impl FunctionDecl {
  /// `$ref` targets mentioned by the signature.
  #[must_use]
  pub fn dependencies(&self) -> BTreeSet<String> {
    let mut refs = self.return_type.dependencies();
    for param in &self.parameters {
      refs.extend(param.type_node.dependencies());
    }
    refs
  }

  #[must_use]
  pub fn references(&self, name: &str) -> bool {
    self.body.iter().any(|statement| statement.references(name))
  }
}

/// `export type Name = T;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAliasDecl {
  pub name: String,
  pub ref_path: String,
  pub type_node: TypeNode,
  pub docs: Documentation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportDecl {
  /// `import name from 'module';`
  Default { name: String, module: String },
  /// `import type { A, B } from 'module';`
  TypeOnly { names: Vec<String>, module: String },
}

/// The module that exports every generated operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationsUnit {
  pub imports: Vec<ImportDecl>,
  pub functions: Vec<FunctionDecl>,
}

/// The module that exports every reachable definition as a type alias.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionsUnit {
  pub aliases: Vec<TypeAliasDecl>,
}
