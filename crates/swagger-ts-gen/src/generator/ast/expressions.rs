/// The small slice of TypeScript expressions an operation body needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
  Identifier(String),
  StringLiteral(String),
  Template(TemplateLiteral),
  Add(Box<Expr>, Box<Expr>),
  Call { callee: Box<Expr>, arguments: Vec<Expr> },
  Member { object: Box<Expr>, property: String, optional: bool },
  Object(Vec<ObjectProperty>),
}

/// `` `head${e1}literal1${e2}literal2` ``
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLiteral {
  pub head: String,
  pub spans: Vec<TemplateSpan>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSpan {
  pub expression: Expr,
  pub literal: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectProperty {
  pub key: String,
  pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
  Return(Expr),
}

impl Expr {
  #[must_use]
  pub fn ident(name: impl Into<String>) -> Self {
    Self::Identifier(name.into())
  }

  #[must_use]
  pub fn string(value: impl Into<String>) -> Self {
    Self::StringLiteral(value.into())
  }

  #[must_use]
  pub fn add(self, rhs: Expr) -> Self {
    Self::Add(Box::new(self), Box::new(rhs))
  }

  #[must_use]
  pub fn member(self, property: impl Into<String>) -> Self {
    Self::Member {
      object: Box::new(self),
      property: property.into(),
      optional: false,
    }
  }

  #[must_use]
  pub fn optional_member(self, property: impl Into<String>) -> Self {
    Self::Member {
      object: Box::new(self),
      property: property.into(),
      optional: true,
    }
  }

  #[must_use]
  pub fn call(self, arguments: Vec<Expr>) -> Self {
    Self::Call {
      callee: Box::new(self),
      arguments,
    }
  }

  /// Whether the identifier `name` is read anywhere inside this expression.
  #[must_use]
  pub fn references(&self, name: &str) -> bool {
    match self {
      Self::Identifier(ident) => ident == name,
      Self::StringLiteral(_) => false,
      Self::Template(template) => template.spans.iter().any(|span| span.expression.references(name)),
      Self::Add(lhs, rhs) => lhs.references(name) || rhs.references(name),
      Self::Call { callee, arguments } => callee.references(name) || arguments.iter().any(|a| a.references(name)),
      Self::Member { object, .. } => object.references(name),
      Self::Object(properties) => properties.iter().any(|p| p.value.references(name)),
    }
  }
}

impl ObjectProperty {
  #[must_use]
  pub fn new(key: impl Into<String>, value: Expr) -> Self {
    Self { key: key.into(), value }
  }
}

impl Statement {
  #[must_use]
  pub fn references(&self, name: &str) -> bool {
    match self {
      Self::Return(expr) => expr.references(name),
    }
  }
}
