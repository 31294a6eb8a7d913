use std::fmt;

use super::{quote_key, string_literal};
use crate::generator::ast::{Expr, Statement};

/// Escapes raw text for a template literal chunk.
pub(super) fn template_text(raw: &str) -> String {
  raw.replace('\\', "\\\\").replace('`', "\\`").replace("${", "\\${")
}

impl fmt::Display for Expr {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Identifier(name) => f.write_str(name),
      Self::StringLiteral(value) => f.write_str(&string_literal(value)),
      Self::Template(template) => {
        write!(f, "`{}", template_text(&template.head))?;
        for span in &template.spans {
          write!(f, "${{{}}}{}", span.expression, template_text(&span.literal))?;
        }
        f.write_str("`")
      }
      Self::Add(lhs, rhs) => write!(f, "{lhs} + {rhs}"),
      Self::Call { callee, arguments } => {
        write!(f, "{callee}(")?;
        for (i, argument) in arguments.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{argument}")?;
        }
        f.write_str(")")
      }
      Self::Member {
        object,
        property,
        optional,
      } => {
        let accessor = if *optional { "?." } else { "." };
        write!(f, "{object}{accessor}{property}")
      }
      Self::Object(properties) if properties.is_empty() => f.write_str("{}"),
      Self::Object(properties) => {
        f.write_str("{ ")?;
        for (i, property) in properties.iter().enumerate() {
          if i > 0 {
            f.write_str(", ")?;
          }
          write!(f, "{}: {}", quote_key(&property.key), property.value)?;
        }
        f.write_str(" }")
      }
    }
  }
}

impl fmt::Display for Statement {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Return(expr) => write!(f, "return {expr};"),
    }
  }
}
