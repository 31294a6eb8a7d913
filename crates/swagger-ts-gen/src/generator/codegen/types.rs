use std::fmt::{self, Write};

use super::{INDENT, docs::write_doc_block, quote_key, string_literal};
use crate::generator::ast::{LiteralType, TypeNode};

impl fmt::Display for LiteralType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::String(value) => f.write_str(&string_literal(value)),
      Self::Number(value) => f.write_str(value),
      Self::Boolean(value) => write!(f, "{value}"),
    }
  }
}

impl fmt::Display for TypeNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut out = String::new();
    write_type(&mut out, self, 0)?;
    f.write_str(&out)
  }
}

/// Writes `node` as it appears at nesting depth `depth`. Only object bodies span lines.
pub(super) fn write_type(out: &mut String, node: &TypeNode, depth: usize) -> fmt::Result {
  match node {
    TypeNode::Any => out.push_str("any"),
    TypeNode::Unknown => out.push_str("unknown"),
    TypeNode::Void => out.push_str("void"),
    TypeNode::Boolean => out.push_str("boolean"),
    TypeNode::String => out.push_str("string"),
    TypeNode::Number => out.push_str("number"),
    TypeNode::Literal(literal) => write!(out, "{literal}")?,
    TypeNode::EmptyObject => out.push_str("{}"),
    TypeNode::Union(members) => {
      for (i, member) in members.iter().enumerate() {
        if i > 0 {
          out.push_str(" | ");
        }
        write_type(out, member, depth)?;
      }
    }
    TypeNode::Array(element) => {
      let needs_parens = matches!(element.as_ref(), TypeNode::Union(members) if members.len() > 1);
      if needs_parens {
        out.push('(');
      }
      write_type(out, element, depth)?;
      if needs_parens {
        out.push(')');
      }
      out.push_str("[]");
    }
    TypeNode::Record(value) => {
      out.push_str("Record<string, ");
      write_type(out, value, depth)?;
      out.push('>');
    }
    TypeNode::Promise(inner) => {
      out.push_str("Promise<");
      write_type(out, inner, depth)?;
      out.push('>');
    }
    TypeNode::Reference(reference) => out.push_str(&reference.name),
    TypeNode::Object(properties) if properties.is_empty() => out.push_str("{}"),
    TypeNode::Object(properties) => {
      let inner = INDENT.repeat(depth + 1);
      out.push_str("{\n");
      for property in properties {
        write_doc_block(out, &inner, property.docs.lines(), &[]);
        out.push_str(&inner);
        out.push_str(&quote_key(&property.name));
        if property.optional {
          out.push('?');
        }
        out.push_str(": ");
        write_type(out, &property.type_node, depth + 1)?;
        out.push_str(";\n");
      }
      out.push_str(&INDENT.repeat(depth));
      out.push('}');
    }
  }
  Ok(())
}
