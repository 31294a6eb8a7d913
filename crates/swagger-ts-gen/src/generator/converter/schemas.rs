use std::collections::BTreeSet;

use serde_json::Value;

use crate::{
  generator::{
    ast::{Documentation, LiteralType, PropertySignature, TypeNode, TypeReference},
    context::GenerationContext,
    metrics::GenerationWarning,
  },
  naming::identifiers::type_name_from_ref,
  swagger::{AdditionalProperties, Schema},
};

/// The synthesized type along with every `$ref` it mentions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Synthesized {
  pub(crate) node: TypeNode,
  pub(crate) dependencies: BTreeSet<String>,
}

/// Dispatch classes for a schema node, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum SchemaShape<'s> {
  Missing,
  Reference(&'s str),
  Boolean,
  String(&'s [Value]),
  Number(&'s [Value]),
  Object(&'s Schema),
  Array(Option<&'s Schema>),
  /// No usable `type`. Carries the offending token when one was given.
  Any(Option<&'s Value>),
}

impl<'s> SchemaShape<'s> {
  pub(crate) fn classify(schema: Option<&'s Schema>) -> Self {
    let Some(schema) = schema else {
      return Self::Missing;
    };

    if let Some(ref_path) = schema.ref_path.as_deref() {
      return Self::Reference(ref_path);
    }

    match schema.schema_type.as_ref() {
      None => Self::Any(None),
      Some(Value::String(token)) => match token.as_str() {
        "boolean" => Self::Boolean,
        "string" => Self::String(&schema.enum_values),
        "number" | "integer" => Self::Number(&schema.enum_values),
        "object" => Self::Object(schema),
        "array" => Self::Array(schema.items.as_deref()),
        "file" => Self::Any(None),
        _ => Self::Any(schema.schema_type.as_ref()),
      },
      Some(other) => Self::Any(Some(other)),
    }
  }
}

pub(crate) fn synthesize(schema: Option<&Schema>, context: &mut GenerationContext) -> Synthesized {
  let node = synthesize_node(schema, context);
  let dependencies = node.dependencies();
  Synthesized { node, dependencies }
}

pub(crate) fn synthesize_node(schema: Option<&Schema>, context: &mut GenerationContext) -> TypeNode {
  match SchemaShape::classify(schema) {
    SchemaShape::Missing => TypeNode::Unknown,
    SchemaShape::Reference(ref_path) => TypeNode::Reference(TypeReference {
      name: type_name_from_ref(ref_path),
      target: ref_path.to_string(),
    }),
    SchemaShape::Boolean => TypeNode::Boolean,
    SchemaShape::String(values) if !values.is_empty() => literal_union(values),
    SchemaShape::String(_) => TypeNode::String,
    SchemaShape::Number(values) if !values.is_empty() => literal_union(values),
    SchemaShape::Number(_) => TypeNode::Number,
    SchemaShape::Object(schema) => object_type(schema, context),
    SchemaShape::Array(items) => TypeNode::array_of(match items {
      Some(items) => synthesize_node(Some(items), context),
      None => TypeNode::Any,
    }),
    SchemaShape::Any(token) => {
      if let Some(token) = token {
        let type_token = match token {
          Value::String(s) => s.clone(),
          other => other.to_string(),
        };
        context.warn(GenerationWarning::UnsupportedType { type_token });
      }
      TypeNode::Any
    }
  }
}

/// Title then description, one per line.
pub(crate) fn schema_documentation(schema: &Schema) -> Documentation {
  Documentation::from_parts([schema.title.as_deref(), schema.description.as_deref()])
}

fn literal_union(values: &[Value]) -> TypeNode {
  let mut members: Vec<TypeNode> = Vec::with_capacity(values.len());
  for value in values {
    let member = match value {
      Value::String(s) => TypeNode::Literal(LiteralType::String(s.clone())),
      Value::Number(n) => TypeNode::Literal(LiteralType::Number(n.to_string())),
      Value::Bool(b) => TypeNode::Literal(LiteralType::Boolean(*b)),
      Value::Null | Value::Array(_) | Value::Object(_) => TypeNode::EmptyObject,
    };
    if !members.contains(&member) {
      members.push(member);
    }
  }

  if members.len() == 1 {
    members.remove(0)
  } else {
    TypeNode::Union(members)
  }
}

fn object_type(schema: &Schema, context: &mut GenerationContext) -> TypeNode {
  if let Some(AdditionalProperties::Schema(additional)) = &schema.additional_properties
    && !additional.is_empty()
  {
    return TypeNode::Record(Box::new(synthesize_node(Some(additional), context)));
  }

  let Some(properties) = &schema.properties else {
    return TypeNode::Record(Box::new(TypeNode::Any));
  };

  let fields = properties
    .iter()
    .map(|(name, property)| PropertySignature {
      name: name.clone(),
      optional: !schema.required.contains(name),
      type_node: synthesize_node(Some(property), context),
      docs: schema_documentation(property),
    })
    .collect();

  TypeNode::Object(fields)
}
