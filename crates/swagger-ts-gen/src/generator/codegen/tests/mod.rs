use http::Method;

use super::{expressions::template_text, file_header, render_alias, render_definitions, render_function, render_operations};
use crate::{
  generator::{
    ast::{
      DefinitionsUnit, DocTag, Documentation, Expr, FunctionDecl, ImportDecl, JsDoc, LiteralType, OperationsUnit,
      ParameterDecl, PropertySignature, Statement, TemplateLiteral, TemplateSpan, TypeAliasDecl, TypeNode,
      TypeReference,
    },
    orchestrator::CodeMetadata,
  },
  swagger::ParameterIn,
};

fn field(name: &str, optional: bool, type_node: TypeNode) -> PropertySignature {
  PropertySignature {
    name: name.to_string(),
    optional,
    type_node,
    docs: Documentation::default(),
  }
}

fn reference(name: &str) -> TypeNode {
  TypeNode::Reference(TypeReference {
    name: name.to_string(),
    target: format!("#/definitions/{name}"),
  })
}

fn literal(value: &str) -> TypeNode {
  TypeNode::Literal(LiteralType::String(value.to_string()))
}

fn param(name: &str, type_node: TypeNode, optional: bool, initializer: Option<LiteralType>) -> ParameterDecl {
  ParameterDecl {
    name: name.to_string(),
    original_name: name.to_string(),
    location: ParameterIn::Query,
    type_node,
    optional,
    initializer,
    description: None,
    collection_format: None,
  }
}

fn alias(name: &str, type_node: TypeNode, docs: Documentation) -> TypeAliasDecl {
  TypeAliasDecl {
    name: name.to_string(),
    ref_path: format!("#/definitions/{name}"),
    type_node,
    docs,
  }
}

#[test]
fn test_string_literals_are_json_escaped() {
  assert_eq!(LiteralType::String("say \"hi\"\n".to_string()).to_string(), r#""say \"hi\"\n""#);
  assert_eq!(LiteralType::Number("1.5".to_string()).to_string(), "1.5");
  assert_eq!(LiteralType::Boolean(false).to_string(), "false");
}

#[test]
fn test_template_text_escaping() {
  assert_eq!(template_text("a`b"), "a\\`b");
  assert_eq!(template_text("${x}"), "\\${x}");
  assert_eq!(template_text("c:\\dir"), "c:\\\\dir");
  assert_eq!(template_text("$x {y}"), "$x {y}");

  let template = Expr::Template(TemplateLiteral {
    head: "/files/`raw`/".to_string(),
    spans: vec![TemplateSpan {
      expression: Expr::ident("name"),
      literal: "/${v}".to_string(),
    }],
  });
  assert_eq!(template.to_string(), "`/files/\\`raw\\`/${name}/\\${v}`");
}

#[test]
fn test_union_inside_array_is_parenthesized() {
  let union = TypeNode::Union(vec![literal("a"), literal("b")]);
  assert_eq!(TypeNode::array_of(union.clone()).to_string(), r#"("a" | "b")[]"#);
  assert_eq!(union.to_string(), r#""a" | "b""#);
  assert_eq!(TypeNode::array_of(literal("a")).to_string(), r#""a"[]"#);
  assert_eq!(
    TypeNode::Record(Box::new(TypeNode::array_of(TypeNode::Number))).to_string(),
    "Record<string, number[]>"
  );
  assert_eq!(TypeNode::Object(vec![]).to_string(), "{}");
}

#[test]
fn test_object_keys_are_quoted_when_needed_and_nested_objects_indent() {
  let node = TypeNode::Object(vec![
    field("x-rate-limit", true, TypeNode::Number),
    field("$meta", false, TypeNode::Any),
    field(
      "nested",
      false,
      TypeNode::Object(vec![PropertySignature {
        docs: Documentation::from_raw("inner doc"),
        ..field("1st", true, reference("Tag"))
      }]),
    ),
  ]);

  assert_eq!(
    node.to_string(),
    r#"{
  "x-rate-limit"?: number;
  $meta: any;
  nested: {
    /**
     * inner doc
     */
    "1st"?: Tag;
  };
}"#
  );
}

#[test]
fn test_render_tag_definition() {
  let mut out = String::new();
  render_alias(
    &mut out,
    &alias(
      "Tag",
      TypeNode::Object(vec![field("id", true, TypeNode::Number), field("name", true, TypeNode::String)]),
      Documentation::default(),
    ),
  );
  assert_eq!(out, "export type Tag = {\n  id?: number;\n  name?: string;\n};\n");
}

#[test]
fn test_render_definitions() {
  assert_eq!(render_definitions(&DefinitionsUnit::default()), "export {};\n");

  let unit = DefinitionsUnit {
    aliases: vec![
      alias(
        "Order",
        TypeNode::String,
        Documentation::from_parts([Some("Order"), Some("An order for a */ pet")]),
      ),
      alias("Missing", TypeNode::Unknown, Documentation::default()),
    ],
  };
  assert_eq!(
    render_definitions(&unit),
    "/**\n * Order\n * An order for a *\\/ pet\n */\nexport type Order = string;\n\nexport type Missing = unknown;\n"
  );
}

#[test]
fn test_render_function_with_initializers_and_tags() {
  let function = FunctionDecl {
    name: "listPets".to_string(),
    method: Method::GET,
    path: "/pets".to_string(),
    parameters: vec![
      param("limit", TypeNode::Number, false, Some(LiteralType::Number("20".to_string()))),
      param("sort", TypeNode::String, false, Some(LiteralType::String("asc".to_string()))),
      param("tag", TypeNode::String, true, None),
    ],
    return_type: TypeNode::promise_of(TypeNode::array_of(reference("Pet"))),
    body: vec![Statement::Return(Expr::ident("httpClient").member("get").call(vec![Expr::string("/pets")]))],
    docs: JsDoc {
      body: Documentation::default(),
      tags: vec![
        DocTag::Deprecated,
        DocTag::Param {
          name: "limit".to_string(),
          description: Some("page size\nmax 100".to_string()),
        },
        DocTag::Param {
          name: "sort".to_string(),
          description: None,
        },
        DocTag::Returns(None),
      ],
    },
  };

  let mut out = String::new();
  render_function(&mut out, &function);
  assert_eq!(
    out,
    r#"/**
 * @deprecated
 * @param limit page size max 100
 * @param sort
 * @returns
 */
export const listPets = (limit: number = 20, sort: string = "asc", tag?: string): Promise<Pet[]> => {
  return httpClient.get("/pets");
};
"#
  );
}

#[test]
fn test_function_without_docs_has_no_comment() {
  let function = FunctionDecl {
    name: "ping".to_string(),
    method: Method::HEAD,
    path: "/ping".to_string(),
    parameters: vec![],
    return_type: TypeNode::promise_of(TypeNode::Void),
    body: vec![Statement::Return(Expr::ident("httpClient").member("head").call(vec![Expr::string("/ping")]))],
    docs: JsDoc::default(),
  };

  let mut out = String::new();
  render_function(&mut out, &function);
  assert_eq!(
    out,
    "export const ping = (): Promise<void> => {\n  return httpClient.head(\"/ping\");\n};\n"
  );
}

#[test]
fn test_render_operations_imports_then_functions() {
  let unit = OperationsUnit {
    imports: vec![
      ImportDecl::Default {
        name: "httpClient".to_string(),
        module: "../runtime/httpClient".to_string(),
      },
      ImportDecl::Default {
        name: "qs".to_string(),
        module: "qs".to_string(),
      },
      ImportDecl::TypeOnly {
        names: vec!["Pet".to_string(), "User".to_string()],
        module: "./definitions".to_string(),
      },
    ],
    functions: vec![],
  };

  assert_eq!(
    render_operations(&unit),
    concat!(
      "import httpClient from \"../runtime/httpClient\";\n",
      "import qs from \"qs\";\n",
      "import type { Pet, User } from \"./definitions\";\n",
    )
  );
}

#[test]
fn test_optional_member_and_object_rendering() {
  let expr = Expr::ident("tags")
    .optional_member("join")
    .call(vec![Expr::string(",")])
    .add(Expr::Object(vec![]));
  assert_eq!(expr.to_string(), r#"tags?.join(",") + {}"#);
  assert!(expr.references("tags"));
  assert!(!expr.references("join"));
}

#[test]
fn test_file_header() {
  let metadata = CodeMetadata {
    title: "Swagger Petstore".to_string(),
    version: "1.0.6".to_string(),
    description: Some("First line\nSecond */ line".to_string()),
  };
  let header = file_header(&metadata, "specs/petstore.json");

  assert!(header.starts_with("/**\n * AUTO-GENERATED CODE - DO NOT EDIT!\n *\n * Swagger Petstore\n"));
  assert!(header.contains(" * Source: specs/petstore.json\n"));
  assert!(header.contains(" * Version: 1.0.6\n"));
  assert!(header.contains(" * First line\n * Second *\\/ line\n */\n"));
  assert!(header.ends_with("/* eslint-disable */\n\n"));

  let bare = file_header(
    &CodeMetadata {
      title: "T".to_string(),
      version: "1".to_string(),
      description: None,
    },
    "t.json",
  );
  assert!(bare.contains(" * No description provided\n"));
}
