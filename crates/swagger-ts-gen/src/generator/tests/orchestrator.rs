use std::collections::HashMap;

use http::Method;
use serde_json::json;

use super::support::{alias_names, function, function_names, generate, parse, petstore, type_imports};
use crate::generator::{
  ast::{ImportDecl, TypeNode},
  filters::{Filter, OperationFilter},
  metrics::GenerationWarning,
  options::{GeneratorOptions, OperationKey, RewriteRules},
  orchestrator::Orchestrator,
};

fn tag_filter(tags: &str) -> GeneratorOptions {
  GeneratorOptions::builder()
    .filter(OperationFilter {
      include_tags: Some(Filter::parse(tags).unwrap()),
      ..OperationFilter::default()
    })
    .build()
}

#[test]
fn test_orchestrator_metadata() {
  let orchestrator = Orchestrator::new(petstore(), GeneratorOptions::default());
  let metadata = orchestrator.metadata();
  assert_eq!(metadata.title, "Swagger Petstore");
  assert_eq!(metadata.version, "1.0.6");
  assert_eq!(
    metadata.description.as_deref(),
    Some("This is a sample server Petstore server.")
  );
}

#[test]
fn test_petstore_generates_every_operation_in_document_order() {
  let output = generate(petstore(), GeneratorOptions::default());

  assert_eq!(
    function_names(&output),
    [
      "addPet",
      "updatePet",
      "findPetsByStatus",
      "findPetsByTags",
      "getPetById",
      "updatePetWithForm",
      "deletePet",
      "uploadFile",
      "getInventory",
      "placeOrder",
      "getOrderById",
      "deleteOrder",
      "createUser",
      "createUsersWithArrayInput",
      "loginUser",
      "logoutUser",
      "getUserByName",
      "updateUser",
      "deleteUser",
    ]
  );
  assert_eq!(
    alias_names(&output),
    ["ApiResponse", "Category", "Order", "Pet", "Tag", "User"]
  );

  let stats = &output.stats;
  assert_eq!(stats.operations_generated, 19);
  assert_eq!(stats.operations_filtered, 0);
  assert_eq!(stats.operations_skipped, 0);
  assert_eq!(stats.definitions_generated, 6);
  assert_eq!(stats.orphaned_definitions_count, 1);
  assert_eq!(stats.cycles_detected, 0);
  assert!(stats.warnings.is_empty(), "unexpected warnings: {:?}", stats.warnings);
}

#[test]
fn test_petstore_imports() {
  let output = generate(petstore(), GeneratorOptions::default());
  assert_eq!(
    output.operations.imports,
    [
      ImportDecl::Default {
        name: "httpClient".to_string(),
        module: "./httpClient".to_string(),
      },
      ImportDecl::Default {
        name: "qs".to_string(),
        module: "qs".to_string(),
      },
      ImportDecl::TypeOnly {
        names: vec![
          "ApiResponse".to_string(),
          "Order".to_string(),
          "Pet".to_string(),
          "User".to_string()
        ],
        module: "./definitions".to_string(),
      },
    ]
  );
}

#[test]
fn test_pet_definition_rendering() {
  let output = Orchestrator::new(petstore(), GeneratorOptions::default()).generate_with_header("petstore.json");

  assert!(output.definitions_code.starts_with("/**\n * AUTO-GENERATED CODE - DO NOT EDIT!"));
  assert!(output.definitions_code.contains(
    r#"export type Pet = {
  id?: number;
  category?: Category;
  name: string;
  photoUrls: string[];
  tags?: Tag[];
  /**
   * pet status in the store
   */
  status?: "available" | "pending" | "sold";
};
"#
  ));
  assert!(output.definitions_code.contains("export type Tag = {\n  id?: number;\n  name?: string;\n};\n"));
  assert!(!output.definitions_code.contains("Unused"));

  assert!(output.api_code.contains(" * Source: petstore.json\n"));
  assert!(output.api_code.contains("import type { ApiResponse, Order, Pet, User } from \"./definitions\";\n"));
  assert!(output.api_code.contains(
    "export const findPetsByStatus = (status: (\"available\" | \"pending\" | \"sold\")[]): Promise<Pet[]> => {"
  ));
}

#[test]
fn test_tag_filter_limits_operations_and_definitions() {
  let output = generate(petstore(), tag_filter("store"));

  assert_eq!(
    function_names(&output),
    ["getInventory", "placeOrder", "getOrderById", "deleteOrder"]
  );
  assert_eq!(alias_names(&output), ["Order"]);
  assert_eq!(type_imports(&output), Some(["Order".to_string()].as_slice()));
  assert!(
    !output
      .operations
      .imports
      .iter()
      .any(|import| matches!(import, ImportDecl::Default { name, .. } if name == "qs"))
  );
  assert_eq!(output.stats.operations_filtered, 15);
  assert_eq!(output.stats.orphaned_definitions_count, 6);
}

#[test]
fn test_path_filter_with_exclusion() {
  let options = GeneratorOptions::builder()
    .filter(OperationFilter {
      include_path: Some(Filter::parse("/user").unwrap()),
      exclude_path: Some(Filter::parse("/^\\/user\\/(login|logout)$/").unwrap()),
      ..OperationFilter::default()
    })
    .build();
  let output = generate(petstore(), options);

  assert_eq!(
    function_names(&output),
    [
      "createUser",
      "createUsersWithArrayInput",
      "getUserByName",
      "updateUser",
      "deleteUser"
    ]
  );
  assert_eq!(alias_names(&output), ["User"]);
}

#[test]
fn test_operations_without_references_import_no_types() {
  let options = GeneratorOptions::builder()
    .filter(OperationFilter {
      include_path: Some(Filter::list(["/user/logout"])),
      ..OperationFilter::default()
    })
    .build();
  let output = generate(petstore(), options);

  assert_eq!(function_names(&output), ["logoutUser"]);
  assert_eq!(type_imports(&output), None);
  assert_eq!(output.operations.imports.len(), 1);
  assert!(output.definitions.aliases.is_empty());
}

#[test]
fn test_predicate_filter() {
  let options = GeneratorOptions::builder()
    .filter(OperationFilter {
      include_path: Some(Filter::predicate(|_, operation| operation.deprecated)),
      ..OperationFilter::default()
    })
    .build();
  let output = generate(petstore(), options);
  assert_eq!(function_names(&output), ["findPetsByTags"]);
}

#[test]
fn test_rewrite_rules_and_custom_modules() {
  let options = GeneratorOptions::builder()
    .rewrite_rules(RewriteRules::parse([("^/v2", "/api")]).unwrap())
    .operation_id_overrides(HashMap::from([(
      OperationKey::new(Method::GET, "/pet/{petId}"),
      "fetchPet".to_string(),
    )]))
    .http_client_module("../runtime/httpClient")
    .definitions_module("./types")
    .build();
  let output = generate(petstore(), options);

  let fetch = function(&output, "fetchPet");
  assert_eq!(fetch.body[0].to_string(), "return httpClient.get(`/api/pet/${petId}`);");
  assert!(!function_names(&output).contains(&"getPetById"));
  assert!(matches!(
    &output.operations.imports[0],
    ImportDecl::Default { module, .. } if module == "../runtime/httpClient"
  ));
  assert!(matches!(
    output.operations.imports.last(),
    Some(ImportDecl::TypeOnly { module, .. }) if module == "./types"
  ));
}

#[test]
fn test_dangling_reference_becomes_unknown_alias() {
  let document = parse(json!({
    "swagger": "2.0",
    "paths": {
      "/thing": {
        "get": {
          "operationId": "getThing",
          "responses": { "200": { "description": "ok", "schema": { "$ref": "#/definitions/Missing" } } }
        }
      }
    }
  }));
  let output = generate(document, GeneratorOptions::default());

  assert_eq!(alias_names(&output), ["Missing"]);
  assert_eq!(output.definitions.aliases[0].type_node, TypeNode::Unknown);
  assert_eq!(
    output.stats.warnings,
    [GenerationWarning::DanglingReference {
      ref_path: "#/definitions/Missing".to_string()
    }]
  );
}

#[test]
fn test_mutual_recursion_emits_each_definition_once() {
  let document = parse(json!({
    "swagger": "2.0",
    "paths": {
      "/a": {
        "get": {
          "operationId": "getA",
          "responses": { "200": { "description": "ok", "schema": { "$ref": "#/definitions/A" } } }
        }
      }
    },
    "definitions": {
      "A": { "type": "object", "properties": { "b": { "$ref": "#/definitions/B" } } },
      "B": { "type": "object", "properties": { "a": { "$ref": "#/definitions/A" }, "c": { "$ref": "#/definitions/C" } } },
      "C": { "type": "object", "properties": { "children": { "type": "array", "items": { "$ref": "#/definitions/C" } } } }
    }
  }));
  let output = generate(document, GeneratorOptions::default());

  assert_eq!(alias_names(&output), ["A", "B", "C"]);
  assert_eq!(output.stats.cycles_detected, 2);
  assert_eq!(
    output.stats.cycle_details,
    [
      vec!["#/definitions/A".to_string(), "#/definitions/B".to_string()],
      vec!["#/definitions/C".to_string()],
    ]
  );
  assert_eq!(type_imports(&output), Some(["A".to_string()].as_slice()));
}

#[test]
fn test_duplicate_operation_names_keep_the_first() {
  let document = parse(json!({
    "swagger": "2.0",
    "paths": {
      "/v1/pet": { "get": { "operationId": "getPet" } },
      "/v2/pet": { "get": { "operationId": "getPet" } },
      "/pet/ping": { "get": { "summary": "no id" } }
    }
  }));
  let output = generate(document, GeneratorOptions::default());

  assert_eq!(function_names(&output), ["getPet"]);
  assert_eq!(output.operations.functions[0].path, "/v1/pet");
  assert_eq!(output.stats.operations_skipped, 2);
  assert_eq!(
    output.stats.warnings,
    [
      GenerationWarning::DuplicateOperation {
        operation: "GET /v2/pet".to_string(),
        name: "getPet".to_string()
      },
      GenerationWarning::MissingOperationId {
        operation: "GET /pet/ping".to_string()
      },
    ]
  );
}

#[test]
fn test_colliding_type_names_keep_the_first() {
  let document = parse(json!({
    "swagger": "2.0",
    "paths": {
      "/pair": {
        "get": {
          "operationId": "getPair",
          "responses": {
            "200": {
              "description": "ok",
              "schema": {
                "type": "object",
                "properties": {
                  "x": { "$ref": "#/definitions/a.b" },
                  "y": { "$ref": "#/definitions/a_b" }
                }
              }
            }
          }
        }
      }
    },
    "definitions": {
      "a.b": { "type": "string" },
      "a_b": { "type": "number" }
    }
  }));
  let output = generate(document, GeneratorOptions::default());

  assert_eq!(alias_names(&output), ["a_b"]);
  assert_eq!(output.definitions.aliases[0].type_node, TypeNode::String);
  assert_eq!(
    output.stats.warnings,
    [GenerationWarning::NameCollision {
      name: "a_b".to_string(),
      first: "#/definitions/a.b".to_string(),
      second: "#/definitions/a_b".to_string(),
    }]
  );
}

#[test]
fn test_generation_is_deterministic() {
  let orchestrator = Orchestrator::new(petstore(), GeneratorOptions::default());
  let first = orchestrator.generate_with_header("petstore.json");
  let second = orchestrator.generate_with_header("petstore.json");
  assert_eq!(first.api_code, second.api_code);
  assert_eq!(first.definitions_code, second.definitions_code);
  assert_eq!(first.stats, second.stats);
}

#[test]
fn test_list_operations() {
  let orchestrator = Orchestrator::new(petstore(), tag_filter("user"));
  let operations = orchestrator.list_operations();

  assert_eq!(operations.len(), 19);
  assert_eq!(operations.iter().filter(|operation| operation.included).count(), 7);

  let login = operations
    .iter()
    .find(|operation| operation.path == "/user/login")
    .unwrap();
  assert_eq!(login.method, Method::GET);
  assert_eq!(login.name.as_deref(), Some("loginUser"));
  assert_eq!(login.tags, ["user"]);
  assert!(login.included);
}

#[test]
fn test_empty_document() {
  let output = generate(parse(json!({ "swagger": "2.0", "paths": {} })), GeneratorOptions::default());
  assert!(output.operations.functions.is_empty());
  assert!(output.definitions.aliases.is_empty());
  assert_eq!(output.operations.imports.len(), 1);
}
