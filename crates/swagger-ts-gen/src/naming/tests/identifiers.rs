use std::collections::HashSet;

use crate::naming::identifiers::{
  ensure_unique, is_identifier, normalize, to_identifier, to_type_name, transliterate, type_name_from_ref,
};

#[test]
fn test_normalize_replaces_each_invalid_char() {
  assert_eq!(normalize("a<<"), "a__");
  assert_eq!(normalize("Test."), "Test_");
  assert_eq!(normalize("foo-bar"), "foo_bar");
  assert_eq!(normalize("already_valid"), "already_valid");
}

#[test]
fn test_normalize_leading_digit() {
  assert_eq!(normalize("0123"), "n0123");
  assert_eq!(normalize("0 123"), "n0_123");
  assert_eq!(normalize("1"), "n1");
}

#[test]
fn test_normalize_empty() {
  assert_eq!(normalize(""), "");
}

#[test]
fn test_transliterate_ideographs_as_syllables() {
  assert_eq!(transliterate("物流"), "WuLiu");
  assert_eq!(transliterate("plain"), "plain");
  assert_eq!(transliterate("a«b»"), "a«b»");
}

#[test]
fn test_type_name_from_generic_ref() {
  assert_eq!(
    type_name_from_ref("#/definitions/ResultResponseDTO«物流运单信息»"),
    "ResultResponseDTO_WuLiuYunDanXinXi_"
  );
  assert_eq!(type_name_from_ref("#/definitions/Pet"), "Pet");
  assert_eq!(type_name_from_ref("#/definitions/2FA"), "n2FA");
}

#[test]
fn test_reserved_words_are_escaped() {
  assert_eq!(to_identifier("delete"), "delete_");
  assert_eq!(to_identifier("class"), "class_");
  assert_eq!(to_identifier("deleteUser"), "deleteUser");
  assert_eq!(to_identifier(""), "_");
  assert_eq!(to_type_name("string"), "string_");
  assert_eq!(to_type_name("String"), "String");
  assert_eq!(to_type_name("default"), "default_");
}

#[test]
fn test_is_identifier() {
  assert!(is_identifier("name"));
  assert!(is_identifier("_private"));
  assert!(is_identifier("$ref"));
  assert!(!is_identifier("x-rate-limit"));
  assert!(!is_identifier("1st"));
  assert!(!is_identifier(""));
}

#[test]
fn test_ensure_unique() {
  let used: HashSet<String> = ["id".to_string(), "id2".to_string()].into_iter().collect();
  assert_eq!(ensure_unique("name", &used), "name");
  assert_eq!(ensure_unique("id", &used), "id3");
}
