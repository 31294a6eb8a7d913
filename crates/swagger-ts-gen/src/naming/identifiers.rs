use std::{collections::HashSet, sync::LazyLock};

use any_ascii::any_ascii_char;
use regex::Regex;

/// Words that cannot name a binding (`const`, parameter) in a TypeScript module.
pub(crate) static RESERVED_VALUE_NAMES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "eval", "export", "extends", "false", "finally", "for", "function", "if", "implements",
    "import", "in", "instanceof", "interface", "let", "new", "null", "package", "private", "protected", "public",
    "return", "static", "super", "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void",
    "while", "with", "yield",
  ]
  .into_iter()
  .collect()
});

/// Predefined type names a `type` alias may not shadow.
static RESERVED_TYPE_NAMES: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "any", "bigint", "boolean", "never", "number", "object", "string", "symbol", "unknown",
  ]
  .into_iter()
  .collect()
});

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9A-Za-z]").unwrap());
static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Romanizes non-ASCII letters, leaving everything else untouched.
///
/// Multi-letter romanizations are syllables (ideographic or syllabic scripts) and get an upper-case first
/// letter so that `物流` reads as `WuLiu`. Single-letter ones (`é`, `ß`) are kept as produced.
pub(crate) fn transliterate(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  for c in input.chars() {
    if c.is_ascii() || !c.is_alphabetic() {
      out.push(c);
      continue;
    }

    let romanized = any_ascii_char(c);
    let mut letters = romanized.chars();
    match letters.next() {
      Some(first) if romanized.len() > 1 => {
        out.push(first.to_ascii_uppercase());
        out.push_str(letters.as_str());
      }
      Some(_) => out.push_str(romanized),
      None => out.push(c),
    }
  }
  out
}

/// Maps an arbitrary string into the identifier alphabet.
///
/// # Rules:
/// 1. Non-ASCII letters are transliterated.
/// 2. Every remaining character outside `[0-9A-Za-z]` becomes `_`, one for one.
/// 3. A leading digit gets an `n` prefix.
pub(crate) fn normalize(raw: &str) -> String {
  let transliterated = transliterate(raw);
  let mut ident = INVALID_CHARS_RE.replace_all(&transliterated, "_").into_owned();

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, 'n');
  }

  ident
}

/// Normalizes a value name (operation constant, parameter), escaping reserved words with a trailing `_`.
pub(crate) fn to_identifier(raw: &str) -> String {
  let ident = normalize(raw);
  if ident.is_empty() {
    return "_".to_string();
  }
  if RESERVED_VALUE_NAMES.contains(ident.as_str()) {
    return format!("{ident}_");
  }
  ident
}

/// Normalizes a type alias name. Type names share the value keyword set plus the predefined types.
pub(crate) fn to_type_name(raw: &str) -> String {
  let ident = to_identifier(raw);
  if RESERVED_TYPE_NAMES.contains(ident.as_str()) {
    return format!("{ident}_");
  }
  ident
}

/// The type identifier a `$ref` resolves to: its last `/` segment, normalized.
pub(crate) fn type_name_from_ref(ref_path: &str) -> String {
  let last = ref_path.rsplit('/').next().unwrap_or(ref_path);
  to_type_name(last)
}

/// Whether `name` can be written bare as an object key or property name.
pub(crate) fn is_identifier(name: &str) -> bool {
  IDENTIFIER_RE.is_match(name)
}

pub(crate) fn ensure_unique(base_name: &str, used_names: &HashSet<String>) -> String {
  if !used_names.contains(base_name) {
    return base_name.to_string();
  }
  let mut i = 2;
  loop {
    let new_name = format!("{base_name}{i}");
    if !used_names.contains(&new_name) {
      return new_name;
    }
    i += 1;
  }
}
