//! Local `$ref` resolution.
//!
//! Pointers are only followed inside the current document. Anything else (`other.json#/x`,
//! `http://...`) resolves to `None` and is treated as dangling by the caller.

use std::borrow::Cow;

use crate::swagger::{Document, Parameter, Response, Schema};

pub(crate) const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Reverses JSON-pointer escaping of a single segment.
fn unescape_segment(segment: &str) -> Cow<'_, str> {
  if segment.contains('~') {
    Cow::Owned(segment.replace("~1", "/").replace("~0", "~"))
  } else {
    Cow::Borrowed(segment)
  }
}

pub(crate) fn resolve_schema<'a>(document: &'a Document, ref_path: &str) -> Option<Cow<'a, Schema>> {
  if let Some(name) = ref_path.strip_prefix(DEFINITIONS_PREFIX)
    && !name.contains('/')
    && let Some(schema) = document.definitions.get(&*unescape_segment(name))
  {
    return Some(Cow::Borrowed(schema));
  }
  document.lookup::<Schema>(ref_path).map(Cow::Owned)
}

pub(crate) fn resolve_parameter(document: &Document, ref_path: &str) -> Option<Parameter> {
  document.lookup(ref_path)
}

pub(crate) fn resolve_response(document: &Document, ref_path: &str) -> Option<Response> {
  document.lookup(ref_path)
}
