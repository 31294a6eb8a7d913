//! Swagger 2.0 document model.
//!
//! Only the fields the generator reads are modelled. The raw JSON tree is kept next to the typed view so
//! that `$ref` pointers into arbitrary locations (`#/parameters/..`, `#/responses/..`) can still be walked.

use std::str::FromStr;

use http::Method;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use strum::{Display, EnumString};


#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
  #[serde(default)]
  pub info: Info,
  #[serde(default)]
  pub base_path: Option<String>,
  #[serde(default)]
  pub paths: IndexMap<String, PathItem>,
  #[serde(default)]
  pub definitions: IndexMap<String, Schema>,
  #[serde(skip)]
  raw: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Info {
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub version: String,
  #[serde(default)]
  pub description: Option<String>,
}

/// Either an inline object or a `$ref` to one defined elsewhere in the document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ObjectOrReference<T> {
  Ref {
    #[serde(rename = "$ref")]
    ref_path: String,
  },
  Object(T),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathItem {
  pub parameters: Vec<ObjectOrReference<Parameter>>,
  pub operations: IndexMap<Method, Operation>,
}

const PATH_ITEM_METHODS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

impl<'de> Deserialize<'de> for PathItem {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    use serde::de::Error;

    let entries = IndexMap::<String, Value>::deserialize(deserializer)?;
    let mut item = PathItem::default();

    for (key, value) in entries {
      if key == "parameters" {
        item.parameters = serde_json::from_value(value).map_err(|e| D::Error::custom(format!("parameters: {e}")))?;
      } else if PATH_ITEM_METHODS.contains(&key.as_str()) {
        let method = Method::from_str(&key.to_ascii_uppercase()).map_err(D::Error::custom)?;
        let operation = serde_json::from_value(value).map_err(|e| D::Error::custom(format!("{key}: {e}")))?;
        item.operations.insert(method, operation);
      }
    }

    Ok(item)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
  pub operation_id: Option<String>,
  pub summary: Option<String>,
  pub description: Option<String>,
  #[serde(default)]
  pub tags: Vec<String>,
  #[serde(default)]
  pub parameters: Vec<ObjectOrReference<Parameter>>,
  #[serde(default)]
  pub responses: IndexMap<String, ObjectOrReference<Response>>,
  #[serde(default)]
  pub deprecated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum ParameterIn {
  Path,
  Query,
  Header,
  Body,
  FormData,
  #[serde(other)]
  Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
  pub name: String,
  #[serde(rename = "in")]
  pub location: ParameterIn,
  pub description: Option<String>,
  #[serde(default)]
  pub required: bool,
  pub schema: Option<Schema>,
  #[serde(rename = "type")]
  pub param_type: Option<Value>,
  pub format: Option<String>,
  #[serde(rename = "enum", default)]
  pub enum_values: Vec<Value>,
  pub items: Option<Box<Schema>>,
  pub collection_format: Option<String>,
  pub default: Option<Value>,
}

impl Parameter {
  /// Describes a non-body parameter's value as a schema so it can be synthesized like any other.
  #[must_use]
  pub fn as_schema(&self) -> Schema {
    Schema {
      schema_type: self.param_type.clone(),
      format: self.format.clone(),
      enum_values: self.enum_values.clone(),
      items: self.items.clone(),
      ..Schema::default()
    }
  }

  #[must_use]
  pub fn collection_format(&self) -> Option<CollectionFormat> {
    self.collection_format.as_deref().map(CollectionFormat::from_token)
  }
}

/// How an array-valued parameter is serialized on the wire.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CollectionFormat {
  Csv,
  Ssv,
  Tsv,
  Pipes,
  Multi,
  #[strum(disabled)]
  Unsupported(String),
}

impl CollectionFormat {
  #[must_use]
  pub fn from_token(token: &str) -> Self {
    token
      .parse()
      .unwrap_or_else(|_| Self::Unsupported(token.to_string()))
  }

  /// The join separator, or `None` when the values are sent as repeated keys.
  #[must_use]
  pub const fn separator(&self) -> Option<&'static str> {
    match self {
      Self::Csv => Some(","),
      Self::Ssv => Some(" "),
      Self::Tsv => Some("\t"),
      Self::Pipes => Some("|"),
      Self::Multi | Self::Unsupported(_) => None,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
  #[serde(default)]
  pub description: Option<String>,
  pub schema: Option<Schema>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
  Bool(bool),
  Schema(Box<Schema>),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
  #[serde(rename = "$ref")]
  pub ref_path: Option<String>,
  #[serde(rename = "type")]
  pub schema_type: Option<Value>,
  pub format: Option<String>,
  pub title: Option<String>,
  pub description: Option<String>,
  #[serde(rename = "enum", default)]
  pub enum_values: Vec<Value>,
  pub properties: Option<IndexMap<String, Schema>>,
  #[serde(default, deserialize_with = "required_names")]
  pub required: Vec<String>,
  pub additional_properties: Option<AdditionalProperties>,
  pub items: Option<Box<Schema>>,
  pub default: Option<Value>,
}

/// The names listed by an object's `required` array. Property-level `required: true` flags and any other
/// shape read as no names.
fn required_names<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
  Ok(match Value::deserialize(deserializer)? {
    Value::Array(entries) => entries
      .into_iter()
      .filter_map(|entry| match entry {
        Value::String(name) => Some(name),
        _ => None,
      })
      .collect(),
    _ => Vec::new(),
  })
}

impl Schema {
  #[must_use]
  pub fn is_empty(&self) -> bool {
    *self == Self::default()
  }

  #[must_use]
  pub fn reference(ref_path: impl Into<String>) -> Self {
    Self {
      ref_path: Some(ref_path.into()),
      ..Self::default()
    }
  }

  #[must_use]
  pub fn of_type(type_token: &str) -> Self {
    Self {
      schema_type: Some(Value::String(type_token.to_string())),
      ..Self::default()
    }
  }
}

/// Error raised when a document cannot be interpreted as Swagger 2.0.
#[derive(Debug, Display)]
pub enum DocumentError {
  #[strum(to_string = "document root must be a mapping")]
  NotAMapping,
  #[strum(to_string = "invalid document at '{path}': {message}")]
  Malformed { path: String, message: String },
}

impl std::error::Error for DocumentError {}

impl Document {
  /// Builds the typed view over an already-parsed JSON tree.
  pub fn from_value(raw: Value) -> Result<Self, DocumentError> {
    if !raw.is_object() {
      return Err(DocumentError::NotAMapping);
    }

    let mut document: Document = serde_path_to_error::deserialize(&raw).map_err(|e| DocumentError::Malformed {
      path: e.path().to_string(),
      message: e.inner().to_string(),
    })?;
    document.raw = raw;
    Ok(document)
  }

  pub fn from_json(input: &str) -> anyhow::Result<Self> {
    let raw: Value = serde_json::from_str(input)?;
    Ok(Self::from_value(raw)?)
  }

  pub fn from_yaml(input: &str) -> anyhow::Result<Self> {
    let raw: Value = serde_yaml::from_str(input)?;
    Ok(Self::from_value(raw)?)
  }

  #[must_use]
  pub fn raw(&self) -> &Value {
    &self.raw
  }

  /// Walks a local `#/...` pointer and deserializes whatever sits there.
  ///
  /// Returns `None` for external references, missing segments, or targets of the wrong shape.
  pub fn lookup<T: DeserializeOwned>(&self, ref_path: &str) -> Option<T> {
    let pointer = ref_path.strip_prefix('#')?;
    let target = self.raw.pointer(pointer)?;
    T::deserialize(target).ok()
  }
}
