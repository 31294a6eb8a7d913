//! Multi-target configuration file.
//!
//! ```yaml
//! httpClientOutput: src/api/runtime
//! swaggers:
//!   - swagger: specs/petstore.json
//!     output: src/api/petstore
//!     includeTags: pet,store
//!     rename:
//!       GET /pet/{petId}: fetchPet
//!     rewrite:
//!       ^/v2: /api
//! ```
//!
//! Relative paths are resolved against the directory holding the configuration file.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use super::FilterArgs;
use crate::utils::spec::SpecFormat;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
  /// Fallback runtime directory for targets that do not set their own.
  pub http_client_output: Option<PathBuf>,
  pub swaggers: Vec<TargetConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TargetConfig {
  #[serde(alias = "input")]
  pub swagger: PathBuf,
  pub output: PathBuf,
  pub http_client_output: Option<PathBuf>,
  pub definitions_module: Option<String>,
  pub include_tags: Option<String>,
  pub exclude_tags: Option<String>,
  pub include_path: Option<String>,
  pub exclude_path: Option<String>,
  #[serde(default)]
  pub rename: IndexMap<String, String>,
  #[serde(default)]
  pub rewrite: IndexMap<String, String>,
}

impl TargetConfig {
  #[must_use]
  pub fn filters(&self) -> FilterArgs {
    FilterArgs {
      include_tags: self.include_tags.clone(),
      exclude_tags: self.exclude_tags.clone(),
      include_path: self.include_path.clone(),
      exclude_path: self.exclude_path.clone(),
    }
  }
}

impl ConfigFile {
  pub async fn load(path: &Path) -> anyhow::Result<Self> {
    let content = tokio::fs::read_to_string(path)
      .await
      .map_err(|e| anyhow::anyhow!("failed to read config '{}': {e}", path.display()))?;
    let config = Self::parse(&content, SpecFormat::from_path(path))?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_paths(base))
  }

  pub fn parse(content: &str, format: SpecFormat) -> anyhow::Result<Self> {
    let config: Self = match format {
      SpecFormat::Json => serde_json::from_str(content)?,
      SpecFormat::Yaml => serde_yaml::from_str(content)?,
    };
    if config.swaggers.is_empty() {
      anyhow::bail!("config declares no swaggers");
    }
    Ok(config)
  }

  /// Anchors relative paths at `base` and applies the file-level runtime directory.
  #[must_use]
  pub fn resolve_paths(mut self, base: &Path) -> Self {
    let anchor = |path: &Path| {
      if path.is_absolute() {
        path.to_path_buf()
      } else {
        base.join(path)
      }
    };

    let shared_runtime = self.http_client_output.as_deref().map(anchor);
    for target in &mut self.swaggers {
      target.swagger = anchor(&target.swagger);
      target.output = anchor(&target.output);
      target.http_client_output = target
        .http_client_output
        .as_deref()
        .map(anchor)
        .or_else(|| shared_runtime.clone());
    }
    self.http_client_output = shared_runtime;
    self
  }
}
