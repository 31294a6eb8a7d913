use std::{
  collections::HashMap,
  path::{Path, PathBuf},
};

use chrono::{Local, Timelike};
use crossterm::style::Stylize;

use crate::{
  generator::{
    codegen::HTTP_CLIENT_RUNTIME,
    metrics::GenerationStats,
    options::{GeneratorOptions, OperationKey, RewriteRules, parse_assignment},
    orchestrator::{GeneratedFinalOutput, Orchestrator},
  },
  swagger::Document,
  ui::{
    Colors, FilterArgs, GenerateCommand,
    config::{ConfigFile, TargetConfig},
  },
  utils::{paths::relative_module_specifier, spec::SpecLoader},
};

const API_FILE: &str = "api.ts";
const DEFINITIONS_FILE: &str = "definitions.ts";
const HTTP_CLIENT_MODULE: &str = "httpClient";

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

/// One document to generate and where its files go.
#[derive(Debug, Clone, Default)]
pub struct GenerateTarget {
  pub input: PathBuf,
  pub output: PathBuf,
  /// Runtime directory; the output directory when unset.
  pub http_client_output: Option<PathBuf>,
  pub definitions_module: Option<String>,
  pub filters: FilterArgs,
  pub rename: Vec<(String, String)>,
  pub rewrite: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub targets: Vec<GenerateTarget>,
  pub verbose: bool,
  pub quiet: bool,
}

impl GenerateConfig {
  pub async fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      output,
      filters,
      rename,
      rewrite,
      http_client_output,
      definitions_module,
      config,
      verbose,
      quiet,
    } = command;

    let targets = match (config, input, output) {
      (Some(config), _, _) => ConfigFile::load(&config)
        .await?
        .swaggers
        .into_iter()
        .map(GenerateTarget::from)
        .collect(),
      (None, Some(input), Some(output)) => vec![GenerateTarget {
        input,
        output,
        http_client_output,
        definitions_module,
        filters,
        rename: parse_assignments("rename", rename)?,
        rewrite: parse_assignments("rewrite", rewrite)?,
      }],
      (None, _, _) => anyhow::bail!("Either --config or both --input and --output are required"),
    };

    Ok(Self {
      targets,
      verbose,
      quiet,
    })
  }
}

fn parse_assignments(kind: &'static str, entries: Vec<String>) -> anyhow::Result<Vec<(String, String)>> {
  entries
    .iter()
    .map(|entry| {
      let (key, value) = parse_assignment(kind, entry)?;
      Ok((key.trim().to_string(), value.trim().to_string()))
    })
    .collect()
}

impl From<TargetConfig> for GenerateTarget {
  fn from(target: TargetConfig) -> Self {
    let filters = target.filters();
    Self {
      input: target.swagger,
      output: target.output,
      http_client_output: target.http_client_output,
      definitions_module: target.definitions_module,
      filters,
      rename: target.rename.into_iter().collect(),
      rewrite: target.rewrite.into_iter().collect(),
    }
  }
}

impl GenerateTarget {
  fn runtime_dir(&self) -> &Path {
    self.http_client_output.as_deref().unwrap_or(&self.output)
  }

  /// Translates the target's command-line shaped settings into generator options.
  pub fn options(&self) -> anyhow::Result<GeneratorOptions> {
    let operation_id_overrides: HashMap<OperationKey, String> = self
      .rename
      .iter()
      .map(|(key, name)| -> anyhow::Result<_> { Ok((key.parse::<OperationKey>()?, name.clone())) })
      .collect::<anyhow::Result<_>>()?;

    let http_client_module = relative_module_specifier(&self.output, self.runtime_dir(), HTTP_CLIENT_MODULE)?;

    let options = GeneratorOptions::builder()
      .filter(self.filters.to_filter()?)
      .operation_id_overrides(operation_id_overrides)
      .rewrite_rules(RewriteRules::parse(self.rewrite.iter().map(|(p, r)| (p, r.as_str())))?)
      .http_client_module(http_client_module)
      .maybe_definitions_module(self.definitions_module.clone())
      .build();
    Ok(options)
  }

  async fn load_document(&self) -> anyhow::Result<Document> {
    SpecLoader::open(&self.input)
      .await
      .map_err(|e| anyhow::anyhow!("failed to open '{}': {e}", self.input.display()))?
      .parse()
  }

  async fn write_output(&self, output: &GeneratedFinalOutput) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&self.output).await?;
    tokio::fs::write(self.output.join(API_FILE), &output.api_code).await?;
    tokio::fs::write(self.output.join(DEFINITIONS_FILE), &output.definitions_code).await?;

    let runtime_dir = self.runtime_dir();
    tokio::fs::create_dir_all(runtime_dir).await?;
    tokio::fs::write(runtime_dir.join(format!("{HTTP_CLIENT_MODULE}.ts")), HTTP_CLIENT_RUNTIME).await?;
    Ok(())
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn info(&self, message: &str) {
    if !self.config.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.config.quiet {
      println!(
        "            {:<25} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }

  fn log_loading(&self, target: &GenerateTarget) {
    self.info(
      &format!("Loading Swagger document from: {}", target.input.display())
        .with(self.colors.primary())
        .to_string(),
    );
  }

  fn log_generating(&self) {
    self.info(&"Generating TypeScript client...".with(self.colors.primary()).to_string());
  }

  fn print_statistics(&self, stats: &GenerationStats) {
    if self.config.quiet {
      return;
    }

    self.stat("Operations generated:", stats.operations_generated.to_string());
    if stats.operations_filtered > 0 {
      self.stat("", format!("{} filtered out", stats.operations_filtered));
    }
    if stats.operations_skipped > 0 {
      self.stat("", format!("{} skipped", stats.operations_skipped));
    }
    self.stat("Definitions generated:", stats.definitions_generated.to_string());
    if !stats.warnings.is_empty() {
      self.stat("Warnings:", stats.warnings.len().to_string());
    }

    self.print_cycles(stats);
    self.print_orphaned_definitions(stats);
    self.print_warnings(stats);
  }

  fn print_cycles(&self, stats: &GenerationStats) {
    if stats.cycles_detected == 0 {
      return;
    }

    self.stat("Cycles:", stats.cycles_detected.to_string());

    if self.config.verbose {
      for (i, cycle) in stats.cycle_details.iter().enumerate() {
        println!(
          "              {}: {}",
          format!("Cycle {}", i + 1).with(self.colors.accent()),
          cycle.join(" -> ").with(self.colors.info())
        );
      }
    }
  }

  fn print_orphaned_definitions(&self, stats: &GenerationStats) {
    if stats.orphaned_definitions_count > 0 && self.config.verbose {
      self.stat("Unreferenced definitions:", stats.orphaned_definitions_count.to_string());
    }
  }

  fn print_warnings(&self, stats: &GenerationStats) {
    if stats.warnings.is_empty() || self.config.quiet {
      return;
    }

    let mut printed_header = false;
    for warning in &stats.warnings {
      let skipped = warning.is_skipped_item();
      if !skipped && !self.config.verbose {
        continue;
      }

      if !printed_header {
        println!();
        printed_header = true;
      }

      let label = if skipped { "Skipped:" } else { "Warning:" };
      eprintln!(
        "{} {}",
        label.with(self.colors.accent()),
        warning.to_string().with(self.colors.primary())
      );
    }
  }

  fn log_writing(&self, target: &GenerateTarget) {
    self.info(
      &format!("Writing to: {}", target.output.display())
        .with(self.colors.primary())
        .to_string(),
    );
    if let Some(runtime) = &target.http_client_output {
      self.info(
        &format!("Writing httpClient to: {}", runtime.display())
          .with(self.colors.primary())
          .to_string(),
      );
    }
  }

  fn log_success(&self) {
    if !self.config.quiet {
      println!();
      println!(
        "{} {}",
        format_timestamp().with(self.colors.timestamp()),
        "Successfully generated TypeScript client".with(self.colors.success())
      );
    }
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  for target in &config.targets {
    logger.log_loading(target);
    let document = target.load_document().await?;

    logger.log_generating();
    let orchestrator = Orchestrator::new(document, target.options()?);
    let output = orchestrator.generate_with_header(&target.input.display().to_string());
    logger.print_statistics(&output.stats);

    logger.log_writing(target);
    target.write_output(&output).await?;
  }

  logger.log_success();
  Ok(())
}
