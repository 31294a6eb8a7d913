use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};
use crate::generator::{
  filters::{Filter, OperationFilter},
  options::GeneratorError,
};

#[derive(Parser, Debug)]
#[command(name = "swagger-ts-gen")]
#[command(author, version, about = "Swagger 2.0 to TypeScript client generator")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// List information from a Swagger document
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate a TypeScript client from a Swagger document
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
  /// Only generate operations carrying one of these tags (comma-separated, or /REGEX/)
  #[arg(long, value_name = "TAGS")]
  pub include_tags: Option<String>,

  /// Skip operations carrying one of these tags (comma-separated, or /REGEX/)
  #[arg(long, value_name = "TAGS")]
  pub exclude_tags: Option<String>,

  /// Only generate operations whose path contains one of these fragments (comma-separated, or /REGEX/)
  #[arg(long, value_name = "PATHS")]
  pub include_path: Option<String>,

  /// Skip operations whose path contains one of these fragments (comma-separated, or /REGEX/)
  #[arg(long, value_name = "PATHS")]
  pub exclude_path: Option<String>,
}

impl FilterArgs {
  pub fn to_filter(&self) -> Result<OperationFilter, GeneratorError> {
    let parse = |raw: &Option<String>| raw.as_deref().map(Filter::parse).transpose();
    Ok(OperationFilter {
      include_path: parse(&self.include_path)?,
      include_tags: parse(&self.include_tags)?,
      exclude_path: parse(&self.exclude_path)?,
      exclude_tags: parse(&self.exclude_tags)?,
    })
  }
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateCommand {
  /// Path to the Swagger 2.0 document (JSON or YAML)
  #[arg(short, long, value_name = "FILE", visible_alias = "swagger", required_unless_present = "config")]
  pub input: Option<PathBuf>,

  /// Directory where api.ts and definitions.ts will be written
  #[arg(short, long, value_name = "DIR", required_unless_present = "config")]
  pub output: Option<PathBuf>,

  #[command(flatten)]
  pub filters: FilterArgs,

  /// Override an exported operation name (repeatable), e.g. 'GET /pet/{petId}=fetchPet'
  #[arg(long, value_name = "OPERATION=NAME")]
  pub rename: Vec<String>,

  /// Rewrite request paths with a regex (repeatable, first match wins), e.g. '^/v2=/api'
  #[arg(long, value_name = "PATTERN=REPLACEMENT")]
  pub rewrite: Vec<String>,

  /// Directory where the httpClient runtime is written (defaults to the output directory)
  #[arg(long, value_name = "DIR")]
  pub http_client_output: Option<PathBuf>,

  /// Module specifier the operations use to import definitions
  #[arg(long, value_name = "MODULE")]
  pub definitions_module: Option<String>,

  /// Read one or more generation targets from a JSON or YAML file
  #[arg(short, long, value_name = "FILE", conflicts_with_all = ["input", "output"])]
  pub config: Option<PathBuf>,

  /// Enable verbose output with detailed progress information
  #[arg(short, long, default_value_t = false)]
  pub verbose: bool,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List all operations defined in the Swagger document
  Operations {
    /// Path to the Swagger 2.0 document (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    #[command(flatten)]
    filters: FilterArgs,
  },
}
