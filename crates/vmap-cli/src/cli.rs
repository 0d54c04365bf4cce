//! CLI argument definitions for the vocab mapping toolkit.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "vmap",
    version,
    about = "Vocab Mapping Studio - Reconcile EPIC source codes with OMOP concepts",
    long_about = "Reconcile EPIC Kaleidoscope source codes and values with OMOP concepts.\n\n\
                  Maintains the append-only value-definition registry, seals\n\
                  patient-adjacent tables with password-based encryption, and\n\
                  exports curated mappings in the SSSOM exchange format."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow clinical values in log output (kept redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an empty, protected definition registry.
    Init(RegistryArgs),

    /// Scan candidate files and append new value definitions.
    Refresh(RegistryArgs),

    /// Flag existing definition records as invalid.
    Invalidate(InvalidateArgs),

    /// Generate the deployment salt for sealed tables.
    InitSalt(InitSaltArgs),

    /// Encrypt a CSV table into an opaque sealed blob.
    Seal(SealArgs),

    /// Decrypt a sealed blob back into a CSV table.
    Unseal(UnsealArgs),

    /// Summarize a curated mapping table by equivalence and reviewer flag.
    Analyze(AnalyzeArgs),

    /// Export a curated mapping table as SSSOM TSV.
    Sssom(SssomArgs),
}

#[derive(Parser)]
pub struct RegistryArgs {
    /// Resources root (default: VMAP_RESOURCES_DIR or ./Resources).
    #[arg(long = "resources", value_name = "DIR")]
    pub resources: Option<PathBuf>,

    /// Exports root (default: VMAP_EXPORTS_DIR or ./Exports).
    #[arg(long = "exports", value_name = "DIR")]
    pub exports: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InvalidateArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,

    /// Record id to invalidate (repeatable).
    #[arg(long = "id", value_name = "ID", required = true)]
    pub ids: Vec<u64>,
}

#[derive(Parser)]
pub struct InitSaltArgs {
    /// Where to write the salt file.
    #[arg(long = "path", value_name = "PATH", default_value = "salt.txt")]
    pub path: PathBuf,
}

#[derive(Parser)]
pub struct SealArgs {
    /// CSV table to encrypt.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Destination for the sealed blob.
    #[arg(value_name = "BLOB")]
    pub output: PathBuf,

    /// Salt file shared by every sealed table of this deployment.
    #[arg(long = "salt", value_name = "PATH", default_value = "salt.txt")]
    pub salt: PathBuf,
}

#[derive(Parser)]
pub struct UnsealArgs {
    /// Sealed blob to decrypt.
    #[arg(value_name = "BLOB")]
    pub input: PathBuf,

    /// Destination for the decrypted CSV table.
    #[arg(value_name = "CSV")]
    pub output: PathBuf,

    /// Salt file shared by every sealed table of this deployment.
    #[arg(long = "salt", value_name = "PATH", default_value = "salt.txt")]
    pub salt: PathBuf,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Curated mapping table (sourceCode, equivalence, conceptId, comment).
    #[arg(value_name = "MAPPING")]
    pub mapping: PathBuf,

    /// Element definitions; when given, free-text elements fold into OTHER.
    #[arg(long = "elements", value_name = "CSV")]
    pub elements: Option<PathBuf>,

    /// Comment token to ignore during flag mining (repeatable).
    #[arg(long = "exclude", value_name = "TERM", default_values_t = [String::from("LOINC")])]
    pub exclude: Vec<String>,

    /// Also write the analysis as JSON.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SssomArgs {
    /// Whether sourceCode values are element CUIs or value-registry ids.
    #[arg(long = "kind", value_enum)]
    pub kind: MappingKindArg,

    /// Curated mapping table to export.
    #[arg(value_name = "MAPPING")]
    pub mapping: PathBuf,

    /// OMOP CONCEPT export (tab-delimited).
    #[arg(long = "concepts", value_name = "TSV")]
    pub concepts: PathBuf,

    /// Vocabulary to load from the CONCEPT export (repeatable).
    #[arg(long = "vocabulary", value_name = "ID", default_values_t = [String::from("SNOMED")])]
    pub vocabularies: Vec<String>,

    /// Element definitions table.
    #[arg(long = "element-defs", value_name = "CSV")]
    pub element_defs: PathBuf,

    /// Value-definition export; required for value mappings.
    #[arg(long = "value-defs", value_name = "CSV")]
    pub value_defs: Option<PathBuf>,

    /// Destination TSV.
    #[arg(long = "out", value_name = "TSV")]
    pub out: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MappingKindArg {
    Elements,
    Values,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
