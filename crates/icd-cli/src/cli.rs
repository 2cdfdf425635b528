//! CLI argument definitions for the ICD-10 mapper.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "icd-mapper",
    version,
    about = "Map free-text diagnoses to ICD-10 codes",
    long_about = "Map free-text clinical diagnoses to ICD-10 codes.\n\n\
                  Combines exact description lookup, keyword patterns, and fuzzy\n\
                  matching. Results below the confidence threshold are flagged\n\
                  for manual review."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Mapper configuration file (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Replace the built-in catalog with a CSV file (code,description,category).
    #[arg(long = "catalog", value_name = "PATH", global = true)]
    pub catalog: Option<PathBuf>,

    /// Replace the built-in pattern rules with a TOML file.
    #[arg(long = "rules", value_name = "PATH", global = true)]
    pub rules: Option<PathBuf>,

    /// Review threshold; mappings below it are flagged (overrides the config file).
    #[arg(long = "threshold", value_name = "SCORE", global = true)]
    pub threshold: Option<f64>,

    /// Maximum alternatives per mapping (overrides the config file).
    #[arg(long = "max-suggestions", value_name = "N", global = true)]
    pub max_suggestions: Option<usize>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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

    /// Include diagnosis text in log output.
    ///
    /// Diagnosis text is patient data and is redacted from logs by default.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Map every diagnosis in a CSV file.
    Map(MapArgs),

    /// Map diagnoses given on the command line.
    Lookup(LookupArgs),

    /// Show the loaded catalog and rule counts.
    Catalog,
}

#[derive(Parser)]
pub struct MapArgs {
    /// CSV file with one patient per row.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Column holding the diagnosis list.
    #[arg(long = "column", default_value = icd_ingest::DEFAULT_DIAGNOSIS_COLUMN)]
    pub column: String,

    /// Column holding patient ids (default: row number).
    #[arg(long = "id-column", value_name = "COLUMN")]
    pub id_column: Option<String>,

    /// Write results to a file instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormatArg,

    /// Map diagnoses on all cores.
    #[arg(long = "parallel")]
    pub parallel: bool,
}

#[derive(Parser)]
pub struct LookupArgs {
    /// Diagnosis texts to map.
    #[arg(value_name = "TEXT", required = true)]
    pub texts: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
    Json,
    Text,
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
