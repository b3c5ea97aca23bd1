//! Command-line interface for the schemascape utility
//!
//! Parses SQL DDL or Mermaid ER diagrams, lays out their tables and emits
//! the results as JSON, or converts a schema between the two syntaxes.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use schemascape::core::logging::{init_logging, resolve_level, LOG_LEVEL_ENV};
use schemascape::plugins::Orchestrator;
use schemascape::schema::{diff_schemas, SchemaDiff};
use schemascape::{
    apply_layout_to_schema_with_config, are_schemas_equal, relationships, to_mermaid, to_sql,
    DatabaseSchema, LayoutConfig, LayoutKind, SchemaFormat, ViewMode,
};

/// Schemascape - parse database schemas and lay out their tables
#[derive(Parser)]
#[command(name = "schemascape")]
#[command(about = "Parse SQL DDL or Mermaid ER diagrams and compute 2D/3D table layouts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error); defaults to the environment, then warn
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a schema and print it as JSON
    Parse {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input format; detected from content when omitted
        #[arg(short, long, value_enum)]
        format: Option<FormatChoice>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Parse a schema, position every table, and print it as JSON
    Layout {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum)]
        format: Option<FormatChoice>,

        /// Layout algorithm
        #[arg(short, long, value_enum, default_value_t = AlgorithmChoice::Force)]
        algorithm: AlgorithmChoice,

        /// 2D pins every table to the ground plane
        #[arg(long, value_enum, default_value_t = ViewModeChoice::ThreeD)]
        view_mode: ViewModeChoice,

        /// Ideal distance between neighbouring tables
        #[arg(long)]
        spacing: Option<f64>,

        /// Force-directed iteration limit
        #[arg(long)]
        iterations: Option<usize>,

        #[arg(long)]
        compact: bool,
    },

    /// List foreign-key relationships with their cardinality
    Relationships {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(short, long, value_enum)]
        format: Option<FormatChoice>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Detect the schema format of the input
    Detect {
        /// Input file to analyze (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Compare two schemas structurally
    Compare {
        #[arg(long)]
        left: PathBuf,

        #[arg(long)]
        right: PathBuf,

        /// Format of both inputs; detected per file when omitted
        #[arg(short, long, value_enum)]
        format: Option<FormatChoice>,
    },

    /// Convert a schema to SQL DDL or Mermaid
    Export {
        /// Input file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum)]
        format: Option<FormatChoice>,

        /// Target syntax
        #[arg(long, value_enum)]
        to: FormatChoice,
    },
}

/// Supported schema syntaxes
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum FormatChoice {
    Sql,
    Mermaid,
}

impl From<FormatChoice> for SchemaFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Sql => SchemaFormat::Sql,
            FormatChoice::Mermaid => SchemaFormat::Mermaid,
        }
    }
}

/// Layout algorithms
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum AlgorithmChoice {
    /// Repelling tables with foreign keys as springs
    #[default]
    Force,
    /// Layers by foreign-key depth
    Hierarchical,
    /// Evenly spaced ring
    Circular,
}

impl From<AlgorithmChoice> for LayoutKind {
    fn from(value: AlgorithmChoice) -> Self {
        match value {
            AlgorithmChoice::Force => LayoutKind::ForceDirected,
            AlgorithmChoice::Hierarchical => LayoutKind::Hierarchical,
            AlgorithmChoice::Circular => LayoutKind::Circular,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ViewModeChoice {
    #[value(name = "2d")]
    TwoD,
    #[default]
    #[value(name = "3d")]
    ThreeD,
}

impl From<ViewModeChoice> for ViewMode {
    fn from(value: ViewModeChoice) -> Self {
        match value {
            ViewModeChoice::TwoD => ViewMode::TwoD,
            ViewModeChoice::ThreeD => ViewMode::ThreeD,
        }
    }
}

/// Result of `compare`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub equal: bool,
    #[serde(flatten)]
    pub diff: SchemaDiff,
}

/// Main CLI application
pub struct SchemascapeApp {
    orchestrator: Orchestrator,
}

impl SchemascapeApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self {
            orchestrator: Orchestrator::with_default_detectors(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Flag, then environment, then a quiet default so JSON on stdout stays readable
        let log_level = match cli.log_level {
            Some(level) => level.as_str().to_string(),
            None if cli.verbose => "debug".to_string(),
            None if std::env::var(LOG_LEVEL_ENV).is_ok() || std::env::var("RUST_LOG").is_ok() => {
                resolve_level(None)
            }
            None => "warn".to_string(),
        };
        if let Err(e) = init_logging(Some(&log_level), cli.log_format.map(|f| f.as_str())) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Schemascape v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Parse {
                input,
                output,
                format,
                compact,
            } => {
                let content = self.read_input(input)?;
                let rendered = self.parse_command(&content, format, compact)?;
                self.write_output(output, &rendered)
            }
            Commands::Layout {
                input,
                output,
                format,
                algorithm,
                view_mode,
                spacing,
                iterations,
                compact,
            } => {
                let content = self.read_input(input)?;
                let mut config = LayoutConfig::default();
                if let Some(spacing) = spacing {
                    config = config.with_spacing(spacing);
                }
                if let Some(iterations) = iterations {
                    config = config.with_max_iterations(iterations);
                }
                let rendered =
                    self.layout_command(&content, format, algorithm, view_mode, &config, compact)?;
                self.write_output(output, &rendered)
            }
            Commands::Relationships {
                input,
                format,
                json,
            } => {
                let content = self.read_input(input)?;
                let rendered = self.relationships_command(&content, format, json)?;
                self.write_output(None, &rendered)
            }
            Commands::Detect { input } => {
                let content = self.read_input(input)?;
                let rendered = self.detect_command(&content, cli.verbose)?;
                self.write_output(None, &rendered)
            }
            Commands::Compare {
                left,
                right,
                format,
            } => {
                let left = self.read_input(Some(left))?;
                let right = self.read_input(Some(right))?;
                let comparison = self.compare_command(&left, &right, format)?;
                self.write_output(None, &serde_json::to_string_pretty(&comparison)?)
            }
            Commands::Export {
                input,
                output,
                format,
                to,
            } => {
                let content = self.read_input(input)?;
                let rendered = self.export_command(&content, format, to)?;
                self.write_output(output, &rendered)
            }
        }
    }

    fn load(&self, content: &str, format: Option<FormatChoice>) -> Result<DatabaseSchema> {
        let schema = schemascape::try_parse_schema(content, format.map(Into::into))?;
        debug!(tables = schema.table_count(), format = %schema.format, "Loaded schema");
        Ok(schema)
    }

    fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
        Ok(if compact {
            serde_json::to_string(value)?
        } else {
            serde_json::to_string_pretty(value)?
        })
    }

    /// Handle the parse command
    pub fn parse_command(
        &self,
        content: &str,
        format: Option<FormatChoice>,
        compact: bool,
    ) -> Result<String> {
        Self::to_json(&self.load(content, format)?, compact)
    }

    /// Handle the layout command
    pub fn layout_command(
        &self,
        content: &str,
        format: Option<FormatChoice>,
        algorithm: AlgorithmChoice,
        view_mode: ViewModeChoice,
        config: &LayoutConfig,
        compact: bool,
    ) -> Result<String> {
        let schema = self.load(content, format)?;
        let placed =
            apply_layout_to_schema_with_config(&schema, algorithm.into(), view_mode.into(), config);
        info!(tables = placed.table_count(), ?algorithm, "Laid out schema");
        Self::to_json(&placed, compact)
    }

    /// Handle the relationships command
    pub fn relationships_command(
        &self,
        content: &str,
        format: Option<FormatChoice>,
        json: bool,
    ) -> Result<String> {
        let schema = self.load(content, format)?;
        let relationships = relationships(&schema);
        if json {
            return Self::to_json(&relationships, false);
        }
        if relationships.is_empty() {
            return Ok("No relationships found".to_string());
        }
        Ok(relationships
            .iter()
            .map(|r| {
                format!(
                    "{}.{} -> {}.{} ({})",
                    r.from_table, r.fk_column, r.to_table, r.pk_column, r.cardinality
                )
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Handle the detect command
    pub fn detect_command(&self, content: &str, verbose: bool) -> Result<String> {
        if verbose {
            for (format, confidence) in self.orchestrator.confidences(content) {
                eprintln!("{:<8} {:.2}", format, confidence);
            }
        }
        match self.orchestrator.detect_format(content) {
            Ok(format) => Ok(format.to_string()),
            Err(e) => {
                eprintln!("Could not detect schema format: {}", e);
                Err(e)
            }
        }
    }

    /// Handle the compare command
    pub fn compare_command(
        &self,
        left: &str,
        right: &str,
        format: Option<FormatChoice>,
    ) -> Result<Comparison> {
        let left = self.load(left, format)?;
        let right = self.load(right, format)?;
        Ok(Comparison {
            equal: are_schemas_equal(&left, &right),
            diff: diff_schemas(&left, &right),
        })
    }

    /// Handle the export command
    pub fn export_command(
        &self,
        content: &str,
        format: Option<FormatChoice>,
        to: FormatChoice,
    ) -> Result<String> {
        let schema = self.load(content, format)?;
        Ok(match to {
            FormatChoice::Sql => to_sql(&schema),
            FormatChoice::Mermaid => to_mermaid(&schema),
        })
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        let stdout_content = if content.is_empty() || content.ends_with('\n') {
            content.to_string()
        } else {
            format!("{}\n", content)
        };

        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                print!("{}", stdout_content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for SchemascapeApp {
    fn default() -> Self {
        Self::new()
    }
}
