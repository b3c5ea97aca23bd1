//! Plugin orchestrator for the schema processing pipeline
//!
//! The orchestrator manages the flow of text through the plugins:
//! Detector → Parser → Database → Normalizer

use anyhow::Result;
use tracing::{debug, info, span, trace, warn, Level};

use crate::core::{
    Database, DatabaseSchema, Detector, Parser, SchemaDatabase, SchemaError, SchemaFormat,
};
use crate::plugins::mermaid::{MermaidDetector, MermaidParser};
use crate::plugins::sql::{SqlDetector, SqlParser};
use crate::schema::normalize;

/// Plugin orchestrator that coordinates the entire pipeline
///
/// Detectors are consulted in registration order; the highest confidence
/// wins and ties go to the detector registered first.
pub struct Orchestrator {
    detectors: Vec<Box<dyn Detector>>,
    sql_parser: SqlParser,
    mermaid_parser: MermaidParser,
}

impl Orchestrator {
    /// Create an orchestrator with no detectors; only hinted input parses
    pub fn new() -> Self {
        Self {
            detectors: Vec::new(),
            sql_parser: SqlParser::new(),
            mermaid_parser: MermaidParser::new(),
        }
    }

    /// Create an orchestrator with the SQL and Mermaid detectors registered
    pub fn with_default_detectors() -> Self {
        let mut orchestrator = Self::new();
        orchestrator.register_detector(Box::new(SqlDetector::new()));
        orchestrator.register_detector(Box::new(MermaidDetector::new()));
        orchestrator
    }

    /// Register a detector plugin
    pub fn register_detector(&mut self, detector: Box<dyn Detector>) {
        self.detectors.push(detector);
    }

    /// Formats of the registered detectors, in registration order
    pub fn get_detectors(&self) -> Vec<SchemaFormat> {
        self.detectors.iter().map(|d| d.format()).collect()
    }

    /// Confidence of every registered detector for this input
    pub fn confidences(&self, input: &str) -> Vec<(SchemaFormat, f64)> {
        self.detectors
            .iter()
            .map(|d| (d.format(), d.confidence(input)))
            .collect()
    }

    /// Detect the schema format from input text
    pub fn detect_format(&self, input: &str) -> Result<SchemaFormat> {
        let detect_span = span!(Level::INFO, "detect_format", input_len = input.len());
        let _enter = detect_span.enter();

        let mut best: Option<(SchemaFormat, f64)> = None;
        for (format, confidence) in self.confidences(input) {
            trace!(%format, confidence, "Checking detector");
            if confidence >= 0.5 && best.map_or(true, |(_, top)| confidence > top) {
                best = Some((format, confidence));
            }
        }

        match best {
            Some((format, confidence)) => {
                info!(%format, confidence, "Detected schema format");
                Ok(format)
            }
            None => {
                warn!("No suitable detector found for input");
                Err(SchemaError::UnknownFormat.into())
            }
        }
    }

    fn parser_for(&self, format: SchemaFormat) -> &dyn Parser<SchemaDatabase> {
        match format {
            SchemaFormat::Sql => &self.sql_parser,
            SchemaFormat::Mermaid => &self.mermaid_parser,
        }
    }

    /// Run detection (unless hinted) and parsing, without normalizing
    pub fn parse_database(
        &self,
        input: &str,
        format_hint: Option<SchemaFormat>,
    ) -> Result<SchemaDatabase> {
        let format = match format_hint {
            Some(format) => {
                debug!(%format, "Using format hint");
                format
            }
            None => self.detect_format(input)?,
        };

        let parse_span = span!(Level::DEBUG, "pipeline_parse", %format);
        let _parse_enter = parse_span.enter();
        let parser = self.parser_for(format);
        let mut database = SchemaDatabase::new(format);
        parser.parse(input, &mut database)?;
        debug!(
            parser = parser.name(),
            tables = database.table_count(),
            foreign_keys = database.foreign_key_count(),
            "Parsing completed"
        );
        Ok(database)
    }

    /// Process input through the complete pipeline
    pub fn process(&self, input: &str, format_hint: Option<SchemaFormat>) -> Result<DatabaseSchema> {
        let process_span = span!(Level::INFO, "process_schema", input_len = input.len());
        let _enter = process_span.enter();

        let database = self.parse_database(input, format_hint)?;
        let schema = normalize(database)?;
        info!(tables = schema.table_count(), "Pipeline completed successfully");
        Ok(schema)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::with_default_detectors()
    }
}
