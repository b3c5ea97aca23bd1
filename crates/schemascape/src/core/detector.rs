//! Core detector trait for schema format identification

use super::SchemaFormat;

/// Recognizes one input format from its surface syntax
///
/// # Example
/// ```
/// use schemascape::core::{Detector, SchemaFormat};
/// use schemascape::plugins::mermaid::MermaidDetector;
///
/// let detector = MermaidDetector::new();
/// assert!(detector.detect("erDiagram\n    A ||--o{ B : has"));
/// assert_eq!(detector.format(), SchemaFormat::Mermaid);
/// ```
pub trait Detector: Send + Sync {
    /// Detect if the input matches this format
    fn detect(&self, input: &str) -> bool;

    /// Get the confidence level of the detection (0.0 to 1.0)
    fn confidence(&self, input: &str) -> f64;

    /// The format this detector recognizes
    fn format(&self) -> SchemaFormat;

    /// Get key patterns that this detector looks for
    fn patterns(&self) -> Vec<&'static str>;
}
