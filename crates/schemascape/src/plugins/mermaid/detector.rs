//! Mermaid ER diagram detector

use crate::core::{Detector, SchemaFormat};

/// Detector for Mermaid `erDiagram` input
pub struct MermaidDetector;

impl MermaidDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MermaidDetector {
    fn default() -> Self {
        Self::new()
    }
}

const CROWS_FOOT: &[&str] = &["||--", "|o--", "}o--", "}|--", "--o{", "--|{", "--||", "--o|"];

/// First line that is not blank, a `%%` comment, or part of front matter
fn first_meaningful_line(input: &str) -> Option<&str> {
    let mut in_front_matter = false;
    for line in input.lines().map(str::trim) {
        if line == "---" {
            in_front_matter = !in_front_matter;
            continue;
        }
        if in_front_matter || line.is_empty() || line.starts_with("%%") {
            continue;
        }
        return Some(line);
    }
    None
}

impl Detector for MermaidDetector {
    fn detect(&self, input: &str) -> bool {
        self.confidence(input) >= 0.5
    }

    fn confidence(&self, input: &str) -> f64 {
        let starts_diagram = first_meaningful_line(input)
            .is_some_and(|line| line.to_lowercase().starts_with("erdiagram"));
        if starts_diagram {
            return 1.0;
        }
        if input.to_lowercase().contains("erdiagram") {
            return 0.9;
        }
        let normalized = input.replace("..", "--");
        if CROWS_FOOT.iter().any(|token| normalized.contains(token)) {
            return 0.6;
        }
        0.0
    }

    fn format(&self) -> SchemaFormat {
        SchemaFormat::Mermaid
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["erDiagram", "||--o{", "}o--||"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_header() {
        let detector = MermaidDetector::new();
        assert_eq!(detector.confidence("erDiagram\n    A ||--o{ B : has"), 1.0);
        assert_eq!(detector.confidence("  ERDIAGRAM"), 1.0);
    }

    #[test]
    fn test_header_after_front_matter_and_comments() {
        let detector = MermaidDetector::new();
        let input = "---\ntitle: Shop\n---\n%% generated\nerDiagram\n";
        assert_eq!(detector.confidence(input), 1.0);
    }

    #[test]
    fn test_header_later_in_input() {
        let detector = MermaidDetector::new();
        let input = "```mermaid\nerDiagram\n    A ||--o{ B : has\n```";
        assert_eq!(detector.confidence(input), 0.9);
    }

    #[test]
    fn test_crows_foot_without_header() {
        let detector = MermaidDetector::new();
        assert_eq!(detector.confidence("CUSTOMER ||..o{ ORDER : places"), 0.6);
        assert!(detector.detect("CUSTOMER ||--o{ ORDER : places"));
    }

    #[test]
    fn test_rejects_sql() {
        let detector = MermaidDetector::new();
        assert!(!detector.detect("CREATE TABLE users (id INT);"));
        assert_eq!(detector.format(), SchemaFormat::Mermaid);
    }
}
