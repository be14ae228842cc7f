use serde::{Deserialize, Serialize};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One generated entry. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseResult {
    pub timestamp: String,
    pub requirement: String,
    pub test_cases: String,
    pub compliance_tags: String,
    pub traceability_id: String,
}

/// Resolver and tagger output before it is stamped and stored.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTestCase {
    pub requirement: String,
    pub test_cases: String,
    pub compliance_tags: Vec<String>,
}

impl GeneratedTestCase {
    pub fn joined_tags(&self) -> String {
        self.compliance_tags.join(", ")
    }
}

/// `REQ-NNN` for the given 1-based position.
pub fn traceability_id(position: usize) -> String {
    format!("REQ-{:03}", position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traceability_id_padding() {
        assert_eq!(traceability_id(1), "REQ-001");
        assert_eq!(traceability_id(42), "REQ-042");
        assert_eq!(traceability_id(1234), "REQ-1234");
    }

    #[test]
    fn test_joined_tags() {
        let generated = GeneratedTestCase {
            requirement: "r".to_string(),
            test_cases: "t".to_string(),
            compliance_tags: vec!["HIPAA".to_string(), "ISO 27001".to_string()],
        };
        assert_eq!(generated.joined_tags(), "HIPAA, ISO 27001");
    }
}
