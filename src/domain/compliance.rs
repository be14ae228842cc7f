/// Label used when no keyword rule matches.
pub const DEFAULT_COMPLIANCE_LABEL: &str = "General Healthcare";

/// A rule fires when any of its keywords appears in the lowercased text.
#[derive(Debug, Clone, Copy)]
pub struct ComplianceRule {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

impl ComplianceRule {
    /// `text` must already be lowercase.
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(keyword))
    }
}

/// Evaluated in this order; the output keeps it.
pub const COMPLIANCE_RULES: [ComplianceRule; 7] = [
    ComplianceRule {
        label: "HIPAA",
        keywords: &["patient", "privacy", "hipaa", "phi", "health information"],
    },
    ComplianceRule {
        label: "GDPR",
        keywords: &["gdpr", "europe", "data protection", "consent"],
    },
    ComplianceRule {
        label: "FDA",
        keywords: &["fda", "medical device", "clinical", "safety"],
    },
    ComplianceRule {
        label: "IEC 62304",
        keywords: &["iec", "62304", "software lifecycle"],
    },
    ComplianceRule {
        label: "ISO 9001",
        keywords: &["iso", "9001", "quality management"],
    },
    ComplianceRule {
        label: "ISO 13485",
        keywords: &["13485", "medical devices"],
    },
    ComplianceRule {
        label: "ISO 27001",
        keywords: &["27001", "security", "information security"],
    },
];
