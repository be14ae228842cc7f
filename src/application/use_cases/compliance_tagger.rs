use crate::domain::compliance::{COMPLIANCE_RULES, DEFAULT_COMPLIANCE_LABEL};

/// Labels whose keywords occur in the requirement or its test cases, in rule
/// order. Falls back to the general label so the result is never empty.
pub fn tag_compliance(requirement: &str, test_cases: &str) -> Vec<String> {
    let text = format!("{} {}", requirement, test_cases).to_lowercase();

    let tags: Vec<String> = COMPLIANCE_RULES
        .iter()
        .filter(|rule| rule.matches(&text))
        .map(|rule| rule.label.to_string())
        .collect();

    if tags.is_empty() {
        vec![DEFAULT_COMPLIANCE_LABEL.to_string()]
    } else {
        tags
    }
}
