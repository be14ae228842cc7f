use crate::domain::test_case_result::{
    traceability_id, GeneratedTestCase, TestCaseResult, TIMESTAMP_FORMAT,
};
use chrono::{DateTime, Local};

/// Append-only list of one session's results. Entries are never edited;
/// the only other mutation is `clear`.
#[derive(Debug, Default, Clone)]
pub struct ResultStore {
    results: Vec<TestCaseResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps `generated` with the next traceability id and stores it.
    pub fn append(
        &mut self,
        generated: GeneratedTestCase,
        generated_at: DateTime<Local>,
    ) -> &TestCaseResult {
        let tags = generated.joined_tags();
        let result = TestCaseResult {
            timestamp: generated_at.format(TIMESTAMP_FORMAT).to_string(),
            requirement: generated.requirement,
            test_cases: generated.test_cases,
            compliance_tags: tags,
            traceability_id: traceability_id(self.results.len() + 1),
        };
        self.results.push(result);
        &self.results[self.results.len() - 1]
    }

    pub fn latest(&self) -> Option<&TestCaseResult> {
        self.results.last()
    }

    pub fn results(&self) -> &[TestCaseResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn clear(&mut self) {
        self.results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn generated(requirement: &str) -> GeneratedTestCase {
        GeneratedTestCase {
            requirement: requirement.to_string(),
            test_cases: "Step 1".to_string(),
            compliance_tags: vec!["HIPAA".to_string(), "GDPR".to_string()],
        }
    }

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let mut store = ResultStore::new();
        for i in 1..=12 {
            let result = store.append(generated(&format!("req {}", i)), at());
            assert_eq!(result.traceability_id, format!("REQ-{:03}", i));
        }
        let ids: Vec<&str> = store
            .results()
            .iter()
            .map(|r| r.traceability_id.as_str())
            .collect();
        assert_eq!(ids.first(), Some(&"REQ-001"));
        assert_eq!(ids.last(), Some(&"REQ-012"));
        assert_eq!(store.results()[4].requirement, "req 5");
    }

    #[test]
    fn test_append_formats_fields() {
        let mut store = ResultStore::new();
        let result = store.append(generated("Patient data"), at()).clone();
        assert_eq!(result.timestamp, "2024-03-09 14:05:07");
        assert_eq!(result.compliance_tags, "HIPAA, GDPR");
        assert_eq!(store.latest(), Some(&result));
    }

    #[test]
    fn test_clear_restarts_ids() {
        let mut store = ResultStore::new();
        store.append(generated("a"), at());
        store.append(generated("b"), at());
        store.clear();
        assert!(store.is_empty());
        assert!(store.latest().is_none());
        let result = store.append(generated("c"), at());
        assert_eq!(result.traceability_id, "REQ-001");
        assert_eq!(store.len(), 1);
    }
}
