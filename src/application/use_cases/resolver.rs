use super::generation::TestCaseGenerator;
use crate::domain::requirement::{trim_requirement, SAMPLE_REQUIREMENTS, SAMPLE_TEST_CASES};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

static SAMPLE_LOOKUP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    SAMPLE_REQUIREMENTS
        .iter()
        .copied()
        .zip(SAMPLE_TEST_CASES.iter().copied())
        .collect()
});

/// Canned test cases for a sample, matched exactly after trimming.
pub fn canned_test_cases(requirement: &str) -> Option<&'static str> {
    SAMPLE_LOOKUP.get(trim_requirement(requirement)).copied()
}

pub struct Resolver {
    generator: Arc<dyn TestCaseGenerator + Send + Sync>,
}

impl Resolver {
    pub fn new(generator: Arc<dyn TestCaseGenerator + Send + Sync>) -> Self {
        Self { generator }
    }

    /// Samples resolve from the table; anything else goes to the generator
    /// with the untrimmed text.
    pub async fn resolve(&self, requirement: &str) -> String {
        if let Some(canned) = canned_test_cases(requirement) {
            debug!("Requirement matched a built-in sample");
            return canned.to_string();
        }
        self.generator.generate(requirement).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct RecordingGenerator {
        calls: AtomicUsize,
        seen: Mutex<Vec<String>>,
    }

    impl RecordingGenerator {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TestCaseGenerator for RecordingGenerator {
        async fn generate(&self, requirement: &str) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(requirement.to_string());
            format!("generated for [{}]", requirement)
        }
    }

    #[tokio::test]
    async fn test_samples_resolve_from_table() {
        let generator = Arc::new(RecordingGenerator::new());
        let resolver = Resolver::new(generator.clone());
        for (requirement, canned) in SAMPLE_REQUIREMENTS.iter().zip(SAMPLE_TEST_CASES.iter()) {
            let padded = format!("  \n{}\t ", requirement);
            assert_eq!(resolver.resolve(&padded).await, *canned);
        }
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_other_text_delegates_once_untrimmed() {
        let generator = Arc::new(RecordingGenerator::new());
        let resolver = Resolver::new(generator.clone());
        let text = resolver.resolve("  Log every prescription change ").await;
        assert_eq!(text, "generated for [  Log every prescription change ]");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            generator.seen.lock().unwrap().as_slice(),
            ["  Log every prescription change ".to_string()]
        );
    }

    #[tokio::test]
    async fn test_match_is_case_sensitive() {
        let generator = Arc::new(RecordingGenerator::new());
        let resolver = Resolver::new(generator.clone());
        let shouted = SAMPLE_REQUIREMENTS[0].to_uppercase();
        resolver.resolve(&shouted).await;
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_substring_does_not_match() {
        assert!(canned_test_cases("Patient data must be encrypted").is_none());
        assert_eq!(
            canned_test_cases(SAMPLE_REQUIREMENTS[3]),
            Some(SAMPLE_TEST_CASES[3])
        );
    }

    #[test]
    fn test_separator_padding_still_matches() {
        let padded = format!("\u{1c}{}\u{1f}\u{1e}", SAMPLE_REQUIREMENTS[1]);
        assert_eq!(canned_test_cases(&padded), Some(SAMPLE_TEST_CASES[1]));
    }
}
