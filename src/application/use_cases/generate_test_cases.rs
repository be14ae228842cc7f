use super::compliance_tagger::tag_compliance;
use super::resolver::Resolver;
use super::session_registry::SessionRegistry;
use crate::domain::error::{AppError, Result};
use crate::domain::requirement::{Requirement, EMPTY_REQUIREMENT_MESSAGE};
use crate::domain::test_case_result::{GeneratedTestCase, TestCaseResult};
use chrono::Local;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// One submission: validate, resolve, tag, then append to the session.
pub struct GenerateTestCasesUseCase {
    resolver: Resolver,
    sessions: Arc<SessionRegistry>,
}

impl GenerateTestCasesUseCase {
    pub fn new(resolver: Resolver, sessions: Arc<SessionRegistry>) -> Self {
        Self { resolver, sessions }
    }

    pub async fn execute(
        &self,
        session_id: &str,
        requirement: Requirement,
    ) -> Result<TestCaseResult> {
        requirement
            .validate()
            .map_err(|_| AppError::ValidationError(EMPTY_REQUIREMENT_MESSAGE.to_string()))?;

        // checked up front so an unknown session never costs a backend call
        if !self.sessions.contains(session_id)? {
            return Err(AppError::NotFound(format!(
                "Session {} does not exist",
                session_id
            )));
        }

        let test_cases = self.resolver.resolve(&requirement.text).await;
        let compliance_tags = tag_compliance(&requirement.text, &test_cases);
        let generated = GeneratedTestCase {
            requirement: requirement.text,
            test_cases,
            compliance_tags,
        };

        let result = self
            .sessions
            .with_store(session_id, |store| store.append(generated, Local::now()).clone())?;

        info!(
            session_id = %session_id,
            traceability_id = %result.traceability_id,
            compliance_tags = %result.compliance_tags,
            "Stored generated test cases"
        );
        Ok(result)
    }
}
