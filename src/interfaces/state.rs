use crate::application::{GenerateTestCasesUseCase, GenerationBackend, Resolver, SessionRegistry};
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::csv::ResultCsv;
use crate::infrastructure::llm_clients::LLMClient;
use std::sync::Arc;

pub struct AppState {
    pub generate_use_case: GenerateTestCasesUseCase,
    pub sessions: Arc<SessionRegistry>,
    pub llm_config: LLMConfig,
    pub result_csv: ResultCsv,
}

impl AppState {
    pub fn new(llm_config: LLMConfig, llm_client: Arc<dyn LLMClient + Send + Sync>) -> Self {
        let sessions = Arc::new(SessionRegistry::new());
        let backend = Arc::new(GenerationBackend::new(llm_client, llm_config.clone()));
        let generate_use_case =
            GenerateTestCasesUseCase::new(Resolver::new(backend), sessions.clone());

        Self {
            generate_use_case,
            sessions,
            llm_config,
            result_csv: ResultCsv::new(),
        }
    }
}
