pub mod openai;

use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;

pub use openai::OpenAIClient;

#[async_trait]
pub trait LLMClient {
    /// Sends `prompt` as a single user message and returns the first choice's content.
    async fn generate(&self, config: &LLMConfig, prompt: &str) -> Result<String>;
}
