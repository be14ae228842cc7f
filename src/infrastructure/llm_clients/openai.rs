use super::LLMClient;
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};

const QUOTA_ERROR_CODE: &str = "insufficient_quota";

pub struct OpenAIClient {
    client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    fn api_key(config: &LLMConfig) -> Result<String> {
        config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::LLMError("Missing API key for OpenAI".to_string()))
    }
}

impl Default for OpenAIClient {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn completions_url(base_url: &str) -> String {
    if base_url.ends_with('/') {
        format!("{}chat/completions", base_url)
    } else {
        format!("{}/chat/completions", base_url)
    }
}

/// Chat completion body: one user message carrying the prompt.
pub(crate) fn request_body(config: &LLMConfig, prompt: &str) -> Value {
    json!({
        "model": config.model,
        "messages": [
            {
                "role": "user",
                "content": prompt
            }
        ],
        "max_tokens": config.max_tokens,
        "temperature": config.temperature,
    })
}

pub(crate) fn first_choice_content(json: &Value) -> Result<String> {
    json["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| AppError::LLMError("Invalid response format".to_string()))
}

/// Maps a non-success response to an error, using the structured `error.code`
/// or `error.type` field to spot quota exhaustion.
pub(crate) fn classify_api_error(status: StatusCode, body: &str) -> AppError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let error = parsed.as_ref().map(|json| &json["error"]);

    let is_quota = error
        .map(|err| {
            err["code"].as_str() == Some(QUOTA_ERROR_CODE)
                || err["type"].as_str() == Some(QUOTA_ERROR_CODE)
        })
        .unwrap_or(false);

    let message = error
        .and_then(|err| err["message"].as_str())
        .map(|msg| msg.to_string())
        .unwrap_or_else(|| body.to_string());

    if is_quota {
        AppError::QuotaExceeded(message)
    } else {
        AppError::LLMError(format!("API error ({}): {}", status, message))
    }
}

#[async_trait]
impl LLMClient for OpenAIClient {
    async fn generate(&self, config: &LLMConfig, prompt: &str) -> Result<String> {
        let api_key = Self::api_key(config)?;
        let url = completions_url(&config.base_url);

        let body = request_body(config, prompt);

        tracing::debug!(model = %config.model, url = %url, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LLMError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(classify_api_error(status, &text));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))?;

        first_choice_content(&json)
    }
}
