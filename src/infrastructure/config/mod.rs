use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{LLMConfig, LLMProvider};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const SECRETS_PATH_ENV: &str = "CARECASE_SECRETS_PATH";
pub const DEFAULT_SECRETS_PATH: &str = "secrets.toml";
const ENV_PREFIX: &str = "CARECASE_";

/// Process-wide settings. Later sources override earlier ones:
/// built-in defaults, the secrets TOML file, then `CARECASE_*` variables.
/// `OPENAI_API_KEY` is applied last and only when non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub openai_api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub host: String,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        let llm = LLMConfig::default();
        Self {
            openai_api_key: None,
            base_url: llm.base_url,
            model: llm.model,
            max_tokens: llm.max_tokens.unwrap_or(600),
            temperature: llm.temperature.unwrap_or(0.7),
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

pub struct ConfigService;

impl ConfigService {
    pub fn load() -> Result<AppConfig> {
        let secrets_path = env::var(SECRETS_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SECRETS_PATH));
        if !secrets_path.exists() {
            tracing::debug!(path = %secrets_path.display(), "No secrets file found");
        }
        Self::from_figment(Self::figment(&secrets_path), env::var(API_KEY_ENV).ok())
    }

    pub fn figment(secrets_path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(secrets_path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn from_figment(figment: Figment, env_api_key: Option<String>) -> Result<AppConfig> {
        let mut config: AppConfig = figment
            .extract()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))?;
        // secrets files written for the warning text use the env var spelling
        let secrets_key = non_blank(figment.extract_inner::<String>(API_KEY_ENV).ok())
            .or_else(|| config.openai_api_key.take());
        config.openai_api_key = resolve_api_key(env_api_key, secrets_key);
        Ok(config)
    }
}

/// Environment first, secrets file second; blank values count as unset.
pub fn resolve_api_key(from_env: Option<String>, from_secrets: Option<String>) -> Option<String> {
    non_blank(from_env).or_else(|| non_blank(from_secrets))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    pub fn llm_config(&self) -> LLMConfig {
        let provider = if self.base_url.contains("api.openai.com") {
            LLMProvider::OpenAI
        } else {
            LLMProvider::Local
        };
        LLMConfig {
            provider,
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key: self.openai_api_key.clone(),
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn figment_with(toml: &str) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default())).merge(Toml::string(toml))
    }

    #[test]
    fn test_defaults() {
        let config = ConfigService::from_figment(figment_with(""), None).unwrap();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.max_tokens, 600);
        assert_eq!(config.port, 8501);
        assert!(config.openai_api_key.is_none());
        assert!(!config.llm_config().has_api_key());
    }

    #[test]
    fn test_secrets_file_supplies_key() {
        let figment = figment_with("openai_api_key = \"sk-file\"\nport = 9000");
        let config = ConfigService::from_figment(figment, None).unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.port, 9000);
    }

    #[test]
    fn test_uppercase_secrets_key_supplies_key() {
        let figment = figment_with("OPENAI_API_KEY = \"sk-file\"");
        let config = ConfigService::from_figment(figment, None).unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-file"));

        let figment = figment_with("OPENAI_API_KEY = \"sk-upper\"\nopenai_api_key = \"sk-lower\"");
        let config = ConfigService::from_figment(figment, None).unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-upper"));

        let figment = figment_with("OPENAI_API_KEY = \" \"\nopenai_api_key = \"sk-lower\"");
        let config = ConfigService::from_figment(figment, None).unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-lower"));

        let figment = figment_with("OPENAI_API_KEY = \"sk-file\"");
        let config = ConfigService::from_figment(figment, Some("sk-env".to_string())).unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn test_env_key_wins_over_secrets() {
        let figment = figment_with("openai_api_key = \"sk-file\"");
        let config = ConfigService::from_figment(figment, Some("sk-env".to_string())).unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-env"));
    }

    #[test]
    fn test_blank_env_key_falls_back() {
        assert_eq!(
            resolve_api_key(Some("".to_string()), Some("sk-file".to_string())),
            Some("sk-file".to_string())
        );
        assert_eq!(resolve_api_key(Some("  ".to_string()), None), None);
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let result = ConfigService::from_figment(figment_with("port = \"not a port\""), None);
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_local_provider_detected() {
        let figment = figment_with("base_url = \"http://localhost:1234/v1\"");
        let config = ConfigService::from_figment(figment, None).unwrap();
        assert_eq!(config.llm_config().provider, LLMProvider::Local);
    }
}
