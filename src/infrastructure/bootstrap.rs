use std::sync::{Arc, Mutex};

use tracing::error;

use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm_clients::{LLMClient, OpenAIClient};
use crate::interfaces::http::{add_log, start_server, LogEntry};
use crate::interfaces::AppState;

/// Wires the services for `config` and runs the HTTP server until shutdown.
pub async fn serve(config: AppConfig) -> Result<()> {
    let logs: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));

    let llm_config = config.llm_config();
    let llm_client: Arc<dyn LLMClient + Send + Sync> = Arc::new(OpenAIClient::new());
    let state = Arc::new(AppState::new(llm_config.clone(), llm_client));

    if !llm_config.has_api_key() {
        add_log(
            &logs,
            "WARN",
            "System",
            "OPENAI_API_KEY is not configured; non-sample requirements will return a warning",
        );
    }

    let server = start_server(state, logs.clone(), &config.host, config.port).map_err(|err| {
        error!(error = %err, host = %config.host, port = config.port, "Failed to bind HTTP server");
        AppError::IoError(format!("Failed to start HTTP server: {}", err))
    })?;

    add_log(
        &logs,
        "INFO",
        "System",
        &format!(
            "HTTP server started on {}:{} (model={} provider={:?})",
            config.host, config.port, llm_config.model, llm_config.provider
        ),
    );

    server.await?;
    Ok(())
}
