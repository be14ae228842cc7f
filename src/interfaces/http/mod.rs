use crate::application::use_cases::generation::MISSING_API_KEY_MESSAGE;
use crate::domain::error::AppError;
use crate::domain::requirement::{sample_requirement, sample_requirements, Requirement};
use crate::domain::test_case_result::TestCaseResult;
use crate::infrastructure::csv::export_file_name;
use crate::interfaces::state::AppState;
use actix_cors::Cors;
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{
    delete, dev::Server, get, post, web, App, HttpRequest, HttpResponse, HttpServer, Responder,
    Scope,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub app_state: Arc<AppState>,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

/// Either free text or a 1-based sample index. `sample` wins when both are set.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub requirement: Option<String>,
    #[serde(default)]
    pub sample: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub total: usize,
    pub results: Vec<TestCaseResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub credential_configured: bool,
    pub model: String,
    pub active_sessions: usize,
    pub warning: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn error_response(err: &AppError) -> HttpResponse {
    let body = ErrorBody {
        error: err.detail().to_string(),
    };
    match err {
        AppError::ValidationError(_) => HttpResponse::BadRequest().json(body),
        AppError::NotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

#[get("/status")]
async fn status(data: web::Data<HttpState>) -> impl Responder {
    let config = &data.app_state.llm_config;
    let active_sessions = match data.app_state.sessions.session_count() {
        Ok(count) => count,
        Err(e) => return error_response(&e),
    };
    let credential_configured = config.has_api_key();
    HttpResponse::Ok().json(StatusResponse {
        credential_configured,
        model: config.model.clone(),
        active_sessions,
        warning: (!credential_configured).then(|| MISSING_API_KEY_MESSAGE.to_string()),
    })
}

#[get("/samples")]
async fn list_samples() -> impl Responder {
    HttpResponse::Ok().json(sample_requirements())
}

#[post("/sessions")]
async fn create_session(data: web::Data<HttpState>) -> impl Responder {
    match data.app_state.sessions.create() {
        Ok(session_id) => {
            add_log(
                &data.logs,
                "INFO",
                "Sessions",
                &format!("Created session {}", session_id),
            );
            HttpResponse::Created().json(SessionCreated { session_id })
        }
        Err(e) => error_response(&e),
    }
}

#[delete("/sessions/{session_id}")]
async fn delete_session(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let session_id = path.into_inner();
    match data.app_state.sessions.remove(&session_id) {
        Ok(()) => {
            add_log(
                &data.logs,
                "INFO",
                "Sessions",
                &format!("Removed session {}", session_id),
            );
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(&e),
    }
}

#[post("/sessions/{session_id}/generate")]
async fn generate(
    data: web::Data<HttpState>,
    path: web::Path<String>,
    req: web::Json<GenerateRequest>,
) -> impl Responder {
    let session_id = path.into_inner();
    let req = req.into_inner();

    let text = match req.sample {
        Some(index) => match sample_requirement(index) {
            Some(text) => text.to_string(),
            None => {
                return error_response(&AppError::ValidationError(format!(
                    "Unknown sample {}",
                    index
                )))
            }
        },
        None => req.requirement.unwrap_or_default(),
    };

    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "Generating test cases (session={} chars={})",
            session_id,
            text.chars().count()
        ),
    );

    match data
        .app_state
        .generate_use_case
        .execute(&session_id, Requirement::new(text))
        .await
    {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "HttpApi",
                &format!("Generation rejected: {}", e),
            );
            error_response(&e)
        }
    }
}

#[get("/sessions/{session_id}/results")]
async fn list_results(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let result = data
        .app_state
        .sessions
        .with_store(&path, |store| ResultsResponse {
            total: store.len(),
            results: store.results().to_vec(),
        });
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(e) => error_response(&e),
    }
}

#[get("/sessions/{session_id}/results/latest")]
async fn latest_result(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    match data
        .app_state
        .sessions
        .with_store(&path, |store| store.latest().cloned())
    {
        Ok(Some(result)) => HttpResponse::Ok().json(result),
        Ok(None) => error_response(&AppError::NotFound(
            "No test cases generated yet".to_string(),
        )),
        Err(e) => error_response(&e),
    }
}

#[delete("/sessions/{session_id}/results")]
async fn clear_results(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    match data.app_state.sessions.with_store(&path, |store| store.clear()) {
        Ok(()) => {
            add_log(
                &data.logs,
                "INFO",
                "HttpApi",
                &format!("Cleared results for session {}", path.as_str()),
            );
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(&e),
    }
}

#[get("/sessions/{session_id}/export")]
async fn export_csv(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let rows = match data
        .app_state
        .sessions
        .with_store(&path, |store| store.results().to_vec())
    {
        Ok(rows) => rows,
        Err(e) => return error_response(&e),
    };

    match data.app_state.result_csv.write(&rows) {
        Ok(csv) => {
            let file_name = export_file_name(&Local::now());
            add_log(
                &data.logs,
                "INFO",
                "Export",
                &format!("Exported {} rows as {}", rows.len(), file_name),
            );
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{}\"", file_name),
                ))
                .body(csv)
        }
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Export",
                &format!("CSV export failed: {}", e),
            );
            error_response(&e)
        }
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    match data.logs.lock() {
        Ok(logs) => HttpResponse::Ok().json(&*logs),
        Err(_) => error_response(&AppError::Internal("Log buffer lock poisoned".to_string())),
    }
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    match level {
        "ERROR" => tracing::error!(source = source, "{}", message),
        "WARN" => tracing::warn!(source = source, "{}", message),
        _ => tracing::info!(source = source, "{}", message),
    }

    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    if let Ok(mut logs) = logs.lock() {
        logs.push(entry.clone());
        if logs.len() > MAX_LOG_ENTRIES {
            logs.remove(0);
        }
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_response(&AppError::ValidationError(err.to_string()));
    InternalError::from_response(err, response).into()
}

pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(status)
        .service(list_samples)
        .service(create_session)
        .service(delete_session)
        .service(generate)
        .service(list_results)
        .service(latest_result)
        .service(clear_results)
        .service(export_csv)
        .service(get_logs)
}

pub fn start_server(
    app_state: Arc<AppState>,
    logs: Arc<Mutex<Vec<LogEntry>>>,
    host: &str,
    port: u16,
) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState { app_state, logs });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // any local front end may drive the API

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(api_scope())
    })
    .bind((host, port))?
    .run();

    Ok(server)
}
