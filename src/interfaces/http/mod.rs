use crate::application::{ForecastUseCase, UploadUseCase};
use crate::domain::error::AppError;
use crate::domain::forecast::ForecastConfig;
use crate::domain::session::Session;
use crate::domain::upload::RawFile;
use crate::infrastructure::config::ServerConfig;
use actix_cors::Cors;
use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::{
    dev::Server, error::InternalError, get, post, web, App, HttpRequest, HttpResponse, HttpServer,
    Responder,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, Mutex};

pub const LOG_CAPACITY: usize = 100;

/// Request bodies up to the forecasting service's upload limit.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub upload: UploadUseCase,
    pub forecast: ForecastUseCase,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

impl HttpState {
    pub fn new(upload: UploadUseCase, forecast: ForecastUseCase) -> Self {
        Self {
            upload,
            forecast,
            logs: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[derive(Deserialize)]
pub struct FileQuery {
    pub filename: String,
}

fn error_response(err: &AppError) -> HttpResponse {
    let body = json!({ "error": err.message() });
    match err {
        AppError::Unauthorized(_) => HttpResponse::Unauthorized().json(body),
        e if e.is_user_facing() => HttpResponse::BadRequest().json(body),
        AppError::HttpError(_) => HttpResponse::BadGateway().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

fn uploaded_file(req: &HttpRequest, filename: &str, body: web::Bytes) -> RawFile {
    let file = RawFile::from_bytes(filename, body.to_vec());
    match req.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) {
        Some(content_type) => file.with_content_type(content_type),
        None => file,
    }
}

fn bearer_session(req: &HttpRequest) -> Session {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(Session::from_token)
        .unwrap_or_default()
}

#[post("/preview")]
async fn preview_upload(
    data: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<FileQuery>,
    body: web::Bytes,
) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "Upload",
        &format!("Previewing {} ({} bytes)", query.filename, body.len()),
    );

    let file = uploaded_file(&req, &query.filename, body);
    match data.upload.process(&file).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Upload",
                &format!("Preview failed for {}: {}", query.filename, e),
            );
            error_response(&e)
        }
    }
}

#[post("/forecast")]
async fn submit_forecast(
    data: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<FileQuery>,
    config: web::Query<ForecastConfig>,
    body: web::Bytes,
) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "Forecast",
        &format!(
            "Submitting {} (date_col={} target_col={} freq={} horizon={})",
            query.filename, config.date_col, config.target_col, config.freq, config.horizon
        ),
    );

    let session = bearer_session(&req);
    let file = uploaded_file(&req, &query.filename, body);

    match data.forecast.submit(&session, &file, &config).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Forecast",
                &format!("Forecast failed: {}", e),
            );
            error_response(&e)
        }
    }
}

#[get("/countries")]
async fn list_countries(data: web::Data<HttpState>) -> impl Responder {
    HttpResponse::Ok().json(json!({ "countries": data.forecast.countries().await }))
}

#[get("/subdivisions/{country}")]
async fn list_subdivisions(data: web::Data<HttpState>, path: web::Path<String>) -> impl Responder {
    let subdivisions = data.forecast.subdivisions(&path).await;
    HttpResponse::Ok().json(json!({ "subdivisions": subdivisions }))
}

#[get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    match data.logs.lock() {
        Ok(logs) => HttpResponse::Ok().json(&*logs),
        Err(_) => HttpResponse::InternalServerError().json(json!({ "error": "log buffer poisoned" })),
    }
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    if let Ok(mut logs) = logs.lock() {
        logs.push(entry.clone());
        if logs.len() > LOG_CAPACITY {
            logs.remove(0);
        }
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

/// Routes under `/api`, plus body and query limits. Shared by the server
/// and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        let body = json!({ "error": err.to_string() });
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    });

    cfg.app_data(web::PayloadConfig::new(MAX_BODY_BYTES))
        .app_data(query_config)
        .service(
            web::scope("/api")
                .service(preview_upload)
                .service(submit_forecast)
                .service(list_countries)
                .service(list_subdivisions)
                .service(health_check)
                .service(get_logs),
        );
}

pub fn start_server(config: &ServerConfig, state: web::Data<HttpState>) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for the local UI

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
