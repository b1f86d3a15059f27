use std::io;
use std::sync::Arc;

use actix_web::web;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::application::{ForecastUseCase, UploadUseCase};
use crate::domain::upload::RawFile;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::forecast_client::HttpForecastClient;
use crate::interfaces::http::{add_log, start_server, HttpState};

/// `forecast-prep` serves the HTTP API; `forecast-prep preview <file>`
/// prints the upload outcome for one file as JSON and exits.
pub async fn run() -> io::Result<()> {
    let config = AppConfig::load().map_err(io::Error::other)?;

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let [command, path] = args.as_slice() {
        if command == "preview" {
            return preview_file(path).await;
        }
    }

    let client = HttpForecastClient::new(&config.forecast_api).map_err(io::Error::other)?;
    let state = web::Data::new(HttpState::new(
        UploadUseCase::default(),
        ForecastUseCase::new(Arc::new(client)),
    ));

    let server = start_server(&config.server, state.clone())?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        forecast_api = %config.forecast_api.base_url,
        "HTTP server started"
    );
    add_log(
        &state.logs,
        "INFO",
        "System",
        &format!(
            "HTTP server started on {}:{}",
            config.server.host, config.server.port
        ),
    );

    server.await
}

async fn preview_file(path: &str) -> io::Result<()> {
    let outcome = UploadUseCase::default()
        .process(&RawFile::from_path(path))
        .await
        .map_err(io::Error::other)?;

    let json = serde_json::to_string_pretty(&outcome).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
