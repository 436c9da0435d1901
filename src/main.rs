use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};
use anyhow::Context;
use dotenvy::dotenv;

mod api;
mod auth;
mod config;
mod db;
mod docs;
mod engine;
mod error;
mod model;
mod models;
mod notify;
mod routes;
mod store;
mod utils;


use config::Config;
use db::init_db;
use notify::{marker::UpdateMarker, watcher::DashboardWatcher};
use store::TimesheetStore;
use utils::clock::{OffsetClock, SharedClock};

use tracing::info;
use tracing_appender::rolling;
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Timesheet service is running"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let marker = match &config.marker_file {
        Some(path) => UpdateMarker::file_backed(path),
        None => UpdateMarker::new(),
    };

    let store = TimesheetStore::new(pool, marker);
    store
        .init_schema()
        .await
        .context("Failed to initialize timesheet schema")?;

    let clock: SharedClock = Arc::new(OffsetClock::from_minutes(config.utc_offset_minutes));

    let watcher = DashboardWatcher::spawn(store.clone(), clock.clone(), config.poll_interval)
        .await
        .context("Failed to load initial dashboard")?;
    let feed = watcher.subscribe();

    info!(
        marker = store.marker().read(),
        employees = watcher.latest().statuses.len(),
        utc_offset_minutes = config.utc_offset_minutes,
        enforce_submission_windows = config.enforce_submission_windows,
        "Timesheet store ready"
    );

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();
    let api_doc = docs::openapi_for(&config.api_prefix);

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", api_doc.clone()),
            )
            .app_data(Data::new(store.clone()))
            .app_data(Data::new(config.clone()))
            .app_data(Data::new(clock.clone()))
            .app_data(Data::new(feed.clone()))
            .service(index)
            // Configure auth + protected routes with rate limiting
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await?;

    watcher.stop().await;
    info!("Server stopped");

    Ok(())
}
