//! # Quill Web Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use quill_migration::{Migrator, MigratorTrait};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;
mod views;

use config::AppConfig;
use middleware::error_pages;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!("Starting Quill on {}:{}", config.host, config.port);

    let db = quill_infra::database::connect(&config.database).await?;
    if config.run_migrations {
        Migrator::up(&db, None).await?;
        tracing::info!("Migrations applied");
    }

    let state = web::Data::new(AppState::new(db, &config)?);
    let form_limit = config.form_limit;

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::FormConfig::default().limit(form_limit))
            .wrap(error_pages())
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .configure(handlers::configure_routes)
    })
    .client_request_timeout(config.request_timeout)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
