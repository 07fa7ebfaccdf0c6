//! # Guestbook API Server
//!
//! Actix-web entry point for the wedding guestbook backend.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod service;
mod state;

use config::AppConfig;
use guestbook_infra::RequestRateLimiter;
use middleware::error::AppError;
use middleware::rate_limit::RateLimitMiddleware;
use observability::trace::TraceIdMiddleware;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting {} on {}:{}",
        config.app_name,
        config.host,
        config.port
    );

    let state = match AppState::new(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("failed to initialize application state: {e}");
            std::process::exit(1);
        }
    };
    let limiter = RequestRateLimiter::new(&config.rate_limit);

    HttpServer::new(move || {
        App::new()
            // Outermost last: trace ids exist before the limiter runs.
            .wrap(RateLimitMiddleware::new(limiter.clone()))
            .wrap(TraceIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::bad_request(err.to_string()).into()
            }))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,guestbook_infra=debug"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
