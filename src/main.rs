use actix_cors::Cors;
use actix_web::{web, App, HttpServer, middleware};
use atm_finder::config::{LoggingSettings, Settings};
use atm_finder::core::Searcher;
use atm_finder::routes::{self, atms::AppState};
use atm_finder::services::{AtmStore, CacheManager, FallbackLocator};
use std::sync::Arc;
use tracing::{info, error};
use tracing_subscriber::EnvFilter;

/// Initialize logging
///
/// `LOG_LEVEL` and `LOG_FORMAT` take precedence over the config file.
fn init_tracing(logging: &LoggingSettings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    let logging = settings
        .as_ref()
        .map(|s| s.logging.clone())
        .unwrap_or_default();
    init_tracing(&logging);

    info!("Starting ATM Finder service...");

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Configuration loaded successfully");

    let store = AtmStore::load(&settings.fixture.path).map_err(|e| {
        error!("Failed to load ATM fixture: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidData, e)
    })?;

    // Redis is optional, the cache degrades to in-process only
    let cache = Arc::new(
        CacheManager::new(
            settings.cache.redis_url.as_deref(),
            settings.cache.l1_cache_size,
            settings.cache.ttl_secs,
        )
        .await,
    );

    info!(
        "Cache manager initialized (L1: {} entries, TTL: {}s, shared: {})",
        settings.cache.l1_cache_size,
        settings.cache.ttl_secs,
        cache.stats().l2_enabled
    );

    let searcher = Searcher::new(settings.search.distance_model);
    let locator = FallbackLocator::new(settings.locator.center(), settings.locator.jitter_deg);

    info!(
        "Searcher initialized (distance model: {}, radius: {}-{} km)",
        settings.search.distance_model.as_str(),
        settings.search.min_radius_km,
        settings.search.max_radius_km
    );

    let app_state = AppState {
        store,
        searcher,
        locator,
        cache,
        search: settings.search.clone(),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
