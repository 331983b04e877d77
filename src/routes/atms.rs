use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use std::time::Duration;
use validator::Validate;
use crate::config::SearchSettings;
use crate::core::{calculate_bounds, directions_url, SearchResult, Searcher};
use crate::models::{
    DirectionsResponse, ErrorResponse, HealthResponse, Network, SearchAtmsRequest,
    SearchAtmsResponse, SearchParams,
};
use crate::services::{AtmStore, CacheError, CacheKey, CacheManager, FallbackLocator};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: AtmStore,
    pub searcher: Searcher,
    pub locator: FallbackLocator,
    pub cache: Arc<CacheManager>,
    pub search: SearchSettings,
}

/// Configure all ATM routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/atms/search", web::post().to(search_atms))
        .route("/atms/{id}", web::get().to(get_atm))
        .route("/atms/{id}/directions", web::get().to(get_directions));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let cache = state.cache.stats();

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        atm_count: state.store.len(),
        cache_entries: cache.l1_size,
        shared_cache: cache.l2_enabled,
    })
}

fn bad_request(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error, message, 400))
}

/// Search ATMs endpoint
///
/// POST /api/v1/atms/search
///
/// Request body:
/// ```json
/// {
///   "latitude": 49.2331,
///   "longitude": 28.4682,
///   "location": "string",
///   "radius": 5,
///   "networks": ["VISA", "MASTERCARD"],
///   "services": ["Cash Withdrawal"],
///   "availableCash": ["100 UAH"],
///   "limit": 20
/// }
/// ```
/// Every field is optional.
async fn search_atms(
    state: web::Data<AppState>,
    req: web::Json<SearchAtmsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: field_errors={:?}", errors);
        return bad_request("Validation failed", errors.to_string());
    }

    let req = req.into_inner();

    let explicit = match req.coordinates() {
        Ok(coordinates) => coordinates,
        Err(message) => return bad_request("Validation failed", message),
    };

    let settings = &state.search;
    let radius_km = req.radius.unwrap_or(settings.default_radius_km);
    if !(settings.min_radius_km..=settings.max_radius_km).contains(&radius_km) {
        return bad_request(
            "Validation failed",
            format!(
                "radius must be between {} and {} km",
                settings.min_radius_km, settings.max_radius_km
            ),
        );
    }

    let networks = req.networks.unwrap_or_else(|| Network::ALL.to_vec());
    if networks.is_empty() {
        return bad_request("Validation failed", "at least one network is required");
    }

    let origin = state.locator.resolve(explicit, req.location.as_deref());

    let params = SearchParams {
        origin: origin.coordinates,
        radius_km,
        networks,
        services: req.services.unwrap_or_default(),
        available_cash: req.available_cash.unwrap_or_default(),
        limit: Some(req.limit.unwrap_or(settings.max_limit).min(settings.max_limit)),
    };

    tracing::info!(
        "Searching ATMs at ({}, {}) within {} km, networks: {:?}",
        params.origin.latitude,
        params.origin.longitude,
        params.radius_km,
        params.networks
    );

    let result = cached_search(&state, &params).await;

    if settings.simulated_latency_ms > 0 {
        tokio::time::sleep(Duration::from_millis(settings.simulated_latency_ms)).await;
    }

    let response = SearchAtmsResponse {
        search_id: uuid::Uuid::new_v4().to_string(),
        origin: params.origin,
        approximate_location: origin.approximate,
        bounds: calculate_bounds(&result.atms),
        total_results: result.atms.len(),
        total_candidates: result.total_candidates,
        results: result.atms,
    };

    tracing::info!(
        "Returning {} ATMs (from {} candidates)",
        response.total_results,
        response.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Run a search through the cache
///
/// Cache failures degrade to a direct search.
async fn cached_search(state: &AppState, params: &SearchParams) -> SearchResult {
    let key = CacheKey::search(params, state.searcher.distance_model());

    match state.cache.get::<SearchResult>(&key).await {
        Ok(hit) => return hit,
        Err(CacheError::CacheMiss(_)) => {}
        Err(e) => tracing::warn!("Cache read failed, searching directly: {}", e),
    }

    let result = state.searcher.search(state.store.all(), params);

    if let Err(e) = state.cache.set(&key, &result).await {
        tracing::warn!("Failed to cache search result: {}", e);
    }

    result
}

fn not_found(id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "ATM not found",
        format!("No ATM with id {}", id),
        404,
    ))
}

/// Get a single ATM
///
/// GET /api/v1/atms/{id}
async fn get_atm(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.store.get(&id) {
        Some(atm) => HttpResponse::Ok().json(atm),
        None => not_found(&id),
    }
}

/// Directions link for an ATM
///
/// GET /api/v1/atms/{id}/directions
async fn get_directions(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.store.get(&id) {
        Some(atm) => HttpResponse::Ok().json(DirectionsResponse {
            id: atm.id.clone(),
            url: directions_url(atm),
        }),
        None => not_found(&id),
    }
}
