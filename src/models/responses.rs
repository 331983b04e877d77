use serde::{Deserialize, Serialize};
use crate::models::domain::{Atm, BoundingBox, Coordinates};

/// Response for the ATM search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAtmsResponse {
    #[serde(rename = "searchId")]
    pub search_id: String,
    pub origin: Coordinates,
    /// True when the origin came from the fallback locator
    #[serde(rename = "approximateLocation")]
    pub approximate_location: bool,
    pub results: Vec<Atm>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    pub bounds: Option<BoundingBox>,
}

/// Directions link for a single ATM
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionsResponse {
    pub id: String,
    pub url: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "atmCount")]
    pub atm_count: usize,
    #[serde(rename = "cacheEntries")]
    pub cache_entries: u64,
    #[serde(rename = "sharedCache")]
    pub shared_cache: bool,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}
