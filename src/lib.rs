//! ATM Finder - search service for VISA and Mastercard ATMs
//!
//! Filters a read-only set of ATM records by card network, service and cash
//! denomination, annotates each with its distance from the search origin and
//! returns those inside the radius, nearest first.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{Searcher, SearchResult, distance::{planar_distance_km, calculate_bounds}};
pub use models::{Atm, Coordinates, DistanceModel, Network, SearchParams, SearchAtmsRequest, SearchAtmsResponse};
pub use services::{AtmStore, FallbackLocator};
