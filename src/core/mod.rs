// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod format;
pub mod search;

pub use distance::{calculate_bounding_box, calculate_bounds, haversine_distance_km, is_within_bounding_box, planar_distance_km};
pub use filters::{matches_cash, matches_networks, matches_services};
pub use format::{directions_url, format_distance};
pub use search::{SearchResult, Searcher};
