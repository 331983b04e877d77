// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Atm, BoundingBox, Coordinates, DistanceModel, Network, SearchParams};
pub use requests::SearchAtmsRequest;
pub use responses::{DirectionsResponse, ErrorResponse, HealthResponse, SearchAtmsResponse};
