use serde::{Deserialize, Serialize};
use std::fmt;

/// Card scheme accepted by an ATM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Network {
    Visa,
    Mastercard,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Visa, Network::Mastercard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Visa => "VISA",
            Network::Mastercard => "MASTERCARD",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point on the map, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// ATM record as stored in the fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atm {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub coordinates: Coordinates,
    pub networks: Vec<Network>,
    pub services: Vec<String>,
    pub hours: String,
    #[serde(rename = "phoneNumber", default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(rename = "availableCash", default, skip_serializing_if = "Option::is_none")]
    pub available_cash: Option<Vec<String>>,
    /// Kilometres from the search origin. Only set on search results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl Atm {
    /// Copy of this record annotated with a distance
    pub fn with_distance(&self, distance_km: f64) -> Atm {
        Atm {
            distance: Some(distance_km),
            ..self.clone()
        }
    }
}

/// Criteria for a single ATM search
///
/// Empty `services` or `available_cash` means the filter is not applied.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub origin: Coordinates,
    pub radius_km: f64,
    pub networks: Vec<Network>,
    pub services: Vec<String>,
    pub available_cash: Vec<String>,
    pub limit: Option<usize>,
}

impl SearchParams {
    pub fn new(origin: Coordinates, radius_km: f64, networks: Vec<Network>) -> Self {
        Self {
            origin,
            radius_km,
            networks,
            services: Vec::new(),
            available_cash: Vec::new(),
            limit: None,
        }
    }

    pub fn with_services(mut self, services: Vec<String>) -> Self {
        self.services = services;
        self
    }

    pub fn with_available_cash(mut self, available_cash: Vec<String>) -> Self {
        self.available_cash = available_cash;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// How distances between two coordinates are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceModel {
    /// Flat-earth approximation, 111 km per degree
    #[default]
    Planar,
    /// Great-circle distance
    Haversine,
}

impl DistanceModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceModel::Planar => "planar",
            DistanceModel::Haversine => "haversine",
        }
    }
}

/// Geospatial bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    #[serde(rename = "minLat")]
    pub min_lat: f64,
    #[serde(rename = "maxLat")]
    pub max_lat: f64,
    #[serde(rename = "minLon")]
    pub min_lon: f64,
    #[serde(rename = "maxLon")]
    pub max_lon: f64,
}
