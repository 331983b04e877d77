use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{Coordinates, Network};

/// Request to search for ATMs
///
/// Either both `latitude` and `longitude` are given, or the origin is
/// resolved from `location` (or the default centre) by the fallback locator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SearchAtmsRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default)]
    pub longitude: Option<f64>,
    #[validate(length(max = 256))]
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub radius: Option<f64>,
    #[serde(default)]
    pub networks: Option<Vec<Network>>,
    #[serde(default)]
    pub services: Option<Vec<String>>,
    #[serde(alias = "available_cash", rename = "availableCash", default)]
    pub available_cash: Option<Vec<String>>,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SearchAtmsRequest {
    /// Explicit origin supplied by the caller, if any
    ///
    /// Fails when only one of latitude/longitude is present.
    pub fn coordinates(&self) -> Result<Option<Coordinates>, String> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Ok(Some(Coordinates::new(lat, lon))),
            (None, None) => Ok(None),
            _ => Err("latitude and longitude must be provided together".to_string()),
        }
    }
}
