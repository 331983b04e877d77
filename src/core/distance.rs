use geo::{BoundingRect, HaversineDistance, MultiPoint, Point};
use crate::models::{Atm, BoundingBox, Coordinates, DistanceModel};

/// Kilometres per degree of latitude used by the planar model
pub const KM_PER_DEGREE: f64 = 111.0;

/// Fraction of the result span added on each side of the map bounds
const BOUNDS_PADDING: f64 = 0.1;

/// Flat-earth distance between two points in kilometres
///
/// 1° latitude = 111 km, 1° longitude = 111 km * cos(origin latitude).
/// Only accurate over short ranges.
#[inline]
pub fn planar_distance_km(origin: Coordinates, target: Coordinates) -> f64 {
    let dy = (target.latitude - origin.latitude) * KM_PER_DEGREE;
    let dx = (target.longitude - origin.longitude)
        * KM_PER_DEGREE
        * origin.latitude.to_radians().cos();

    dx.hypot(dy)
}

/// Great-circle distance between two points in kilometres
#[inline]
pub fn haversine_distance_km(origin: Coordinates, target: Coordinates) -> f64 {
    let from = Point::new(origin.longitude, origin.latitude);
    let to = Point::new(target.longitude, target.latitude);

    from.haversine_distance(&to) / 1000.0
}

impl DistanceModel {
    #[inline]
    pub fn distance_km(&self, origin: Coordinates, target: Coordinates) -> f64 {
        match self {
            DistanceModel::Planar => planar_distance_km(origin, target),
            DistanceModel::Haversine => haversine_distance_km(origin, target),
        }
    }
}

/// Calculate a bounding box around a center point
///
/// Contains every point whose planar distance from `center` is at most
/// `radius_km`.
pub fn calculate_bounding_box(center: Coordinates, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / KM_PER_DEGREE;

    // Infinite at the poles, which keeps every longitude
    let lon_delta = radius_km / (KM_PER_DEGREE * center.latitude.to_radians().cos().abs());

    BoundingBox {
        min_lat: center.latitude - lat_delta,
        max_lat: center.latitude + lat_delta,
        min_lon: center.longitude - lon_delta,
        max_lon: center.longitude + lon_delta,
    }
}

/// Check if a point is within a bounding box
#[inline]
pub fn is_within_bounding_box(point: Coordinates, bbox: &BoundingBox) -> bool {
    point.latitude >= bbox.min_lat
        && point.latitude <= bbox.max_lat
        && point.longitude >= bbox.min_lon
        && point.longitude <= bbox.max_lon
}

/// Map viewport covering a list of ATMs, padded by 10% of the span
///
/// Returns `None` for an empty list.
pub fn calculate_bounds(atms: &[Atm]) -> Option<BoundingBox> {
    let points: MultiPoint<f64> = atms
        .iter()
        .map(|atm| Point::new(atm.coordinates.longitude, atm.coordinates.latitude))
        .collect();

    let rect = points.bounding_rect()?;
    let (min, max) = (rect.min(), rect.max());

    let lat_padding = (max.y - min.y) * BOUNDS_PADDING;
    let lon_padding = (max.x - min.x) * BOUNDS_PADDING;

    Some(BoundingBox {
        min_lat: min.y - lat_padding,
        max_lat: max.y + lat_padding,
        min_lon: min.x - lon_padding,
        max_lon: max.x + lon_padding,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Network;

    fn atm_at(id: &str, lat: f64, lon: f64) -> Atm {
        Atm {
            id: id.to_string(),
            name: format!("ATM {}", id),
            address: "1 Test St.".to_string(),
            city: "Vinnytsia".to_string(),
            state: "Center".to_string(),
            postal_code: "21000".to_string(),
            coordinates: Coordinates::new(lat, lon),
            networks: vec![Network::Visa],
            services: vec![],
            hours: "24/7".to_string(),
            phone_number: None,
            available_cash: None,
            distance: None,
        }
    }

    #[test]
    fn test_planar_distance_short_range() {
        let origin = Coordinates::new(49.2331, 28.4682);
        let target = Coordinates::new(49.2340, 28.4690);

        let distance = planar_distance_km(origin, target);
        assert!((distance - 0.1155).abs() < 0.001, "got {}", distance);
    }

    #[test]
    fn test_planar_distance_pure_latitude() {
        let origin = Coordinates::new(10.0, 20.0);
        let target = Coordinates::new(11.0, 20.0);

        assert!((planar_distance_km(origin, target) - 111.0).abs() < 1e-9);
    }

    #[test]
    fn test_planar_uses_origin_latitude() {
        // Longitude scale comes from the origin, so the measure is not symmetric
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(60.0, 1.0);

        let from_equator = planar_distance_km(a, b);
        let from_north = planar_distance_km(b, a);
        assert!(from_equator > from_north);
    }

    #[test]
    fn test_haversine_distance() {
        // London to Paris is approximately 344 km
        let london = Coordinates::new(51.5074, -0.1278);
        let paris = Coordinates::new(48.8566, 2.3522);

        let distance = haversine_distance_km(london, paris);
        assert!((distance - 344.0).abs() < 10.0, "Distance should be ~344km, got {}", distance);
    }

    #[test]
    fn test_models_agree_at_short_range() {
        let origin = Coordinates::new(49.2331, 28.4682);
        let target = Coordinates::new(49.2400, 28.4800);

        let planar = DistanceModel::Planar.distance_km(origin, target);
        let haversine = DistanceModel::Haversine.distance_km(origin, target);
        assert!((planar - haversine).abs() < 0.01);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = calculate_bounding_box(Coordinates::new(49.2331, 28.4682), 10.0);

        assert!(bbox.min_lat < 49.2331);
        assert!(bbox.max_lat > 49.2331);
        assert!(bbox.min_lon < 28.4682);
        assert!(bbox.max_lon > 28.4682);

        // 20km / 111km per degree = ~0.18 degrees
        let lat_span = bbox.max_lat - bbox.min_lat;
        assert!((lat_span - 0.18).abs() < 0.02, "Lat span should be ~0.18 degrees");
    }

    #[test]
    fn test_point_within_bbox() {
        let center = Coordinates::new(49.2331, 28.4682);
        let bbox = calculate_bounding_box(center, 2.0);

        assert!(is_within_bounding_box(center, &bbox));
        assert!(is_within_bounding_box(Coordinates::new(49.24, 28.47), &bbox));
        assert!(!is_within_bounding_box(Coordinates::new(49.30, 28.60), &bbox));
    }

    #[test]
    fn test_bounds_empty() {
        assert!(calculate_bounds(&[]).is_none());
    }

    #[test]
    fn test_bounds_padding() {
        let atms = vec![atm_at("1", 49.0, 28.0), atm_at("2", 50.0, 30.0)];

        let bounds = calculate_bounds(&atms).unwrap();
        assert!((bounds.min_lat - 48.9).abs() < 1e-9);
        assert!((bounds.max_lat - 50.1).abs() < 1e-9);
        assert!((bounds.min_lon - 27.8).abs() < 1e-9);
        assert!((bounds.max_lon - 30.2).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_single_point() {
        let bounds = calculate_bounds(&[atm_at("1", 49.2, 28.4)]).unwrap();
        assert_eq!(bounds.min_lat, bounds.max_lat);
        assert_eq!(bounds.min_lon, 28.4);
    }
}
