use crate::models::Atm;

/// Human-readable distance: metres below 1 km, otherwise km with one decimal
pub fn format_distance(distance_km: Option<f64>) -> String {
    match distance_km {
        None => "Unknown distance".to_string(),
        Some(km) if km < 1.0 => format!("{} m", (km * 1000.0).round() as i64),
        Some(km) => format!("{:.1} km", km),
    }
}

/// Google Maps directions link to an ATM
pub fn directions_url(atm: &Atm) -> String {
    let destination = format!(
        "{}, {}, {}, {} {}",
        atm.name, atm.address, atm.city, atm.state, atm.postal_code
    );

    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}&destination_place_id={}",
        atm.coordinates.latitude,
        atm.coordinates.longitude,
        urlencoding::encode(&destination)
    )
}
