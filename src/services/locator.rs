use crate::models::Coordinates;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Origin chosen for a search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOrigin {
    pub coordinates: Coordinates,
    /// False only when the caller supplied coordinates
    pub approximate: bool,
}

/// Stand-in for geocoding
///
/// Maps a free-text location to a stable pseudo-location near the default
/// centre. Never fails.
#[derive(Debug, Clone, Copy)]
pub struct FallbackLocator {
    center: Coordinates,
    jitter_deg: f64,
}

impl FallbackLocator {
    pub fn new(center: Coordinates, jitter_deg: f64) -> Self {
        Self {
            center,
            jitter_deg: jitter_deg.abs(),
        }
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    /// Pick the search origin
    ///
    /// Explicit coordinates win, then a non-blank location string, then the
    /// default centre.
    pub fn resolve(&self, explicit: Option<Coordinates>, location: Option<&str>) -> ResolvedOrigin {
        if let Some(coordinates) = explicit {
            return ResolvedOrigin {
                coordinates,
                approximate: false,
            };
        }

        let coordinates = match location.map(str::trim).filter(|l| !l.is_empty()) {
            Some(query) => {
                tracing::info!("Using approximate location for \"{}\"", query);
                self.approximate(query)
            }
            None => {
                tracing::info!("No location given, using default centre");
                self.center
            }
        };

        ResolvedOrigin {
            coordinates,
            approximate: true,
        }
    }

    /// Deterministic pseudo-location for a location string
    ///
    /// Case and surrounding whitespace are ignored.
    pub fn approximate(&self, query: &str) -> Coordinates {
        let hash = fnv1a(query.trim().to_lowercase().as_bytes());

        let lat_unit = (hash & 0xffff_ffff) as f64 / u32::MAX as f64;
        let lon_unit = (hash >> 32) as f64 / u32::MAX as f64;

        Coordinates {
            latitude: self.center.latitude + (lat_unit * 2.0 - 1.0) * self.jitter_deg,
            longitude: self.center.longitude + (lon_unit * 2.0 - 1.0) * self.jitter_deg,
        }
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}
