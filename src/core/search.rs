use serde::{Deserialize, Serialize};
use crate::models::{Atm, DistanceModel, SearchParams};
use crate::core::{
    distance::{calculate_bounding_box, is_within_bounding_box},
    filters::{matches_cash, matches_networks, matches_services},
};

/// Result of a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub atms: Vec<Atm>,
    pub total_candidates: usize,
}

/// Search orchestrator - implements the filter and ranking pipeline
///
/// # Pipeline Stages
/// 1. Network filter
/// 2. Service filter (when services are requested)
/// 3. Cash denomination filter (when denominations are requested)
/// 4. Distance annotation
/// 5. Radius filter
/// 6. Stable sort by distance, then limit
#[derive(Debug, Clone, Copy, Default)]
pub struct Searcher {
    distance_model: DistanceModel,
}

impl Searcher {
    pub fn new(distance_model: DistanceModel) -> Self {
        Self { distance_model }
    }

    pub fn distance_model(&self) -> DistanceModel {
        self.distance_model
    }

    /// Find the ATMs matching `params`, nearest first
    ///
    /// Pure over its inputs: `candidates` is never modified and returned
    /// records are copies carrying a distance. ATMs at equal distance keep
    /// their relative order from `candidates`.
    pub fn search(&self, candidates: &[Atm], params: &SearchParams) -> SearchResult {
        let total_candidates = candidates.len();

        // The box only bounds planar distances
        let prefilter = match self.distance_model {
            DistanceModel::Planar => Some(calculate_bounding_box(
                params.origin,
                params.radius_km * 1.01,
            )),
            DistanceModel::Haversine => None,
        };

        let mut ranked: Vec<(f64, &Atm)> = candidates
            .iter()
            .filter(|atm| matches_networks(atm, &params.networks))
            .filter(|atm| matches_services(atm, &params.services))
            .filter(|atm| matches_cash(atm, &params.available_cash))
            .filter(|atm| {
                prefilter
                    .as_ref()
                    .map_or(true, |bbox| is_within_bounding_box(atm.coordinates, bbox))
            })
            .filter_map(|atm| {
                let distance_km = self.distance_model.distance_km(params.origin, atm.coordinates);
                // NaN never passes
                (distance_km <= params.radius_km).then_some((distance_km, atm))
            })
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

        if let Some(limit) = params.limit {
            ranked.truncate(limit);
        }

        tracing::debug!(
            "Search at ({}, {}) r={}km matched {} of {} candidates",
            params.origin.latitude,
            params.origin.longitude,
            params.radius_km,
            ranked.len(),
            total_candidates
        );

        SearchResult {
            atms: ranked
                .into_iter()
                .map(|(distance_km, atm)| atm.with_distance(distance_km))
                .collect(),
            total_candidates,
        }
    }
}
