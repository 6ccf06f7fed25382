use std::collections::HashMap;

use h3o::{CellIndex, Resolution};

use crate::error::RideError;
use crate::geo::{haversine_m, Coordinate};

use super::finder::{is_searchable, pick_best, NearestFinder};
use super::types::{Candidate, Nearest};

/// Default ring budget: at resolution 9 (~174 m hex edge) this covers about 11 km.
pub const DEFAULT_MAX_RINGS: u32 = 64;

/// Grid-indexed nearest search over H3 cells.
///
/// Active candidates are bucketed by cell, then grid disks around the query
/// cell are grown until one contains a candidate. Because grid distance only
/// bounds metric distance up to the hexagon geometry, the final disk extends
/// past the first hit by [`search_radius_after_hit`] rings, and candidates in
/// it are compared by exact haversine distance. The result is identical to
/// [`super::LinearScanFinder`], including tie-breaking by input order.
///
/// When no candidate is found within `max_rings`, every active candidate is
/// scored directly.
#[derive(Debug, Clone, Copy)]
pub struct H3RingFinder {
    resolution: Resolution,
    max_rings: u32,
}

impl H3RingFinder {
    pub fn new(resolution: Resolution, max_rings: u32) -> Self {
        Self {
            resolution,
            max_rings,
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn max_rings(&self) -> u32 {
        self.max_rings
    }

    /// Smallest tried disk radius containing at least one bucket. Radii are
    /// tried as 0, 1, 2, 4, 8, ... so the returned value is an upper bound on
    /// the true first occupied ring.
    fn first_hit_radius(&self, origin: CellIndex, buckets: &HashMap<CellIndex, Vec<usize>>) -> Option<u32> {
        let mut k = 0;
        loop {
            if origin
                .grid_disk::<Vec<_>>(k)
                .iter()
                .any(|cell| buckets.contains_key(cell))
            {
                return Some(k);
            }
            if k >= self.max_rings {
                return None;
            }
            k = if k == 0 { 1 } else { (k * 2).min(self.max_rings) };
        }
    }
}

impl Default for H3RingFinder {
    fn default() -> Self {
        Self::new(Resolution::Nine, DEFAULT_MAX_RINGS)
    }
}

/// Radius that must be scanned once a candidate was seen within `hit` rings.
///
/// Centers of cells `j` rings apart are at least `1.5 * j` hex edges apart
/// and at most `sqrt(3) * j` edges apart; with one circumradius of slack per
/// cell, nothing beyond `1.155 * hit + 2.67` rings can be closer than the hit.
pub fn search_radius_after_hit(hit: u32) -> u32 {
    hit + hit / 4 + 4
}

impl NearestFinder for H3RingFinder {
    fn nearest<'a>(
        &self,
        query: Coordinate,
        candidates: &'a [Candidate],
    ) -> Result<Nearest<'a>, RideError> {
        query.validate()?;
        let origin = query.to_lat_lng()?.to_cell(self.resolution);

        let mut buckets: HashMap<CellIndex, Vec<usize>> = HashMap::new();
        for (index, candidate) in candidates.iter().enumerate() {
            if !is_searchable(candidate) {
                continue;
            }
            let Ok(lat_lng) = candidate.coordinate.to_lat_lng() else {
                continue;
            };
            buckets
                .entry(lat_lng.to_cell(self.resolution))
                .or_default()
                .push(index);
        }
        if buckets.is_empty() {
            return Err(RideError::NoCandidatesAvailable);
        }

        let score = |index: usize| (index, haversine_m(query, candidates[index].coordinate));

        let radius = self
            .first_hit_radius(origin, &buckets)
            .map(search_radius_after_hit)
            .filter(|radius| *radius <= self.max_rings);

        let best = match radius {
            Some(radius) => pick_best(
                candidates,
                origin
                    .grid_disk::<Vec<_>>(radius)
                    .iter()
                    .filter_map(|cell| buckets.get(cell))
                    .flatten()
                    .map(|&index| score(index)),
            ),
            None => pick_best(
                candidates,
                buckets.values().flatten().map(|&index| score(index)),
            ),
        };
        best.ok_or(RideError::NoCandidatesAvailable)
    }
}
