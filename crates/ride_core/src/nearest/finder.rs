use tracing::warn;

use crate::error::RideError;
use crate::geo::{haversine_m, Coordinate};

use super::types::{Candidate, Nearest};

/// Strategy for locating the closest active candidate to a query point.
///
/// Implementations must agree with a sequential scan: the returned candidate
/// minimizes the haversine distance and, among equally distant candidates,
/// is the one that appears first in `candidates`.
pub trait NearestFinder: Send + Sync {
    /// Return the closest active candidate and its distance in meters.
    ///
    /// Fails with [`RideError::InvalidCoordinate`] when `query` is out of
    /// range and with [`RideError::NoCandidatesAvailable`] when no candidate
    /// is both active and located at a valid coordinate.
    fn nearest<'a>(
        &self,
        query: Coordinate,
        candidates: &'a [Candidate],
    ) -> Result<Nearest<'a>, RideError>;
}

/// Whether a candidate can take part in a search. Active candidates with
/// malformed coordinates are collaborator data errors and are skipped.
pub(crate) fn is_searchable(candidate: &Candidate) -> bool {
    if !candidate.active {
        return false;
    }
    if let Err(err) = candidate.coordinate.validate() {
        warn!(candidate = %candidate.id, error = %err, "skipping candidate with invalid coordinate");
        return false;
    }
    true
}

/// Pick the best of `(index, distance)` pairs: smallest distance, then smallest index.
pub(crate) fn pick_best<'a, I>(candidates: &'a [Candidate], scored: I) -> Option<Nearest<'a>>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    let mut best: Option<(usize, f64)> = None;
    for (index, distance_m) in scored {
        let better = match best {
            None => true,
            Some((best_index, best_distance)) => {
                distance_m < best_distance || (distance_m == best_distance && index < best_index)
            }
        };
        if better {
            best = Some((index, distance_m));
        }
    }
    best.map(|(index, distance_m)| Nearest {
        candidate: &candidates[index],
        index,
        distance_m,
    })
}

/// Score every searchable candidate against `query`.
pub(crate) fn score_all(
    query: Coordinate,
    candidates: &[Candidate],
) -> impl Iterator<Item = (usize, f64)> + '_ {
    candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| is_searchable(candidate))
        .map(move |(index, candidate)| (index, haversine_m(query, candidate.coordinate)))
}
