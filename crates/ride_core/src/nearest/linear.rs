use crate::error::RideError;
use crate::geo::Coordinate;

use super::finder::{pick_best, score_all, NearestFinder};
use super::types::{Candidate, Nearest};

/// Sequential scan over every active candidate.
///
/// Time complexity: O(n) per query. Candidate sets handled here (online
/// drivers in one city) are small enough that no index is needed; see
/// [`super::H3RingFinder`] for larger fleets.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearScanFinder;

impl NearestFinder for LinearScanFinder {
    fn nearest<'a>(
        &self,
        query: Coordinate,
        candidates: &'a [Candidate],
    ) -> Result<Nearest<'a>, RideError> {
        query.validate()?;
        pick_best(candidates, score_all(query, candidates)).ok_or(RideError::NoCandidatesAvailable)
    }
}
