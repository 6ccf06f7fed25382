use tracing::{debug, info};

use crate::error::RideError;
use crate::fare::{FareEstimator, FareQuote};
use crate::nearest::{Candidate, LinearScanFinder, NearestFinder};
use crate::tracking::eta_minutes;

use super::types::{MatchResult, RideRequest};
use super::MatchConfig;

/// Coordinates fare estimation and driver selection for one request.
///
/// Holds no per-ride state, so one matcher serves every concurrent booking.
pub struct RideMatcher {
    estimator: FareEstimator,
    finder: Box<dyn NearestFinder>,
    config: MatchConfig,
}

impl RideMatcher {
    pub fn new(estimator: FareEstimator, finder: Box<dyn NearestFinder>, config: MatchConfig) -> Self {
        Self {
            estimator,
            finder,
            config,
        }
    }

    pub fn estimator(&self) -> &FareEstimator {
        &self.estimator
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Price a request without selecting a driver (the quote screen).
    pub fn quote(&self, request: &RideRequest) -> Result<FareQuote, RideError> {
        let (pickup, destination) = request.validated_endpoints()?;
        Ok(self
            .estimator
            .estimate(pickup, destination, request.vehicle_class(), request.ride_sharing))
    }

    /// Quote the request and assign the nearest online driver.
    ///
    /// `drivers` is expected to be pre-filtered to online drivers by the
    /// availability collaborator; inactive entries are skipped regardless.
    pub fn match_ride(&self, request: &RideRequest, drivers: &[Candidate]) -> Result<MatchResult, RideError> {
        let (pickup, destination) = request.validated_endpoints()?;
        let quote = self
            .estimator
            .estimate(pickup, destination, request.vehicle_class(), request.ride_sharing);

        let nearest = self.finder.nearest(pickup, drivers)?;
        if let Some(max_m) = self.config.max_pickup_distance_m {
            if nearest.distance_m > max_m {
                debug!(
                    driver = %nearest.candidate.id,
                    distance_m = nearest.distance_m,
                    max_m,
                    "nearest driver outside pickup radius"
                );
                return Err(RideError::NoCandidatesAvailable);
            }
        }

        let pickup_eta_minutes = eta_minutes(nearest.distance_m / 1000.0, self.config.pickup_speed_kmh);
        info!(
            driver = %nearest.candidate.id,
            distance_m = nearest.distance_m,
            pickup_eta_minutes,
            fare = quote.payable_fare(),
            "ride matched"
        );

        Ok(MatchResult {
            quote,
            driver: nearest.candidate.clone(),
            distance_to_pickup_m: nearest.distance_m,
            pickup_eta_minutes,
        })
    }
}

impl Default for RideMatcher {
    fn default() -> Self {
        Self::new(
            FareEstimator::default(),
            Box::new(LinearScanFinder),
            MatchConfig::default(),
        )
    }
}
