use serde::{Deserialize, Serialize};

use crate::error::RideError;
use crate::fare::FareQuote;
use crate::geo::Coordinate;
use crate::nearest::Candidate;
use crate::pricing::VehicleClass;

/// A booking as received from the passenger app.
///
/// Endpoints are optional because the collaborator forwards whatever the
/// client sent; [`RideRequest::validated_endpoints`] turns gaps into errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideRequest {
    pub pickup: Option<Coordinate>,
    pub destination: Option<Coordinate>,
    /// Class identifier; unknown identifiers are priced as economy.
    #[serde(default)]
    pub vehicle_class: String,
    #[serde(default)]
    pub ride_sharing: bool,
}

impl RideRequest {
    pub fn new(pickup: Coordinate, destination: Coordinate, vehicle_class: VehicleClass) -> Self {
        Self {
            pickup: Some(pickup),
            destination: Some(destination),
            vehicle_class: vehicle_class.id().to_string(),
            ride_sharing: false,
        }
    }

    pub fn with_ride_sharing(mut self, ride_sharing: bool) -> Self {
        self.ride_sharing = ride_sharing;
        self
    }

    pub fn vehicle_class(&self) -> VehicleClass {
        VehicleClass::from_id(&self.vehicle_class)
    }

    /// Pickup and destination, or [`RideError::InvalidRequest`] when either is
    /// missing or out of range.
    pub fn validated_endpoints(&self) -> Result<(Coordinate, Coordinate), RideError> {
        let pickup = Self::endpoint("pickup", self.pickup)?;
        let destination = Self::endpoint("destination", self.destination)?;
        Ok((pickup, destination))
    }

    fn endpoint(name: &str, value: Option<Coordinate>) -> Result<Coordinate, RideError> {
        let coordinate =
            value.ok_or_else(|| RideError::InvalidRequest(format!("{name} is required")))?;
        coordinate
            .validate()
            .map_err(|err| RideError::InvalidRequest(format!("{name}: {err}")))?;
        Ok(coordinate)
    }
}

/// A driver selected for a request, with the quote the rider accepted.
/// The caller persists it as a ride request record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub quote: FareQuote,
    pub driver: Candidate,
    pub distance_to_pickup_m: f64,
    pub pickup_eta_minutes: u32,
}
