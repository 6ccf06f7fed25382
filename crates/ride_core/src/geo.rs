//! Geographic primitives: WGS84 coordinates and great-circle distance.
//!
//! All distances are computed by one haversine function returning meters;
//! kilometer values are derived from it rather than from a second radius.

use serde::{Deserialize, Serialize};

use crate::error::RideError;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub const METERS_PER_KM: f64 = 1000.0;

/// A latitude/longitude pair in degrees.
///
/// Values received from collaborators may be out of range; call
/// [`Coordinate::validate`] (or use [`Coordinate::new`]) before trusting one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(lat: f64, lng: f64) -> Result<Self, RideError> {
        let coordinate = Self { lat, lng };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Build a coordinate by clamping latitude and wrapping longitude into range.
    /// Used for synthesized points (perturbations, interpolation) that may drift
    /// past the poles or the antimeridian.
    pub(crate) fn normalized(lat: f64, lng: f64) -> Self {
        let lat = lat.clamp(-90.0, 90.0);
        let lng = if (-180.0..=180.0).contains(&lng) {
            lng
        } else {
            (lng + 180.0).rem_euclid(360.0) - 180.0
        };
        Self { lat, lng }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn validate(&self) -> Result<(), RideError> {
        let lat_ok = self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat);
        let lng_ok = self.lng.is_finite() && (-180.0..=180.0).contains(&self.lng);
        if lat_ok && lng_ok {
            Ok(())
        } else {
            Err(RideError::InvalidCoordinate {
                lat: self.lat,
                lng: self.lng,
            })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub(crate) fn to_lat_lng(self) -> Result<h3o::LatLng, RideError> {
        h3o::LatLng::new(self.lat, self.lng).map_err(|_| RideError::InvalidCoordinate {
            lat: self.lat,
            lng: self.lng,
        })
    }
}

/// Haversine distance in meters between two already-validated coordinates.
pub(crate) fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lon1) = (a.lat.to_radians(), a.lng.to_radians());
    let (lat2, lon2) = (b.lat.to_radians(), b.lng.to_radians());
    let sin_dlat = ((lat2 - lat1) * 0.5).sin();
    let sin_dlon = ((lon2 - lon1) * 0.5).sin();
    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Great-circle distance in meters.
pub fn distance_m(a: Coordinate, b: Coordinate) -> Result<f64, RideError> {
    a.validate()?;
    b.validate()?;
    Ok(haversine_m(a, b))
}

/// Great-circle distance in kilometers.
pub fn distance_km(a: Coordinate, b: Coordinate) -> Result<f64, RideError> {
    distance_m(a, b).map(|m| m / METERS_PER_KM)
}
