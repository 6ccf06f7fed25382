//! Error taxonomy shared by every engine component.

use thiserror::Error;

/// Errors returned by geometry, matching and configuration operations.
///
/// The fare estimator and the driver tracker never surface these to callers:
/// the estimator degrades to a minimum-fare quote and the tracker stays idle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RideError {
    #[error("invalid coordinate: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("no active candidates available")]
    NoCandidatesAvailable,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("route unavailable: {0}")]
    Route(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for RideError {
    fn from(err: serde_json::Error) -> Self {
        RideError::Config(err.to_string())
    }
}
