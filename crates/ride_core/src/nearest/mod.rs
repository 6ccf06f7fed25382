//! Nearest-candidate search over online drivers or stations.
//!
//! [`NearestFinder`] is the seam: [`LinearScanFinder`] is the default and
//! [`H3RingFinder`] swaps in a grid index without changing results.

pub mod finder;
pub mod h3_ring;
pub mod linear;
pub mod types;

use serde::{Deserialize, Serialize};

pub use finder::NearestFinder;
pub use h3_ring::H3RingFinder;
pub use linear::LinearScanFinder;
pub use types::{Candidate, Nearest};

/// Which nearest-search backend to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FinderKind {
    #[default]
    LinearScan,
    H3Ring {
        /// H3 resolution (0-15).
        resolution: u8,
        max_rings: u32,
    },
}

/// Construct a boxed [`NearestFinder`] from a [`FinderKind`] descriptor.
pub fn build_finder(kind: FinderKind) -> Result<Box<dyn NearestFinder>, crate::error::RideError> {
    match kind {
        FinderKind::LinearScan => Ok(Box::new(LinearScanFinder)),
        FinderKind::H3Ring {
            resolution,
            max_rings,
        } => {
            let resolution = h3o::Resolution::try_from(resolution).map_err(|_| {
                crate::error::RideError::Config(format!("invalid H3 resolution {resolution}"))
            })?;
            Ok(Box::new(H3RingFinder::new(resolution, max_rings)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_h3_finder_from_descriptor() {
        assert!(build_finder(FinderKind::H3Ring {
            resolution: 9,
            max_rings: 16
        })
        .is_ok());
        assert!(build_finder(FinderKind::H3Ring {
            resolution: 16,
            max_rings: 16
        })
        .is_err());
    }

    #[test]
    fn finder_kind_reads_from_json() {
        let kind: FinderKind =
            serde_json::from_str(r#"{"kind": "h3_ring", "resolution": 8, "max_rings": 32}"#).unwrap();
        assert_eq!(
            kind,
            FinderKind::H3Ring {
                resolution: 8,
                max_rings: 32
            }
        );
    }
}
