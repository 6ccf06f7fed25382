//! Pluggable route providers: road distance (and optionally duration) between two points.
//!
//! Implementations, selectable via [`RouteProviderKind`]:
//!
//! - **`StraightLineRouteProvider`**: haversine distance scaled by a fixed road factor.
//!   Zero dependencies, never fails on valid input.
//! - **`OsrmRouteProvider`** (feature `osrm`): calls a local/remote OSRM HTTP endpoint.
//!
//! Remote providers are wrapped in a [`CachedRouteProvider`] that falls back to the
//! straight-line estimate when the backend is unreachable.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RideError;
use crate::geo::{distance_km, Coordinate};

/// Multiplier applied to straight-line distance to approximate road distance.
pub const DEFAULT_ROAD_FACTOR: f64 = 1.3;

/// Result of a route query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteEstimate {
    /// Road-network distance in kilometres.
    pub distance_km: f64,
    /// Travel time reported by the backend; `None` when the backend only knows distance.
    pub duration_secs: Option<f64>,
}

/// Which routing backend to use.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteProviderKind {
    /// Haversine distance times the road factor.
    #[default]
    StraightLine,
    /// OSRM HTTP endpoint (e.g. `"http://localhost:5000"`).
    #[cfg(feature = "osrm")]
    Osrm { endpoint: String },
}

/// Trait for routing backends. Implementations must be `Send + Sync` so one
/// provider can serve every ride handled by the host.
pub trait RouteProvider: Send + Sync {
    /// Compute a route between two coordinates.
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<RouteEstimate, RideError>;
}

// ---------------------------------------------------------------------------
// Straight-line provider (always available)
// ---------------------------------------------------------------------------

/// Great-circle distance scaled by `road_factor`. Reports no duration, so
/// callers apply their own average-speed assumption.
#[derive(Debug, Clone, Copy)]
pub struct StraightLineRouteProvider {
    pub road_factor: f64,
}

impl Default for StraightLineRouteProvider {
    fn default() -> Self {
        Self {
            road_factor: DEFAULT_ROAD_FACTOR,
        }
    }
}

impl StraightLineRouteProvider {
    pub fn new(road_factor: f64) -> Self {
        Self { road_factor }
    }
}

impl RouteProvider for StraightLineRouteProvider {
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<RouteEstimate, RideError> {
        let straight_km = distance_km(from, to)?;
        Ok(RouteEstimate {
            distance_km: straight_km * self.road_factor,
            duration_secs: None,
        })
    }
}

// ---------------------------------------------------------------------------
// OSRM provider (behind `osrm` feature)
// ---------------------------------------------------------------------------

#[cfg(feature = "osrm")]
pub mod osrm {
    use super::*;
    use reqwest::blocking::Client;
    use std::time::Duration;

    /// Routes via an OSRM HTTP endpoint.
    pub struct OsrmRouteProvider {
        client: Client,
        endpoint: String,
    }

    impl OsrmRouteProvider {
        pub fn new(endpoint: &str) -> Result<Self, RideError> {
            let client = Client::builder()
                .timeout(Duration::from_secs(5))
                .build()
                .map_err(|err| RideError::Route(format!("failed to build HTTP client: {err}")))?;
            Ok(Self {
                client,
                endpoint: endpoint.trim_end_matches('/').to_string(),
            })
        }
    }

    /// Minimal OSRM JSON response structures.
    #[derive(Deserialize)]
    struct OsrmResponse {
        code: String,
        routes: Option<Vec<OsrmRoute>>,
    }

    #[derive(Deserialize)]
    struct OsrmRoute {
        distance: f64, // metres
        duration: f64, // seconds
    }

    impl RouteProvider for OsrmRouteProvider {
        fn route(&self, from: Coordinate, to: Coordinate) -> Result<RouteEstimate, RideError> {
            from.validate()?;
            to.validate()?;
            let url = format!(
                "{}/route/v1/driving/{},{};{},{}?overview=false",
                self.endpoint,
                from.lng(),
                from.lat(),
                to.lng(),
                to.lat(),
            );

            let resp: OsrmResponse = self
                .client
                .get(&url)
                .send()
                .and_then(|r| r.json())
                .map_err(|err| RideError::Route(err.to_string()))?;

            if resp.code != "Ok" {
                return Err(RideError::Route(format!("OSRM returned code {}", resp.code)));
            }

            let route = resp
                .routes
                .and_then(|routes| routes.into_iter().next())
                .ok_or_else(|| RideError::Route("OSRM returned no routes".to_string()))?;

            Ok(RouteEstimate {
                distance_km: route.distance / 1000.0,
                duration_secs: Some(route.duration),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Caching wrapper
// ---------------------------------------------------------------------------

type RouteKey = (u64, u64, u64, u64);

fn route_key(from: Coordinate, to: Coordinate) -> RouteKey {
    (
        from.lat().to_bits(),
        from.lng().to_bits(),
        to.lat().to_bits(),
        to.lng().to_bits(),
    )
}

/// LRU-cached wrapper around any [`RouteProvider`].
///
/// Cache key is the exact bit pattern of both endpoints (directional).
/// On inner failure the optional straight-line fallback is tried before the
/// error is returned. Fallback results are not cached so the backend is
/// retried on the next request.
pub struct CachedRouteProvider {
    inner: Box<dyn RouteProvider>,
    cache: Mutex<LruCache<RouteKey, RouteEstimate>>,
    fallback: Option<StraightLineRouteProvider>,
}

impl CachedRouteProvider {
    pub fn new(
        inner: Box<dyn RouteProvider>,
        capacity: usize,
        fallback: Option<StraightLineRouteProvider>,
    ) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
            fallback,
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }
}

impl RouteProvider for CachedRouteProvider {
    fn route(&self, from: Coordinate, to: Coordinate) -> Result<RouteEstimate, RideError> {
        let key = route_key(from, to);

        if let Ok(mut cache) = self.cache.lock() {
            if let Some(cached) = cache.get(&key) {
                return Ok(cached.clone());
            }
        }

        match self.inner.route(from, to) {
            Ok(route) => {
                if let Ok(mut cache) = self.cache.lock() {
                    cache.put(key, route.clone());
                }
                Ok(route)
            }
            Err(err) => match self.fallback {
                Some(fallback) => {
                    debug!(error = %err, "route backend failed, using straight-line estimate");
                    fallback.route(from, to)
                }
                None => Err(err),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Factory: build a provider from RouteProviderKind
// ---------------------------------------------------------------------------

/// Default route cache capacity for remote providers.
#[cfg(feature = "osrm")]
const DEFAULT_ROUTE_CACHE_CAPACITY: usize = 20_000;

/// Construct a boxed [`RouteProvider`] from a [`RouteProviderKind`] descriptor.
///
/// - `StraightLine` is returned without caching (it is already cheap).
/// - `Osrm` is wrapped in a [`CachedRouteProvider`] with straight-line fallback.
pub fn build_route_provider(
    kind: &RouteProviderKind,
    road_factor: f64,
) -> Result<Box<dyn RouteProvider>, RideError> {
    match kind {
        RouteProviderKind::StraightLine => Ok(Box::new(StraightLineRouteProvider::new(road_factor))),

        #[cfg(feature = "osrm")]
        RouteProviderKind::Osrm { endpoint } => {
            let inner = Box::new(osrm::OsrmRouteProvider::new(endpoint)?);
            Ok(Box::new(CachedRouteProvider::new(
                inner,
                DEFAULT_ROUTE_CACHE_CAPACITY,
                Some(StraightLineRouteProvider::new(road_factor)),
            )))
        }
    }
}
