//! Fare estimation: route distance and duration priced per vehicle class.
//!
//! Formula for a class with rates `(per_km, minimum, per_minute)`:
//!
//! ```text
//! raw        = distance_km * per_km + duration_minutes * per_minute
//! base       = round_to_100(max(minimum, round(raw)))
//! discounted = round_to_100(round(base * 0.7))      // ride sharing only
//! ```
//!
//! The estimator never fails. When no route can be computed it returns a
//! degraded quote priced at the class minimum with zero distance and duration.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::RideError;
use crate::geo::Coordinate;
use crate::pricing::{round_to_unit, round_up_to_unit, PricingTable, VehicleClass, VehicleClassPricing};
use crate::routing::{RouteProvider, StraightLineRouteProvider, DEFAULT_ROAD_FACTOR};

/// Average urban speed used to derive trip duration from distance.
pub const DEFAULT_TRIP_SPEED_KMH: f64 = 25.0;

/// Fares are quoted on multiples of this many currency units.
pub const DEFAULT_ROUNDING_UNIT: u64 = 100;

/// Share of the base fare paid by a rider who opts into ride sharing (30% off).
pub const DEFAULT_RIDE_SHARE_MULTIPLIER: f64 = 0.7;

pub const DEFAULT_CURRENCY: &str = "RWF";

/// Fare estimation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FareConfig {
    pub road_factor: f64,
    pub average_speed_kmh: f64,
    pub rounding_unit: u64,
    pub ride_share_multiplier: f64,
    pub currency: String,
    pub pricing: PricingTable,
}

impl Default for FareConfig {
    fn default() -> Self {
        Self {
            road_factor: DEFAULT_ROAD_FACTOR,
            average_speed_kmh: DEFAULT_TRIP_SPEED_KMH,
            rounding_unit: DEFAULT_ROUNDING_UNIT,
            ride_share_multiplier: DEFAULT_RIDE_SHARE_MULTIPLIER,
            currency: DEFAULT_CURRENCY.to_string(),
            pricing: PricingTable::default(),
        }
    }
}

impl FareConfig {
    pub fn with_road_factor(mut self, road_factor: f64) -> Self {
        self.road_factor = road_factor;
        self
    }

    pub fn with_average_speed_kmh(mut self, speed_kmh: f64) -> Self {
        self.average_speed_kmh = speed_kmh;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_pricing(mut self, pricing: PricingTable) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn validate(&self) -> Result<(), RideError> {
        if !(self.road_factor.is_finite() && self.road_factor >= 1.0) {
            return Err(RideError::Config("road_factor must be >= 1".to_string()));
        }
        if !(self.average_speed_kmh.is_finite() && self.average_speed_kmh > 0.0) {
            return Err(RideError::Config("average_speed_kmh must be > 0".to_string()));
        }
        if !(self.ride_share_multiplier > 0.0 && self.ride_share_multiplier <= 1.0) {
            return Err(RideError::Config(
                "ride_share_multiplier must be in (0, 1]".to_string(),
            ));
        }
        self.pricing.validate(self.rounding_unit)
    }
}

/// A priced trip. Produced fresh per request and never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FareQuote {
    pub vehicle_class: VehicleClass,
    pub distance_km: f64,
    pub duration_minutes: u32,
    pub base_fare: u64,
    /// Ride-sharing price; present only when sharing was requested.
    pub discounted_fare: Option<u64>,
    pub currency: String,
}

impl FareQuote {
    /// A quote produced without route information.
    pub fn is_degraded(&self) -> bool {
        self.distance_km == 0.0 && self.duration_minutes == 0
    }

    /// What the rider pays.
    pub fn payable_fare(&self) -> u64 {
        self.discounted_fare.unwrap_or(self.base_fare)
    }
}

/// Minutes needed to cover `distance_km` at `speed_kmh`, rounded up.
pub fn minutes_at_speed(distance_km: f64, speed_kmh: f64) -> u32 {
    if distance_km <= 0.0 || speed_kmh <= 0.0 {
        return 0;
    }
    (distance_km / speed_kmh * 60.0).ceil() as u32
}

/// Prices trips using a route provider and a [`FareConfig`].
pub struct FareEstimator {
    config: FareConfig,
    route_provider: Box<dyn RouteProvider>,
}

impl FareEstimator {
    /// Estimator backed by the straight-line provider with the configured road factor.
    pub fn new(config: FareConfig) -> Self {
        let provider = StraightLineRouteProvider::new(config.road_factor);
        Self::with_route_provider(config, Box::new(provider))
    }

    pub fn with_route_provider(config: FareConfig, route_provider: Box<dyn RouteProvider>) -> Self {
        Self {
            config,
            route_provider,
        }
    }

    pub fn config(&self) -> &FareConfig {
        &self.config
    }

    pub fn estimate(
        &self,
        pickup: Coordinate,
        destination: Coordinate,
        vehicle_class: VehicleClass,
        ride_sharing: bool,
    ) -> FareQuote {
        let pricing = self.config.pricing.get(vehicle_class);

        let route = self
            .route_provider
            .route(pickup, destination)
            .and_then(|route| {
                if route.distance_km.is_finite() && route.distance_km >= 0.0 {
                    Ok(route)
                } else {
                    Err(RideError::Route(format!(
                        "provider returned distance {}",
                        route.distance_km
                    )))
                }
            });

        let (distance_km, duration_minutes) = match route {
            Ok(route) => {
                let duration_minutes = route
                    .duration_secs
                    .filter(|secs| secs.is_finite() && *secs >= 0.0)
                    .map(|secs| (secs / 60.0).ceil() as u32)
                    .unwrap_or_else(|| {
                        minutes_at_speed(route.distance_km, self.config.average_speed_kmh)
                    });
                (route.distance_km, duration_minutes)
            }
            Err(err) => {
                warn!(
                    class = %vehicle_class,
                    error = %err,
                    "route unavailable, quoting minimum fare"
                );
                (0.0, 0)
            }
        };

        let quote = self.price(vehicle_class, pricing, distance_km, duration_minutes, ride_sharing);
        debug!(
            class = %vehicle_class,
            distance_km = quote.distance_km,
            duration_minutes = quote.duration_minutes,
            base_fare = quote.base_fare,
            "fare estimated"
        );
        quote
    }

    fn price(
        &self,
        vehicle_class: VehicleClass,
        pricing: VehicleClassPricing,
        distance_km: f64,
        duration_minutes: u32,
        ride_sharing: bool,
    ) -> FareQuote {
        let unit = self.config.rounding_unit;
        let raw = distance_km * pricing.per_km_rate + f64::from(duration_minutes) * pricing.per_minute_rate;
        let mut base_fare = round_to_unit(pricing.minimum_fare.max(raw.round() as u64), unit);
        if base_fare < pricing.minimum_fare {
            // Off-grid minimum: move up to the next grid step instead.
            base_fare = round_up_to_unit(pricing.minimum_fare, unit);
        }
        let discounted_fare = ride_sharing.then(|| {
            let shared = (base_fare as f64 * self.config.ride_share_multiplier).round() as u64;
            round_to_unit(shared, unit).min(base_fare)
        });

        FareQuote {
            vehicle_class,
            distance_km,
            duration_minutes,
            base_fare,
            discounted_fare,
            currency: self.config.currency.clone(),
        }
    }
}

impl Default for FareEstimator {
    fn default() -> Self {
        Self::new(FareConfig::default())
    }
}
