//! Vehicle classes and their per-class pricing table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RideError;

/// Fare tier a rider books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    Economy,
    Comfort,
    Bike,
    Xl,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 4] = [
        VehicleClass::Economy,
        VehicleClass::Comfort,
        VehicleClass::Bike,
        VehicleClass::Xl,
    ];

    /// Resolve a class identifier. Unknown identifiers resolve to economy.
    pub fn from_id(id: &str) -> Self {
        let id = id.trim();
        Self::ALL
            .into_iter()
            .find(|class| class.id().eq_ignore_ascii_case(id))
            .unwrap_or(VehicleClass::Economy)
    }

    pub fn id(&self) -> &'static str {
        match self {
            VehicleClass::Economy => "economy",
            VehicleClass::Comfort => "comfort",
            VehicleClass::Bike => "bike",
            VehicleClass::Xl => "xl",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Rates for one vehicle class, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleClassPricing {
    pub class: VehicleClass,
    pub per_km_rate: f64,
    pub minimum_fare: u64,
    pub per_minute_rate: f64,
}

impl VehicleClassPricing {
    pub const fn new(class: VehicleClass, per_km_rate: f64, minimum_fare: u64, per_minute_rate: f64) -> Self {
        Self {
            class,
            per_km_rate,
            minimum_fare,
            per_minute_rate,
        }
    }
}

/// Reference rates (Rwandan francs).
pub const REFERENCE_PRICING: [VehicleClassPricing; 4] = [
    VehicleClassPricing::new(VehicleClass::Economy, 300.0, 800, 30.0),
    VehicleClassPricing::new(VehicleClass::Comfort, 450.0, 1200, 45.0),
    VehicleClassPricing::new(VehicleClass::Bike, 150.0, 400, 15.0),
    VehicleClassPricing::new(VehicleClass::Xl, 600.0, 1800, 60.0),
];

/// Lookup table of class rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PricingTable {
    classes: Vec<VehicleClassPricing>,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            classes: REFERENCE_PRICING.to_vec(),
        }
    }
}

impl PricingTable {
    pub fn new(classes: Vec<VehicleClassPricing>) -> Self {
        Self { classes }
    }

    /// Rates for `class`. Classes missing from the table use the table's
    /// economy entry, then the reference economy rates.
    pub fn get(&self, class: VehicleClass) -> VehicleClassPricing {
        self.find(class)
            .or_else(|| self.find(VehicleClass::Economy))
            .unwrap_or(REFERENCE_PRICING[0])
    }

    fn find(&self, class: VehicleClass) -> Option<VehicleClassPricing> {
        self.classes.iter().copied().find(|p| p.class == class)
    }

    pub fn classes(&self) -> &[VehicleClassPricing] {
        &self.classes
    }

    /// Replace (or add) the rates of one class.
    pub fn with_class(mut self, pricing: VehicleClassPricing) -> Self {
        self.classes.retain(|p| p.class != pricing.class);
        self.classes.push(pricing);
        self
    }

    /// Every entry must have positive per-km and minimum fares, and minimum
    /// fares must already sit on the rounding grid so rounding never drops a
    /// fare below its floor.
    pub fn validate(&self, rounding_unit: u64) -> Result<(), RideError> {
        for p in &self.classes {
            if !(p.per_km_rate.is_finite() && p.per_km_rate > 0.0) {
                return Err(RideError::Config(format!("{}: per_km_rate must be > 0", p.class)));
            }
            if !(p.per_minute_rate.is_finite() && p.per_minute_rate >= 0.0) {
                return Err(RideError::Config(format!("{}: per_minute_rate must be >= 0", p.class)));
            }
            if p.minimum_fare == 0 {
                return Err(RideError::Config(format!("{}: minimum_fare must be > 0", p.class)));
            }
            if rounding_unit > 0 && p.minimum_fare % rounding_unit != 0 {
                return Err(RideError::Config(format!(
                    "{}: minimum_fare {} is not a multiple of {rounding_unit}",
                    p.class, p.minimum_fare
                )));
            }
        }
        Ok(())
    }
}

/// Round half-up to the nearest multiple of `unit`. A unit of 0 or 1 is a no-op.
pub fn round_to_unit(amount: u64, unit: u64) -> u64 {
    if unit <= 1 {
        return amount;
    }
    (amount + unit / 2) / unit * unit
}

/// Smallest multiple of `unit` at or above `amount`. A unit of 0 or 1 is a no-op.
pub fn round_up_to_unit(amount: u64, unit: u64) -> u64 {
    if unit <= 1 {
        return amount;
    }
    amount.div_ceil(unit) * unit
}
