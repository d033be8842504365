//! Rate table models for the pricing engine.
//!
//! The rate table is static configuration: built once at startup (either the
//! built-in table or one loaded from JSON) and shared read-only afterwards.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::services::PricingError;

/// Base amount multiplied by a tier's `rate1`
pub const BASE_A: Decimal = dec!(8800);

/// Base amount multiplied by a tier's `rate2`
pub const BASE_B: Decimal = dec!(8000);

/// Flat amount added when the DGPS survey service is selected
pub const DGPS_SURCHARGE: Decimal = dec!(15500);

/// A closed range of hectares mapped to fixed rate multipliers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTier {
    pub min_hectares: f64,
    pub max_hectares: f64,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate1: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate2: Decimal,
    /// Display-only value, not part of the price formula
    #[serde(with = "rust_decimal::serde::str")]
    pub multiplier: Decimal,
}

impl RateTier {
    pub fn new(
        min_hectares: f64,
        max_hectares: f64,
        rate1: Decimal,
        rate2: Decimal,
        multiplier: Decimal,
    ) -> Self {
        Self {
            min_hectares,
            max_hectares,
            rate1,
            rate2,
            multiplier,
        }
    }

    /// Both bounds are inclusive
    pub fn contains(&self, hectares: f64) -> bool {
        hectares >= self.min_hectares && hectares <= self.max_hectares
    }

    /// Price for the whole tier: `BASE_A * rate1 + BASE_B * rate2`
    pub fn tier_price(&self) -> Decimal {
        BASE_A * self.rate1 + BASE_B * self.rate2
    }
}

/// Ordered rate tiers, ascending by `min_hectares`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RateTable {
    tiers: Vec<RateTier>,
}

impl RateTable {
    /// Build a table from tiers, rejecting malformed configurations.
    ///
    /// Overlapping bounds are accepted (first match wins during lookup) but
    /// logged, since they usually point at an off-by-one in the table.
    pub fn new(tiers: Vec<RateTier>) -> Result<Self, PricingError> {
        let table = Self { tiers };
        table.validate()?;
        Ok(table)
    }

    /// Load a rate table from a JSON file (an array of tiers)
    pub fn from_json_file(path: &Path) -> Result<Self, PricingError> {
        let content = fs::read_to_string(path).map_err(|e| PricingError::InvalidRateTable {
            message: format!("Failed to read rate table {}", path.display()),
            errors: vec![e.to_string()],
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, PricingError> {
        let tiers: Vec<RateTier> =
            serde_json::from_str(content).map_err(|e| PricingError::InvalidRateTable {
                message: "Rate table is not valid JSON".to_string(),
                errors: vec![e.to_string()],
            })?;
        Self::new(tiers)
    }

    pub fn tiers(&self) -> &[RateTier] {
        &self.tiers
    }

    /// First tier containing `hectares`, with its position in the table
    pub fn find_tier(&self, hectares: f64) -> Option<(usize, &RateTier)> {
        self.tiers
            .iter()
            .enumerate()
            .find(|(_, tier)| tier.contains(hectares))
    }

    fn validate(&self) -> Result<(), PricingError> {
        let mut errors = Vec::new();

        if self.tiers.is_empty() {
            errors.push("table has no tiers".to_string());
        }

        for (i, tier) in self.tiers.iter().enumerate() {
            if !tier.min_hectares.is_finite() || !tier.max_hectares.is_finite() {
                errors.push(format!("tier {} has a non-finite bound", i));
                continue;
            }
            if tier.min_hectares < 0.0 {
                errors.push(format!(
                    "tier {} starts below zero ({})",
                    i, tier.min_hectares
                ));
            }
            if tier.min_hectares > tier.max_hectares {
                errors.push(format!(
                    "tier {} has min {} above max {}",
                    i, tier.min_hectares, tier.max_hectares
                ));
            }
        }

        for (i, pair) in self.tiers.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.min_hectares < prev.min_hectares {
                errors.push(format!(
                    "tier {} (min {}) is out of order after min {}",
                    i + 1,
                    next.min_hectares,
                    prev.min_hectares
                ));
            } else if next.min_hectares <= prev.max_hectares {
                tracing::warn!(
                    "Rate tiers {} and {} overlap at [{}, {}]; earlier tier wins",
                    i,
                    i + 1,
                    next.min_hectares,
                    prev.max_hectares
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PricingError::InvalidRateTable {
                message: format!("Rate table has {} problem(s)", errors.len()),
                errors,
            })
        }
    }
}

impl Default for RateTable {
    /// The standard survey rate card.
    ///
    /// Note the shared boundary at 1001 between the 501 and 1001 tiers.
    fn default() -> Self {
        let tier = RateTier::new;
        Self {
            tiers: vec![
                tier(0.0, 50.0, dec!(1), dec!(2), dec!(2.5)),
                tier(51.0, 60.0, dec!(1), dec!(2), dec!(3)),
                tier(61.0, 80.0, dec!(1), dec!(3), dec!(4)),
                tier(81.0, 100.0, dec!(1), dec!(3), dec!(5)),
                tier(101.0, 150.0, dec!(2), dec!(4), dec!(7.5)),
                tier(151.0, 200.0, dec!(2), dec!(5), dec!(10)),
                tier(201.0, 300.0, dec!(2), dec!(6), dec!(15)),
                tier(301.0, 500.0, dec!(3), dec!(8), dec!(25)),
                tier(501.0, 1001.0, dec!(5), dec!(10), dec!(50)),
                tier(1001.0, 2000.0, dec!(10), dec!(14), dec!(100)),
                tier(2001.0, 5000.0, dec!(25), dec!(16), dec!(250)),
                tier(5001.0, 10000.0, dec!(50), dec!(20), dec!(500)),
                tier(10001.0, 15000.0, dec!(65), dec!(30), dec!(750)),
                tier(15001.0, 20000.0, dec!(80), dec!(40), dec!(1000)),
                tier(20001.0, 25000.0, dec!(82), dec!(50), dec!(1250)),
                tier(25001.0, 95000.0, dec!(100), dec!(80), dec!(1550)),
                tier(95001.0, 50994771769.0, dec!(150), dec!(1000), dec!(1750)),
            ],
        }
    }
}
