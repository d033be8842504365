//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no I/O, no shared state.
//! Callers that need the surcharge step pass the previously computed price
//! back in explicitly.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::Serialize;

use super::models::{RateTable, DGPS_SURCHARGE};
use super::services::PricingError;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use areaquote_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Round an area for display, halves away from zero.
pub fn round_area(hectares: Decimal, places: u32) -> Decimal {
    hectares.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

/// Round an area in hectares to the 2 places shown on the quotation form.
///
/// Works on the exact binary value of `hectares`, so `1.005` (stored just
/// below 1.005) becomes `1.00`. Returns `None` for values a `Decimal` cannot
/// hold, including NaN and infinity.
pub fn round_hectares(hectares: f64) -> Option<Decimal> {
    Decimal::from_f64_retain(hectares).map(|h| round_area(h, 2))
}

/// A price quotation for a surveyed area
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quotation {
    /// Input area, rounded to 2 places for display
    #[serde(with = "rust_decimal::serde::str")]
    pub hectares: Decimal,
    /// `BASE_A * rate1 + BASE_B * rate2` for the matched tier.
    ///
    /// This is the price of the whole tier, not a per-hectare rate.
    #[serde(with = "rust_decimal::serde::str")]
    pub tier_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate1: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate2: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub multiplier: Decimal,
    /// `tier_price` rounded to, and kept at, 2 places
    #[serde(with = "rust_decimal::serde::str")]
    pub total_price: Decimal,
    /// Index of the matched tier in the rate table
    pub tier_index: usize,
}

impl Quotation {
    /// Display line for this quotation without any surcharge
    pub fn summary(&self) -> String {
        render_quotation_text(self.hectares, self.total_price)
    }
}

/// Compute a quotation for an area in hectares.
///
/// Scans the table in order and uses the first tier whose closed range
/// contains `hectares`; when two tiers share a boundary the earlier one wins.
///
/// # Errors
/// * `PricingError::InvalidInput` - `hectares` is NaN, infinite or negative
/// * `PricingError::NoTierMatch` - no tier covers `hectares`
pub fn compute_quotation(hectares: f64, table: &RateTable) -> Result<Quotation, PricingError> {
    if !hectares.is_finite() || hectares < 0.0 {
        return Err(PricingError::InvalidInput { value: hectares });
    }

    let (tier_index, tier) = table
        .find_tier(hectares)
        .ok_or(PricingError::NoTierMatch { hectares })?;

    let tier_price = tier.tier_price();

    // Every tier bound fits in a Decimal, so a matched area does too
    let display_hectares =
        round_hectares(hectares).ok_or(PricingError::InvalidInput { value: hectares })?;

    let mut total_price = round_money(tier_price, 2);
    total_price.rescale(2);

    tracing::debug!(
        "Matched tier {} [{}, {}] for {} ha: {}",
        tier_index,
        tier.min_hectares,
        tier.max_hectares,
        hectares,
        tier_price
    );

    Ok(Quotation {
        hectares: display_hectares,
        tier_price,
        rate1: tier.rate1,
        rate2: tier.rate2,
        multiplier: tier.multiplier,
        total_price,
        tier_index,
    })
}

/// Add the DGPS surcharge to a previously computed price.
pub fn apply_surcharge(base_price: Decimal, surcharge_selected: bool) -> Decimal {
    if surcharge_selected {
        base_price + DGPS_SURCHARGE
    } else {
        base_price
    }
}

/// Render the quotation line shown to the user
pub fn render_quotation_text(hectares: Decimal, price: Decimal) -> String {
    format!("Quotation for {:.2} hectares: Rs {:.2}", hectares, price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table() -> RateTable {
        RateTable::default()
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.45), 1), dec!(2.4));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(24800), 2), dec!(24800));
    }

    #[test]
    fn test_round_area_half_away_from_zero() {
        assert_eq!(round_area(dec!(12.345), 2), dec!(12.35));
        assert_eq!(round_area(dec!(12.344), 2), dec!(12.34));
        assert_eq!(round_area(dec!(0.125), 2), dec!(0.13));
    }

    #[test]
    fn test_round_hectares_uses_binary_value() {
        // 1.005 is stored as 1.00499999...
        assert_eq!(round_hectares(1.005).unwrap().to_string(), "1.00");
        assert_eq!(round_hectares(12.3456).unwrap().to_string(), "12.35");
        assert_eq!(round_hectares(50.003), Some(dec!(50.00)));
        assert!(round_hectares(f64::NAN).is_none());
    }

    // ==================== compute_quotation tests ====================

    #[test]
    fn test_every_tier_matches_its_own_bounds() {
        let table = table();
        for (i, tier) in table.tiers().iter().enumerate() {
            let mid = (tier.min_hectares + tier.max_hectares) / 2.0;
            for h in [tier.min_hectares, mid, tier.max_hectares] {
                let q = compute_quotation(h, &table).unwrap();
                // 1001 is the one shared boundary; it belongs to tier 8
                let expected = if h == 1001.0 { 8 } else { i };
                assert_eq!(q.tier_index, expected, "hectares {}", h);
                let tier = &table.tiers()[expected];
                assert_eq!(q.rate1, tier.rate1);
                assert_eq!(q.rate2, tier.rate2);
                assert_eq!(q.multiplier, tier.multiplier);
            }
        }
    }

    #[test]
    fn test_negative_and_nan_are_invalid() {
        let table = table();
        assert!(matches!(
            compute_quotation(-1.0, &table),
            Err(PricingError::InvalidInput { .. })
        ));
        assert!(matches!(
            compute_quotation(f64::NAN, &table),
            Err(PricingError::InvalidInput { .. })
        ));
        assert!(matches!(
            compute_quotation(f64::INFINITY, &table),
            Err(PricingError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_zero_hectares_is_first_tier() {
        let q = compute_quotation(0.0, &table()).unwrap();
        assert_eq!(q.tier_index, 0);
        assert_eq!(q.total_price, dec!(24800));
        assert_eq!(q.total_price.scale(), 2);
    }

    #[test]
    fn test_boundary_50_and_51() {
        let table = table();

        let q50 = compute_quotation(50.0, &table).unwrap();
        assert_eq!(q50.tier_index, 0);
        assert_eq!(q50.rate1, dec!(1));
        assert_eq!(q50.rate2, dec!(2));
        assert_eq!(q50.total_price, dec!(24800.00));

        let q51 = compute_quotation(51.0, &table).unwrap();
        assert_eq!(q51.tier_index, 1);
        assert_eq!(q51.rate1, dec!(1));
        assert_eq!(q51.rate2, dec!(2));
        assert_eq!(q51.total_price, dec!(24800.00));
    }

    #[test]
    fn test_overlap_at_1001_resolves_to_earlier_tier() {
        let q = compute_quotation(1001.0, &table()).unwrap();
        assert_eq!(q.tier_index, 8);
        assert_eq!(q.rate1, dec!(5));
        assert_eq!(q.rate2, dec!(10));
        assert_eq!(q.multiplier, dec!(50));
        assert_eq!(q.total_price, dec!(124000));
    }

    #[test]
    fn test_fractional_gap_is_no_tier_match() {
        match compute_quotation(50.5, &table()) {
            Err(PricingError::NoTierMatch { hectares }) => assert_eq!(hectares, 50.5),
            other => panic!("expected NoTierMatch, got {:?}", other),
        }
    }

    #[test]
    fn test_above_last_tier_is_no_tier_match() {
        assert!(matches!(
            compute_quotation(60_000_000_000.0, &table()),
            Err(PricingError::NoTierMatch { .. })
        ));
    }

    #[test]
    fn test_end_to_end_1250_75_hectares() {
        let q = compute_quotation(1250.75, &table()).unwrap();
        assert_eq!(q.tier_index, 9);
        assert_eq!(q.rate1, dec!(10));
        assert_eq!(q.rate2, dec!(14));
        assert_eq!(q.multiplier, dec!(100));
        assert_eq!(q.tier_price, dec!(200000));
        assert_eq!(q.total_price.to_string(), "200000.00");
        assert_eq!(q.hectares, dec!(1250.75));
        assert_eq!(
            q.summary(),
            "Quotation for 1250.75 hectares: Rs 200000.00"
        );
    }

    #[test]
    fn test_top_tier() {
        let q = compute_quotation(100_000.0, &table()).unwrap();
        // 8800 * 150 + 8000 * 1000
        assert_eq!(q.total_price, dec!(9320000));
        assert_eq!(q.multiplier, dec!(1750));
    }

    #[test]
    fn test_hectares_rounded_for_display() {
        let q = compute_quotation(12.3456, &table()).unwrap();
        assert_eq!(q.hectares, dec!(12.35));
        assert_eq!(q.summary(), "Quotation for 12.35 hectares: Rs 24800.00");
    }

    // ==================== apply_surcharge tests ====================

    #[test]
    fn test_apply_surcharge_selected() {
        assert_eq!(apply_surcharge(dec!(24800.00), true), dec!(40300.00));
    }

    #[test]
    fn test_apply_surcharge_not_selected() {
        assert_eq!(apply_surcharge(dec!(24800.00), false), dec!(24800.00));
    }

    #[test]
    fn test_render_quotation_text_pads_decimals() {
        assert_eq!(
            render_quotation_text(dec!(3), dec!(40300)),
            "Quotation for 3.00 hectares: Rs 40300.00"
        );
    }
}
