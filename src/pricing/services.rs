//! Pricing service functions.
//!
//! These compose the geometry collaborators with the pure calculators:
//! square meters -> hectares -> quotation -> optional DGPS surcharge.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use super::calculators::{
    apply_surcharge, compute_quotation, render_quotation_text, round_hectares, Quotation,
};
use super::models::RateTable;

/// Square meters per hectare
pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Pricing calculation error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid area: {value} hectares (must be a non-negative number)")]
    InvalidInput { value: f64 },

    #[error("No rate tier covers {hectares} hectares")]
    NoTierMatch { hectares: f64 },

    #[error("Invalid rate table: {message}")]
    InvalidRateTable { message: String, errors: Vec<String> },
}

impl PricingError {
    /// Stable identifier used in API error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            PricingError::InvalidInput { .. } => "invalid_input",
            PricingError::NoTierMatch { .. } => "no_tier_match",
            PricingError::InvalidRateTable { .. } => "invalid_rate_table",
        }
    }
}

/// Result of quoting an area, with the surcharge step already applied
#[derive(Debug, Clone, Serialize)]
pub struct QuoteResult {
    pub quotation: Quotation,
    pub dgps_selected: bool,
    /// `quotation.total_price` plus the DGPS surcharge when selected
    #[serde(with = "rust_decimal::serde::str")]
    pub final_price: Decimal,
    /// Display line using `final_price`
    pub summary: String,
}

pub fn hectares_from_square_meters(square_meters: f64) -> f64 {
    square_meters / SQUARE_METERS_PER_HECTARE
}

/// Quote an area given in hectares.
pub fn quote_hectares(
    hectares: f64,
    dgps_selected: bool,
    table: &RateTable,
) -> Result<QuoteResult, PricingError> {
    let quotation = compute_quotation(hectares, table)?;
    let mut final_price = apply_surcharge(quotation.total_price, dgps_selected);
    final_price.rescale(2);
    let summary = render_quotation_text(quotation.hectares, final_price);

    Ok(QuoteResult {
        quotation,
        dgps_selected,
        final_price,
        summary,
    })
}

/// Quote an area given in square meters, as produced by the geometry provider.
///
/// The area is priced at its 2-place hectare value, the figure the quotation
/// form shows, so 50.003 ha is quoted as 50.00 ha.
pub fn quote_area(
    square_meters: f64,
    dgps_selected: bool,
    table: &RateTable,
) -> Result<QuoteResult, PricingError> {
    let hectares = hectares_from_square_meters(square_meters);
    tracing::info!(
        "Quoting {:.2} m2 ({:.4} ha), dgps={}",
        square_meters,
        hectares,
        dgps_selected
    );
    let priced = round_hectares(hectares)
        .and_then(|h| h.to_f64())
        .unwrap_or(hectares);
    quote_hectares(priced, dgps_selected, table)
}
