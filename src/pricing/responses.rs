//! Response DTOs for pricing and shape API endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::models::RateTier;
use super::services::QuoteResult;

/// Active rate card
#[derive(Debug, Serialize)]
pub struct RateTableResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_a: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub base_b: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub dgps_surcharge: Decimal,
    pub tiers: Vec<RateTier>,
}

/// Response for the surcharge step
#[derive(Debug, Serialize)]
pub struct SurchargeResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub final_price: Decimal,
    pub dgps_selected: bool,
}

/// Response for a stored shape (drawn or uploaded) with its quotation
#[derive(Debug, Serialize)]
pub struct ShapeQuoteResponse {
    pub shape_id: Uuid,
    pub source: String,
    pub polygon_count: usize,
    pub area_square_meters: f64,
    pub hectares: f64,
    pub created_at: DateTime<Utc>,
    /// Missing when the area falls outside every rate tier
    pub quote: Option<QuoteResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Generic API error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
