//! Request DTOs for pricing and shape API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Request to quote an area already expressed in hectares
#[derive(Debug, Deserialize)]
pub struct QuotationRequest {
    pub hectares: f64,
    #[serde(default)]
    pub dgps: bool,
}

/// Request to add (or not) the DGPS surcharge to a previous price
#[derive(Debug, Deserialize)]
pub struct SurchargeRequest {
    #[serde(with = "rust_decimal::serde::str")]
    pub base_price: Decimal,
    pub dgps: bool,
}

/// A polygon drawn on the map, as `[lng, lat]` pairs
#[derive(Debug, Deserialize)]
pub struct DrawnShapeRequest {
    pub coordinates: Vec<[f64; 2]>,
    #[serde(default)]
    pub dgps: bool,
}

/// Query string for KML uploads
#[derive(Debug, Default, Deserialize)]
pub struct KmlUploadQuery {
    #[serde(default)]
    pub dgps: bool,
}
