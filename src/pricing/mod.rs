//! Pricing engine module.
//!
//! Maps a surveyed area in hectares onto a tiered rate table and produces a
//! price quotation, with an optional flat DGPS surcharge.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    apply_surcharge, compute_quotation, round_hectares, round_money, Quotation,
};
pub use models::{RateTable, RateTier, BASE_A, BASE_B, DGPS_SURCHARGE};
pub use routes::router;
pub use services::{quote_area, quote_hectares, PricingError, QuoteResult};
