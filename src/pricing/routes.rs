//! Pricing API routes.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::error::Result;
use crate::AppState;

use super::calculators::apply_surcharge;
use super::models::{BASE_A, BASE_B, DGPS_SURCHARGE};
use super::requests::{QuotationRequest, SurchargeRequest};
use super::responses::{RateTableResponse, SurchargeResponse};
use super::services::{quote_hectares, QuoteResult};

/// Routes mounted under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rates", get(rates))
        .route("/quotation", post(quotation))
        .route("/surcharge", post(surcharge))
}

/// Active rate card
async fn rates(State(state): State<AppState>) -> Json<RateTableResponse> {
    Json(RateTableResponse {
        base_a: BASE_A,
        base_b: BASE_B,
        dgps_surcharge: DGPS_SURCHARGE,
        tiers: state.rates.tiers().to_vec(),
    })
}

/// Quote an area given in hectares
async fn quotation(
    State(state): State<AppState>,
    Json(request): Json<QuotationRequest>,
) -> Result<Json<QuoteResult>> {
    let result = quote_hectares(request.hectares, request.dgps, &state.rates)?;
    Ok(Json(result))
}

/// Apply the DGPS surcharge to the price of an earlier quotation
async fn surcharge(Json(request): Json<SurchargeRequest>) -> Json<SurchargeResponse> {
    let mut final_price = apply_surcharge(request.base_price, request.dgps);
    final_price.rescale(2);
    Json(SurchargeResponse {
        final_price,
        dgps_selected: request.dgps,
    })
}
