//! Quotation page handler

use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::error::Result;
use crate::pricing::{quote_hectares, DGPS_SURCHARGE};
use crate::AppState;

/// Query parameters submitted by the quotation form
#[derive(Debug, Default, Deserialize)]
pub struct QuotePageQuery {
    #[serde(default)]
    pub hectares: Option<String>,
    /// Checkbox value; present (usually "on") when ticked
    #[serde(default)]
    pub dgps: Option<String>,
}

/// Quotation page template
#[derive(Template)]
#[template(path = "quote.html")]
struct QuotePageTemplate {
    hectares_input: String,
    dgps_checked: bool,
    dgps_surcharge: String,
    has_quotation: bool,
    summary: String,
    rate1: String,
    rate2: String,
    multiplier: String,
    has_notice: bool,
    notice: String,
}

/// Quotation page. Without a valid area the quotation stays blank.
pub async fn quote_page(
    State(state): State<AppState>,
    Query(query): Query<QuotePageQuery>,
) -> Result<Html<String>> {
    let hectares_input = query.hectares.unwrap_or_default().trim().to_string();
    let dgps_checked = query.dgps.is_some();

    let mut template = QuotePageTemplate {
        hectares_input: hectares_input.clone(),
        dgps_checked,
        dgps_surcharge: format!("{:.2}", DGPS_SURCHARGE),
        has_quotation: false,
        summary: String::new(),
        rate1: String::new(),
        rate2: String::new(),
        multiplier: String::new(),
        has_notice: false,
        notice: String::new(),
    };

    if !hectares_input.is_empty() {
        let outcome = hectares_input
            .parse::<f64>()
            .map_err(|_| format!("'{}' is not a number of hectares", hectares_input))
            .and_then(|h| quote_hectares(h, dgps_checked, &state.rates).map_err(|e| e.to_string()));

        match outcome {
            Ok(result) => {
                template.has_quotation = true;
                template.summary = result.summary;
                template.rate1 = result.quotation.rate1.to_string();
                template.rate2 = result.quotation.rate2.to_string();
                template.multiplier = result.quotation.multiplier.to_string();
            }
            Err(notice) => {
                tracing::debug!("No quotation for page input: {}", notice);
                template.has_notice = true;
                template.notice = notice;
            }
        }
    }

    Ok(Html(template.render()?))
}
