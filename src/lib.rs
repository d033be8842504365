//! Survey area quotation service.
//!
//! Turns a drawn or uploaded polygon into an area in hectares and quotes it
//! against a tiered rate table.

pub mod cache;
pub mod config;
pub mod error;
pub mod geometry;
pub mod pricing;
pub mod routes;

use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::cache::{ShapeStore, ShapeStoreStats};
use crate::config::AppConfig;
use crate::pricing::{PricingError, RateTable};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup
    pub rates: Arc<RateTable>,
    pub shapes: ShapeStore,
}

impl AppState {
    pub fn new(rates: RateTable, shapes: ShapeStore) -> Self {
        Self {
            rates: Arc::new(rates),
            shapes,
        }
    }

    /// Build state from configuration, loading the rate table once
    pub fn from_config(config: &AppConfig) -> Result<Self, PricingError> {
        let rates = match &config.rate_table_path {
            Some(path) => {
                tracing::info!("Loading rate table from {}", path.display());
                RateTable::from_json_file(path)?
            }
            None => RateTable::default(),
        };
        tracing::info!("Rate table ready with {} tiers", rates.tiers().len());

        let shapes = ShapeStore::new(config.shape_cache_capacity, config.shape_cache_ttl);
        Ok(Self::new(rates, shapes))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RateTable::default(), ShapeStore::default())
    }
}

#[derive(Debug, serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    #[serde(flatten)]
    shapes: ShapeStoreStats,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        shapes: state.shapes.stats(),
    })
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::pages::quote_page))
        .route("/health", get(health))
        .nest("/api/pricing", pricing::router())
        .nest("/api/shapes", routes::shapes::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use std::time::Duration;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health() {
        let response = app(AppState::default())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["shapes_cached"], 0);
    }

    #[test]
    fn test_state_from_config_with_missing_table() {
        let config = AppConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            rate_table_path: Some("/nonexistent/rates.json".into()),
            shape_cache_capacity: 10,
            shape_cache_ttl: Duration::from_secs(10),
        };
        let err = AppState::from_config(&config).err().unwrap();
        assert_eq!(err.error_type(), "invalid_rate_table");
    }

    #[test]
    fn test_state_from_config_with_json_table() {
        let path = std::env::temp_dir().join(format!("rates-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[{"min_hectares": 0, "max_hectares": 100, "rate1": "2", "rate2": "3", "multiplier": "1"}]"#,
        )
        .unwrap();

        let config = AppConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            rate_table_path: Some(path.clone()),
            shape_cache_capacity: 10,
            shape_cache_ttl: Duration::from_secs(10),
        };
        let state = AppState::from_config(&config).unwrap();
        std::fs::remove_file(&path).ok();

        let quote = pricing::compute_quotation(99.0, &state.rates).unwrap();
        assert_eq!(quote.total_price, rust_decimal_macros::dec!(41600));
    }
}
