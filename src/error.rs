//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::geometry::GeometryError;
use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Shape not found")]
    NotFound,

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl AppError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Pricing(e) => match e {
                PricingError::InvalidRateTable { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, e.error_type())
                }
                _ => (StatusCode::UNPROCESSABLE_ENTITY, e.error_type()),
            },
            AppError::Geometry(e) => match e {
                GeometryError::Kml(_) => (StatusCode::BAD_REQUEST, e.error_type()),
                _ => (StatusCode::UNPROCESSABLE_ENTITY, e.error_type()),
            },
            AppError::Template(_) => (StatusCode::INTERNAL_SERVER_ERROR, "template_error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();

        let message = if status.is_server_error() {
            tracing::error!("{}", self);
            "Internal error".to_string()
        } else {
            tracing::warn!("Request rejected: {}", self);
            self.to_string()
        };

        let details = match &self {
            AppError::Pricing(PricingError::NoTierMatch { hectares }) => {
                Some(serde_json::json!({ "hectares": hectares }))
            }
            _ => None,
        };

        let body = PricingErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
