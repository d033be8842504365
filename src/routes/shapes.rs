//! Shape route handlers: drawn polygons, KML uploads and KML export

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::{ShapeSource, StoredShape};
use crate::error::{AppError, Result};
use crate::geometry::{
    export_kml, parse_kml, polygon_from_vertices, KML_CONTENT_TYPE, KML_EXPORT_FILENAME,
};
use crate::pricing::requests::{DrawnShapeRequest, KmlUploadQuery};
use crate::pricing::responses::ShapeQuoteResponse;
use crate::pricing::services::hectares_from_square_meters;
use crate::pricing::{quote_area, PricingError};
use crate::AppState;

/// Routes mounted under `/api/shapes`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_drawn))
        .route("/kml", post(upload_kml))
        .route("/:id", delete(remove))
        .route("/:id/kml", get(download_kml))
}

/// Store a polygon drawn on the map and quote it
async fn create_drawn(
    State(state): State<AppState>,
    Json(request): Json<DrawnShapeRequest>,
) -> Result<Json<ShapeQuoteResponse>> {
    let polygon = polygon_from_vertices(&request.coordinates)?;
    let shape = state.shapes.insert(ShapeSource::Drawn, vec![polygon]).await;
    quote_shape(&state, shape, request.dgps).map(Json)
}

/// Store an uploaded KML document and quote its first polygon
async fn upload_kml(
    State(state): State<AppState>,
    Query(query): Query<KmlUploadQuery>,
    body: String,
) -> Result<Json<ShapeQuoteResponse>> {
    let polygons = parse_kml(&body)?;
    let shape = state.shapes.insert(ShapeSource::Uploaded, polygons).await;
    quote_shape(&state, shape, query.dgps).map(Json)
}

/// Download a stored shape as KML
async fn download_kml(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let shape = state.shapes.get(&id).await.ok_or(AppError::NotFound)?;
    let kml = export_kml(&shape.polygons)?;

    Ok((
        [
            (header::CONTENT_TYPE, KML_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", KML_EXPORT_FILENAME),
            ),
        ],
        kml,
    ))
}

/// Forget a stored shape
async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    state
        .shapes
        .remove(&id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(AppError::NotFound)
}

/// Quote a stored shape. A tier miss still returns the shape, without a quote,
/// so it can be exported.
fn quote_shape(state: &AppState, shape: Arc<StoredShape>, dgps: bool) -> Result<ShapeQuoteResponse> {
    let (quote, notice) = match quote_area(shape.area_square_meters, dgps, &state.rates) {
        Ok(quote) => (Some(quote), None),
        Err(e @ PricingError::NoTierMatch { .. }) => (None, Some(e.to_string())),
        Err(e) => return Err(e.into()),
    };

    Ok(ShapeQuoteResponse {
        shape_id: shape.id,
        source: shape.source.as_str().to_string(),
        polygon_count: shape.polygons.len(),
        area_square_meters: shape.area_square_meters,
        hectares: hectares_from_square_meters(shape.area_square_meters),
        created_at: shape.created_at,
        quote,
        notice,
    })
}
