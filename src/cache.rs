//! In-memory shape store using moka
//!
//! Holds the polygons users draw or upload so they can be quoted and exported
//! again by id. Entries expire on their own; nothing survives a restart.

use chrono::{DateTime, Utc};
use geo::Polygon;
use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::geometry::geodesic_area_square_meters;

/// Where a stored shape came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeSource {
    Drawn,
    Uploaded,
}

impl ShapeSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeSource::Drawn => "drawn",
            ShapeSource::Uploaded => "uploaded",
        }
    }
}

/// A drawn or uploaded shape
#[derive(Debug, Clone)]
pub struct StoredShape {
    pub id: Uuid,
    pub source: ShapeSource,
    pub polygons: Vec<Polygon<f64>>,
    /// Geodesic area of the first polygon, the one that gets quoted
    pub area_square_meters: f64,
    pub created_at: DateTime<Utc>,
}

/// Shape store keyed by shape id
#[derive(Clone)]
pub struct ShapeStore {
    shapes: Cache<Uuid, Arc<StoredShape>>,
}

impl ShapeStore {
    /// Create a store holding at most `capacity` shapes for `ttl` each
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            shapes: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Store polygons under a fresh id
    pub async fn insert(&self, source: ShapeSource, polygons: Vec<Polygon<f64>>) -> Arc<StoredShape> {
        let area_square_meters = polygons
            .first()
            .map(geodesic_area_square_meters)
            .unwrap_or(0.0);

        let shape = Arc::new(StoredShape {
            id: Uuid::new_v4(),
            source,
            polygons,
            area_square_meters,
            created_at: Utc::now(),
        });

        self.shapes.insert(shape.id, shape.clone()).await;
        info!(
            "Stored {} shape {} ({} polygon(s), {:.2} m2)",
            source.as_str(),
            shape.id,
            shape.polygons.len(),
            area_square_meters
        );
        shape
    }

    pub async fn get(&self, id: &Uuid) -> Option<Arc<StoredShape>> {
        self.shapes.get(id).await
    }

    /// Remove a shape, returning it if it was present
    pub async fn remove(&self, id: &Uuid) -> Option<Arc<StoredShape>> {
        let removed = self.shapes.remove(id).await;
        if removed.is_some() {
            info!("Removed shape {}", id);
        }
        removed
    }

    /// Get store statistics for monitoring
    pub fn stats(&self) -> ShapeStoreStats {
        ShapeStoreStats {
            shapes_cached: self.shapes.entry_count(),
        }
    }
}

impl Default for ShapeStore {
    fn default() -> Self {
        Self::new(1_000, Duration::from_secs(60 * 60))
    }
}

/// Store statistics for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ShapeStoreStats {
    pub shapes_cached: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::polygon_from_vertices;

    fn field() -> Polygon<f64> {
        polygon_from_vertices(&[[0.0, 0.0], [0.01, 0.0], [0.01, 0.01], [0.0, 0.01]]).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = ShapeStore::default();
        let shape = store.insert(ShapeSource::Drawn, vec![field()]).await;

        assert!(shape.area_square_meters > 1_000_000.0);
        let fetched = store.get(&shape.id).await.unwrap();
        assert_eq!(fetched.id, shape.id);
        assert_eq!(fetched.source, ShapeSource::Drawn);
    }

    #[tokio::test]
    async fn test_area_uses_first_polygon() {
        let store = ShapeStore::default();
        let small =
            polygon_from_vertices(&[[1.0, 1.0], [1.001, 1.0], [1.001, 1.001]]).unwrap();
        let one = store.insert(ShapeSource::Uploaded, vec![small.clone()]).await;
        let two = store
            .insert(ShapeSource::Uploaded, vec![small, field()])
            .await;
        assert!((one.area_square_meters - two.area_square_meters).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_remove() {
        let store = ShapeStore::default();
        let shape = store.insert(ShapeSource::Drawn, vec![field()]).await;

        assert!(store.remove(&shape.id).await.is_some());
        assert!(store.get(&shape.id).await.is_none());
        assert!(store.remove(&shape.id).await.is_none());
    }

    #[tokio::test]
    async fn test_unknown_id() {
        let store = ShapeStore::default();
        assert!(store.get(&Uuid::new_v4()).await.is_none());
    }
}
