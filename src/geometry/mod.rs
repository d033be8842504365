//! Geometry collaborators: polygon construction, geodesic area and KML
//! import/export.
//!
//! Area computation is delegated to `geo`; KML parsing to `kml`.

pub mod area;
pub mod kml;

pub use area::{geodesic_area_square_meters, polygon_from_vertices};
pub use self::kml::{export_kml, parse_kml, KML_CONTENT_TYPE, KML_EXPORT_FILENAME};

/// Geometry error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Could not parse KML: {0}")]
    Kml(String),

    #[error("KML document contains no polygon")]
    NoPolygon,

    #[error("No features to export")]
    NoFeaturesToExport,

    #[error("A polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    #[error("Invalid coordinate ({lng}, {lat})")]
    InvalidCoordinate { lng: f64, lat: f64 },
}

impl GeometryError {
    /// Stable identifier used in API error responses
    pub fn error_type(&self) -> &'static str {
        match self {
            GeometryError::Kml(_) => "invalid_kml",
            GeometryError::NoPolygon => "no_polygon",
            GeometryError::NoFeaturesToExport => "no_features_to_export",
            GeometryError::TooFewVertices { .. } => "too_few_vertices",
            GeometryError::InvalidCoordinate { .. } => "invalid_coordinate",
        }
    }
}
