use geo::{Coord, GeodesicArea, LineString, Polygon};

use super::GeometryError;

/// Build a polygon from `[lng, lat]` vertices.
///
/// The ring may be given open or already closed; `geo` closes it either way.
pub fn polygon_from_vertices(vertices: &[[f64; 2]]) -> Result<Polygon<f64>, GeometryError> {
    for &[lng, lat] in vertices {
        if !lng.is_finite()
            || !lat.is_finite()
            || !(-180.0..=180.0).contains(&lng)
            || !(-90.0..=90.0).contains(&lat)
        {
            return Err(GeometryError::InvalidCoordinate { lng, lat });
        }
    }

    let mut distinct = vertices.len();
    if distinct > 1 && vertices.first() == vertices.last() {
        distinct -= 1;
    }
    if distinct < 3 {
        return Err(GeometryError::TooFewVertices { count: distinct });
    }

    let coords: Vec<Coord<f64>> = vertices
        .iter()
        .map(|&[lng, lat]| Coord { x: lng, y: lat })
        .collect();

    Ok(Polygon::new(LineString::from(coords), vec![]))
}

/// Unsigned geodesic area of a polygon on the WGS84 ellipsoid, in m².
pub fn geodesic_area_square_meters(polygon: &Polygon<f64>) -> f64 {
    // closed ring: 3 distinct vertices + the closing one
    if polygon.exterior().0.len() < 4 {
        return 0.0;
    }
    polygon.geodesic_area_unsigned()
}
