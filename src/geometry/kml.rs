//! KML import and export.
//!
//! Import accepts any KML the `kml` crate understands and collects its
//! polygons; export writes the minimal Document/Placemark/Polygon shape that
//! mapping tools accept.

use geo::{Coord, Geometry, Polygon};
use ::kml::Kml;

use super::GeometryError;

/// MIME type for KML downloads
pub const KML_CONTENT_TYPE: &str = "application/vnd.google-earth.kml+xml";

/// File name offered for exported shapes
pub const KML_EXPORT_FILENAME: &str = "exported_area.kml";

const KML_START: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<kml xmlns=\"http://www.opengis.net/kml/2.2\">\n  <Document>\n";

const KML_END: &str = "  </Document>\n</kml>";

/// Parse a KML document and return every polygon in document order.
///
/// Placemarks are found at any depth (Documents, Folders, MultiGeometry).
pub fn parse_kml(text: &str) -> Result<Vec<Polygon<f64>>, GeometryError> {
    let document: Kml = text
        .parse()
        .map_err(|e: ::kml::Error| GeometryError::Kml(e.to_string()))?;

    let collection =
        ::kml::quick_collection(document).map_err(|e| GeometryError::Kml(e.to_string()))?;

    let mut polygons = Vec::new();
    for geometry in collection.0 {
        collect_polygons(geometry, &mut polygons);
    }

    if polygons.is_empty() {
        return Err(GeometryError::NoPolygon);
    }
    Ok(polygons)
}

fn collect_polygons(geometry: Geometry<f64>, out: &mut Vec<Polygon<f64>>) {
    match geometry {
        Geometry::Polygon(polygon) => out.push(polygon),
        Geometry::MultiPolygon(multi) => out.extend(multi.0),
        Geometry::GeometryCollection(collection) => {
            for inner in collection.0 {
                collect_polygons(inner, out);
            }
        }
        _ => {}
    }
}

/// Serialize polygons as a KML document, one Placemark per polygon.
///
/// Coordinates are written as `lng,lat` pairs separated by spaces, and each
/// ring ends by repeating its first vertex.
pub fn export_kml(polygons: &[Polygon<f64>]) -> Result<String, GeometryError> {
    let placemarks: Vec<String> = polygons
        .iter()
        .filter_map(|polygon| placemark(&polygon.exterior().0))
        .collect();
    if placemarks.is_empty() {
        return Err(GeometryError::NoFeaturesToExport);
    }

    let mut out = String::from(KML_START);
    for block in &placemarks {
        out.push_str(block);
    }
    out.push_str(KML_END);

    Ok(out)
}

/// One Placemark block for a ring, or `None` when the ring has no vertices
fn placemark(ring: &[Coord<f64>]) -> Option<String> {
    let first = ring.first()?;

    let mut coordinates = ring
        .iter()
        .map(|c| format!("{},{}", c.x, c.y))
        .collect::<Vec<_>>();
    if ring.last() != Some(first) {
        coordinates.push(format!("{},{}", first.x, first.y));
    }

    Some(format!(
        concat!(
            "    <Placemark>\n",
            "      <Polygon>\n",
            "        <outerBoundaryIs>\n",
            "          <LinearRing>\n",
            "            <coordinates>{}</coordinates>\n",
            "          </LinearRing>\n",
            "        </outerBoundaryIs>\n",
            "      </Polygon>\n",
            "    </Placemark>\n",
        ),
        coordinates.join(" ")
    ))
}
