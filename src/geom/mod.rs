use crate::error::DigipinError;
use crate::index::ROOT_BOUNDS;
use geo::{BoundingRect, Centroid};
use geo_types::{Coord, Geometry, Point, Polygon};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::{ToWkt, Wkt};

/// Text encoding of a geometry, used both for reading CSV geometry columns
/// and for writing cell outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

impl GeometryFormat {
    /// GeoJSON when the text starts with `{`, WKT otherwise.
    pub fn detect(s: &str) -> Self {
        if s.trim_start().starts_with('{') {
            GeometryFormat::GeoJson
        } else {
            GeometryFormat::Wkt
        }
    }

    pub fn parse(self, s: &str) -> Result<Geometry<f64>, DigipinError> {
        let s = s.trim();
        match self {
            GeometryFormat::Wkt => {
                let wkt = Wkt::<f64>::from_str(s)
                    .map_err(|e| DigipinError::GeometryParseError(e.to_string()))?;
                wkt.try_into().map_err(|_| {
                    DigipinError::GeometryParseError("unsupported WKT geometry".to_string())
                })
            }
            GeometryFormat::GeoJson => {
                let geometry = match s
                    .parse::<GeoJson>()
                    .map_err(|e| DigipinError::GeometryParseError(e.to_string()))?
                {
                    GeoJson::Geometry(geom) => geom,
                    GeoJson::Feature(feat) => feat.geometry.ok_or_else(|| {
                        DigipinError::GeometryParseError("feature has no geometry".to_string())
                    })?,
                    GeoJson::FeatureCollection(_) => {
                        return Err(DigipinError::GeometryParseError(
                            "one geometry per value, not a FeatureCollection".to_string(),
                        ));
                    }
                };
                Geometry::try_from(geometry)
                    .map_err(|e| DigipinError::GeometryParseError(e.to_string()))
            }
        }
    }

    /// Renders a cell outline in this format.
    pub fn write_polygon(self, polygon: &Polygon<f64>) -> String {
        match self {
            GeometryFormat::Wkt => polygon.wkt_string(),
            GeometryFormat::GeoJson => geojson::Geometry::from(polygon).to_string(),
        }
    }
}

/// Parses WKT or GeoJSON, whichever `s` looks like.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, DigipinError> {
    GeometryFormat::detect(s).parse(s)
}

/// Parses a geometry and checks that it can be given DIGIPINs: it must have
/// at least one coordinate and its bounding rectangle must sit inside the
/// DIGIPIN domain. An out-of-domain geometry reports its first corner that
/// falls outside.
pub fn parse_geometry_in_domain(s: &str) -> Result<Geometry<f64>, DigipinError> {
    let geometry = parse_geometry(s)?;
    let rect = geometry.bounding_rect().ok_or_else(|| {
        DigipinError::GeometryParseError("geometry has no points".to_string())
    })?;

    let outside = [rect.min(), rect.max()]
        .into_iter()
        .find(|c: &Coord<f64>| !ROOT_BOUNDS.contains(c.y, c.x));
    match outside {
        Some(corner) => Err(DigipinError::OutOfRange {
            latitude: corner.y,
            longitude: corner.x,
        }),
        None => Ok(geometry),
    }
}

/// Points a geometry is indexed by.
///
/// Points and multipoints give every point, collections recurse, and any
/// other geometry is represented by its centroid. Empty geometries give none.
pub fn representative_points(geometry: &Geometry<f64>) -> Vec<Point<f64>> {
    match geometry {
        Geometry::Point(pt) => vec![*pt],
        Geometry::MultiPoint(mp) => mp.0.clone(),
        Geometry::GeometryCollection(gc) => gc.0.iter().flat_map(representative_points).collect(),
        other => other.centroid().into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{GeometryCollection, LineString, MultiPoint, point, polygon};

    #[test]
    fn test_detect_format() {
        assert_eq!(GeometryFormat::detect("POINT(77 28)"), GeometryFormat::Wkt);
        assert_eq!(
            GeometryFormat::detect("  {\"type\":\"Point\",\"coordinates\":[77,28]}"),
            GeometryFormat::GeoJson
        );
    }

    #[test]
    fn test_parse_geojson_feature_point() -> Result<(), DigipinError> {
        let json = r#"{"type":"Feature","properties":{"name":"Dak Bhawan"},"geometry":{"type":"Point","coordinates":[77.209,28.6139]}}"#;
        match parse_geometry(json)? {
            Geometry::Point(pt) => {
                assert!((pt.x() - 77.209).abs() < 1e-9);
                assert!((pt.y() - 28.6139).abs() < 1e-9);
            }
            other => panic!("Expected Point, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_parse_geojson_rejections() {
        assert!(matches!(
            parse_geometry(r#"{"type":"Feature","properties":{},"geometry":null}"#),
            Err(DigipinError::GeometryParseError(_))
        ));
        assert!(matches!(
            parse_geometry(r#"{"type":"FeatureCollection","features":[]}"#),
            Err(DigipinError::GeometryParseError(_))
        ));
        assert!(parse_geometry("not a geometry").is_err());
    }

    #[test]
    fn test_in_domain_accepts_indian_polygon() -> Result<(), DigipinError> {
        let wkt = "POLYGON((77.0 28.0, 78.0 28.0, 78.0 29.0, 77.0 29.0, 77.0 28.0))";
        assert!(matches!(
            parse_geometry_in_domain(wkt)?,
            Geometry::Polygon(_)
        ));
        Ok(())
    }

    #[test]
    fn test_in_domain_accepts_domain_corners() -> Result<(), DigipinError> {
        parse_geometry_in_domain("LINESTRING(63.5 2.5, 99.5 38.5)")?;
        Ok(())
    }

    #[test]
    fn test_in_domain_reports_outside_corner() {
        assert_eq!(
            parse_geometry_in_domain("POINT(-0.1 51.5)"),
            Err(DigipinError::OutOfRange {
                latitude: 51.5,
                longitude: -0.1
            })
        );
        // Straddles the northern edge: the max corner is reported
        assert_eq!(
            parse_geometry_in_domain("LINESTRING(77.0 30.0, 78.0 40.0)"),
            Err(DigipinError::OutOfRange {
                latitude: 40.0,
                longitude: 78.0
            })
        );
    }

    #[test]
    fn test_in_domain_rejects_empty() {
        for empty in ["POLYGON EMPTY", "MULTIPOINT EMPTY", "GEOMETRYCOLLECTION EMPTY"] {
            assert!(
                matches!(
                    parse_geometry_in_domain(empty),
                    Err(DigipinError::GeometryParseError(_))
                ),
                "{empty}"
            );
        }
    }

    #[test]
    fn test_point_is_its_own_representative() {
        let pt = point! { x: 77.209, y: 28.6139 };
        assert_eq!(representative_points(&Geometry::Point(pt)), vec![pt]);
    }

    #[test]
    fn test_multipoint_keeps_every_point() {
        let mp = MultiPoint::from(vec![(77.0, 28.0), (72.8, 19.0)]);
        assert_eq!(representative_points(&Geometry::MultiPoint(mp)).len(), 2);
    }

    #[test]
    fn test_polygon_uses_centroid() {
        let poly = polygon![
            (x: 77.0, y: 28.0),
            (x: 78.0, y: 28.0),
            (x: 78.0, y: 29.0),
            (x: 77.0, y: 29.0),
            (x: 77.0, y: 28.0),
        ];
        let points = representative_points(&Geometry::Polygon(poly));
        assert_eq!(points.len(), 1);
        assert!((points[0].x() - 77.5).abs() < 1e-9);
        assert!((points[0].y() - 28.5).abs() < 1e-9);
    }

    #[test]
    fn test_collection_recurses() {
        let line = LineString::from(vec![(77.0, 28.0), (78.0, 28.0)]);
        let gc = GeometryCollection::from(vec![
            Geometry::Point(point! { x: 72.8, y: 19.0 }),
            Geometry::LineString(line),
        ]);
        assert_eq!(representative_points(&Geometry::GeometryCollection(gc)).len(), 2);
    }

    #[test]
    fn test_empty_geometry_has_no_representatives() {
        let empty = Geometry::MultiPoint(MultiPoint::<f64>(vec![]));
        assert!(representative_points(&empty).is_empty());
    }

    #[test]
    fn test_write_polygon() {
        let poly = polygon![
            (x: 77.0, y: 28.0),
            (x: 78.0, y: 28.0),
            (x: 78.0, y: 29.0),
            (x: 77.0, y: 28.0),
        ];
        assert!(GeometryFormat::Wkt.write_polygon(&poly).starts_with("POLYGON"));
        assert!(
            GeometryFormat::GeoJson
                .write_polygon(&poly)
                .contains("\"Polygon\"")
        );
    }
}
