//! GeoJSON corridor reading
//!
//! Accepts a `FeatureCollection`, a single `Feature`, or a bare
//! `LineString` / `MultiLineString` / `Polygon` / `MultiPolygon` geometry.
//! Positions are `[longitude, latitude]` in WGS84; any further ordinates
//! (altitude) are ignored.

use crate::error::CorridorLoadError;
use crate::vector::Shape;
use geo_types::{Coord, LineString, MultiLineString, MultiPolygon, Point, Polygon};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

type Position = Vec<f64>;

/// Geometry objects as they appear in GeoJSON
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeometryObject {
    Point { coordinates: Position },
    MultiPoint {},
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    GeometryCollection {},
}

/// Read every geometry in a GeoJSON file
pub fn read_geojson_shapes<P: AsRef<Path>>(path: P) -> Result<Vec<Shape>, CorridorLoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CorridorLoadError::NotFound(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|source| CorridorLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_geojson_shapes(&text)
}

/// Parse every geometry in a GeoJSON document
pub fn parse_geojson_shapes(text: &str) -> Result<Vec<Shape>, CorridorLoadError> {
    let doc: Value =
        serde_json::from_str(text).map_err(|e| CorridorLoadError::Parse(e.to_string()))?;

    let kind = doc
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| CorridorLoadError::Parse("missing \"type\" member".to_string()))?;

    match kind {
        "FeatureCollection" => {
            let features = match doc.get("features") {
                None | Some(Value::Null) => return Ok(Vec::new()),
                Some(Value::Array(features)) => features,
                Some(_) => {
                    return Err(CorridorLoadError::Parse(
                        "\"features\" must be an array".to_string(),
                    ))
                }
            };
            features.iter().map(feature_geometry).collect()
        }
        "Feature" => Ok(vec![feature_geometry(&doc)?]),
        "LineString" | "MultiLineString" | "Polygon" | "MultiPolygon" => {
            Ok(vec![geometry_to_shape(&doc)?])
        }
        other => Err(CorridorLoadError::UnsupportedStructure(other.to_string())),
    }
}

fn feature_geometry(feature: &Value) -> Result<Shape, CorridorLoadError> {
    match feature.get("geometry") {
        Some(geometry) if !geometry.is_null() => geometry_to_shape(geometry),
        _ => Err(CorridorLoadError::Parse("feature has no geometry".to_string())),
    }
}

fn geometry_to_shape(value: &Value) -> Result<Shape, CorridorLoadError> {
    let geometry = GeometryObject::deserialize(value)
        .map_err(|e| CorridorLoadError::Parse(e.to_string()))?;

    let shape = match geometry {
        GeometryObject::Point { coordinates } => Shape::Point(Point::from(coord(&coordinates)?)),
        GeometryObject::LineString { coordinates } => Shape::Line(line(&coordinates)?),
        GeometryObject::MultiLineString { coordinates } => Shape::MultiLine(MultiLineString::new(
            coordinates.iter().map(|l| line(l)).collect::<Result<_, _>>()?,
        )),
        GeometryObject::Polygon { coordinates } => Shape::Polygon(polygon(&coordinates)?),
        GeometryObject::MultiPolygon { coordinates } => Shape::MultiPolygon(MultiPolygon::new(
            coordinates.iter().map(|p| polygon(p)).collect::<Result<_, _>>()?,
        )),
        GeometryObject::MultiPoint {} => {
            return Err(CorridorLoadError::UnsupportedGeometry("MultiPoint".to_string()))
        }
        GeometryObject::GeometryCollection {} => {
            return Err(CorridorLoadError::UnsupportedGeometry(
                "GeometryCollection".to_string(),
            ))
        }
    };
    Ok(shape)
}

fn coord(position: &[f64]) -> Result<Coord<f64>, CorridorLoadError> {
    match position {
        [x, y, ..] if x.is_finite() && y.is_finite() => Ok(Coord { x: *x, y: *y }),
        _ => Err(CorridorLoadError::Parse(format!(
            "invalid position {position:?}: expected [longitude, latitude]"
        ))),
    }
}

fn line(positions: &[Position]) -> Result<LineString<f64>, CorridorLoadError> {
    if positions.len() == 1 {
        return Err(CorridorLoadError::Parse(
            "a line or ring needs at least two positions".to_string(),
        ));
    }
    positions
        .iter()
        .map(|p| coord(p))
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

fn polygon(rings: &[Vec<Position>]) -> Result<Polygon<f64>, CorridorLoadError> {
    let mut rings = rings.iter().map(|r| line(r));
    let exterior = rings.next().transpose()?.unwrap_or_else(|| LineString::new(Vec::new()));
    let interiors = rings.collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon::new(exterior, interiors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_collection() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "A"},
                 "geometry": {"type": "LineString", "coordinates": [[-122.0, 37.0], [-122.0, 37.01]]}},
                {"type": "Feature", "properties": {},
                 "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}}
            ]
        }"#;
        let shapes = parse_geojson_shapes(text).unwrap();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].kind(), "LineString");
        assert_eq!(shapes[1].kind(), "Polygon");
    }

    #[test]
    fn test_bare_feature_and_geometry() {
        let feature = r#"{"type": "Feature", "geometry": {"type": "MultiLineString",
            "coordinates": [[[0, 0], [1, 1]], [[2, 2], [3, 3, 120.5]]]}}"#;
        let shapes = parse_geojson_shapes(feature).unwrap();
        assert_eq!(shapes[0].kind(), "MultiLineString");
        assert_eq!(shapes[0].coord_count(), 4);

        let bare = r#"{"type": "MultiPolygon", "coordinates": [[[[0, 0], [1, 0], [1, 1], [0, 0]]]]}"#;
        assert_eq!(parse_geojson_shapes(bare).unwrap()[0].kind(), "MultiPolygon");
    }

    #[test]
    fn test_point_feature_parses_as_point() {
        let text = r#"{"type": "Feature", "geometry": {"type": "Point", "coordinates": [1, 2]}}"#;
        let shapes = parse_geojson_shapes(text).unwrap();
        assert_eq!(shapes, vec![Shape::Point(Point::new(1.0, 2.0))]);
    }

    #[test]
    fn test_bare_point_is_unsupported_structure() {
        let err = parse_geojson_shapes(r#"{"type": "Point", "coordinates": [1, 2]}"#).unwrap_err();
        assert!(matches!(err, CorridorLoadError::UnsupportedStructure(t) if t == "Point"));
    }

    #[test]
    fn test_geometry_collection_unsupported() {
        let text = r#"{"type": "Feature", "geometry": {"type": "GeometryCollection", "geometries": []}}"#;
        let err = parse_geojson_shapes(text).unwrap_err();
        assert!(matches!(err, CorridorLoadError::UnsupportedGeometry(_)));
    }

    #[test]
    fn test_malformed_inputs() {
        assert!(matches!(parse_geojson_shapes("{not json"), Err(CorridorLoadError::Parse(_))));
        assert!(matches!(parse_geojson_shapes("{}"), Err(CorridorLoadError::Parse(_))));
        assert!(matches!(
            parse_geojson_shapes(r#"{"type": "Feature", "geometry": null}"#),
            Err(CorridorLoadError::Parse(_))
        ));
        assert!(matches!(
            parse_geojson_shapes(r#"{"type": "LineString", "coordinates": [[1]]}"#),
            Err(CorridorLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_single_position_line_rejected() {
        let text = r#"{"type": "LineString", "coordinates": [[-122.0, 37.0]]}"#;
        assert!(matches!(parse_geojson_shapes(text), Err(CorridorLoadError::Parse(_))));
    }

    #[test]
    fn test_multipoint_unsupported() {
        let text = r#"{"type": "Feature", "geometry": {"type": "MultiPoint", "coordinates": [[0, 0], [1, 1]]}}"#;
        let err = parse_geojson_shapes(text).unwrap_err();
        assert!(matches!(err, CorridorLoadError::UnsupportedGeometry(t) if t == "MultiPoint"));
    }

    #[test]
    fn test_empty_feature_collection_yields_no_shapes() {
        let shapes = parse_geojson_shapes(r#"{"type": "FeatureCollection", "features": []}"#).unwrap();
        assert!(shapes.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = read_geojson_shapes("/no/such/corridor.geojson").unwrap_err();
        assert!(matches!(err, CorridorLoadError::NotFound(_)));
    }

    #[test]
    fn test_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corridor.geojson");
        fs::write(&path, r#"{"type": "LineString", "coordinates": [[0, 0], [0, 1]]}"#).unwrap();
        let shapes = read_geojson_shapes(&path).unwrap();
        assert_eq!(shapes.len(), 1);
    }
}
