//! Merging corridor features into one geometry
//!
//! Area features are unioned. Line features are gathered into one
//! multi-line, except that a line covered by the area union (inside it or
//! along its boundary) adds nothing and is absorbed. A corridor must end up as pure line or
//! pure area geometry.

use geo::{BooleanOps, LineString, MultiLineString, MultiPolygon, Polygon, Relate};
use rowguard_core::{CorridorLoadError, Shape};

/// Merge parsed features into a single line or area shape.
///
/// Empty inputs are rejected with [`CorridorLoadError::NoGeometry`]. Shapes
/// without coordinates are dropped; if nothing else remains the result is an
/// empty multi-line.
pub fn merge_shapes(shapes: Vec<Shape>) -> Result<Shape, CorridorLoadError> {
    if shapes.is_empty() {
        return Err(CorridorLoadError::NoGeometry);
    }

    let mut lines: Vec<LineString<f64>> = Vec::new();
    let mut polygons: Vec<Polygon<f64>> = Vec::new();
    for shape in shapes {
        match shape {
            Shape::Point(_) => {
                return Err(CorridorLoadError::UnsupportedGeometry("Point".to_string()))
            }
            Shape::Line(ls) | Shape::Ring(ls) => lines.push(ls),
            Shape::MultiLine(mls) => lines.extend(mls.0),
            Shape::Polygon(poly) => polygons.push(poly),
            Shape::MultiPolygon(mp) => polygons.extend(mp.0),
        }
    }
    lines.retain(|ls| !ls.0.is_empty());
    polygons.retain(|poly| !poly.exterior().0.is_empty());

    let area = union_all(polygons);
    if let Some(area) = &area {
        lines.retain(|ls| !ls.relate(area).is_coveredby());
    }

    match (area, lines.len()) {
        (None, 1) => Ok(Shape::Line(lines.remove(0))),
        (None, _) => Ok(Shape::MultiLine(MultiLineString::new(lines))),
        (Some(mut area), 0) if area.0.len() == 1 => Ok(Shape::Polygon(area.0.remove(0))),
        (Some(area), 0) => Ok(Shape::MultiPolygon(area)),
        (Some(_), n) => Err(CorridorLoadError::UnsupportedGeometry(format!(
            "mixed line and area geometry ({n} lines outside the area)"
        ))),
    }
}

fn union_all(polygons: Vec<Polygon<f64>>) -> Option<MultiPolygon<f64>> {
    let mut polygons = polygons.into_iter();
    let first = MultiPolygon::new(vec![polygons.next()?]);
    Some(polygons.fold(first, |acc, poly| acc.union(&MultiPolygon::new(vec![poly]))))
}
