//! Corridor geometry
//!
//! `Shape` is the closed set of geometry kinds RowGuard handles. Coordinate
//! transforms recurse through it per variant: a polygon transforms its
//! exterior and interior rings, a multi-polygon its polygons, and so on.

use geo_types::{Coord, LineString, MultiLineString, MultiPolygon, Point, Polygon};

/// Geometry of a corridor or of one GeoJSON feature.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Point(Point<f64>),
    Line(LineString<f64>),
    /// A closed ring; polygons are built from these
    Ring(LineString<f64>),
    Polygon(Polygon<f64>),
    MultiLine(MultiLineString<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl Shape {
    /// GeoJSON-style name of this geometry kind
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Point(_) => "Point",
            Shape::Line(_) => "LineString",
            Shape::Ring(_) => "LinearRing",
            Shape::Polygon(_) => "Polygon",
            Shape::MultiLine(_) => "MultiLineString",
            Shape::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// Whether the geometry has no coordinates at all
    pub fn is_empty(&self) -> bool {
        match self {
            Shape::Point(_) => false,
            Shape::Line(ls) | Shape::Ring(ls) => ls.0.is_empty(),
            Shape::Polygon(p) => polygon_is_empty(p),
            Shape::MultiLine(mls) => mls.0.iter().all(|ls| ls.0.is_empty()),
            Shape::MultiPolygon(mp) => mp.0.iter().all(polygon_is_empty),
        }
    }

    /// Number of coordinates, counting every ring
    pub fn coord_count(&self) -> usize {
        match self {
            Shape::Point(_) => 1,
            Shape::Line(ls) | Shape::Ring(ls) => ls.0.len(),
            Shape::Polygon(p) => polygon_coord_count(p),
            Shape::MultiLine(mls) => mls.0.iter().map(|ls| ls.0.len()).sum(),
            Shape::MultiPolygon(mp) => mp.0.iter().map(polygon_coord_count).sum(),
        }
    }

    /// Apply `f` to every coordinate, returning a new shape of the same kind.
    pub fn transform<F>(&self, f: &F) -> Shape
    where
        F: Fn(Coord<f64>) -> Coord<f64>,
    {
        match self {
            Shape::Point(p) => Shape::Point(Point::from(f(p.0))),
            Shape::Line(ls) => Shape::Line(transform_line(ls, f)),
            Shape::Ring(ring) => Shape::Ring(transform_line(ring, f)),
            Shape::Polygon(p) => Shape::Polygon(transform_polygon(p, f)),
            Shape::MultiLine(mls) => Shape::MultiLine(MultiLineString::new(
                mls.0.iter().map(|ls| transform_line(ls, f)).collect(),
            )),
            Shape::MultiPolygon(mp) => Shape::MultiPolygon(MultiPolygon::new(
                mp.0.iter().map(|p| transform_polygon(p, f)).collect(),
            )),
        }
    }
}

fn polygon_is_empty(p: &Polygon<f64>) -> bool {
    p.exterior().0.is_empty()
}

fn polygon_coord_count(p: &Polygon<f64>) -> usize {
    p.exterior().0.len() + p.interiors().iter().map(|r| r.0.len()).sum::<usize>()
}

fn transform_line<F>(ls: &LineString<f64>, f: &F) -> LineString<f64>
where
    F: Fn(Coord<f64>) -> Coord<f64>,
{
    LineString::new(ls.0.iter().map(|&c| f(c)).collect())
}

fn transform_polygon<F>(p: &Polygon<f64>, f: &F) -> Polygon<f64>
where
    F: Fn(Coord<f64>) -> Coord<f64>,
{
    Polygon::new(
        transform_line(p.exterior(), f),
        p.interiors().iter().map(|ring| transform_line(ring, f)).collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_with_hole() -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            vec![LineString::from(vec![(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0), (2.0, 2.0)])],
        )
    }

    #[test]
    fn test_transform_reaches_interior_rings() {
        let shape = Shape::Polygon(square_with_hole());
        let shifted = shape.transform(&|c| Coord { x: c.x + 100.0, y: c.y * 2.0 });

        let Shape::Polygon(p) = shifted else {
            panic!("transform must preserve the variant");
        };
        assert_eq!(p.exterior().0[1], Coord { x: 110.0, y: 0.0 });
        assert_eq!(p.interiors()[0].0[2], Coord { x: 108.0, y: 16.0 });
    }

    #[test]
    fn test_transform_multi_polygon() {
        let shape = Shape::MultiPolygon(MultiPolygon::new(vec![square_with_hole(), square_with_hole()]));
        let moved = shape.transform(&|c| Coord { x: -c.x, y: c.y });
        assert_eq!(moved.kind(), "MultiPolygon");
        assert_eq!(moved.coord_count(), shape.coord_count());
        let Shape::MultiPolygon(mp) = moved else {
            panic!("transform must preserve the variant");
        };
        assert_eq!(mp.0[1].interiors()[0].0[1], Coord { x: -8.0, y: 2.0 });
    }

    #[test]
    fn test_is_empty() {
        assert!(Shape::Line(LineString::new(vec![])).is_empty());
        assert!(Shape::MultiLine(MultiLineString::new(vec![])).is_empty());
        assert!(!Shape::Polygon(square_with_hole()).is_empty());
        assert!(!Shape::Point(Point::new(1.0, 2.0)).is_empty());
    }

    #[test]
    fn test_kinds() {
        assert_eq!(Shape::Point(Point::new(0.0, 0.0)).kind(), "Point");
        assert_eq!(Shape::Ring(LineString::from(vec![(0.0, 0.0), (1.0, 0.0)])).kind(), "LinearRing");
        assert_eq!(Shape::Polygon(square_with_hole()).coord_count(), 10);
    }
}
