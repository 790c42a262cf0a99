//! Planar point-to-geometry distance
//!
//! Works on projected coordinates through geo's `Euclidean` metric space.
//! Polygons are 0 inside and on their boundary; points in a hole measure
//! to the interior ring.

use geo::{Coord, Distance, Euclidean, Point};
use rowguard_core::Shape;

/// Euclidean distance from `point` to `shape`; `f64::INFINITY` when the
/// shape has no coordinates.
///
/// Multi-geometries are expected without empty members, as
/// [`merge_shapes`](super::merge_shapes) produces them.
pub fn planar_distance(shape: &Shape, point: Coord<f64>) -> f64 {
    if shape.is_empty() {
        return f64::INFINITY;
    }
    let p = Point::from(point);
    match shape {
        Shape::Point(q) => Euclidean::distance(p, *q),
        Shape::Line(ls) | Shape::Ring(ls) => Euclidean::distance(&p, ls),
        Shape::Polygon(poly) => Euclidean::distance(&p, poly),
        Shape::MultiLine(mls) => Euclidean::distance(&p, mls),
        Shape::MultiPolygon(mp) => Euclidean::distance(&p, mp),
    }
}
