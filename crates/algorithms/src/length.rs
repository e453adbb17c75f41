//! Approximate path length.

use crate::geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment, Segment};
use crate::path::PathEvent;

use std::iter::IntoIterator;

/// Sums the lengths of every segment of a path, including closing lines.
///
/// Curves are flattened within `tolerance`, so the result slightly underestimates
/// their length.
pub fn approximate_length<Iter>(path: Iter, tolerance: f32) -> f32
where
    Iter: IntoIterator<Item = PathEvent>,
{
    let tolerance = tolerance.max(1e-4);

    let mut length = 0.0;

    for evt in path.into_iter() {
        match evt {
            PathEvent::Line([from, to]) | PathEvent::Close([from, to]) => {
                length += LineSegment { from, to }.length()
            }
            PathEvent::Quad([from, ctrl, to]) => {
                length += QuadraticBezierSegment { from, ctrl, to }.approximate_length(tolerance)
            }
            PathEvent::Cubic([from, ctrl1, ctrl2, to]) => {
                length += CubicBezierSegment {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                }
                .approximate_length(tolerance)
            }
            PathEvent::Move(..) => {}
        }
    }

    length
}

#[test]
fn approx_length() {
    use crate::math::{point, Rect};
    use crate::measure::ContourMeasureIter;
    use crate::path::{Direction, Path, PathBuilder};
    use crate::path::builder::PathSink;

    let square = Path::rect(&Rect::wh(1.0, 1.0), Direction::Cw);
    assert!((approximate_length(&*square, 0.01) - 4.0).abs() < 0.0001);

    let mut builder = PathBuilder::new();
    builder.add_circle(point(0.0, 0.0), 10.0, Direction::Ccw);
    builder.move_to(point(0.0, 0.0));
    builder.quadratic_bezier_to(point(5.0, 5.0), point(10.0, 0.0));
    let path = builder.detach();

    let measured: f32 = ContourMeasureIter::new(&path, 0.01).map(|m| m.length()).sum();
    assert!((approximate_length(&*path, 0.01) - measured).abs() < 1e-3);
}
