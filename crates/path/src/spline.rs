//! Smooth paths through a sequence of points.
//!
//! A [`SplineKnot`] is a point on the curve together with its incoming (`prev`)
//! and outgoing (`next`) cubic handles. [`CurveFit`] derives knots from plain
//! points with Catmull-Rom style tangents, and
//! [`PathBuilder::add_spline_knots`] turns knots into cubic bézier segments.

use crate::builder::PathSink;
use crate::geom::utils::normalize;
use crate::geom::BEZIER_CIRCLE_COEFF;
use crate::math::*;
use crate::{Path, PathBuilder};

use std::sync::Arc;

/// A point on a spline with its two handles.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SplineKnot {
    /// Second control point of the segment ending at `point`.
    pub prev: Point,
    pub point: Point,
    /// First control point of the segment starting at `point`.
    pub next: Point,
}

impl SplineKnot {
    /// A knot with both handles on the point (a corner).
    pub fn corner(point: Point) -> Self {
        SplineKnot {
            prev: point,
            point,
            next: point,
        }
    }
}

/// Parameters of the curve fitting through points.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CurveFit {
    /// Scales the handle lengths. The default makes a square's corners fit a circle.
    pub tangent_scale: f32,
    /// Upper bound of each handle's length.
    pub max_tangent_length: f32,
    /// Whether the curve loops back to the first point.
    pub closed: bool,
    /// When true both handles of a knot have the same length, otherwise each
    /// handle is proportional to the length of the chord on its side.
    pub symmetric: bool,
}

impl Default for CurveFit {
    fn default() -> Self {
        CurveFit {
            tangent_scale: BEZIER_CIRCLE_COEFF,
            max_tangent_length: f32::INFINITY,
            closed: false,
            symmetric: true,
        }
    }
}

impl CurveFit {
    /// Computes one knot per point.
    pub fn knots(&self, points: &[Point]) -> Vec<SplineKnot> {
        let n = points.len();
        if n < 2 {
            return points.iter().map(|p| SplineKnot::corner(*p)).collect();
        }

        let mut knots = Vec::with_capacity(n);
        for i in 0..n {
            let point = points[i];
            let has_prev = self.closed || i > 0;
            let has_next = self.closed || i + 1 < n;
            let prev = points[(i + n - 1) % n];
            let next = points[(i + 1) % n];

            let knot = if has_prev && has_next {
                self.interior_knot(prev, point, next)
            } else if has_next {
                // Open start.
                let span = next - point;
                let len = self.clamp(self.tangent_scale * span.length() * 0.5);
                SplineKnot {
                    prev: point,
                    point,
                    next: point + normalize(span) * len,
                }
            } else {
                // Open end.
                let span = point - prev;
                let len = self.clamp(self.tangent_scale * span.length() * 0.5);
                SplineKnot {
                    prev: point - normalize(span) * len,
                    point,
                    next: point,
                }
            };
            knots.push(knot);
        }

        knots
    }

    /// Builds the fitted curve.
    pub fn path(&self, points: &[Point]) -> Arc<Path> {
        path_from_spline_knots(&self.knots(points), self.closed)
    }

    fn interior_knot(&self, prev: Point, point: Point, next: Point) -> SplineKnot {
        let span = next - prev;
        let total = span.length();
        let dir = normalize(span);

        let (in_share, out_share) = if self.symmetric {
            (0.5, 0.5)
        } else {
            let d0 = (point - prev).length();
            let d1 = (next - point).length();
            let sum = d0 + d1;
            if sum > 0.0 {
                (d0 / sum, d1 / sum)
            } else {
                (0.5, 0.5)
            }
        };

        let in_len = self.clamp(self.tangent_scale * total * in_share);
        let out_len = self.clamp(self.tangent_scale * total * out_share);

        SplineKnot {
            prev: point - dir * in_len,
            point,
            next: point + dir * out_len,
        }
    }

    fn clamp(&self, len: f32) -> f32 {
        len.min(self.max_tangent_length)
    }
}

impl PathBuilder {
    /// Adds a contour of cubic bézier segments joining the knots.
    ///
    /// Each segment goes from a knot's point to the next knot's point using the
    /// first knot's `next` and the second knot's `prev` as control points. When
    /// `close` is true a last segment joins the last knot back to the first one
    /// and the contour is closed.
    pub fn add_spline_knots(&mut self, knots: &[SplineKnot], close: bool) {
        let first = match knots.first() {
            Some(knot) => knot,
            None => return,
        };

        self.reserve(1 + knots.len() * 3, knots.len() + 2);
        self.move_to(first.point);
        for pair in knots.windows(2) {
            self.cubic_bezier_to(pair[0].next, pair[1].prev, pair[1].point);
        }

        if close {
            if let Some(last) = knots.last().filter(|_| knots.len() > 1) {
                self.cubic_bezier_to(last.next, first.prev, first.point);
            }
            self.close();
        }
    }
}

/// Builds a path from spline knots, see [`PathBuilder::add_spline_knots`].
pub fn path_from_spline_knots(knots: &[SplineKnot], close: bool) -> Arc<Path> {
    let mut builder = PathBuilder::new();
    builder.add_spline_knots(knots, close);
    builder.detach()
}

#[cfg(test)]
fn approx_eq(a: Point, b: Point) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn collinear_points_stay_on_the_line() {
    let points = [point(0.0, 0.0), point(1.0, 0.0), point(2.0, 0.0)];
    let path = CurveFit::default().path(&points);

    assert_eq!(path.verbs().len(), 3);
    assert_eq!(path.points().len(), 7);
    assert_eq!(path.points()[0], points[0]);
    assert_eq!(path.points()[3], points[1]);
    assert_eq!(path.points()[6], points[2]);
    for p in path.points() {
        assert_eq!(p.y, 0.0);
    }

    let s = BEZIER_CIRCLE_COEFF;
    let knots = CurveFit::default().knots(&points);
    assert!(approx_eq(knots[0].next, point(s * 0.5, 0.0)));
    assert!(approx_eq(knots[1].prev, point(1.0 - s, 0.0)));
    assert!(approx_eq(knots[1].next, point(1.0 + s, 0.0)));
    assert!(approx_eq(knots[2].prev, point(2.0 - s * 0.5, 0.0)));
    assert_eq!(knots[2].next, points[2]);
}

#[test]
fn asymmetric_handles_follow_chords() {
    let points = [point(0.0, 0.0), point(1.0, 0.0), point(4.0, 0.0)];
    let fit = CurveFit {
        symmetric: false,
        ..CurveFit::default()
    };
    let knots = fit.knots(&points);
    let s = BEZIER_CIRCLE_COEFF;
    assert!(approx_eq(knots[1].prev, point(1.0 - s, 0.0)));
    assert!(approx_eq(knots[1].next, point(1.0 + 3.0 * s, 0.0)));
}

#[test]
fn max_tangent_length() {
    let points = [point(0.0, 0.0), point(10.0, 0.0), point(20.0, 0.0)];
    let fit = CurveFit {
        max_tangent_length: 1.0,
        ..CurveFit::default()
    };
    let knots = fit.knots(&points);
    assert!(approx_eq(knots[1].prev, point(9.0, 0.0)));
    assert!(approx_eq(knots[1].next, point(11.0, 0.0)));
    assert!(approx_eq(knots[0].next, point(1.0, 0.0)));
}

#[test]
fn closed_square_is_round() {
    let points = [
        point(1.0, 0.0),
        point(0.0, 1.0),
        point(-1.0, 0.0),
        point(0.0, -1.0),
    ];
    let fit = CurveFit {
        closed: true,
        ..CurveFit::default()
    };
    let path = fit.path(&points);
    assert_eq!(path.verbs().len(), 6);
    assert_eq!(path.points().len(), 13);

    // Each handle is perpendicular to the radius, with the circle length.
    let knots = fit.knots(&points);
    assert!(approx_eq(knots[0].next, point(1.0, BEZIER_CIRCLE_COEFF)));
    assert!(approx_eq(knots[0].prev, point(1.0, -BEZIER_CIRCLE_COEFF)));

    let bounds = path.bounds();
    assert!(bounds.left >= -1.0 - 1e-5 && bounds.right <= 1.0 + 1e-5);
}

#[test]
fn degenerate_inputs() {
    assert!(CurveFit::default().path(&[]).is_empty());

    let single = CurveFit::default().path(&[point(3.0, 4.0)]);
    assert_eq!(single.points(), &[point(3.0, 4.0)]);

    let closed_single = path_from_spline_knots(&[SplineKnot::corner(point(1.0, 1.0))], true);
    assert_eq!(closed_single.verbs().len(), 2);
}
