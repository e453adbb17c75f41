use crate::segment::{wang_segment_count, Segment};
use crate::traits::Transformation;
use crate::{LineSegment, Point, QuadraticBezierSegment, Rect, Vector};

use core::ops::Range;

/// A 2d curve segment defined by four points: the beginning of the segment, two control
/// points and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)³ * from + 3 * (1 - t)² * t * ctrl1 + 3 * t² * (1 - t) * ctrl2 + t³ * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct CubicBezierSegment {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

/// Power basis form of a cubic curve: `P(t) = ((a·t + b)·t + c)·t + d`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubicCoeff {
    pub a: Vector,
    pub b: Vector,
    pub c: Vector,
    pub d: Point,
}

impl CubicCoeff {
    #[inline]
    pub fn eval(&self, t: f32) -> Point {
        self.d + ((self.a * t + self.b) * t + self.c) * t
    }

    /// The derivative `3a·t² + 2b·t + c`.
    #[inline]
    pub fn eval_tangent(&self, t: f32) -> Vector {
        (self.a * (3.0 * t) + self.b * 2.0) * t + self.c
    }
}

impl CubicBezierSegment {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;
        let one_t3 = one_t2 * one_t;

        self.from * one_t3
            + self.ctrl1.to_vector() * 3.0 * one_t2 * t
            + self.ctrl2.to_vector() * 3.0 * one_t * t2
            + self.to.to_vector() * t3
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: f32) -> Vector {
        let one_t = 1.0 - t;
        (self.ctrl1 - self.from) * 3.0 * one_t * one_t
            + (self.ctrl2 - self.ctrl1) * 6.0 * one_t * t
            + (self.to - self.ctrl2) * 3.0 * t * t
    }

    #[inline]
    pub fn from(&self) -> Point {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point {
        self.to
    }

    /// The power basis coefficients of the curve.
    pub fn coefficients(&self) -> CubicCoeff {
        let p0 = self.from.to_vector();
        let p1 = self.ctrl1.to_vector();
        let p2 = self.ctrl2.to_vector();
        let p3 = self.to.to_vector();

        CubicCoeff {
            a: p3 + (p1 - p2) * 3.0 - p0,
            b: (p2 - p1 * 2.0 + p0) * 3.0,
            c: (p1 - p0) * 3.0,
            d: self.from,
        }
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        CubicBezierSegment {
            from: self.to,
            ctrl1: self.ctrl2,
            ctrl2: self.ctrl1,
            to: self.from,
        }
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// This is equivalent to splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<f32>) -> Self {
        let (t0, t1) = (t_range.start, t_range.end);
        let from = self.sample(t0);
        let to = self.sample(t1);

        let d = QuadraticBezierSegment {
            from: (self.ctrl1 - self.from).to_point(),
            ctrl: (self.ctrl2 - self.ctrl1).to_point(),
            to: (self.to - self.ctrl2).to_point(),
        };

        let dt = t1 - t0;
        let ctrl1 = from + d.sample(t0).to_vector() * dt;
        let ctrl2 = to - d.sample(t1).to_vector() * dt;

        CubicBezierSegment {
            from,
            ctrl1,
            ctrl2,
            to,
        }
    }

    /// Split this curve into two sub-curves (De Casteljau).
    pub fn split(&self, t: f32) -> (CubicBezierSegment, CubicBezierSegment) {
        let ctrl1a = self.from + (self.ctrl1 - self.from) * t;
        let ctrl2a = self.ctrl1 + (self.ctrl2 - self.ctrl1) * t;
        let ctrl1aa = ctrl1a + (ctrl2a - ctrl1a) * t;
        let ctrl3a = self.ctrl2 + (self.to - self.ctrl2) * t;
        let ctrl2aa = ctrl2a + (ctrl3a - ctrl2a) * t;
        let ctrl1aaa = ctrl1aa + (ctrl2aa - ctrl1aa) * t;

        (
            CubicBezierSegment {
                from: self.from,
                ctrl1: ctrl1a,
                ctrl2: ctrl1aa,
                to: ctrl1aaa,
            },
            CubicBezierSegment {
                from: ctrl1aaa,
                ctrl1: ctrl2aa,
                ctrl2: ctrl3a,
                to: self.to,
            },
        )
    }

    /// Return the curve before the split point.
    pub fn before_split(&self, t: f32) -> CubicBezierSegment {
        self.split(t).0
    }

    /// Return the curve after the split point.
    pub fn after_split(&self, t: f32) -> CubicBezierSegment {
        self.split(t).1
    }

    #[inline]
    pub fn baseline(&self) -> LineSegment {
        LineSegment {
            from: self.from,
            to: self.to,
        }
    }

    /// Number of uniform parameter steps needed to flatten the curve within `tolerance`.
    pub fn num_flattening_segments(&self, tolerance: f32) -> u32 {
        let dd0 = self.from.to_vector() - self.ctrl1.to_vector() * 2.0 + self.ctrl2.to_vector();
        let dd1 = self.ctrl1.to_vector() - self.ctrl2.to_vector() * 2.0 + self.to.to_vector();
        let dd = dd0.length().max(dd1.length());

        wang_segment_count(dd, 0.75, tolerance)
    }

    /// The bounding rectangle of the control polygon.
    pub fn fast_bounding_rect(&self) -> Rect {
        Rect::bounds(&[self.from, self.ctrl1, self.ctrl2, self.to])
    }

    /// Applies the transform to this curve and returns the results.
    #[inline]
    pub fn transformed<T: Transformation>(&self, transform: &T) -> Self {
        CubicBezierSegment {
            from: transform.transform_point(self.from),
            ctrl1: transform.transform_point(self.ctrl1),
            ctrl2: transform.transform_point(self.ctrl2),
            to: transform.transform_point(self.to),
        }
    }
}

impl Segment for CubicBezierSegment {
    impl_segment!();
}

#[cfg(test)]
use crate::point;

#[cfg(test)]
fn test_curve() -> CubicBezierSegment {
    CubicBezierSegment {
        from: point(0.0, 0.0),
        ctrl1: point(1.0, 4.0),
        ctrl2: point(5.0, -2.0),
        to: point(6.0, 1.0),
    }
}

#[test]
fn coefficients_match_sampling() {
    let curve = test_curve();
    let coeff = curve.coefficients();
    for i in 0..=10 {
        let t = i as f32 / 10.0;
        assert!((coeff.eval(t) - curve.sample(t)).length() < 1e-4);
        assert!((coeff.eval_tangent(t) - curve.derivative(t)).length() < 1e-3);
    }
}

#[test]
fn split_range_matches_split() {
    let curve = test_curve();
    let (a, b) = curve.split(0.3);
    let a2 = curve.split_range(0.0..0.3);
    let b2 = curve.split_range(0.3..1.0);
    for (x, y) in [(a.ctrl1, a2.ctrl1), (a.ctrl2, a2.ctrl2), (b.ctrl1, b2.ctrl1), (b.ctrl2, b2.ctrl2)] {
        assert!((x - y).length() < 1e-4, "{:?} {:?}", x, y);
    }
    assert_eq!(b.to, curve.to);

    let mid = curve.split_range(0.25..0.75);
    assert!((mid.sample(0.5) - curve.sample(0.5)).length() < 1e-4);
}

#[test]
fn flattened_length_converges() {
    // Quarter circle of radius 100.
    let k = crate::BEZIER_CIRCLE_COEFF * 100.0;
    let curve = CubicBezierSegment {
        from: point(100.0, 0.0),
        ctrl1: point(100.0, k),
        ctrl2: point(k, 100.0),
        to: point(0.0, 100.0),
    };
    let expected = core::f32::consts::PI * 50.0;
    let coarse = curve.approximate_length(10.0);
    let fine = curve.approximate_length(0.01);
    assert!(coarse <= fine);
    assert!((fine - expected).abs() < 0.05, "{}", fine);
    assert!(curve.num_flattening_segments(0.01) <= crate::segment::MAX_FLATTENING_SEGMENTS);
}
