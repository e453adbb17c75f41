use crate::segment::{wang_segment_count, Segment};
use crate::traits::Transformation;
use crate::{CubicBezierSegment, LineSegment, Point, Rect, Vector};

use core::ops::Range;

/// A 2d curve segment defined by three points: the beginning of the segment, a control
/// point and the end of the segment.
///
/// The curve is defined by equation:
/// ```∀ t ∈ [0..1],  P(t) = (1 - t)² * from + 2 * (1 - t) * t * ctrl + t² * to```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadraticBezierSegment {
    pub from: Point,
    pub ctrl: Point,
    pub to: Point,
}

/// Power basis form of a quadratic curve: `P(t) = (a·t + b)·t + c`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadCoeff {
    pub a: Vector,
    pub b: Vector,
    pub c: Point,
}

impl QuadCoeff {
    #[inline]
    pub fn eval(&self, t: f32) -> Point {
        self.c + (self.a * t + self.b) * t
    }

    /// The derivative `2a·t + b`.
    #[inline]
    pub fn eval_tangent(&self, t: f32) -> Vector {
        self.a * (2.0 * t) + self.b
    }
}

impl QuadraticBezierSegment {
    /// Sample the curve at t (expecting t between 0 and 1).
    pub fn sample(&self, t: f32) -> Point {
        let t2 = t * t;
        let one_t = 1.0 - t;
        let one_t2 = one_t * one_t;

        self.from * one_t2 + self.ctrl.to_vector() * 2.0 * one_t * t + self.to.to_vector() * t2
    }

    /// Sample the curve's derivative at t (expecting t between 0 and 1).
    pub fn derivative(&self, t: f32) -> Vector {
        let (c0, c1, c2) = (2.0 * t - 2.0, -4.0 * t + 2.0, 2.0 * t);
        self.from.to_vector() * c0 + self.ctrl.to_vector() * c1 + self.to.to_vector() * c2
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
    pub fn coefficients(&self) -> QuadCoeff {
        let p0 = self.from.to_vector();
        let p1 = self.ctrl.to_vector();
        let p2 = self.to.to_vector();

        QuadCoeff {
            a: p2 - p1 * 2.0 + p0,
            b: (p1 - p0) * 2.0,
            c: self.from,
        }
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        QuadraticBezierSegment {
            from: self.to,
            ctrl: self.ctrl,
            to: self.from,
        }
    }

    /// Return the sub-curve inside a given range of t.
    ///
    /// This is equivalent to splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<f32>) -> Self {
        let t0 = t_range.start;
        let t1 = t_range.end;

        let from = self.sample(t0);
        let to = self.sample(t1);
        let ctrl = from + (self.ctrl - self.from).lerp(self.to - self.ctrl, t0) * (t1 - t0);

        QuadraticBezierSegment { from, ctrl, to }
    }

    /// Split this curve into two sub-curves (De Casteljau).
    pub fn split(&self, t: f32) -> (QuadraticBezierSegment, QuadraticBezierSegment) {
        let split_point = self.sample(t);

        (
            QuadraticBezierSegment {
                from: self.from,
                ctrl: self.from.lerp(self.ctrl, t),
                to: split_point,
            },
            QuadraticBezierSegment {
                from: split_point,
                ctrl: self.ctrl.lerp(self.to, t),
                to: self.to,
            },
        )
    }

    /// Return the curve before the split point.
    pub fn before_split(&self, t: f32) -> QuadraticBezierSegment {
        QuadraticBezierSegment {
            from: self.from,
            ctrl: self.from.lerp(self.ctrl, t),
            to: self.sample(t),
        }
    }

    /// Return the curve after the split point.
    pub fn after_split(&self, t: f32) -> QuadraticBezierSegment {
        QuadraticBezierSegment {
            from: self.sample(t),
            ctrl: self.ctrl.lerp(self.to, t),
            to: self.to,
        }
    }

    /// Elevate this curve to a cubic bézier.
    pub fn to_cubic(&self) -> CubicBezierSegment {
        CubicBezierSegment {
            from: self.from,
            ctrl1: (self.from + self.ctrl.to_vector() * 2.0) / 3.0,
            ctrl2: (self.to + self.ctrl.to_vector() * 2.0) / 3.0,
            to: self.to,
        }
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
        let dd = (self.from - self.ctrl.to_vector() * 2.0 + self.to.to_vector()).to_vector();
        wang_segment_count(dd.length(), 0.25, tolerance)
    }

    /// The bounding rectangle of the control polygon.
    pub fn fast_bounding_rect(&self) -> Rect {
        Rect::bounds(&[self.from, self.ctrl, self.to])
    }

    /// Applies the transform to this curve and returns the results.
    #[inline]
    pub fn transformed<T: Transformation>(&self, transform: &T) -> Self {
        QuadraticBezierSegment {
            from: transform.transform_point(self.from),
            ctrl: transform.transform_point(self.ctrl),
            to: transform.transform_point(self.to),
        }
    }
}

impl Segment for QuadraticBezierSegment {
    impl_segment!();
}

#[cfg(test)]
use crate::point;

#[test]
fn coefficients_match_sampling() {
    let curve = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(2.0, 4.0),
        to: point(4.0, 0.0),
    };
    let coeff = curve.coefficients();
    for i in 0..=10 {
        let t = i as f32 / 10.0;
        assert!((coeff.eval(t) - curve.sample(t)).length() < 1e-5);
        assert!((coeff.eval_tangent(t) - curve.derivative(t)).length() < 1e-4);
    }
}

#[test]
fn split_matches_split_range() {
    let curve = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(1.0, 3.0),
        to: point(5.0, 1.0),
    };
    let (a, b) = curve.split(0.5);
    let a2 = curve.split_range(0.0..0.5);
    let b2 = curve.split_range(0.5..1.0);
    assert!((a.ctrl - a2.ctrl).length() < 1e-5);
    assert!((b.ctrl - b2.ctrl).length() < 1e-5);
    assert_eq!(a.to, b.from);
    assert_eq!(curve.sample(1.0), curve.to);
}

#[test]
fn flattening_segment_count() {
    let curve = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(50.0, 100.0),
        to: point(100.0, 0.0),
    };
    let coarse = curve.num_flattening_segments(1.0);
    let fine = curve.num_flattening_segments(0.01);
    assert!(coarse >= 1);
    assert!(fine > coarse);
    // |p0 - 2p1 + p2| = 200, sqrt(0.25 * 200 / 1) = 7.07
    assert_eq!(coarse, 8);

    let flat = QuadraticBezierSegment {
        from: point(0.0, 0.0),
        ctrl: point(1.0, 1.0),
        to: point(2.0, 2.0),
    };
    assert_eq!(flat.num_flattening_segments(0.1), 1);
}
