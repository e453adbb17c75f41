use crate::segment::Segment;
use crate::traits::Transformation;
use crate::{Point, Rect, Vector};

use core::ops::Range;

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f32) -> Point {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn from(&self) -> Point {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Point {
        self.to
    }

    /// The derivative is constant along a line segment.
    #[inline]
    pub fn derivative(&self, _t: f32) -> Vector {
        self.to_vector()
    }

    /// Swap the beginning and the end of the segment.
    pub fn flip(&self) -> Self {
        LineSegment {
            from: self.to,
            to: self.from,
        }
    }

    /// Return the sub-segment inside a given range of t.
    ///
    /// This is equivalent splitting at the range's end points.
    pub fn split_range(&self, t_range: Range<f32>) -> Self {
        LineSegment {
            from: self.from.lerp(self.to, t_range.start),
            to: self.from.lerp(self.to, t_range.end),
        }
    }

    /// Split this curve into two sub-segments.
    pub fn split(&self, t: f32) -> (Self, Self) {
        let split_point = self.sample(t);

        (
            LineSegment {
                from: self.from,
                to: split_point,
            },
            LineSegment {
                from: split_point,
                to: self.to,
            },
        )
    }

    /// Return the segment before the split point.
    pub fn before_split(&self, t: f32) -> Self {
        LineSegment {
            from: self.from,
            to: self.sample(t),
        }
    }

    /// Return the segment after the split point.
    pub fn after_split(&self, t: f32) -> Self {
        LineSegment {
            from: self.sample(t),
            to: self.to,
        }
    }

    #[inline]
    pub fn num_flattening_segments(&self, _tolerance: f32) -> u32 {
        1
    }

    pub fn fast_bounding_rect(&self) -> Rect {
        Rect::bounds(&[self.from, self.to])
    }

    /// Returns the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.to - self.from
    }

    /// Computes the length of this segment.
    #[inline]
    pub fn length(&self) -> f32 {
        self.to_vector().length()
    }

    #[inline]
    pub fn square_length(&self) -> f32 {
        self.to_vector().square_length()
    }

    /// Applies the transform to this segment and returns the results.
    #[inline]
    pub fn transformed<T: Transformation>(&self, transform: &T) -> Self {
        LineSegment {
            from: transform.transform_point(self.from),
            to: transform.transform_point(self.to),
        }
    }
}

impl Segment for LineSegment {
    impl_segment!();

    fn approximate_length(&self, _tolerance: f32) -> f32 {
        self.length()
    }
}

#[cfg(test)]
use crate::point;

#[test]
fn split_line() {
    let l = LineSegment {
        from: point(0.0, 0.0),
        to: point(4.0, 2.0),
    };
    let (a, b) = l.split(0.25);
    assert_eq!(a.to, point(1.0, 0.5));
    assert_eq!(b.from, point(1.0, 0.5));
    assert_eq!(l.split_range(0.25..0.75), LineSegment { from: point(1.0, 0.5), to: point(3.0, 1.5) });
    assert_eq!(l.flip().from, point(4.0, 2.0));
    assert_eq!(Segment::approximate_length(&l, 0.1), l.length());
}
