use crate::{LineSegment, Point, Rect, Vector};

use core::ops::Range;

/// Upper bound of the number of line segments a curve is flattened into.
pub const MAX_FLATTENING_SEGMENTS: u32 = 1024;

/// Common APIs to segment types.
pub trait Segment: Copy + Sized {
    /// Start of the curve.
    fn from(&self) -> Point;

    /// End of the curve.
    fn to(&self) -> Point;

    /// Sample the curve at t (expecting t between 0 and 1).
    fn sample(&self, t: f32) -> Point;

    /// Sample the derivative at t (expecting t between 0 and 1).
    fn derivative(&self, t: f32) -> Vector;

    /// Split this curve into two sub-curves.
    fn split(&self, t: f32) -> (Self, Self);

    /// Return the curve before the split point.
    fn before_split(&self, t: f32) -> Self;

    /// Return the curve after the split point.
    fn after_split(&self, t: f32) -> Self;

    /// Return the curve inside a given range of t.
    ///
    /// This is equivalent splitting at the range's end points.
    fn split_range(&self, t_range: Range<f32>) -> Self;

    /// Swap the direction of the segment.
    fn flip(&self) -> Self;

    /// Number of uniform parameter steps needed to flatten the curve within `tolerance`.
    ///
    /// Always in `[1, MAX_FLATTENING_SEGMENTS]`.
    fn num_flattening_segments(&self, tolerance: f32) -> u32;

    /// A rectangle containing the curve (not necessarily the tightest one).
    fn fast_bounding_rect(&self) -> Rect;

    /// Approximates the curve with sequence of line segments.
    ///
    /// The `tolerance` parameter defines the maximum distance between the curve and
    /// its approximation.
    ///
    /// The parameter `t` at the final segment is guaranteed to be equal to `1.0`.
    fn for_each_flattened_with_t(
        &self,
        tolerance: f32,
        callback: &mut dyn FnMut(&LineSegment, Range<f32>),
    ) {
        let count = self.num_flattening_segments(tolerance);
        let step = 1.0 / count as f32;
        let mut from = self.from();
        let mut t_from = 0.0;
        for i in 1..count {
            let t = i as f32 * step;
            let s = LineSegment {
                from,
                to: self.sample(t),
            };
            callback(&s, t_from..t);
            from = s.to;
            t_from = t;
        }

        let s = LineSegment {
            from,
            to: self.to(),
        };
        callback(&s, t_from..1.0);
    }

    /// Compute the length of the segment using a flattened approximation.
    fn approximate_length(&self, tolerance: f32) -> f32 {
        let mut length = 0.0;
        self.for_each_flattened_with_t(tolerance, &mut |s, _| {
            length += s.length();
        });

        length
    }
}

macro_rules! impl_segment {
    () => {
        fn from(&self) -> Point {
            self.from()
        }
        fn to(&self) -> Point {
            self.to()
        }
        fn sample(&self, t: f32) -> Point {
            self.sample(t)
        }
        fn derivative(&self, t: f32) -> Vector {
            self.derivative(t)
        }
        fn split(&self, t: f32) -> (Self, Self) {
            self.split(t)
        }
        fn before_split(&self, t: f32) -> Self {
            self.before_split(t)
        }
        fn after_split(&self, t: f32) -> Self {
            self.after_split(t)
        }
        fn split_range(&self, t_range: Range<f32>) -> Self {
            self.split_range(t_range)
        }
        fn flip(&self) -> Self {
            self.flip()
        }
        fn num_flattening_segments(&self, tolerance: f32) -> u32 {
            self.num_flattening_segments(tolerance)
        }
        fn fast_bounding_rect(&self) -> Rect {
            self.fast_bounding_rect()
        }
    };
}

/// Wang's formula: the number of uniform steps flattening a degree `n` curve
/// whose largest second difference has length `dd` within `tolerance`.
pub(crate) fn wang_segment_count(dd: f32, degree_factor: f32, tolerance: f32) -> u32 {
    #[cfg(not(feature = "std"))]
    use num_traits::Float;

    debug_assert!(tolerance > 0.0);
    let count = (degree_factor * dd / tolerance).sqrt().ceil();
    if !(count >= 1.0) {
        // Zero curvature, or NaN input.
        return 1;
    }

    (count as u32).min(MAX_FLATTENING_SEGMENTS)
}
