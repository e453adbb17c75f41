//! The path sink protocol.
//!
//! Anything that consumes path data (the [`PathBuilder`](crate::PathBuilder), the
//! SVG writer, a canvas backend, a glyph outline consumer) implements [`PathSink`].
//! Anything that produces path data (a [`Path`](crate::Path), a contour extraction,
//! the SVG parser) drives one.
//!
//! ```
//! use vellum_path::builder::{PathSink, Transformed};
//! use vellum_path::math::{point, Matrix};
//! use vellum_path::PathBuilder;
//!
//! let mut builder = PathBuilder::new();
//! {
//!     let mut sink = Transformed::new(&mut builder, Matrix::translation(10.0, 0.0));
//!     sink.move_to(point(0.0, 0.0));
//!     sink.line_to(point(1.0, 1.0));
//! }
//! assert_eq!(builder.points(), &[point(10.0, 0.0), point(11.0, 1.0)]);
//! ```

use crate::math::{Matrix, Point};
use crate::PathEvent;

/// The interface of anything path data can be written into.
///
/// A contour starts with `move_to` and ends either with `close` or implicitly with
/// the next `move_to` (or the end of the data). `line_to`, `quadratic_bezier_to`,
/// `cubic_bezier_to` and `close` must only be called while a contour is open.
pub trait PathSink {
    /// Starts a new contour at the given position.
    fn move_to(&mut self, to: Point);

    /// Adds a line segment to the current contour.
    fn line_to(&mut self, to: Point);

    /// Adds a quadratic bézier segment to the current contour.
    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point);

    /// Adds a cubic bézier segment to the current contour.
    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point);

    /// Closes the current contour with a line back to its first point.
    fn close(&mut self);

    /// Hints at how many points and verbs are about to be added.
    fn reserve(&mut self, _points: usize, _verbs: usize) {}

    /// Forwards a path event to the corresponding method.
    fn path_event(&mut self, event: &PathEvent) {
        match *event {
            PathEvent::Move(to) => self.move_to(to),
            PathEvent::Line([_, to]) => self.line_to(to),
            PathEvent::Quad([_, ctrl, to]) => self.quadratic_bezier_to(ctrl, to),
            PathEvent::Cubic([_, ctrl1, ctrl2, to]) => self.cubic_bezier_to(ctrl1, ctrl2, to),
            PathEvent::Close(..) => self.close(),
        }
    }
}

impl<'l, S: PathSink + ?Sized> PathSink for &'l mut S {
    #[inline]
    fn move_to(&mut self, to: Point) {
        (**self).move_to(to)
    }

    #[inline]
    fn line_to(&mut self, to: Point) {
        (**self).line_to(to)
    }

    #[inline]
    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        (**self).quadratic_bezier_to(ctrl, to)
    }

    #[inline]
    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        (**self).cubic_bezier_to(ctrl1, ctrl2, to)
    }

    #[inline]
    fn close(&mut self) {
        (**self).close()
    }

    #[inline]
    fn reserve(&mut self, points: usize, verbs: usize) {
        (**self).reserve(points, verbs)
    }
}

/// Forwards path data to another sink with a transformation applied.
pub struct Transformed<Sink> {
    sink: Sink,
    transform: Matrix,
}

impl<Sink> Transformed<Sink> {
    #[inline]
    pub fn new(sink: Sink, transform: Matrix) -> Self {
        Transformed { sink, transform }
    }
}

impl<Sink: PathSink> PathSink for Transformed<Sink> {
    #[inline]
    fn move_to(&mut self, to: Point) {
        self.sink.move_to(self.transform * to)
    }

    #[inline]
    fn line_to(&mut self, to: Point) {
        self.sink.line_to(self.transform * to)
    }

    #[inline]
    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.sink
            .quadratic_bezier_to(self.transform * ctrl, self.transform * to)
    }

    #[inline]
    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.sink.cubic_bezier_to(
            self.transform * ctrl1,
            self.transform * ctrl2,
            self.transform * to,
        )
    }

    #[inline]
    fn close(&mut self) {
        self.sink.close()
    }

    #[inline]
    fn reserve(&mut self, points: usize, verbs: usize) {
        self.sink.reserve(points, verbs);
    }
}
