//! Move at a defined speed along a path.
//!
//! # Path walking
//!
//! ## Overview
//!
//! In principle, walking a path is similar to iterating over it,
//! but instead of going from receiving path segments (of varying
//! sizes), the path walker makes it possible to advance by a certain
//! distance along the path. This is what places glyphs along a
//! baseline or repeats a shape along another path.
//!
//! ## Example
//!
//! ```
//! use vellum_algorithms::walk::{RegularPattern, walk_along_path, WalkerEvent};
//! use vellum_algorithms::path::Path;
//! use vellum_algorithms::math::Point;
//!
//! fn dots_along_path(path: &Path, dots: &mut Vec<Point>) {
//!     let mut pattern = RegularPattern {
//!         callback: &mut |event: WalkerEvent| {
//!             dots.push(event.position);
//!             true // Return true to continue walking the path.
//!         },
//!         // Invoke the callback above at a regular interval of 3 units.
//!         interval: 3.0,
//!     };
//!
//!     let tolerance = 0.1; // The path flattening tolerance.
//!     let start_offset = 0.0; // Start walking at the beginning of the path.
//!     walk_along_path(path, start_offset, tolerance, &mut pattern);
//! }
//! ```

use crate::geom::utils::{cw, normalize};
use crate::geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment, Segment};
use crate::math::*;
use crate::path::builder::PathSink;
use crate::path::Path;

use std::ops::Range;

/// Walks along the path starting at offset `start` and applies a `Pattern`.
pub fn walk_along_path(path: &Path, start: f32, tolerance: f32, pattern: &mut dyn Pattern) {
    let mut walker = PathWalker::new(start, tolerance, pattern);
    for evt in path.iter() {
        walker.path_event(&evt);
        if walker.done {
            return;
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WalkerEvent {
    pub position: Point,
    pub tangent: Vector,
    /// Distance walked since the start of the path.
    pub distance: f32,
}

impl WalkerEvent {
    /// A transform placing the origin at the event's position with the x axis
    /// following the tangent.
    pub fn matrix(&self) -> Matrix {
        Matrix::from_basis(self.tangent, cw(self.tangent), self.position)
    }
}

/// Types implementing the `Pattern` can be used to walk along a path
/// at constant speed.
///
/// At each step, the pattern receives the position, tangent and already
/// traversed distance along the path and returns the distance until the
/// next step.
///
/// See the `RegularPattern` and `RepeatedPattern` implementations.
/// This trait is also implemented for all functions/closures with signature
/// `FnMut(WalkerEvent) -> Option<f32>`.
pub trait Pattern {
    /// This method is invoked at each step along the path.
    ///
    /// If this method returns None, path walking stops. Otherwise the returned
    /// value is the distance along the path to the next element in the pattern.
    fn next(&mut self, event: WalkerEvent) -> Option<f32>;

    /// Invoked at the start each contour.
    ///
    /// Takes the leftover requested distance from the previous contour,
    /// if any.
    ///
    /// If this method returns None, path walking stops. Otherwise the returned
    /// value is the distance along the path to the next element in the pattern.
    fn begin(&mut self, distance: f32) -> Option<f32> {
        Some(distance)
    }
}

/// A path sink that walks along the flattened segments it receives.
pub struct PathWalker<'l> {
    prev: Point,
    first: Point,
    tolerance: f32,
    advancement: f32,
    leftover: f32,
    next_distance: f32,
    need_moveto: bool,
    done: bool,

    pattern: &'l mut dyn Pattern,
}

impl<'l> PathWalker<'l> {
    pub fn new(start: f32, tolerance: f32, pattern: &'l mut dyn Pattern) -> Self {
        PathWalker {
            prev: point(0.0, 0.0),
            first: point(0.0, 0.0),
            tolerance: tolerance.max(1e-4),
            advancement: 0.0,
            leftover: 0.0,
            next_distance: start.max(0.0),
            need_moveto: true,
            done: false,
            pattern,
        }
    }

    /// Whether the pattern stopped the walk.
    pub fn is_done(&self) -> bool {
        self.done
    }

    fn edge(&mut self, to: Point, pos_cb: &dyn Fn(f32) -> (Point, Vector)) {
        debug_assert!(!self.need_moveto);

        let v = to - self.prev;
        let d = v.length();

        if d < 1e-5 {
            return;
        }

        let inv_d = 1.0 / d;

        let mut distance = self.leftover + d;
        let mut x = 0.0;
        while distance >= self.next_distance {
            x += (self.next_distance - self.leftover) * inv_d;
            let (position, tangent) = pos_cb(x);
            self.prev = position;
            self.leftover = 0.0;
            self.advancement += self.next_distance;
            distance -= self.next_distance;

            let event = WalkerEvent {
                position,
                tangent,
                distance: self.advancement,
            };
            if let Some(distance) = self.pattern.next(event) {
                self.next_distance = distance;
            } else {
                self.done = true;
                return;
            }
        }

        self.prev = to;
        self.leftover = distance;
    }

    fn curve<S: Segment>(&mut self, curve: S) {
        curve.for_each_flattened_with_t(self.tolerance, &mut |line, t: Range<f32>| {
            if !self.done {
                self.edge(line.to, &|x| {
                    let t2 = t.start + x * (t.end - t.start);
                    (curve.sample(t2), normalize(curve.derivative(t2)))
                });
            }
        });
    }
}

impl<'l> PathSink for PathWalker<'l> {
    fn move_to(&mut self, to: Point) {
        self.need_moveto = false;
        self.first = to;
        self.prev = to;

        if let Some(distance) = self.pattern.begin(self.next_distance) {
            self.next_distance = distance;
        } else {
            self.done = true;
        }
    }

    fn line_to(&mut self, to: Point) {
        let from = self.prev;
        let tangent = normalize(to - from);
        self.edge(to, &|x| (LineSegment { from, to }.sample(x), tangent));
    }

    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.curve(QuadraticBezierSegment {
            from: self.prev,
            ctrl,
            to,
        });
    }

    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.curve(CubicBezierSegment {
            from: self.prev,
            ctrl1,
            ctrl2,
            to,
        });
    }

    fn close(&mut self) {
        let first = self.first;
        self.line_to(first);
        self.need_moveto = true;
    }
}

/// A simple pattern that invokes a callback at regular intervals.
///
/// If the callback returns false, path walking stops.
pub struct RegularPattern<Cb> {
    /// The function to call at each step.
    pub callback: Cb,
    /// A constant interval between each step.
    pub interval: f32,
}

impl<Cb> Pattern for RegularPattern<Cb>
where
    Cb: FnMut(WalkerEvent) -> bool,
{
    #[inline]
    fn next(&mut self, event: WalkerEvent) -> Option<f32> {
        if !(self.callback)(event) {
            return None;
        }
        Some(self.interval)
    }
}

/// A pattern that invokes a callback at a repeated sequence of
/// constant intervals.
///
/// If the callback returns false, path walking stops.
pub struct RepeatedPattern<'l, Cb> {
    /// The function to call at each step.
    pub callback: Cb,
    /// The repeated interval sequence.
    pub intervals: &'l [f32],
    /// The index of the next interval in the sequence.
    pub index: usize,
}

impl<'l, Cb> Pattern for RepeatedPattern<'l, Cb>
where
    Cb: FnMut(WalkerEvent) -> bool,
{
    #[inline]
    fn next(&mut self, event: WalkerEvent) -> Option<f32> {
        if !(self.callback)(event) {
            return None;
        }
        let idx = self.index % self.intervals.len();
        self.index += 1;
        Some(self.intervals[idx])
    }
}

impl<Cb> Pattern for Cb
where
    Cb: FnMut(WalkerEvent) -> Option<f32>,
{
    #[inline]
    fn next(&mut self, event: WalkerEvent) -> Option<f32> {
        (self)(event)
    }
}

#[test]
fn walk_square() {
    let expected = [
        (point(0.0, 0.0), vector(1.0, 0.0), 0.0),
        (point(2.0, 0.0), vector(1.0, 0.0), 2.0),
        (point(4.0, 0.0), vector(1.0, 0.0), 4.0),
        (point(6.0, 0.0), vector(1.0, 0.0), 6.0),
        (point(6.0, 2.0), vector(0.0, 1.0), 8.0),
        (point(6.0, 4.0), vector(0.0, 1.0), 10.0),
        (point(6.0, 6.0), vector(0.0, 1.0), 12.0),
        (point(4.0, 6.0), vector(-1.0, 0.0), 14.0),
        (point(2.0, 6.0), vector(-1.0, 0.0), 16.0),
        (point(0.0, 6.0), vector(-1.0, 0.0), 18.0),
        (point(0.0, 4.0), vector(0.0, -1.0), 20.0),
        (point(0.0, 2.0), vector(0.0, -1.0), 22.0),
        (point(0.0, 0.0), vector(0.0, -1.0), 24.0),
    ];

    let mut i = 0;
    let mut pattern = RegularPattern {
        interval: 2.0,
        callback: |event: WalkerEvent| {
            assert!((event.position - expected[i].0).length() < 0.000001);
            assert_eq!(event.tangent, expected[i].1);
            assert_eq!(event.distance, expected[i].2);
            i += 1;
            true
        },
    };

    let mut walker = PathWalker::new(0.0, 0.1, &mut pattern);

    walker.move_to(point(0.0, 0.0));
    walker.line_to(point(6.0, 0.0));
    walker.line_to(point(6.0, 6.0));
    walker.line_to(point(0.0, 6.0));
    walker.close();
}

#[test]
fn walk_with_leftover() {
    let expected = [
        (point(1.0, 0.0), vector(1.0, 0.0), 1.0),
        (point(4.0, 0.0), vector(1.0, 0.0), 4.0),
        (point(5.0, 2.0), vector(0.0, 1.0), 7.0),
        (point(5.0, 5.0), vector(0.0, 1.0), 10.0),
        (point(2.0, 5.0), vector(-1.0, 0.0), 13.0),
        (point(0.0, 4.0), vector(0.0, -1.0), 16.0),
        (point(0.0, 1.0), vector(0.0, -1.0), 19.0),
    ];

    let mut i = 0;
    let mut pattern = RegularPattern {
        interval: 3.0,
        callback: |event: WalkerEvent| {
            assert!((event.position - expected[i].0).length() < 0.000001);
            assert_eq!(event.tangent, expected[i].1);
            assert_eq!(event.distance, expected[i].2);
            i += 1;
            true
        },
    };

    let path = Path::polygon(
        &[point(0.0, 0.0), point(5.0, 0.0), point(5.0, 5.0), point(0.0, 5.0)],
        true,
    );
    walk_along_path(&path, 1.0, 0.1, &mut pattern);
}

#[test]
fn walk_starting_after() {
    // With a starting distance that is greater than the path, the
    // callback should never be called.
    let cb = &mut |_event: WalkerEvent| -> Option<f32> { panic!() };
    let mut walker = PathWalker::new(10.0, 0.1, cb);

    walker.move_to(point(0.0, 0.0));
    walker.line_to(point(5.0, 0.0));
}

#[test]
fn walk_abort_early() {
    let mut callback_counter = 0;
    let mut pattern = RegularPattern {
        interval: 3.0,
        callback: |_event: WalkerEvent| {
            callback_counter += 1;
            false
        },
    };

    let mut walker = PathWalker::new(1.0, 0.1, &mut pattern);

    walker.move_to(point(0.0, 0.0));
    walker.line_to(point(100.0, 0.0));
    assert!(walker.is_done());

    assert_eq!(callback_counter, 1);
}

#[test]
fn walk_repeated_along_curve() {
    use crate::path::{Direction, PathBuilder};

    let mut builder = PathBuilder::new();
    builder.add_circle(point(0.0, 0.0), 10.0, Direction::Cw);
    let path = builder.detach();

    let mut distances = Vec::new();
    let mut pattern = RepeatedPattern {
        callback: |event: WalkerEvent| {
            // Points stay on the circle, tangents are perpendicular to the radius.
            let radius = event.position - point(0.0, 0.0);
            assert!((radius.length() - 10.0).abs() < 0.05);
            assert!(radius.normalize().dot(event.tangent).abs() < 0.05);
            let m = event.matrix();
            assert!((m * point(0.0, 0.0) - event.position).length() < 1e-5);
            distances.push(event.distance);
            true
        },
        intervals: &[1.0, 4.0],
        index: 0,
    };

    walk_along_path(&path, 0.0, 0.01, &mut pattern);

    assert_eq!(&distances[..4], &[0.0, 1.0, 5.0, 6.0]);
    // Two fifths of the circumference per period, give or take one step.
    let circumference = 2.0 * std::f32::consts::PI * 10.0;
    assert!((distances.len() as f32 - circumference * 0.4).abs() <= 2.0);
}
