//! Arc length measurements of path contours.
//!
//! A [`ContourMeasure`] flattens one contour into a table of edges with their
//! cumulative distance, then answers position and tangent queries at a given
//! distance and extracts the part of the contour between two distances.
//!
//! ## Example
//!
//! ```
//! use vellum_algorithms::measure::{ContourMeasureIter, DEFAULT_TOLERANCE};
//! use vellum_algorithms::path::{Direction, Path, PathBuilder};
//! use vellum_algorithms::math::Rect;
//!
//! let square = Path::rect(&Rect::wh(10.0, 10.0), Direction::Cw);
//! let measure = ContourMeasureIter::new(&square, DEFAULT_TOLERANCE).next().unwrap();
//! assert_eq!(measure.length(), 40.0);
//!
//! // Position and direction a quarter of the way along the contour.
//! let (position, tangent) = measure.get_pos_tan(10.0);
//! println!("{:?} {:?}", position, tangent);
//!
//! // The first half of the square.
//! let mut builder = PathBuilder::new();
//! measure.get_segment(0.0, 20.0, true, &mut builder);
//! assert_eq!(builder.points().len(), 3);
//! ```

use crate::geom::utils::{cw, normalize};
use crate::geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment, Segment};
use crate::math::*;
use crate::path::builder::PathSink;
use crate::path::{count_contour_points_verbs, Path, Verb};

use std::ops::Range;

/// The flattening tolerance used when none is specified.
pub const DEFAULT_TOLERANCE: f32 = 1.0;

const MIN_TOLERANCE: f32 = 1e-4;

/// One segment of the measured contour.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Record {
    // Index of the segment's first point.
    point_index: u32,
    // Number of points the segment adds (1: line, 2: quadratic, 3: cubic).
    kind: u8,
    // Distance from the start of the contour to the end of the segment.
    length: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Edge {
    // Distance from the start of the contour to the end of the edge.
    distance: f32,
    // Which record this edge is on.
    record: u32,
    // t-value of the end of the edge on its segment.
    t: f32,
}

#[derive(Copy, Clone, Debug)]
enum AnySegment {
    Line(LineSegment),
    Quadratic(QuadraticBezierSegment),
    Cubic(CubicBezierSegment),
}

macro_rules! dispatch {
    ($v:expr, $seg:ident => $code:expr) => {
        match $v {
            AnySegment::Line($seg) => $code,
            AnySegment::Quadratic($seg) => $code,
            AnySegment::Cubic($seg) => $code,
        }
    };
}

impl AnySegment {
    fn sample(&self, t: f32) -> Point {
        dispatch!(self, s => s.sample(t))
    }

    fn derivative(&self, t: f32) -> Vector {
        dispatch!(self, s => s.derivative(t))
    }

    fn chord(&self) -> Vector {
        dispatch!(self, s => s.to() - s.from())
    }

    fn split_range(&self, range: Range<f32>) -> Self {
        match self {
            AnySegment::Line(s) => AnySegment::Line(s.split_range(range)),
            AnySegment::Quadratic(s) => AnySegment::Quadratic(s.split_range(range)),
            AnySegment::Cubic(s) => AnySegment::Cubic(s.split_range(range)),
        }
    }

    fn from(&self) -> Point {
        dispatch!(self, s => s.from())
    }

    fn for_each_flattened_with_t(&self, tolerance: f32, cb: &mut dyn FnMut(&LineSegment, Range<f32>)) {
        dispatch!(self, s => s.for_each_flattened_with_t(tolerance, cb))
    }

    fn emit(&self, sink: &mut dyn PathSink) {
        match *self {
            AnySegment::Line(s) => sink.line_to(s.to),
            AnySegment::Quadratic(s) => sink.quadratic_bezier_to(s.ctrl, s.to),
            AnySegment::Cubic(s) => sink.cubic_bezier_to(s.ctrl1, s.ctrl2, s.to),
        }
    }
}

/// Cached arc length measurements of a single contour.
///
/// Curves are flattened into line segments within a tolerance. The number of
/// edges per curve depends on the tolerance, so coarse tolerances are cheap and
/// fine ones are accurate. Segments of zero length are left out and a contour of
/// zero length has no measure at all.
///
/// Distances passed to the queries are clamped to `[0, length]`, except for
/// [`get_pos_tan_extend`](ContourMeasure::get_pos_tan_extend).
#[derive(Clone, Debug, PartialEq)]
pub struct ContourMeasure {
    // The contour's points, followed by its first point if it is closed.
    points: Vec<Point>,
    records: Vec<Record>,
    edges: Vec<Edge>,
    closed: bool,
}

impl ContourMeasure {
    /// Measures the contour described by `points` and `verbs`.
    ///
    /// The verbs must describe a single contour starting with a move; anything
    /// after a second move is ignored. Returns `None` if the contour has no length.
    pub fn new(points: &[Point], verbs: &[Verb], tolerance: f32) -> Option<Self> {
        let tolerance = tolerance.max(MIN_TOLERANCE);
        debug_assert!(verbs.is_empty() || verbs[0] == Verb::Move);

        let mut measure = ContourMeasure {
            points: Vec::with_capacity(points.len() + 1),
            records: Vec::new(),
            edges: Vec::new(),
            closed: false,
        };

        let mut distance = 0.0;
        let mut index = 0;
        for (i, verb) in verbs.iter().enumerate() {
            let kind = match *verb {
                Verb::Move if i == 0 => {
                    measure.points.push(points[0]);
                    index = 1;
                    continue;
                }
                Verb::Move => break,
                _ if measure.points.is_empty() => break,
                Verb::Close => {
                    measure.closed = true;
                    if let (Some(&first), Some(&last)) =
                        (measure.points.first(), measure.points.last())
                    {
                        if first != last {
                            measure.points.push(first);
                            distance = measure.add_segment(1, distance, tolerance);
                        }
                    }
                    break;
                }
                other => other.num_points(),
            };

            measure
                .points
                .extend_from_slice(&points[index..index + kind]);
            index += kind;
            distance = measure.add_segment(kind, distance, tolerance);
        }

        if measure.records.is_empty() {
            log::trace!("contour of zero length, no measure");
            return None;
        }

        log::trace!(
            "measured contour: {} segments, {} edges, length {}",
            measure.records.len(),
            measure.edges.len(),
            distance
        );

        Some(measure)
    }

    /// Measures the first contour of a path that has a length.
    pub fn from_path(path: &Path, tolerance: f32) -> Option<Self> {
        ContourMeasureIter::new(path, tolerance).next()
    }

    // The last `kind + 1` points form a segment. Flattens it and returns the
    // updated distance.
    fn add_segment(&mut self, kind: usize, distance: f32, tolerance: f32) -> f32 {
        let point_index = self.points.len() - kind - 1;
        let record = self.records.len() as u32;
        let segment = self.make_segment(point_index, kind);

        let edge_count = self.edges.len();
        let mut d = distance;
        let edges = &mut self.edges;
        segment.for_each_flattened_with_t(tolerance, &mut |line, t| {
            d += line.length();
            edges.push(Edge {
                distance: d,
                record,
                t: t.end,
            });
        });

        if !(d > distance) {
            // Zero length, or NaN.
            self.edges.truncate(edge_count);
            return distance;
        }

        self.records.push(Record {
            point_index: point_index as u32,
            kind: kind as u8,
            length: d,
        });

        d
    }

    fn make_segment(&self, point_index: usize, kind: usize) -> AnySegment {
        let p = &self.points[point_index..];
        match kind {
            1 => AnySegment::Line(LineSegment { from: p[0], to: p[1] }),
            2 => AnySegment::Quadratic(QuadraticBezierSegment {
                from: p[0],
                ctrl: p[1],
                to: p[2],
            }),
            _ => AnySegment::Cubic(CubicBezierSegment {
                from: p[0],
                ctrl1: p[1],
                ctrl2: p[2],
                to: p[3],
            }),
        }
    }

    fn segment(&self, record: usize) -> AnySegment {
        let r = &self.records[record];
        self.make_segment(r.point_index as usize, r.kind as usize)
    }

    /// The length of the contour.
    #[inline]
    pub fn length(&self) -> f32 {
        self.records.last().map_or(0.0, |r| r.length)
    }

    /// Whether the contour ends with a close.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of measured segments, including the closing line if any.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.records.len()
    }

    fn pin_distance(&self, distance: f32) -> f32 {
        distance.max(0.0).min(self.length())
    }

    // The edge containing `distance`, and its parameter on that edge's segment.
    //
    // With `after_boundary`, a distance at the junction of two edges selects the
    // second one.
    fn locate(&self, distance: f32, after_boundary: bool) -> (usize, f32) {
        let i = if after_boundary {
            self.edges.partition_point(|e| e.distance <= distance)
        } else {
            self.edges.partition_point(|e| e.distance < distance)
        };
        let i = i.min(self.edges.len() - 1);

        let edge = &self.edges[i];
        let (d0, t0) = match i.checked_sub(1).map(|p| &self.edges[p]) {
            Some(prev) if prev.record == edge.record => (prev.distance, prev.t),
            Some(prev) => (prev.distance, 0.0),
            None => (0.0, 0.0),
        };

        let span = edge.distance - d0;
        let ratio = if span > 0.0 {
            ((distance - d0) / span).max(0.0).min(1.0)
        } else {
            0.0
        };

        (edge.record as usize, t0 + (edge.t - t0) * ratio)
    }

    /// Position and unit tangent at `distance` along the contour.
    ///
    /// The distance is clamped to `[0, length]`.
    pub fn get_pos_tan(&self, distance: f32) -> (Point, Vector) {
        let (record, t) = self.locate(self.pin_distance(distance), false);
        let segment = self.segment(record);

        let d = segment.derivative(t);
        let tangent = if d.square_length() > 0.0 {
            normalize(d)
        } else {
            // Control point on top of an end point.
            normalize(segment.chord())
        };

        (segment.sample(t), tangent)
    }

    /// Like [`get_pos_tan`](ContourMeasure::get_pos_tan), except that distances
    /// outside of `[0, length]` extrapolate along the first or last tangent.
    pub fn get_pos_tan_extend(&self, distance: f32) -> (Point, Vector) {
        let length = self.length();
        if distance < 0.0 {
            let (pos, tan) = self.get_pos_tan(0.0);
            return (pos + tan * distance, tan);
        }
        if distance > length {
            let (pos, tan) = self.get_pos_tan(length);
            return (pos + tan * (distance - length), tan);
        }

        self.get_pos_tan(distance)
    }

    /// A transform placing the origin at `distance` along the contour with the
    /// x axis following the tangent.
    pub fn get_matrix(&self, distance: f32) -> Matrix {
        let (pos, tan) = self.get_pos_tan(distance);
        Matrix::from_basis(tan, cw(tan), pos)
    }

    /// Writes the part of the contour between `start` and `end` into a sink.
    ///
    /// Both distances are clamped to `[0, length]`. If `do_move` is true the
    /// extracted piece starts with a move, otherwise it continues the sink's
    /// current contour. The extracted piece is never closed.
    ///
    /// Returns false and writes nothing when `start >= end` after clamping.
    pub fn get_segment(&self, start: f32, end: f32, do_move: bool, sink: &mut dyn PathSink) -> bool {
        let start = start.max(0.0);
        let end = end.min(self.length());
        if !(start < end) {
            return false;
        }

        let (record0, t0) = self.locate(start, true);
        let (record1, t1) = self.locate(end, false);

        if record0 == record1 {
            let s = self.segment(record0).split_range(t0..t1);
            if do_move {
                sink.move_to(s.from());
            }
            s.emit(sink);
            return true;
        }

        let first = self.segment(record0).split_range(t0..1.0);
        if do_move {
            sink.move_to(first.from());
        }
        first.emit(sink);
        for record in (record0 + 1)..record1 {
            self.segment(record).emit(sink);
        }
        self.segment(record1).split_range(0.0..t1).emit(sink);

        true
    }
}

/// Iterates over the measures of every contour of a path.
///
/// Contours without length are skipped.
pub struct ContourMeasureIter<'l> {
    points: &'l [Point],
    verbs: &'l [Verb],
    tolerance: f32,
}

impl<'l> ContourMeasureIter<'l> {
    pub fn new(path: &'l Path, tolerance: f32) -> Self {
        Self::from_slices(path.points(), path.verbs(), tolerance)
    }

    pub fn from_slices(points: &'l [Point], verbs: &'l [Verb], tolerance: f32) -> Self {
        ContourMeasureIter {
            points,
            verbs,
            tolerance,
        }
    }
}

impl<'l> Iterator for ContourMeasureIter<'l> {
    type Item = ContourMeasure;

    fn next(&mut self) -> Option<ContourMeasure> {
        while !self.verbs.is_empty() {
            let (num_points, num_verbs) = count_contour_points_verbs(self.points, self.verbs);
            if num_verbs == 0 {
                break;
            }

            let (points, rest_points) = self.points.split_at(num_points);
            let (verbs, rest_verbs) = self.verbs.split_at(num_verbs);
            self.points = rest_points;
            self.verbs = rest_verbs;

            if let Some(measure) = ContourMeasure::new(points, verbs, self.tolerance) {
                return Some(measure);
            }

            log::debug!("skipping contour without length ({} verbs)", num_verbs);
        }

        None
    }
}

#[cfg(test)]
use crate::path::{Direction, PathBuilder, PathEvent};

#[cfg(test)]
fn approx_eq(a: Point, b: Point) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn measure_line() {
    let mut builder = PathBuilder::new();
    builder.add_line(point(1.0, 1.0), point(0.0, 0.0));
    let path = builder.detach();

    let measure = ContourMeasure::from_path(&path, 0.01).unwrap();
    assert!((measure.length() - 2.0f32.sqrt()).abs() < 1e-6);
    assert!(!measure.is_closed());
    for t in [0.0, 0.2, 0.3, 0.5, 1.0] {
        let (position, tangent) = measure.get_pos_tan(t * measure.length());
        assert!(approx_eq(position, point(1.0 - t, 1.0 - t)));
        assert_eq!(tangent, vector(-1.0, -1.0).normalize());
    }
}

#[test]
fn measure_square() {
    let path = Path::rect(&Rect::wh(1.0, 1.0), Direction::Cw);
    let measure = ContourMeasure::from_path(&path, 0.01).unwrap();

    assert_eq!(measure.length(), 4.0);
    assert!(measure.is_closed());
    assert_eq!(measure.segment_count(), 4);

    for (d, position, tangent) in [
        (0.5, point(0.5, 0.0), vector(1.0, 0.0)),
        (1.5, point(1.0, 0.5), vector(0.0, 1.0)),
        (2.5, point(0.5, 1.0), vector(-1.0, 0.0)),
        (3.5, point(0.0, 0.5), vector(0.0, -1.0)),
    ] {
        let (pos, tan) = measure.get_pos_tan(d);
        assert!(approx_eq(pos, position));
        assert_eq!(tan, tangent);
    }

    // Clamped at both ends.
    assert_eq!(measure.get_pos_tan(-3.0).0, point(0.0, 0.0));
    assert!(approx_eq(measure.get_pos_tan(100.0).0, point(0.0, 0.0)));
}

#[test]
fn lengths_are_monotonic() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.quadratic_bezier_to(point(50.0, 100.0), point(100.0, 0.0));
    builder.cubic_bezier_to(point(150.0, -100.0), point(200.0, 100.0), point(250.0, 0.0));
    builder.line_to(point(300.0, 0.0));
    let path = builder.detach();

    let measure = ContourMeasure::from_path(&path, 0.1).unwrap();
    assert_eq!(measure.segment_count(), 3);
    for pair in measure.edges.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
    for pair in measure.records.windows(2) {
        assert!(pair[0].length <= pair[1].length);
    }
    assert_eq!(measure.length(), measure.edges.last().unwrap().distance);

    let (end, _) = measure.get_pos_tan(measure.length());
    assert!(approx_eq(end, point(300.0, 0.0)));
    let (start, tangent) = measure.get_pos_tan(0.0);
    assert_eq!(start, point(0.0, 0.0));
    assert!((tangent - vector(1.0, 2.0).normalize()).length() < 1e-5);
}

#[test]
fn tolerance_controls_accuracy() {
    let circle = Path::circle(point(0.0, 0.0), 100.0, Direction::Cw);
    let coarse = ContourMeasure::from_path(&circle, 10.0).unwrap();
    let fine = ContourMeasure::from_path(&circle, 0.01).unwrap();

    let expected = 2.0 * std::f32::consts::PI * 100.0;
    assert!(coarse.edges.len() < fine.edges.len());
    assert!((fine.length() - expected).abs() < 0.5);
    assert!(coarse.length() <= fine.length());
}

#[test]
fn zero_length_segments_are_skipped() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(0.0, 0.0));
    builder.line_to(point(3.0, 4.0));
    builder.line_to(point(3.0, 4.0));
    let path = builder.detach();

    let measure = ContourMeasure::from_path(&path, 1.0).unwrap();
    assert_eq!(measure.segment_count(), 1);
    assert_eq!(measure.length(), 5.0);

    let mut builder = PathBuilder::new();
    builder.move_to(point(1.0, 1.0));
    builder.line_to(point(1.0, 1.0));
    builder.close();
    let path = builder.detach();
    assert!(ContourMeasure::from_path(&path, 1.0).is_none());
}

#[test]
fn extend_past_the_ends() {
    let mut builder = PathBuilder::new();
    builder.add_line(point(0.0, 0.0), point(10.0, 0.0));
    let path = builder.detach();
    let measure = ContourMeasure::from_path(&path, 1.0).unwrap();

    let (pos, tan) = measure.get_pos_tan_extend(-5.0);
    assert_eq!(pos, point(-5.0, 0.0));
    assert_eq!(tan, vector(1.0, 0.0));

    let (pos, _) = measure.get_pos_tan_extend(12.0);
    assert!(approx_eq(pos, point(12.0, 0.0)));

    let (pos, _) = measure.get_pos_tan_extend(4.0);
    assert!(approx_eq(pos, point(4.0, 0.0)));
}

#[test]
fn matrix_follows_tangent() {
    let mut builder = PathBuilder::new();
    builder.add_line(point(5.0, 5.0), point(5.0, 15.0));
    let path = builder.detach();
    let measure = ContourMeasure::from_path(&path, 1.0).unwrap();

    let m = measure.get_matrix(2.0);
    assert!(approx_eq(m * point(0.0, 0.0), point(5.0, 7.0)));
    assert!(approx_eq(m * point(1.0, 0.0), point(5.0, 8.0)));
    assert!(approx_eq(m * point(0.0, 1.0), point(4.0, 7.0)));
}

#[test]
fn extract_segments() {
    let path = Path::rect(&Rect::wh(1.0, 1.0), Direction::Cw);
    let measure = ContourMeasure::from_path(&path, 0.01).unwrap();

    let mut builder = PathBuilder::new();
    assert!(measure.get_segment(0.5, 2.5, true, &mut builder));
    let extracted = builder.detach();
    assert_eq!(
        extracted.verbs(),
        &[Verb::Move, Verb::Line, Verb::Line, Verb::Line]
    );
    let expected = [point(0.5, 0.0), point(1.0, 0.0), point(1.0, 1.0), point(0.5, 1.0)];
    for (p, e) in extracted.points().iter().zip(expected.iter()) {
        assert!(approx_eq(*p, *e));
    }

    // Boundaries between segments do not produce empty pieces.
    let mut builder = PathBuilder::new();
    assert!(measure.get_segment(1.0, 2.0, true, &mut builder));
    let extracted = builder.detach();
    assert_eq!(extracted.verbs(), &[Verb::Move, Verb::Line]);
    assert!(approx_eq(extracted.points()[0], point(1.0, 0.0)));
    assert!(approx_eq(extracted.points()[1], point(1.0, 1.0)));

    // The closing line is part of the contour.
    let mut builder = PathBuilder::new();
    assert!(measure.get_segment(3.0, 10.0, true, &mut builder));
    let extracted = builder.detach();
    assert!(approx_eq(extracted.points()[1], point(0.0, 0.0)));
}

#[test]
fn extract_empty_or_reversed_range() {
    let path = Path::rect(&Rect::wh(1.0, 1.0), Direction::Cw);
    let measure = ContourMeasure::from_path(&path, 0.01).unwrap();

    let mut builder = PathBuilder::new();
    assert!(!measure.get_segment(2.0, 1.0, true, &mut builder));
    assert!(!measure.get_segment(1.0, 1.0, true, &mut builder));
    assert!(!measure.get_segment(5.0, 7.0, true, &mut builder));
    assert!(!measure.get_segment(-2.0, -1.0, true, &mut builder));
    assert!(builder.is_empty());
}

#[test]
fn extract_continues_contour() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.quadratic_bezier_to(point(10.0, 10.0), point(20.0, 0.0));
    let path = builder.detach();
    let measure = ContourMeasure::from_path(&path, 0.01).unwrap();
    let half = measure.length() * 0.5;

    let mut builder = PathBuilder::new();
    assert!(measure.get_segment(0.0, half, true, &mut builder));
    assert!(measure.get_segment(half, measure.length(), false, &mut builder));
    let joined = builder.detach();

    assert_eq!(joined.verbs(), &[Verb::Move, Verb::Quad, Verb::Quad]);
    assert!(approx_eq(joined.points()[2], point(10.0, 5.0)));
    assert!(approx_eq(joined.points()[4], point(20.0, 0.0)));
}

#[test]
fn iterate_contours() {
    let mut builder = PathBuilder::new();
    builder.add_line(point(0.0, 0.0), point(1.0, 0.0));
    // A contour made of a single move.
    builder.move_to(point(5.0, 5.0));
    builder.add_rect(&Rect::wh(2.0, 2.0), Direction::Ccw);
    builder.move_to(point(3.0, 3.0));
    builder.line_to(point(3.0, 3.0));
    let path = builder.detach();

    let lengths: Vec<f32> = ContourMeasureIter::new(&path, DEFAULT_TOLERANCE)
        .map(|m| m.length())
        .collect();
    assert_eq!(lengths, vec![1.0, 8.0]);

    let empty = Path::empty();
    assert!(ContourMeasureIter::new(&empty, DEFAULT_TOLERANCE).next().is_none());
}

#[test]
fn extracted_events_match_contour() {
    let path = Path::circle(point(0.0, 0.0), 10.0, Direction::Cw);
    let measure = ContourMeasure::from_path(&path, 0.01).unwrap();

    let mut builder = PathBuilder::new();
    assert!(measure.get_segment(0.0, measure.length(), true, &mut builder));
    let full = builder.detach();

    let events: Vec<PathEvent> = full.iter().collect();
    assert_eq!(events.len(), 5);
    for (a, b) in full.points().iter().zip(path.points().iter()) {
        assert!(approx_eq(*a, *b));
    }
}
