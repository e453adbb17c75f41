//! The default path data structure.

use crate::builder::PathSink;
use crate::math::*;
use crate::private::{count_points, valid_verbs};
use crate::{Direction, FillRule, PathBuilder, PathEvent, Verb};

use std::fmt;
use std::sync::{Arc, OnceLock};

/// An immutable sequence of verbs and points with a fill rule and cached bounds.
///
/// Paths are never modified after construction; every operation producing a
/// different shape returns a new path. The shape factories and most operations
/// return an `Arc<Path>` so that a path can be shared by several owners (and
/// across threads) without copying.
///
/// Two paths are equal when their fill rules, bounds, points and verbs are equal.
///
/// # Invariants
///
/// - The verbs consume exactly all of the points (see `Verb::num_points`).
/// - Each contour starts with `Verb::Move`.
/// - No drawing command directly follows a `Verb::Close`.
///
/// These are checked by debug assertions only.
#[derive(Clone, PartialEq)]
pub struct Path {
    points: Box<[Point]>,
    verbs: Box<[Verb]>,
    fill_rule: FillRule,
    bounds: Rect,
}

impl Path {
    /// Creates a path by copying point and verb slices.
    pub fn from_slices(points: &[Point], verbs: &[Verb], fill_rule: FillRule) -> Self {
        Path::from_vecs(points.to_vec(), verbs.to_vec(), fill_rule)
    }

    /// Creates a path taking ownership of point and verb vectors.
    pub fn from_vecs(points: Vec<Point>, verbs: Vec<Verb>, fill_rule: FillRule) -> Self {
        debug_assert_eq!(count_points(&verbs), points.len(), "verbs and points mismatch");
        debug_assert!(valid_verbs(&verbs, true), "malformed verb sequence");

        let bounds = Rect::bounds(&points);

        Path {
            points: points.into_boxed_slice(),
            verbs: verbs.into_boxed_slice(),
            fill_rule,
            bounds,
        }
    }

    /// The shared empty path.
    pub fn empty() -> Arc<Path> {
        static EMPTY: OnceLock<Arc<Path>> = OnceLock::new();
        EMPTY
            .get_or_init(|| Arc::new(Path::from_vecs(Vec::new(), Vec::new(), FillRule::Winding)))
            .clone()
    }

    /// A closed rectangle starting at its top-left corner.
    pub fn rect(rect: &Rect, direction: Direction) -> Arc<Path> {
        let mut builder = PathBuilder::new();
        builder.add_rect(rect, direction);
        builder.detach()
    }

    /// An ellipse inscribed in `rect`, made of four cubic bézier curves.
    pub fn oval(rect: &Rect, direction: Direction) -> Arc<Path> {
        let mut builder = PathBuilder::new();
        builder.add_oval(rect, direction);
        builder.detach()
    }

    /// A circle made of four cubic bézier curves. Negative radii are treated as zero.
    pub fn circle(center: Point, radius: f32, direction: Direction) -> Arc<Path> {
        let mut builder = PathBuilder::new();
        builder.add_circle(center, radius.max(0.0), direction);
        builder.detach()
    }

    /// A polyline through `points`, closed if `close` is true.
    pub fn polygon(points: &[Point], close: bool) -> Arc<Path> {
        let mut builder = PathBuilder::new();
        builder.add_polygon(points, close);
        builder.detach()
    }

    /// Interpolates each point of `a` towards the matching point of `b`.
    ///
    /// `t` is not clamped: values outside of `[0, 1]` extrapolate. The result has
    /// the verbs and the fill rule of `a`.
    ///
    /// `a` and `b` must have the same number of points and verbs (typically two
    /// key frames of the same shape). This is checked by debug assertions only.
    pub fn lerp(a: &Path, b: &Path, t: f32) -> Arc<Path> {
        debug_assert_eq!(a.points.len(), b.points.len(), "lerp between paths of different sizes");
        debug_assert_eq!(a.verbs.len(), b.verbs.len(), "lerp between paths of different sizes");

        let points = a
            .points
            .iter()
            .zip(b.points.iter())
            .map(|(pa, pb)| *pa + (*pb - *pa) * t)
            .collect();

        Arc::new(Path::from_vecs(points, a.verbs.to_vec(), a.fill_rule))
    }

    /// Returns a transformed copy of this path.
    pub fn transform(&self, transform: &Matrix) -> Arc<Path> {
        let mut points = self.points.to_vec();
        if !transform.is_identity() {
            transform.map_points(&mut points);
        }

        Arc::new(Path::from_vecs(points, self.verbs.to_vec(), self.fill_rule))
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    pub fn copy_points(&self) -> Vec<Point> {
        self.points.to_vec()
    }

    pub fn copy_verbs(&self) -> Vec<Verb> {
        self.verbs.to_vec()
    }

    #[inline]
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    /// The bounding rectangle of all points, control points included.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of contours (moves) in the path.
    pub fn contour_count(&self) -> usize {
        self.verbs.iter().filter(|v| **v == Verb::Move).count()
    }

    /// Iterates over the segments of the path.
    pub fn iter(&self) -> Iter {
        Iter::new(&self.points, &self.verbs)
    }

    /// Writes the path into a sink.
    pub fn visit(&self, sink: &mut dyn PathSink) {
        sink.reserve(self.points.len(), self.verbs.len());
        for event in self.iter() {
            sink.path_event(&event);
        }
    }

    /// A builder initialized with a copy of this path.
    pub fn to_builder(&self) -> PathBuilder {
        PathBuilder::from(self)
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "Path(\"{}\")", self.to_svg_string())
    }
}

impl<'l> IntoIterator for &'l Path {
    type Item = PathEvent;
    type IntoIter = Iter<'l>;

    fn into_iter(self) -> Iter<'l> {
        self.iter()
    }
}

/// Returns the number of points and verbs of the first contour.
///
/// Stops at the second move, or at the end of the verbs. Returns `(0, 0)` if there
/// are no verbs. The verbs must start with a move.
pub fn count_contour_points_verbs(points: &[Point], verbs: &[Verb]) -> (usize, usize) {
    if verbs.is_empty() {
        return (0, 0);
    }
    debug_assert_eq!(verbs[0], Verb::Move);

    let mut n_points = 1;
    let mut n_verbs = 1;
    for verb in &verbs[1..] {
        if *verb == Verb::Move {
            break;
        }
        n_points += verb.num_points();
        n_verbs += 1;
    }
    debug_assert!(n_points <= points.len());

    (n_points, n_verbs)
}

/// An iterator over the segments of a path, see `PathEvent`.
#[derive(Clone)]
pub struct Iter<'l> {
    points: std::slice::Iter<'l, Point>,
    verbs: std::slice::Iter<'l, Verb>,
    current: Point,
    first: Point,
}

impl<'l> Iter<'l> {
    pub fn new(points: &'l [Point], verbs: &'l [Verb]) -> Self {
        Iter {
            points: points.iter(),
            verbs: verbs.iter(),
            current: point(0.0, 0.0),
            first: point(0.0, 0.0),
        }
    }
}

impl<'l> Iterator for Iter<'l> {
    type Item = PathEvent;

    #[inline]
    fn next(&mut self) -> Option<PathEvent> {
        let from = self.current;
        match *self.verbs.next()? {
            Verb::Move => {
                self.current = *self.points.next()?;
                self.first = self.current;
                Some(PathEvent::Move(self.current))
            }
            Verb::Line => {
                self.current = *self.points.next()?;
                Some(PathEvent::Line([from, self.current]))
            }
            Verb::Quad => {
                let ctrl = *self.points.next()?;
                self.current = *self.points.next()?;
                Some(PathEvent::Quad([from, ctrl, self.current]))
            }
            Verb::Cubic => {
                let ctrl1 = *self.points.next()?;
                let ctrl2 = *self.points.next()?;
                self.current = *self.points.next()?;
                Some(PathEvent::Cubic([from, ctrl1, ctrl2, self.current]))
            }
            Verb::Close => {
                self.current = self.first;
                Some(PathEvent::Close([from, self.first]))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.verbs.size_hint()
    }
}

#[cfg(test)]
fn nine_point_path() -> (Arc<Path>, Vec<Point>) {
    let p: Vec<Point> = (0..9).map(|i| point(i as f32, i as f32)).collect();

    let mut pb = PathBuilder::new();
    pb.move_to(p[0]);
    pb.line_to(p[1]);
    pb.quadratic_bezier_to(p[2], p[3]);
    pb.cubic_bezier_to(p[4], p[5], p[6]);
    pb.close();
    pb.move_to(p[7]);
    pb.line_to(p[8]);

    (pb.detach(), p)
}

#[test]
fn iterate_events() {
    let (path, p) = nine_point_path();
    let mut iter = path.iter();

    assert_eq!(iter.next(), Some(PathEvent::Move(p[0])));
    assert_eq!(iter.next(), Some(PathEvent::Line([p[0], p[1]])));
    assert_eq!(iter.next(), Some(PathEvent::Quad([p[1], p[2], p[3]])));
    assert_eq!(iter.next(), Some(PathEvent::Cubic([p[3], p[4], p[5], p[6]])));
    assert_eq!(iter.next(), Some(PathEvent::Close([p[6], p[0]])));
    assert_eq!(iter.next(), Some(PathEvent::Move(p[7])));
    assert_eq!(iter.next(), Some(PathEvent::Line([p[7], p[8]])));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn builder_bounds_and_snapshot() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(1.0, 2.0));
    builder.line_to(point(5.0, 6.0));
    builder.line_to(point(3.0, 4.0));

    let r = Rect::ltrb(1.0, 2.0, 5.0, 6.0);
    assert_eq!(builder.bounds(), r);

    let p0 = builder.snapshot();
    assert!(!builder.is_empty());
    let p1 = builder.detach();
    assert!(builder.is_empty());

    assert_eq!(*p0, *p1);
    assert_eq!(p0.bounds(), r);
}

#[test]
fn detach_round_trip() {
    let (path1, _) = nine_point_path();
    let mut builder = PathBuilder::from(&*path1);
    let path2 = builder.detach();

    assert_eq!(path2, path1);
    assert_eq!(path2.points(), path1.points());
    assert_eq!(path2.verbs(), path1.verbs());
    assert_eq!(path2.fill_rule(), path1.fill_rule());
}

#[test]
fn contour_counting() {
    let (path, _) = nine_point_path();
    assert_eq!(path.contour_count(), 2);

    let (n_points, n_verbs) = count_contour_points_verbs(path.points(), path.verbs());
    assert_eq!((n_points, n_verbs), (7, 5));

    let rest_points = &path.points()[n_points..];
    let rest_verbs = &path.verbs()[n_verbs..];
    assert_eq!(count_contour_points_verbs(rest_points, rest_verbs), (2, 2));
    assert_eq!(count_contour_points_verbs(&[], &[]), (0, 0));
}

#[test]
fn transform_and_lerp() {
    let a = Path::polygon(&[point(0.0, 0.0), point(2.0, 0.0), point(2.0, 2.0)], true);
    let moved = a.transform(&Matrix::translation(1.0, 1.0));
    assert_eq!(moved.bounds(), Rect::ltrb(1.0, 1.0, 3.0, 3.0));
    assert_eq!(moved.verbs(), a.verbs());

    let same = a.transform(&Matrix::IDENTITY);
    assert_eq!(*same, *a);

    let mid = Path::lerp(&a, &moved, 0.5);
    assert_eq!(mid.points()[0], point(0.5, 0.5));
    let beyond = Path::lerp(&a, &moved, 2.0);
    assert_eq!(beyond.points()[0], point(2.0, 2.0));
    assert_eq!(beyond.verbs(), a.verbs());
}

#[test]
fn empty_is_shared() {
    let a = Path::empty();
    let b = Path::empty();
    assert!(Arc::ptr_eq(&a, &b));
    assert!(a.is_empty());
    assert_eq!(a.bounds(), Rect::empty());
    assert_eq!(a.iter().next(), None);
}

#[test]
fn shapes() {
    let r = Rect::ltrb(1.0, 2.0, 3.0, 6.0);
    let rect = Path::rect(&r, Direction::Cw);
    assert_eq!(rect.verbs(), &[Verb::Move, Verb::Line, Verb::Line, Verb::Line, Verb::Close]);
    assert_eq!(rect.points(), &r.to_quad());

    let ccw = Path::rect(&r, Direction::Ccw);
    assert_eq!(
        ccw.points(),
        &[r.top_left(), r.bottom_left(), r.bottom_right(), r.top_right()]
    );

    let oval = Path::oval(&r, Direction::Cw);
    assert_eq!(
        oval.verbs(),
        &[Verb::Move, Verb::Cubic, Verb::Cubic, Verb::Cubic, Verb::Cubic, Verb::Close]
    );
    assert_eq!(oval.points().len(), 13);
    assert_eq!(oval.bounds(), r);
    assert_eq!(oval.points()[0], point(3.0, 4.0));
    // Clockwise in y-down: the first quadrant ends at the bottom.
    assert_eq!(oval.points()[3], point(2.0, 6.0));

    let ccw_oval = Path::oval(&r, Direction::Ccw);
    assert_eq!(ccw_oval.points()[0], point(3.0, 4.0));
    assert_eq!(ccw_oval.points()[3], point(2.0, 2.0));
    assert_eq!(ccw_oval.bounds(), r);

    let circle = Path::circle(point(0.0, 0.0), 2.0, Direction::Ccw);
    assert_eq!(circle.bounds(), Rect::ltrb(-2.0, -2.0, 2.0, 2.0));

    let open = Path::polygon(&[point(0.0, 0.0), point(1.0, 0.0)], false);
    assert_eq!(open.verbs(), &[Verb::Move, Verb::Line]);
    assert!(Path::polygon(&[], true).is_empty());
}

#[test]
fn visit_replays_into_sink() {
    let (path, _) = nine_point_path();
    let mut builder = PathBuilder::new();
    path.visit(&mut builder);
    assert_eq!(*builder.detach(), *path);
}

/// `matrix * &path` is `path.transform(&matrix)`.
impl<'l> std::ops::Mul<&'l Path> for Matrix {
    type Output = Arc<Path>;

    fn mul(self, path: &'l Path) -> Arc<Path> {
        path.transform(&self)
    }
}
