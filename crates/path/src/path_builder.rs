//! A mutable accumulator of path data.

use crate::builder::PathSink;
use crate::geom::BEZIER_CIRCLE_COEFF;
use crate::math::*;
use crate::private::{count_points, ready_for_segment, valid_verbs};
use crate::{Direction, FillRule, Path, Verb};

use std::sync::Arc;

/// Builds paths.
///
/// The builder uses the same verb and point storage as `Path` but can grow.
/// The content is turned into an immutable path either with
/// [`snapshot`](PathBuilder::snapshot), which copies and leaves the builder
/// untouched (useful to repeatedly peek at a shape being edited), or with
/// [`detach`](PathBuilder::detach), which moves the content out and leaves the
/// builder empty.
///
/// Segments and closes require an open contour (a move that has not been closed
/// yet). Breaking this rule is a bug in the caller: it panics in debug builds.
/// Release builds log a warning and keep the verb sequence well formed: a
/// segment implicitly starts a new contour at the current position and a close is
/// dropped.
///
/// # Example
///
/// ```
/// use vellum_path::{Direction, PathBuilder, Verb};
/// use vellum_path::math::{point, Rect};
///
/// let mut builder = PathBuilder::new();
/// builder.add_rect(&Rect::wh(10.0, 5.0), Direction::Cw);
/// builder.add_circle(point(5.0, 2.5), 2.0, Direction::Ccw);
///
/// let path = builder.detach();
/// assert_eq!(path.contour_count(), 2);
/// assert_eq!(path.verbs()[0], Verb::Move);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathBuilder {
    points: Vec<Point>,
    verbs: Vec<Verb>,
    fill_rule: FillRule,
}

// Clockwise unit circle (in a y-down coordinate system), starting and ending at (1, 0).
const C: f32 = BEZIER_CIRCLE_COEFF;
const UNIT_CIRCLE: [Point; 13] = [
    Point::new(1.0, 0.0),
    Point::new(1.0, C),
    Point::new(C, 1.0),
    Point::new(0.0, 1.0),
    Point::new(-C, 1.0),
    Point::new(-1.0, C),
    Point::new(-1.0, 0.0),
    Point::new(-1.0, -C),
    Point::new(-C, -1.0),
    Point::new(0.0, -1.0),
    Point::new(C, -1.0),
    Point::new(1.0, -C),
    Point::new(1.0, 0.0),
];

impl PathBuilder {
    pub fn new() -> Self {
        PathBuilder::default()
    }

    pub fn with_fill_rule(fill_rule: FillRule) -> Self {
        PathBuilder {
            fill_rule,
            ..PathBuilder::default()
        }
    }

    pub fn with_capacity(points: usize, verbs: usize) -> Self {
        PathBuilder {
            points: Vec::with_capacity(points),
            verbs: Vec::with_capacity(verbs),
            fill_rule: FillRule::Winding,
        }
    }

    /// A builder initialized with a transformed copy of `path`.
    pub fn from_path(path: &Path, transform: &Matrix) -> Self {
        let mut builder = PathBuilder::with_fill_rule(path.fill_rule());
        builder.add_path(path, transform);
        builder
    }

    #[inline]
    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    #[inline]
    pub fn set_fill_rule(&mut self, fill_rule: FillRule) {
        self.fill_rule = fill_rule;
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The bounding rectangle of the points added so far.
    pub fn bounds(&self) -> Rect {
        Rect::bounds(&self.points)
    }

    /// Returns a path with a copy of the current content. The builder is not modified.
    pub fn snapshot(&self) -> Arc<Path> {
        Arc::new(Path::from_slices(&self.points, &self.verbs, self.fill_rule))
    }

    /// Moves the current content into a path, leaving the builder empty.
    ///
    /// The fill rule is kept.
    pub fn detach(&mut self) -> Arc<Path> {
        let points = std::mem::take(&mut self.points);
        let verbs = std::mem::take(&mut self.verbs);
        Arc::new(Path::from_vecs(points, verbs, self.fill_rule))
    }

    /// Removes all points and verbs.
    pub fn clear(&mut self) {
        self.points.clear();
        self.verbs.clear();
    }

    /// Adds a contour made of a single line.
    pub fn add_line(&mut self, from: Point, to: Point) {
        self.move_to(from);
        self.line_to(to);
    }

    /// Adds a closed rectangle starting at its top-left corner.
    pub fn add_rect(&mut self, rect: &Rect, direction: Direction) {
        self.reserve(4, 5);

        self.move_to(rect.top_left());
        match direction {
            Direction::Cw => {
                self.line_to(rect.top_right());
                self.line_to(rect.bottom_right());
                self.line_to(rect.bottom_left());
            }
            Direction::Ccw => {
                self.line_to(rect.bottom_left());
                self.line_to(rect.bottom_right());
                self.line_to(rect.top_right());
            }
        }
        self.close();
    }

    /// Adds a closed ellipse inscribed in `rect`, made of four cubic bézier curves.
    ///
    /// The contour starts at the middle of the right edge.
    pub fn add_oval(&mut self, rect: &Rect, direction: Direction) {
        let mx = Matrix::translation(rect.center().x, rect.center().y)
            * Matrix::scale(rect.width() * 0.5, rect.height() * 0.5);

        self.reserve(1 + 4 * 3, 1 + 4 + 1);

        self.move_to(mx * UNIT_CIRCLE[0]);
        match direction {
            Direction::Cw => {
                for i in (1..=12).step_by(3) {
                    self.cubic_bezier_to(
                        mx * UNIT_CIRCLE[i],
                        mx * UNIT_CIRCLE[i + 1],
                        mx * UNIT_CIRCLE[i + 2],
                    );
                }
            }
            Direction::Ccw => {
                for i in (2..=11).rev().step_by(3) {
                    self.cubic_bezier_to(
                        mx * UNIT_CIRCLE[i],
                        mx * UNIT_CIRCLE[i - 1],
                        mx * UNIT_CIRCLE[i - 2],
                    );
                }
            }
        }
        self.close();
    }

    /// Adds a closed circle made of four cubic bézier curves.
    pub fn add_circle(&mut self, center: Point, radius: f32, direction: Direction) {
        debug_assert!(radius >= 0.0);
        let rect = Rect::ltrb(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        );
        self.add_oval(&rect, direction);
    }

    /// Adds a polyline through `points`, closed if `close` is true.
    ///
    /// Does nothing if `points` is empty.
    pub fn add_polygon(&mut self, points: &[Point], close: bool) {
        let (first, rest) = match points.split_first() {
            Some(split) => split,
            None => return,
        };

        self.reserve(points.len(), points.len() + close as usize);
        self.move_to(*first);
        for p in rest {
            self.line_to(*p);
        }
        if close {
            self.close();
        }
    }

    /// Appends raw point and verb slices, transformed by `transform`.
    ///
    /// The slices must describe a well formed sequence (each contour starts with a
    /// move, no drawing command directly follows a close) and the verbs must consume
    /// exactly all of the points. The slices may start with a segment only if the
    /// builder has an open contour; otherwise a contour is started at the current
    /// position in release builds. The rest is checked by debug assertions only.
    pub fn add_path_slices(&mut self, points: &[Point], verbs: &[Verb], transform: &Matrix) {
        let starts_contour = !ready_for_segment(&self.verbs);
        debug_assert!(valid_verbs(verbs, starts_contour), "malformed verb sequence");
        debug_assert_eq!(count_points(verbs), points.len(), "verbs and points mismatch");

        if starts_contour && verbs.first().map_or(false, |verb| *verb != Verb::Move) {
            self.ensure_contour();
        }

        let offset = self.points.len();
        self.verbs.extend_from_slice(verbs);
        self.points.extend_from_slice(points);

        if !transform.is_identity() {
            transform.map_points(&mut self.points[offset..]);
        }
    }

    /// Appends a transformed copy of `path`.
    pub fn add_path(&mut self, path: &Path, transform: &Matrix) {
        self.add_path_slices(path.points(), path.verbs(), transform);
    }

    /// Transforms every point added so far.
    pub fn transform_in_place(&mut self, transform: &Matrix) {
        transform.map_points(&mut self.points);
    }

    /// The position the next segment starts from.
    ///
    /// After a close this is the first point of the closed contour.
    pub fn current_position(&self) -> Option<Point> {
        if self.verbs.last() != Some(&Verb::Close) {
            return self.points.last().copied();
        }

        // Walk back to the move of the closed contour.
        let mut index = self.points.len();
        for verb in self.verbs.iter().rev() {
            index -= verb.num_points();
            if *verb == Verb::Move {
                return self.points.get(index).copied();
            }
        }

        None
    }

    fn ensure_contour(&mut self) {
        if ready_for_segment(&self.verbs) {
            return;
        }

        debug_assert!(false, "segment added without an open contour");
        let at = self.current_position().unwrap_or_else(|| point(0.0, 0.0));
        log::warn!("segment added without an open contour, starting one at {:?}", at);
        self.verbs.push(Verb::Move);
        self.points.push(at);
    }
}

impl PathSink for PathBuilder {
    fn move_to(&mut self, to: Point) {
        self.verbs.push(Verb::Move);
        self.points.push(to);
    }

    fn line_to(&mut self, to: Point) {
        self.ensure_contour();
        self.verbs.push(Verb::Line);
        self.points.push(to);
    }

    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.ensure_contour();
        self.verbs.push(Verb::Quad);
        self.points.push(ctrl);
        self.points.push(to);
    }

    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.ensure_contour();
        self.verbs.push(Verb::Cubic);
        self.points.push(ctrl1);
        self.points.push(ctrl2);
        self.points.push(to);
    }

    fn close(&mut self) {
        if !ready_for_segment(&self.verbs) {
            debug_assert!(false, "close() called without an open contour");
            log::warn!("close() called without an open contour, ignored");
            return;
        }
        self.verbs.push(Verb::Close);
    }

    fn reserve(&mut self, points: usize, verbs: usize) {
        self.points.reserve(points);
        self.verbs.reserve(verbs);
    }
}

impl<'l> From<&'l Path> for PathBuilder {
    fn from(path: &'l Path) -> Self {
        PathBuilder::from_path(path, &Matrix::IDENTITY)
    }
}

#[test]
fn add_path_with_transform() {
    let square = Path::rect(&Rect::wh(1.0, 1.0), Direction::Cw);
    let mut builder = PathBuilder::new();
    builder.add_path(&square, &Matrix::IDENTITY);
    builder.add_path(&square, &Matrix::translation(5.0, 0.0));

    assert_eq!(builder.verbs().len(), 10);
    assert_eq!(builder.points()[4], point(5.0, 0.0));
    assert_eq!(builder.bounds(), Rect::ltrb(0.0, 0.0, 6.0, 1.0));

    builder.transform_in_place(&Matrix::scale(2.0, 2.0));
    assert_eq!(builder.bounds(), Rect::ltrb(0.0, 0.0, 12.0, 2.0));
}

#[test]
fn from_path_keeps_fill_rule() {
    let mut builder = PathBuilder::with_fill_rule(FillRule::EvenOdd);
    builder.add_line(point(0.0, 0.0), point(1.0, 1.0));
    let path = builder.snapshot();
    assert_eq!(path.fill_rule(), FillRule::EvenOdd);

    let copy = PathBuilder::from_path(&path, &Matrix::scale(2.0, 2.0));
    assert_eq!(copy.fill_rule(), FillRule::EvenOdd);
    assert_eq!(copy.points(), &[point(0.0, 0.0), point(2.0, 2.0)]);
}

#[test]
fn current_position_after_close() {
    let mut builder = PathBuilder::new();
    assert_eq!(builder.current_position(), None);
    builder.add_polygon(&[point(1.0, 1.0), point(4.0, 1.0), point(4.0, 3.0)], true);
    assert_eq!(builder.current_position(), Some(point(1.0, 1.0)));
    builder.move_to(point(7.0, 7.0));
    builder.quadratic_bezier_to(point(8.0, 8.0), point(9.0, 7.0));
    assert_eq!(builder.current_position(), Some(point(9.0, 7.0)));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
fn line_without_move_panics_in_debug() {
    let mut builder = PathBuilder::new();
    builder.line_to(point(1.0, 1.0));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
fn segment_after_close_panics_in_debug() {
    let mut builder = PathBuilder::new();
    builder.add_rect(&Rect::wh(1.0, 1.0), Direction::Ccw);
    builder.line_to(point(3.0, 3.0));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
fn slices_continuing_a_closed_contour_panic_in_debug() {
    let mut builder = PathBuilder::new();
    builder.add_rect(&Rect::wh(1.0, 1.0), Direction::Cw);
    builder.add_path_slices(&[point(3.0, 3.0)], &[Verb::Line], &Matrix::IDENTITY);
}

#[test]
fn slices_continue_an_open_contour() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.add_path_slices(
        &[point(1.0, 0.0), point(1.0, 1.0)],
        &[Verb::Line, Verb::Line],
        &Matrix::translation(1.0, 0.0),
    );
    builder.close();

    assert_eq!(builder.verbs(), &[Verb::Move, Verb::Line, Verb::Line, Verb::Close]);
    assert_eq!(builder.points(), &[point(0.0, 0.0), point(2.0, 0.0), point(2.0, 1.0)]);
}

#[test]
#[cfg(not(debug_assertions))]
fn slices_after_close_are_recovered_in_release() {
    let mut builder = PathBuilder::new();
    builder.add_rect(&Rect::wh(1.0, 1.0), Direction::Cw);
    builder.add_path_slices(&[point(3.0, 3.0)], &[Verb::Line], &Matrix::IDENTITY);

    assert_eq!(&builder.verbs()[4..], &[Verb::Close, Verb::Move, Verb::Line]);
    assert_eq!(&builder.points()[4..], &[point(0.0, 0.0), point(3.0, 3.0)]);
    assert!(valid_verbs(builder.verbs(), true));
}

#[test]
#[cfg(not(debug_assertions))]
fn misuse_is_recovered_in_release() {
    let mut builder = PathBuilder::new();
    builder.close();
    builder.line_to(point(1.0, 1.0));
    builder.close();
    builder.cubic_bezier_to(point(2.0, 2.0), point(3.0, 3.0), point(4.0, 4.0));

    assert_eq!(
        builder.verbs(),
        &[Verb::Move, Verb::Line, Verb::Close, Verb::Move, Verb::Cubic]
    );
    assert_eq!(builder.points()[0], point(0.0, 0.0));
    assert_eq!(builder.points()[2], point(0.0, 0.0));
    assert!(valid_verbs(builder.verbs(), true));
}
