//! Axis-aligned rectangles.

use crate::utils::round_to_int;
use crate::{point, size, vector, Box2D, Point, Size};
#[cfg(not(feature = "std"))]
use num_traits::Float;

/// An axis-aligned rectangle stored as left, top, right and bottom edges.
///
/// A rectangle is empty when `left >= right` or `top >= bottom`. Empty rectangles
/// are valid values, not errors.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

/// An axis-aligned rectangle with integer coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct IRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    #[inline]
    pub const fn ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect::ltrb(x, y, x + w, y + h)
    }

    #[inline]
    pub fn wh(w: f32, h: f32) -> Self {
        Rect::ltrb(0.0, 0.0, w, h)
    }

    #[inline]
    pub fn from_size(s: Size) -> Self {
        Rect::wh(s.width, s.height)
    }

    #[inline]
    pub const fn empty() -> Self {
        Rect::ltrb(0.0, 0.0, 0.0, 0.0)
    }

    /// The smallest rectangle containing all of the points.
    ///
    /// Returns `Rect::empty()` if there are no points.
    pub fn bounds(points: &[Point]) -> Self {
        Box2D::from_points(points).into()
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.left
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.top
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn size(&self) -> Size {
        size(self.width(), self.height())
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.to_box2d().center()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        // Written so that NaN edges count as empty.
        !(self.left < self.right && self.top < self.bottom)
    }

    #[inline]
    pub fn top_left(&self) -> Point {
        point(self.left, self.top)
    }

    #[inline]
    pub fn top_right(&self) -> Point {
        point(self.right, self.top)
    }

    #[inline]
    pub fn bottom_right(&self) -> Point {
        point(self.right, self.bottom)
    }

    #[inline]
    pub fn bottom_left(&self) -> Point {
        point(self.left, self.bottom)
    }

    #[inline]
    #[must_use]
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        self.to_box2d().translate(vector(dx, dy)).into()
    }

    /// Move the edges inwards (outwards with negative values).
    #[inline]
    #[must_use]
    pub fn inset(&self, dx: f32, dy: f32) -> Self {
        self.to_box2d().inflate(-dx, -dy).into()
    }

    /// Half-open containment: `left <= x < right` and `top <= y < bottom`.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.to_box2d().contains(p)
    }

    /// The smallest rectangle containing both rectangles' edges.
    ///
    /// Empty rectangles are not skipped, unlike `Box2D::union`.
    #[inline]
    #[must_use]
    pub fn join(&self, other: &Rect) -> Self {
        Box2D {
            min: self.top_left().min(other.top_left()),
            max: self.bottom_right().max(other.bottom_right()),
        }
        .into()
    }

    /// The four corners, clockwise from the top-left one (in a y-down coordinate system).
    #[inline]
    pub fn to_quad(&self) -> [Point; 4] {
        [
            self.top_left(),
            self.top_right(),
            self.bottom_right(),
            self.bottom_left(),
        ]
    }

    pub fn round(&self) -> IRect {
        IRect::ltrb(
            round_to_int(self.left),
            round_to_int(self.top),
            round_to_int(self.right),
            round_to_int(self.bottom),
        )
    }

    pub fn round_out(&self) -> IRect {
        IRect::ltrb(
            self.left.floor() as i32,
            self.top.floor() as i32,
            self.right.ceil() as i32,
            self.bottom.ceil() as i32,
        )
    }

    #[inline]
    pub fn to_box2d(&self) -> Box2D {
        Box2D {
            min: self.top_left(),
            max: self.bottom_right(),
        }
    }
}

impl From<Box2D> for Rect {
    fn from(b: Box2D) -> Self {
        Rect::ltrb(b.min.x, b.min.y, b.max.x, b.max.y)
    }
}

impl From<Rect> for Box2D {
    fn from(r: Rect) -> Self {
        r.to_box2d()
    }
}

impl From<IRect> for Rect {
    fn from(r: IRect) -> Self {
        Rect::ltrb(r.left as f32, r.top as f32, r.right as f32, r.bottom as f32)
    }
}

impl IRect {
    #[inline]
    pub const fn ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        IRect {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn xywh(x: i32, y: i32, w: i32, h: i32) -> Self {
        IRect::ltrb(x, y, x + w, y + h)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    #[inline]
    #[must_use]
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        IRect::ltrb(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    #[inline]
    #[must_use]
    pub fn join(&self, other: &IRect) -> Self {
        IRect::ltrb(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }
}

#[test]
fn emptiness() {
    assert!(Rect::empty().is_empty());
    assert!(Rect::ltrb(1.0, 0.0, 1.0, 5.0).is_empty());
    assert!(Rect::ltrb(0.0, 3.0, 1.0, 2.0).is_empty());
    assert!(!Rect::wh(1.0, 1.0).is_empty());
    assert!(Rect::ltrb(0.0, 0.0, f32::NAN, 1.0).is_empty());
}

#[test]
fn half_open_contains() {
    let r = Rect::xywh(1.0, 2.0, 3.0, 4.0);
    assert!(r.contains(point(1.0, 2.0)));
    assert!(r.contains(point(3.9, 5.9)));
    assert!(!r.contains(point(4.0, 3.0)));
    assert!(!r.contains(point(2.0, 6.0)));
    assert!(!r.contains(point(0.9, 3.0)));
}

#[test]
fn bounds_of_points() {
    assert_eq!(Rect::bounds(&[]), Rect::empty());
    assert_eq!(
        Rect::bounds(&[point(1.0, 2.0), point(5.0, 6.0), point(3.0, 4.0)]),
        Rect::ltrb(1.0, 2.0, 5.0, 6.0)
    );
    assert_eq!(
        Rect::bounds(&[point(-1.0, 2.0)]),
        Rect::ltrb(-1.0, 2.0, -1.0, 2.0)
    );
}

#[test]
fn join_offset_inset() {
    let a = Rect::ltrb(0.0, 0.0, 1.0, 1.0);
    let b = Rect::ltrb(2.0, -1.0, 3.0, 0.5);
    assert_eq!(a.join(&b), Rect::ltrb(0.0, -1.0, 3.0, 1.0));
    assert_eq!(a.offset(1.0, 2.0), Rect::ltrb(1.0, 2.0, 2.0, 3.0));
    assert_eq!(a.inset(0.25, -1.0), Rect::ltrb(0.25, -1.0, 0.75, 2.0));
    assert_eq!(a.center(), point(0.5, 0.5));

    // An empty rectangle still extends the result.
    assert_eq!(a.join(&Rect::empty().offset(5.0, 5.0)), Rect::ltrb(0.0, 0.0, 5.0, 5.0));
    assert_eq!(Rect::empty().join(&b), Rect::ltrb(0.0, -1.0, 3.0, 0.5));
}

#[test]
fn rounding() {
    let r = Rect::ltrb(0.4, 0.6, 2.5, 3.2);
    assert_eq!(r.round(), IRect::ltrb(0, 1, 3, 3));
    assert_eq!(r.round_out(), IRect::ltrb(0, 0, 3, 4));
    assert_eq!(Rect::from(IRect::xywh(1, 2, 3, 4)), Rect::ltrb(1.0, 2.0, 4.0, 6.0));
}
