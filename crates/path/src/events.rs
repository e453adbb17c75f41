use crate::geom::{CubicBezierSegment, LineSegment, QuadraticBezierSegment};
use crate::math::Point;
use crate::Verb;

/// One segment of a path, as produced by `Path::iter`.
///
/// Each variant carries every point the segment touches, starting with the
/// current position: a line carries `[from, to]`, a cubic carries
/// `[from, ctrl1, ctrl2, to]`, and a close carries `[last, first]` where `first` is
/// the point of the contour's move.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathEvent {
    Move(Point),
    Line([Point; 2]),
    Quad([Point; 3]),
    Cubic([Point; 4]),
    Close([Point; 2]),
}

impl PathEvent {
    #[inline]
    pub fn verb(&self) -> Verb {
        match self {
            PathEvent::Move(..) => Verb::Move,
            PathEvent::Line(..) => Verb::Line,
            PathEvent::Quad(..) => Verb::Quad,
            PathEvent::Cubic(..) => Verb::Cubic,
            PathEvent::Close(..) => Verb::Close,
        }
    }

    /// All points of the event, see the type documentation for their order.
    pub fn points(&self) -> &[Point] {
        match self {
            PathEvent::Move(p) => core::slice::from_ref(p),
            PathEvent::Line(p) => &p[..],
            PathEvent::Quad(p) => &p[..],
            PathEvent::Cubic(p) => &p[..],
            PathEvent::Close(p) => &p[..],
        }
    }

    /// The point the event starts from.
    #[inline]
    pub fn from(&self) -> Point {
        self.points()[0]
    }

    /// The point the event ends at.
    ///
    /// For `Close` this is the first point of the contour.
    pub fn to(&self) -> Point {
        let points = self.points();
        points[points.len() - 1]
    }

    /// The event as a segment, `None` for moves.
    ///
    /// `Close` is the implicit closing line.
    pub fn to_segment(&self) -> Option<EventSegment> {
        match *self {
            PathEvent::Move(..) => None,
            PathEvent::Line([from, to]) | PathEvent::Close([from, to]) => {
                Some(EventSegment::Line(LineSegment { from, to }))
            }
            PathEvent::Quad([from, ctrl, to]) => {
                Some(EventSegment::Quad(QuadraticBezierSegment { from, ctrl, to }))
            }
            PathEvent::Cubic([from, ctrl1, ctrl2, to]) => {
                Some(EventSegment::Cubic(CubicBezierSegment {
                    from,
                    ctrl1,
                    ctrl2,
                    to,
                }))
            }
        }
    }
}

/// The segment described by a `PathEvent`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EventSegment {
    Line(LineSegment),
    Quad(QuadraticBezierSegment),
    Cubic(CubicBezierSegment),
}

#[test]
fn event_points() {
    use crate::math::point;

    let e = PathEvent::Quad([point(0.0, 0.0), point(1.0, 1.0), point(2.0, 0.0)]);
    assert_eq!(e.verb(), Verb::Quad);
    assert_eq!(e.points().len(), 3);
    assert_eq!(e.from(), point(0.0, 0.0));
    assert_eq!(e.to(), point(2.0, 0.0));

    let m = PathEvent::Move(point(3.0, 4.0));
    assert_eq!(m.points(), &[point(3.0, 4.0)]);
    assert!(m.to_segment().is_none());

    let c = PathEvent::Close([point(5.0, 5.0), point(0.0, 0.0)]);
    assert_eq!(
        c.to_segment(),
        Some(EventSegment::Line(LineSegment { from: point(5.0, 5.0), to: point(0.0, 0.0) }))
    );
}
