#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::match_like_matches_macro)]

//! Data structures and traits to work with paths (vector graphics).
//!
//! A [`Path`] is an immutable sequence of verbs and points, handed out as an
//! `Arc<Path>` so that renderers, animators and caches can share it without copying.
//! Paths are produced by a [`PathBuilder`], by the shape factories on `Path`
//! or by anything driving the [`PathSink`](builder::PathSink) protocol.
//!
//! This crate is reexported in [vellum](../vellum/index.html).
//!
//! # Examples
//!
//! ```
//! use vellum_path::{Path, PathBuilder, PathEvent};
//! use vellum_path::builder::PathSink;
//! use vellum_path::math::point;
//!
//! let mut builder = PathBuilder::new();
//! builder.move_to(point(0.0, 0.0));
//! builder.line_to(point(1.0, 2.0));
//! builder.line_to(point(2.0, 0.0));
//! builder.close();
//!
//! // Move the content of the builder into a shared immutable path.
//! let path = builder.detach();
//! assert!(builder.is_empty());
//!
//! for event in path.iter() {
//!     println!("{:?}", event);
//! }
//!
//! assert_eq!(path.to_svg_string(), "M0,0L1,2L2,0Z");
//! ```

pub use vellum_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod builder;
mod events;
pub mod path;
pub mod path_builder;
pub mod spline;
pub mod svg;

#[doc(hidden)]
pub mod private;

pub use crate::events::*;
#[doc(inline)]
pub use crate::path::{count_contour_points_verbs, Iter, Path};
#[doc(inline)]
pub use crate::path_builder::PathBuilder;
#[doc(inline)]
pub use crate::spline::{CurveFit, SplineKnot};

pub mod traits {
    //! `vellum_path` traits reexported here for convenience.

    pub use crate::builder::PathSink;
    pub use crate::geom::traits::Transformation;
}

pub mod math {
    //! The f32 geometry types used everywhere, reexported from `vellum_geom`.

    pub use crate::geom::{
        point, size, vector, Angle, Box2D, FitStyle, IRect, Matrix, Point, Rect, Rotation, Scale,
        Size, Transform, Translation, Vector,
    };
}

/// The fill rule defines how to determine what is inside and what is outside of the shape.
///
/// See the SVG specification.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FillRule {
    #[default]
    Winding,
    EvenOdd,
}

/// The winding direction of closed shapes added by the shape helpers.
///
/// Directions are expressed in a y-down coordinate system: `Cw` visits the
/// top-left, top-right, bottom-right and bottom-left corners of a rectangle in
/// that order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Direction {
    #[default]
    Ccw,
    Cw,
}

/// A path drawing command.
///
/// Each verb consumes a fixed number of points from the path's point sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Verb {
    Move,
    Line,
    Quad,
    Cubic,
    /// Closes the contour with an implicit line to the contour's first point.
    Close,
}

impl Verb {
    /// Number of points this verb consumes.
    #[inline]
    pub const fn num_points(self) -> usize {
        match self {
            Verb::Move | Verb::Line => 1,
            Verb::Quad => 2,
            Verb::Cubic => 3,
            Verb::Close => 0,
        }
    }
}

#[test]
fn verb_point_counts() {
    let counts: Vec<usize> = [Verb::Move, Verb::Line, Verb::Quad, Verb::Cubic, Verb::Close]
        .iter()
        .map(|v| v.num_points())
        .collect();
    assert_eq!(counts, vec![1, 1, 2, 3, 0]);
}
