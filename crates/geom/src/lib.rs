#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Scalar math and 2D geometric primitives on top of euclid.
//!
//! This crate is reexported in [vellum](../vellum/index.html).
//!
//! # Overview.
//!
//! This crate implements the maths the path kernel is built on:
//!
//! - clamping, tolerance-based comparisons and unit-interval root solvers,
//! - 2x3 affine matrices and bounding rectangles,
//! - line segments, quadratic and cubic bézier curves (coefficient forms,
//!   flattening segment counts, splitting),
//! - unit-square cubic easing curves.
//!
//! # Flattening
//!
//! Flattening is the action of approximating a curve with a succession of line segments.
//! The tolerance threshold taken as input by the flattening routines corresponds
//! to the maximum distance between the curve and its linear approximation.
//! The smaller the tolerance is, the more precise the approximation and the more segments
//! are generated.

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

#[macro_use]
mod segment;
pub mod cubic_bezier;
pub mod cubic_unit;
mod line;
pub mod matrix;
pub mod quadratic_bezier;
pub mod rect;
pub mod utils;

#[doc(inline)]
pub use crate::cubic_bezier::{CubicBezierSegment, CubicCoeff};
#[doc(inline)]
pub use crate::cubic_unit::CubicUnit;
#[doc(inline)]
pub use crate::line::LineSegment;
#[doc(inline)]
pub use crate::matrix::{FitStyle, Matrix};
#[doc(inline)]
pub use crate::quadratic_bezier::{QuadCoeff, QuadraticBezierSegment};
#[doc(inline)]
pub use crate::rect::{IRect, Rect};
#[doc(inline)]
pub use crate::segment::{Segment, MAX_FLATTENING_SEGMENTS};

/// Distance of the control points from the end points, relative to the radius, when
/// approximating a quarter of a circle with a cubic bézier curve.
pub const BEZIER_CIRCLE_COEFF: f32 = 0.5519150244935105707435627;

/// Alias for `euclid::default::Point2D<f32>`.
pub type Point = euclid::default::Point2D<f32>;

/// Alias for `euclid::default::Vector2D<f32>`.
pub type Vector = euclid::default::Vector2D<f32>;

/// Alias for `euclid::default::Size2D<f32>`.
pub type Size = euclid::default::Size2D<f32>;

/// Alias for `euclid::default::Box2D<f32>`.
pub type Box2D = euclid::default::Box2D<f32>;

/// Alias for `euclid::default::Transform2D<f32>`.
pub type Transform = euclid::default::Transform2D<f32>;

/// Alias for `euclid::default::Rotation2D<f32>`.
pub type Rotation = euclid::default::Rotation2D<f32>;

/// Alias for `euclid::default::Translation2D<f32>`.
pub type Translation = euclid::Translation2D<f32, euclid::UnknownUnit, euclid::UnknownUnit>;

/// Alias for `euclid::default::Scale<f32>`.
pub type Scale = euclid::default::Scale<f32>;

/// An angle in radians (f32).
pub type Angle = euclid::Angle<f32>;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector(x: f32, y: f32) -> Vector {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

/// Shorthand for `Size::new(x, y)`.
#[inline]
pub fn size(w: f32, h: f32) -> Size {
    Size::new(w, h)
}

pub mod traits {
    pub use crate::segment::Segment;

    use crate::{Matrix, Point, Transform, Vector};

    /// Something that can map points and vectors.
    pub trait Transformation {
        fn transform_point(&self, p: Point) -> Point;
        fn transform_vector(&self, v: Vector) -> Vector;
    }

    impl Transformation for Matrix {
        fn transform_point(&self, p: Point) -> Point {
            Matrix::transform_point(self, p)
        }

        fn transform_vector(&self, v: Vector) -> Vector {
            Matrix::transform_vector(self, v)
        }
    }

    impl Transformation for Transform {
        fn transform_point(&self, p: Point) -> Point {
            Transform::transform_point(self, p)
        }

        fn transform_vector(&self, v: Vector) -> Vector {
            Transform::transform_vector(self, v)
        }
    }

    // Automatically implement Transformation for all &Transformation.
    impl<'l, T: Transformation> Transformation for &'l T {
        #[inline]
        fn transform_point(&self, p: Point) -> Point {
            (*self).transform_point(p)
        }

        #[inline]
        fn transform_vector(&self, v: Vector) -> Vector {
            (*self).transform_vector(v)
        }
    }
}
