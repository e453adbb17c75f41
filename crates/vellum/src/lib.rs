#![deny(bare_trait_objects)]

//! 2D vector path geometry.
//!
//! `vellum` is a collection of crates re-exported here:
//!
//! - [`geom`]: points, matrices, rectangles, bézier segments, root solvers and
//!   the `CubicUnit` easing curve.
//! - [`path`]: the immutable shared `Path`, the `PathBuilder`, the `PathSink`
//!   protocol and SVG path data output.
//! - [`algorithms`]: contour measurement (position and tangent at a distance,
//!   sub-path extraction), path length, fitting and walking.
//! - `extra` (with the `extra` feature): SVG path data parsing and keyframe
//!   animation.
//!
//! # Example
//!
//! ```
//! use vellum::math::{point, Rect};
//! use vellum::measure::ContourMeasureIter;
//! use vellum::path::{Direction, PathBuilder};
//!
//! let mut builder = PathBuilder::new();
//! builder.add_rect(&Rect::wh(100.0, 50.0), Direction::Cw);
//! builder.add_circle(point(50.0, 25.0), 10.0, Direction::Ccw);
//! let path = builder.detach();
//!
//! for contour in ContourMeasureIter::new(&path, 0.1) {
//!     let (position, tangent) = contour.get_pos_tan(contour.length() * 0.5);
//!     println!("half way: {:?} heading {:?}", position, tangent);
//! }
//! ```

pub extern crate vellum_algorithms;
#[cfg(feature = "extra")]
pub extern crate vellum_extra;

pub use vellum_algorithms as algorithms;
#[cfg(feature = "extra")]
pub use vellum_extra as extra;
pub use algorithms::geom;
pub use algorithms::measure;
pub use algorithms::path;

pub use path::math;
