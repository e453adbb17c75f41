#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]

//! 2d path measurement and manipulation algorithms.
//!
//! The central piece is [`measure::ContourMeasure`], which maps distances along a
//! contour to positions, tangents and sub-paths.
//!
//! This crate is reexported in [vellum](../vellum/index.html).

pub extern crate vellum_path as path;

pub mod fit;
pub mod length;
pub mod measure;
pub mod walk;

pub use crate::path::geom;
pub use crate::path::math;
