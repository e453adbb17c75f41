#![deny(bare_trait_objects)]

//! Optional utilities built on top of `vellum_path`: SVG path data parsing and
//! keyframe animation.
//!
//! This crate is reexported in [vellum](../vellum/index.html) behind the `extra`
//! feature.

pub extern crate vellum_path as path;

pub use path::geom::euclid;
pub use path::math;

pub mod animator;
pub mod keyframes;
pub mod parser;
