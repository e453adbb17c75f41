//! SVG path data output.
//!
//! Paths are written as the content of an SVG `d` attribute using absolute
//! commands only: `M`, `L`, `Q`, `C` and `Z`. Coordinates within a command are
//! separated by a comma, points by a space, and commands are concatenated:
//!
//! ```
//! use vellum_path::PathBuilder;
//! use vellum_path::builder::PathSink;
//! use vellum_path::math::point;
//!
//! let mut builder = PathBuilder::new();
//! builder.move_to(point(0.0, 0.0));
//! builder.quadratic_bezier_to(point(1.0, 2.0), point(2.0, 0.5));
//! assert_eq!(builder.detach().to_svg_string(), "M0,0Q1,2 2,0.5");
//! ```
//!
//! Numbers use the shortest representation that parses back to the same `f32`.
//! SVG has no spelling for NaN or infinities, so a command with a non-finite
//! coordinate is an error and nothing is written from it on.

use crate::builder::PathSink;
use crate::math::Point;
use crate::Path;

use std::fmt;

/// A path sink that writes SVG path data into a `fmt::Write` implementation.
///
/// The first formatting error (or non-finite coordinate) is kept and returned by
/// [`finish`](SvgWriter::finish); everything written after it is ignored.
pub struct SvgWriter<W> {
    output: W,
    result: fmt::Result,
}

impl<W: fmt::Write> SvgWriter<W> {
    pub fn new(output: W) -> Self {
        SvgWriter {
            output,
            result: Ok(()),
        }
    }

    /// Returns the output, or the first error encountered.
    pub fn finish(self) -> Result<W, fmt::Error> {
        self.result.map(|_| self.output)
    }

    fn command(&mut self, cmd: char, points: &[Point]) {
        if self.result.is_err() {
            return;
        }
        self.result = write_command(&mut self.output, cmd, points);
    }
}

fn write_command<W: fmt::Write>(output: &mut W, cmd: char, points: &[Point]) -> fmt::Result {
    if !points.iter().all(|p| p.x.is_finite() && p.y.is_finite()) {
        return Err(fmt::Error);
    }

    output.write_char(cmd)?;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            output.write_char(' ')?;
        }
        write!(output, "{},{}", p.x, p.y)?;
    }
    Ok(())
}

impl<W: fmt::Write> PathSink for SvgWriter<W> {
    fn move_to(&mut self, to: Point) {
        self.command('M', &[to]);
    }

    fn line_to(&mut self, to: Point) {
        self.command('L', &[to]);
    }

    fn quadratic_bezier_to(&mut self, ctrl: Point, to: Point) {
        self.command('Q', &[ctrl, to]);
    }

    fn cubic_bezier_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.command('C', &[ctrl1, ctrl2, to]);
    }

    fn close(&mut self) {
        self.command('Z', &[]);
    }
}

impl Path {
    /// Writes the path as SVG path data.
    ///
    /// Fails if the output fails or if the path has a non-finite coordinate.
    pub fn write_svg<W: fmt::Write + ?Sized>(&self, output: &mut W) -> fmt::Result {
        let mut writer = SvgWriter::new(output);
        self.visit(&mut writer);
        writer.finish().map(|_| ())
    }

    /// The path as an SVG path data string.
    ///
    /// Output stops before the first command with a non-finite coordinate.
    pub fn to_svg_string(&self) -> String {
        let mut s = String::new();
        if self.write_svg(&mut s).is_err() {
            log::warn!("non-finite coordinate, SVG path data truncated to {:?}", s);
        }
        s
    }

    /// The path as UTF-8 encoded SVG path data.
    pub fn as_svg_data(&self) -> Vec<u8> {
        self.to_svg_string().into_bytes()
    }
}

#[cfg(test)]
use crate::{Direction, PathBuilder};
#[cfg(test)]
use crate::math::{point, Rect};

#[test]
fn svg_commands() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(1.0, 2.0));
    builder.line_to(point(-3.5, 4.0));
    builder.quadratic_bezier_to(point(5.0, 6.0), point(7.0, 8.0));
    builder.cubic_bezier_to(point(0.25, 0.0), point(10.0, 11.0), point(12.0, 13.0));
    builder.close();
    builder.move_to(point(100.0, 0.0));

    let path = builder.detach();
    assert_eq!(
        path.to_svg_string(),
        "M1,2L-3.5,4Q5,6 7,8C0.25,0 10,11 12,13ZM100,0"
    );
    assert_eq!(path.as_svg_data(), path.to_svg_string().into_bytes());
    assert_eq!(format!("{:?}", path), format!("Path(\"{}\")", path.to_svg_string()));
}

#[test]
fn svg_shapes() {
    let rect = Path::rect(&Rect::xywh(1.0, 1.0, 2.0, 3.0), Direction::Cw);
    assert_eq!(rect.to_svg_string(), "M1,1L3,1L3,4L1,4Z");
    assert_eq!(Path::empty().to_svg_string(), "");
}

#[test]
fn svg_writer_into_custom_output() {
    let mut writer = SvgWriter::new(String::from("d=\""));
    writer.move_to(point(0.0, 0.0));
    writer.line_to(point(0.5, 0.5));
    let mut s = writer.finish().unwrap();
    s.push('"');
    assert_eq!(s, "d=\"M0,0L0.5,0.5\"");
}

#[test]
fn non_finite_coordinates_stop_the_output() {
    let mut builder = PathBuilder::new();
    builder.move_to(point(0.0, 0.0));
    builder.line_to(point(1.0, 1.0));
    builder.line_to(point(f32::NAN, 2.0));
    builder.line_to(point(3.0, 3.0));
    builder.move_to(point(f32::INFINITY, 0.0));
    let path = builder.detach();

    let mut s = String::new();
    assert!(path.write_svg(&mut s).is_err());
    assert_eq!(path.to_svg_string(), "M0,0L1,1");
    assert!(!path.to_svg_string().contains("NaN"));
    assert_eq!(format!("{:?}", path), "Path(\"M0,0L1,1\")");

    let mut writer = SvgWriter::new(String::new());
    writer.move_to(point(0.0, f32::NEG_INFINITY));
    writer.line_to(point(1.0, 1.0));
    assert!(writer.finish().is_err());
}
