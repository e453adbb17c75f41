//! SVG path data parsing.
//!
//! ```
//! use vellum_extra::parser::parse_path;
//!
//! let path = parse_path("M 0 0 L 10 0 q 5 5 10 0 Z").unwrap();
//! assert_eq!(path.to_svg_string(), "M0,0L10,0Q15,5 20,0Z");
//! ```

use crate::path::{
    builder::PathSink,
    math::{point, Point},
    Path, PathBuilder,
};

use std::sync::Arc;

use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseError {
    #[error("Line {line} Column {column}: Expected number, got {src:?}.")]
    Number { src: String, line: i32, column: i32 },
    #[error("Line {line} Column {column}: Invalid command {command:?}.")]
    Command {
        command: char,
        line: i32,
        column: i32,
    },
    #[error("Line {line} Column {column}: Expected move-to command, got {command:?}.")]
    MissingMoveTo {
        command: char,
        line: i32,
        column: i32,
    },
}

#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct ParserOptions {
    /// Optionally stop parsing when encountering a provided special character.
    pub stop_at: Option<char>,
}

impl ParserOptions {
    pub const DEFAULT: ParserOptions = ParserOptions { stop_at: None };
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions::DEFAULT
    }
}

// A buffered iterator of characters keeping track of line and column.
pub struct Source<Iter> {
    src: Iter,
    current: char,
    line: i32,
    col: i32,
    finished: bool,
}

impl<Iter: Iterator<Item = char>> Source<Iter> {
    pub fn new<IntoIter>(src: IntoIter) -> Self
    where
        IntoIter: IntoIterator<IntoIter = Iter>,
    {
        Self::with_position(0, 0, src)
    }

    pub fn with_position<IntoIter>(line: i32, column: i32, src: IntoIter) -> Self
    where
        IntoIter: IntoIterator<IntoIter = Iter>,
    {
        let mut src = src.into_iter();

        let (current, finished) = match src.next() {
            Some(c) => (c, false),
            None => (' ', true),
        };

        let line = line + if current == '\n' { 1 } else { 0 };

        Source {
            current,
            finished,
            src,
            line,
            col: column,
        }
    }

    /// Consume the source and returns the iterator, line and column.
    pub fn unwrap(self) -> (Iter, i32, i32) {
        (self.src, self.line, self.col)
    }

    fn skip_whitespace(&mut self) {
        while !self.finished && (self.current.is_whitespace() || self.current == ',') {
            self.advance_one();
        }
    }

    fn advance_one(&mut self) {
        if self.finished {
            return;
        }
        match self.src.next() {
            Some('\n') => {
                self.current = '\n';
                self.line += 1;
                self.col = -1;
            }
            Some(c) => {
                self.current = c;
                self.col += 1;
            }
            None => {
                self.current = '~';
                self.finished = true;
            }
        }
    }
}

/// A context object for parsing SVG path data into a [`PathSink`].
///
/// Supports the `M`, `L`, `H`, `V`, `Q`, `T`, `C`, `S` and `Z` commands in their
/// absolute and relative forms, with implicit command repetition. Elliptical arcs
/// are not supported and are reported as invalid commands.
///
/// As in SVG, a drawing command directly following a close starts a new contour
/// at the closed contour's first point.
#[derive(Debug, Default)]
pub struct PathParser {
    float_buffer: String,
    stop_at: Option<char>,
    current_position: Point,
}

impl PathParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse<Iter, Sink>(
        &mut self,
        options: &ParserOptions,
        src: &mut Source<Iter>,
        output: &mut Sink,
    ) -> Result<(), ParseError>
    where
        Iter: Iterator<Item = char>,
        Sink: PathSink,
    {
        self.stop_at = options.stop_at;

        self.parse_commands(src, output)
    }

    fn parse_commands(
        &mut self,
        src: &mut Source<impl Iterator<Item = char>>,
        output: &mut impl PathSink,
    ) -> Result<(), ParseError> {
        // "If a relative moveto (m) appears as the first element of the path, then it is
        // treated as a pair of absolute coordinates."
        self.current_position = point(0.0, 0.0);
        let mut first_position = point(0.0, 0.0);

        let mut need_start = true;
        let mut closed = false;
        let mut prev_cubic_ctrl = None;
        let mut prev_quadratic_ctrl = None;
        let mut implicit_cmd = 'M';

        src.skip_whitespace();

        while !src.finished {
            let mut cmd = src.current;
            let cmd_line = src.line;
            let cmd_col = src.col;

            if self.stop_at == Some(cmd) {
                break;
            }

            if cmd.is_ascii_alphabetic() {
                src.advance_one();
            } else {
                cmd = implicit_cmd;
            }

            let is_move = cmd == 'm' || cmd == 'M';
            let is_close = cmd == 'z' || cmd == 'Z';
            if need_start && !is_move {
                return Err(ParseError::MissingMoveTo {
                    command: cmd,
                    line: cmd_line,
                    column: cmd_col,
                });
            }
            if closed && is_drawing_command(cmd) {
                // Re-open at the start of the closed contour.
                output.move_to(first_position);
            }

            let is_relative = cmd.is_lowercase();

            match cmd {
                'l' | 'L' => {
                    let to = self.parse_endpoint(is_relative, src)?;
                    output.line_to(to);
                }
                'h' | 'H' => {
                    let mut x = self.parse_number(src)?;
                    if is_relative {
                        x += self.current_position.x;
                    }
                    let to = point(x, self.current_position.y);
                    self.current_position = to;
                    output.line_to(to);
                }
                'v' | 'V' => {
                    let mut y = self.parse_number(src)?;
                    if is_relative {
                        y += self.current_position.y;
                    }
                    let to = point(self.current_position.x, y);
                    self.current_position = to;
                    output.line_to(to);
                }
                'q' | 'Q' => {
                    let ctrl = self.parse_point(is_relative, src)?;
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_quadratic_ctrl = Some(ctrl);
                    output.quadratic_bezier_to(ctrl, to);
                }
                't' | 'T' => {
                    let ctrl = self.get_smooth_ctrl(prev_quadratic_ctrl);
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_quadratic_ctrl = Some(ctrl);
                    output.quadratic_bezier_to(ctrl, to);
                }
                'c' | 'C' => {
                    let ctrl1 = self.parse_point(is_relative, src)?;
                    let ctrl2 = self.parse_point(is_relative, src)?;
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_cubic_ctrl = Some(ctrl2);
                    output.cubic_bezier_to(ctrl1, ctrl2, to);
                }
                's' | 'S' => {
                    let ctrl1 = self.get_smooth_ctrl(prev_cubic_ctrl);
                    let ctrl2 = self.parse_point(is_relative, src)?;
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_cubic_ctrl = Some(ctrl2);
                    output.cubic_bezier_to(ctrl1, ctrl2, to);
                }
                'm' | 'M' => {
                    let to = self.parse_endpoint(is_relative, src)?;
                    first_position = to;
                    output.move_to(to);
                    need_start = false;
                }
                'z' | 'Z' => {
                    if !closed {
                        output.close();
                    }
                    self.current_position = first_position;
                }
                _ => {
                    return Err(ParseError::Command {
                        command: cmd,
                        line: cmd_line,
                        column: cmd_col,
                    });
                }
            }

            closed = is_close;

            match cmd {
                'c' | 'C' | 's' | 'S' => {
                    prev_quadratic_ctrl = None;
                }
                'q' | 'Q' | 't' | 'T' => {
                    prev_cubic_ctrl = None;
                }
                _ => {
                    prev_cubic_ctrl = None;
                    prev_quadratic_ctrl = None;
                }
            }

            implicit_cmd = match cmd {
                'm' => 'l',
                'M' => 'L',
                'z' => 'm',
                'Z' => 'M',
                c => c,
            };

            src.skip_whitespace();
        }

        Ok(())
    }

    fn get_smooth_ctrl(&self, prev_ctrl: Option<Point>) -> Point {
        if let Some(prev_ctrl) = prev_ctrl {
            self.current_position + (self.current_position - prev_ctrl)
        } else {
            self.current_position
        }
    }

    fn parse_endpoint(
        &mut self,
        is_relative: bool,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<Point, ParseError> {
        let position = self.parse_point(is_relative, src)?;
        self.current_position = position;

        Ok(position)
    }

    fn parse_point(
        &mut self,
        is_relative: bool,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<Point, ParseError> {
        let mut x = self.parse_number(src)?;
        let mut y = self.parse_number(src)?;

        if is_relative {
            x += self.current_position.x;
            y += self.current_position.y;
        }

        Ok(point(x, y))
    }

    fn parse_number(
        &mut self,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<f32, ParseError> {
        self.float_buffer.clear();

        src.skip_whitespace();

        let line = src.line;
        let column = src.col;

        if src.current == '-' {
            self.float_buffer.push('-');
            src.advance_one();
        }

        while src.current.is_numeric() {
            self.float_buffer.push(src.current);
            src.advance_one();
        }

        if src.current == '.' {
            self.float_buffer.push('.');
            src.advance_one();

            while src.current.is_numeric() {
                self.float_buffer.push(src.current);
                src.advance_one();
            }
        }

        if src.current == 'e' || src.current == 'E' {
            self.float_buffer.push(src.current);
            src.advance_one();

            if src.current == '-' {
                self.float_buffer.push('-');
                src.advance_one();
            }

            while src.current.is_numeric() {
                self.float_buffer.push(src.current);
                src.advance_one();
            }
        }

        match self.float_buffer.parse::<f32>() {
            Ok(val) => Ok(val),
            Err(_) => Err(ParseError::Number {
                src: std::mem::take(&mut self.float_buffer),
                line,
                column,
            }),
        }
    }
}

fn is_drawing_command(cmd: char) -> bool {
    matches!(
        cmd.to_ascii_uppercase(),
        'L' | 'H' | 'V' | 'Q' | 'T' | 'C' | 'S'
    )
}

/// Parses SVG path data into a new path.
pub fn parse_path(src: &str) -> Result<Arc<Path>, ParseError> {
    let mut builder = PathBuilder::new();
    PathParser::new().parse(
        &ParserOptions::DEFAULT,
        &mut Source::new(src.chars()),
        &mut builder,
    )?;

    Ok(builder.detach())
}

#[cfg(test)]
use crate::path::{PathEvent, Verb};

#[test]
fn empty() {
    assert!(parse_path("").unwrap().is_empty());
    assert!(parse_path(" ").unwrap().is_empty());
}

#[test]
fn simple_square() {
    let path = parse_path("M 0 0 L 1 0 L 1 1 L 0 1 Z").unwrap();
    assert_eq!(
        path.verbs(),
        &[Verb::Move, Verb::Line, Verb::Line, Verb::Line, Verb::Close]
    );
    assert_eq!(path.to_svg_string(), "M0,0L1,0L1,1L0,1Z");
}

#[test]
fn implicit_polyline() {
    let path = parse_path("0 0 1 1, 2 2 3 3").unwrap();
    assert_eq!(path.points().len(), 4);
    assert_eq!(path.verbs()[1..], [Verb::Line, Verb::Line, Verb::Line]);

    let path = parse_path("m 1 1 2 0 0 2").unwrap();
    assert_eq!(path.points(), &[point(1.0, 1.0), point(3.0, 1.0), point(3.0, 3.0)]);
}

#[test]
fn relative_and_smooth_commands() {
    let path = parse_path("M10 10 h 5 v 5 H 0 V 0 c 1 1 2 1 3 0 s 2 -1 3 0 t 2 0").unwrap();
    let points = path.points();
    assert_eq!(points[1], point(15.0, 10.0));
    assert_eq!(points[2], point(15.0, 15.0));
    assert_eq!(points[3], point(0.0, 15.0));
    assert_eq!(points[4], point(0.0, 0.0));
    // c
    assert_eq!(&points[5..8], &[point(1.0, 1.0), point(2.0, 1.0), point(3.0, 0.0)]);
    // s: the first control point mirrors the previous one.
    assert_eq!(&points[8..11], &[point(4.0, -1.0), point(5.0, -1.0), point(6.0, 0.0)]);
    // t after a cubic: the control point is the current position.
    assert_eq!(&points[11..13], &[point(6.0, 0.0), point(8.0, 0.0)]);

    let path = parse_path("M0 0 Q 1 1 2 0 T 4 0").unwrap();
    assert_eq!(path.points()[3], point(3.0, -1.0));
}

#[test]
fn invalid_cmd() {
    let mut parser = PathParser::new();
    let mut src = Source::new("x 0 0 0".chars());

    let result = parser
        .parse(&ParserOptions::DEFAULT, &mut src, &mut PathBuilder::new())
        .err()
        .unwrap();
    assert_eq!(
        result,
        ParseError::MissingMoveTo {
            command: 'x',
            line: 0,
            column: 0
        }
    );

    let mut src = Source::new("\n M 0 \n0 x 1 1".chars());

    let result = parser
        .parse(&ParserOptions::DEFAULT, &mut src, &mut PathBuilder::new())
        .err()
        .unwrap();
    assert_eq!(
        result,
        ParseError::Command {
            command: 'x',
            line: 2,
            column: 2
        }
    );
}

#[test]
fn arcs_are_rejected() {
    match parse_path("M 0 0 A 10 10 0 0 1 20 0") {
        Err(ParseError::Command { command: 'A', .. }) => {}
        other => panic!("{:?}", other),
    }
}

#[test]
fn number_01() {
    // Per SVG spec, this is equivalent to "M 0.6 0.5".
    let path = parse_path("M 0.6.5").unwrap();

    let mut iter = path.iter();
    assert_eq!(iter.next(), Some(PathEvent::Move(point(0.6, 0.5))));
    assert_eq!(iter.next(), None);
}

#[test]
fn number_scientific_notation() {
    let path = parse_path("M 1e-2 -1E3").unwrap();
    assert_eq!(path.points(), &[point(0.01, -1000.0)]);
}

#[test]
fn bad_numbers() {
    let bad_number = |src: &str| match parse_path(src) {
        Err(ParseError::Number { .. }) => true,
        r => {
            println!("{r:?}");
            false
        }
    };

    assert!(bad_number("M 0 --1"));
    assert!(bad_number("M 0 1ee2"));
    assert!(bad_number("M 0 1e--1"));
    assert!(bad_number("M 0 *2"));
    assert!(bad_number("M 0 e"));
    assert!(bad_number("M 0 1e"));
    assert!(bad_number("M 0 +1"));
}

#[test]
fn stop() {
    let options = ParserOptions {
        stop_at: Some('|'),
    };
    let mut parser = PathParser::new();

    let mut parse = |src: &str| {
        let mut builder = PathBuilder::new();
        parser
            .parse(&options, &mut Source::new(src.chars()), &mut builder)
            .map(|_| builder.detach())
    };

    assert_eq!(parse("M 0 0 | xxxxxx").unwrap().points().len(), 1);
    parse("M 0 0| xxxxxx").unwrap();
    assert!(parse("| xxxxxx").unwrap().is_empty());
    parse("    | xxxxxx").unwrap();
}

#[test]
fn drawing_after_close_reopens() {
    let path = parse_path("M 1 1 L 2 1 L 2 2 Z L 5 5 z l 1 0").unwrap();
    assert_eq!(
        path.verbs(),
        &[
            Verb::Move,
            Verb::Line,
            Verb::Line,
            Verb::Close,
            Verb::Move,
            Verb::Line,
            Verb::Close,
            Verb::Move,
            Verb::Line,
        ]
    );
    assert_eq!(path.points()[3], point(1.0, 1.0));
    assert_eq!(path.points()[5], point(1.0, 1.0));
    assert_eq!(path.points()[6], point(2.0, 1.0));

    // Repeated closes collapse into one.
    let path = parse_path("M 0 0 L 1 0 Z Z").unwrap();
    assert_eq!(path.verbs().len(), 3);
}

#[test]
fn issue_895() {
    parse_path("M 1e-9 0").unwrap();
    parse_path("M -1e-9 0").unwrap();
    parse_path("M -1e11 0").unwrap();
    parse_path("M 1.e-9 1.4e-4z").unwrap();
    parse_path("M 1.6e-9 1.4e-4 z").unwrap();
    parse_path("M0 1.6e-9L0 1.4e-4").unwrap();
}
