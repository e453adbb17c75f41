use std::io;
use std::sync::Arc;

use vellum::extra::parser::ParseError;
use vellum::math::{FitStyle, Rect};
use vellum::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("invalid path data: {0}")]
    Parse(#[from] ParseError),
    #[error("invalid value {value:?} for {name}")]
    InvalidArgument { name: &'static str, value: String },
    #[error("no input path (pass PATH or --input)")]
    MissingInput,
}

pub struct LengthCmd {
    pub path: Arc<Path>,
    pub output: Box<dyn io::Write>,
    pub tolerance: f32,
}

pub struct SampleCmd {
    pub path: Arc<Path>,
    pub output: Box<dyn io::Write>,
    pub tolerance: f32,
    pub distances: Vec<f32>,
    pub extend: bool,
}

pub struct SegmentCmd {
    pub path: Arc<Path>,
    pub output: Box<dyn io::Write>,
    pub tolerance: f32,
    pub start: f32,
    pub end: f32,
}

pub struct FitCmd {
    pub path: Arc<Path>,
    pub output: Box<dyn io::Write>,
    pub dst: Rect,
    pub style: FitStyle,
}

/// An output that can be read back after a command consumed its boxed copy.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct SharedOutput(std::rc::Rc<std::cell::RefCell<Vec<u8>>>);

#[cfg(test)]
impl SharedOutput {
    pub fn boxed(&self) -> Box<dyn io::Write> {
        Box::new(self.clone())
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

#[cfg(test)]
impl io::Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::Write::write(&mut *self.0.borrow_mut(), buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
