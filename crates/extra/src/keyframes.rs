//! Keyframe interpolation of float values.
//!
//! A [`KeyFrames`] track stores, for each frame, a time, a fixed number of float
//! values and an easing curve. Sampling a time finds the two frames around it and
//! interpolates their values, eased by the curve of the second frame.
//!
//! ```
//! use vellum_extra::keyframes::KeyFrames;
//!
//! let mut track = KeyFrames::new(2);
//! track.add_frame(0.0, &[0.0, 10.0], None);
//! track.add_frame(2.0, &[1.0, 30.0], None);
//!
//! let mut values = [0.0; 2];
//! let sample = track.sample(1.0, Some(&mut values)).unwrap();
//! assert_eq!((sample.from, sample.to, sample.t), (0, 1, 0.5));
//! assert_eq!(values, [0.5, 20.0]);
//! ```

use crate::path::geom::utils::lerp_unbounded;
use crate::path::geom::CubicUnit;
use crate::path::math::{point, vector, Matrix, Point, Vector};

/// Easing handles of frames added without explicit ones: a linear ease.
pub const DEFAULT_CUBICS: [Point; 2] = [
    Point::new(1.0 / 3.0, 1.0 / 3.0),
    Point::new(2.0 / 3.0, 2.0 / 3.0),
];

/// A frame of a [`KeyFrames`] track.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Key<'l> {
    pub time: f32,
    pub values: &'l [f32],
    /// Control points of the easing curve of the interval ending at this frame.
    pub cubics: [Point; 2],
}

/// The result of sampling a track: the frames around the sampled time and the
/// eased interpolation parameter between them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sample {
    pub from: usize,
    pub to: usize,
    pub t: f32,
}

/// A sorted sequence of frames, each holding `value_count` floats.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyFrames {
    value_count: usize,
    times: Vec<f32>,
    // value_count floats per frame.
    values: Vec<f32>,
    // One per frame. The first frame's curve is never used.
    cubics: Vec<CubicUnit>,
}

impl KeyFrames {
    pub fn new(value_count: usize) -> Self {
        KeyFrames {
            value_count,
            times: Vec::new(),
            values: Vec::new(),
            cubics: Vec::new(),
        }
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub fn value_count(&self) -> usize {
        self.value_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// The frame at `index`.
    ///
    /// Panics if `index` is out of range.
    pub fn at(&self, index: usize) -> Key {
        let offset = index * self.value_count;
        Key {
            time: self.times[index],
            values: &self.values[offset..offset + self.value_count],
            cubics: *self.cubics[index].points(),
        }
    }

    /// Replaces the easing curve of the frame at `index`.
    pub fn set_cubics(&mut self, index: usize, a: Point, b: Point) {
        debug_assert!(index < self.cubics.len());
        self.cubics[index] = CubicUnit::new(a, b);
    }

    /// Adds a frame, or overwrites the values and easing of the frame at the same time.
    ///
    /// `values` must hold exactly `value_count` floats. Without `cubics` the
    /// interval ending at this frame is interpolated linearly.
    pub fn add_frame(&mut self, time: f32, values: &[f32], cubics: Option<[Point; 2]>) {
        debug_assert_eq!(values.len(), self.value_count);
        let values = &values[..self.value_count];
        let [a, b] = cubics.unwrap_or(DEFAULT_CUBICS);
        let cubic = CubicUnit::new(a, b);

        let index = self.times.partition_point(|t| *t < time);
        let offset = index * self.value_count;

        if self.times.get(index) == Some(&time) {
            self.values[offset..offset + self.value_count].copy_from_slice(values);
            self.cubics[index] = cubic;
        } else {
            self.times.insert(index, time);
            for (i, v) in values.iter().enumerate() {
                self.values.insert(offset + i, *v);
            }
            self.cubics.insert(index, cubic);
        }

        self.validate();
    }

    /// Adds a frame to a track of a single value.
    pub fn add_frame_value(&mut self, time: f32, value: f32, cubics: Option<[Point; 2]>) {
        self.add_frame(time, &[value], cubics);
    }

    pub fn remove_all(&mut self) {
        self.times.clear();
        self.values.clear();
        self.cubics.clear();
    }

    /// Samples the track at `time`, optionally writing the interpolated values into `out`.
    ///
    /// Returns `None` if the track is empty. Times at or before the first frame
    /// sample the first frame and times at or after the last frame sample the last
    /// one. A NaN time samples the first frame. A track with a single frame always
    /// returns `{ from: 0, to: 0, t: 0 }`.
    ///
    /// The eased parameter may leave `[0, 1]` when easing handles overshoot, in which
    /// case the values are extrapolated.
    pub fn sample(&self, time: f32, out: Option<&mut [f32]>) -> Option<Sample> {
        let n = self.times.len();
        let (first, last) = (*self.times.first()?, *self.times.last()?);

        let sample = if n == 1 {
            Sample { from: 0, to: 0, t: 0.0 }
        } else if !(time > first) {
            Sample { from: 0, to: 1, t: 0.0 }
        } else if time >= last {
            Sample { from: n - 2, to: n - 1, t: 1.0 }
        } else {
            let next = self.times.partition_point(|t| *t < time);
            debug_assert!(next > 0 && next < n);
            let prev = next - 1;

            let t = (time - self.times[prev]) / (self.times[next] - self.times[prev]);
            // The curve of the frame closing the interval eases it.
            let t = self.cubics[next].x_to_y(t);

            Sample { from: prev, to: next, t }
        };

        if let Some(out) = out {
            self.interpolate(&sample, out);
        }

        Some(sample)
    }

    fn interpolate(&self, sample: &Sample, out: &mut [f32]) {
        debug_assert_eq!(out.len(), self.value_count);
        let n = self.value_count;
        let from = &self.values[sample.from * n..sample.from * n + n];
        let to = &self.values[sample.to * n..sample.to * n + n];

        if sample.t == 0.0 {
            out.copy_from_slice(from);
        } else if sample.t == 1.0 {
            out.copy_from_slice(to);
        } else {
            for ((dst, a), b) in out.iter_mut().zip(from).zip(to) {
                *dst = lerp_unbounded(*a, *b, sample.t);
            }
        }
    }

    /// Logs the frames at the debug level.
    pub fn dump(&self) {
        log::debug!("{} keyframes", self.times.len());
        for (i, time) in self.times.iter().enumerate() {
            log::debug!("time:[{}] {:?}", time, self.at(i).values);
        }
    }

    fn validate(&self) {
        debug_assert_eq!(self.values.len(), self.times.len() * self.value_count);
        debug_assert_eq!(self.cubics.len(), self.times.len());
        debug_assert!(self.times.windows(2).all(|w| w[0] < w[1]));
    }
}

/// An affine transform decomposed into parts that interpolate well.
///
/// The parts are applied in order: scale, skew and rotation around `origin`, then
/// translation by `trans`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MatrixParts {
    pub origin: Point,
    pub scale: Vector,
    pub skew: Vector,
    pub radians: f32,
    pub trans: Vector,
}

impl Default for MatrixParts {
    fn default() -> Self {
        MatrixParts {
            origin: point(0.0, 0.0),
            scale: vector(1.0, 1.0),
            skew: vector(0.0, 0.0),
            radians: 0.0,
            trans: vector(0.0, 0.0),
        }
    }
}

impl MatrixParts {
    /// Number of floats in the flattened form, the value count of a track animating
    /// a transform.
    pub const FLOAT_COUNT: usize = 9;

    pub fn to_floats(&self) -> [f32; Self::FLOAT_COUNT] {
        [
            self.origin.x,
            self.origin.y,
            self.scale.x,
            self.scale.y,
            self.skew.x,
            self.skew.y,
            self.radians,
            self.trans.x,
            self.trans.y,
        ]
    }

    /// Reads the flattened form. Panics if `f` holds fewer than `FLOAT_COUNT` floats.
    pub fn from_floats(f: &[f32]) -> Self {
        MatrixParts {
            origin: point(f[0], f[1]),
            scale: vector(f[2], f[3]),
            skew: vector(f[4], f[5]),
            radians: f[6],
            trans: vector(f[7], f[8]),
        }
    }

    pub fn compose(&self) -> Matrix {
        let o = self.origin;
        Matrix::translation(o.x + self.trans.x, o.y + self.trans.y)
            * Matrix::rotation(self.radians)
            * Matrix::skew(self.skew.x, self.skew.y)
            * Matrix::scale(self.scale.x, self.scale.y)
            * Matrix::translation(-o.x, -o.y)
    }
}

#[test]
fn overwrite_and_interpolate() {
    let mut track = KeyFrames::new(2);
    let frames = [point(3.0, 30.0), point(1.0, 10.0), point(2.0, 20.0), point(0.0, 0.0)];

    for p in &frames {
        track.add_frame(p.x, &[p.x, p.y], None);
        track.add_frame(p.x, &[p.x, p.y], None);
    }
    assert_eq!(track.frame_count(), 4);
    assert_eq!(track.at(2).time, 2.0);
    assert_eq!(track.at(2).values, &[2.0, 20.0]);
    track.dump();

    let mut t = 0.0;
    while t <= 3.0 {
        let mut out = [0.0; 2];
        track.sample(t, Some(&mut out)).unwrap();
        assert_eq!(out, [t, t * 10.0]);
        t += 0.25;
    }
}

#[test]
fn interpolated_matrix() {
    let m0 = MatrixParts {
        trans: vector(4.0, 6.0),
        ..MatrixParts::default()
    };
    let m1 = MatrixParts {
        scale: vector(3.0, 5.0),
        ..MatrixParts::default()
    };

    let mut track = KeyFrames::new(MatrixParts::FLOAT_COUNT);
    track.add_frame(0.0, &m0.to_floats(), None);
    track.add_frame(1.0, &m1.to_floats(), None);

    let mut tmp = [0.0; MatrixParts::FLOAT_COUNT];
    track.sample(0.5, Some(&mut tmp)).unwrap();
    let m = MatrixParts::from_floats(&tmp).compose();
    assert_eq!(m, Matrix::new(2.0, 0.0, 0.0, 3.0, 2.0, 3.0));
}

#[test]
fn sample_positions() {
    let mut track = KeyFrames::new(1);
    track.add_frame_value(1.0, 0.0, None);
    track.add_frame_value(2.0, 0.0, None);
    track.add_frame_value(4.0, 0.0, None);

    let expectations = [
        (0.0, Sample { from: 0, to: 1, t: 0.0 }),
        (1.0, Sample { from: 0, to: 1, t: 0.0 }),
        (1.5, Sample { from: 0, to: 1, t: 0.5 }),
        (3.0, Sample { from: 1, to: 2, t: 0.5 }),
        (4.0, Sample { from: 1, to: 2, t: 1.0 }),
        (5.0, Sample { from: 1, to: 2, t: 1.0 }),
    ];
    for (time, expected) in expectations {
        assert_eq!(track.sample(time, None), Some(expected));
    }

    let mut empty = KeyFrames::new(0);
    assert_eq!(empty.sample(1.0, None), None);
    empty.add_frame(3.0, &[], None);
    assert_eq!(empty.sample(10.0, None), Some(Sample { from: 0, to: 0, t: 0.0 }));

    track.remove_all();
    assert!(track.is_empty());
    assert_eq!(track.sample(1.0, None), None);
}

#[test]
fn value_less_track() {
    let mut track = KeyFrames::new(0);
    track.add_frame(0.0, &[], None);
    track.add_frame(1.0, &[], None);
    track.add_frame(9.0, &[], None);
    assert_eq!(track.sample(5.0, None), Some(Sample { from: 1, to: 2, t: 0.5 }));
}

#[test]
fn easing() {
    let mut track = KeyFrames::new(0);
    track.add_frame(0.0, &[], None);
    track.add_frame(1.0, &[], None);
    assert_eq!(track.sample(0.5, None).unwrap().t, 0.5);

    // Fast start, slow finish.
    track.add_frame(1.0, &[], Some([point(0.0, 1.0), point(0.0, 1.0)]));
    assert!(track.sample(0.5, None).unwrap().t > 0.99);
    assert_eq!(track.at(1).cubics, [point(0.0, 1.0), point(0.0, 1.0)]);

    // Slow start, fast finish.
    track.set_cubics(1, point(1.0, 0.0), point(1.0, 0.0));
    assert!(track.sample(0.5, None).unwrap().t < 0.01);
}

#[test]
fn matrix_parts() {
    let mut parts = MatrixParts::default();
    assert_eq!(parts.compose(), Matrix::IDENTITY);

    parts.scale = vector(2.0, 3.0);
    parts.trans = vector(4.0, 5.0);
    assert_eq!(parts.compose(), Matrix::new(2.0, 0.0, 0.0, 3.0, 4.0, 5.0));

    parts.trans = vector(0.0, 0.0);
    parts.origin = point(1.0, 1.0);
    assert_eq!(parts.compose(), Matrix::new(2.0, 0.0, 0.0, 3.0, -1.0, -2.0));

    assert_eq!(MatrixParts::from_floats(&parts.to_floats()), parts);
}

#[test]
fn nan_time_samples_first_frame() {
    let mut track = KeyFrames::new(1);
    track.add_frame_value(0.0, 5.0, None);
    track.add_frame_value(1.0, 7.0, None);
    track.add_frame_value(2.0, 9.0, None);

    let mut out = [0.0];
    assert_eq!(
        track.sample(f32::NAN, Some(&mut out)),
        Some(Sample { from: 0, to: 1, t: 0.0 })
    );
    assert_eq!(out, [5.0]);
}
