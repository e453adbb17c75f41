//! 2x3 affine transforms.

use crate::utils::cw;
use crate::{point, vector, Point, Rect, Transform, Vector};
use core::ops::{Mul, MulAssign};
#[cfg(not(feature = "std"))]
use num_traits::Float;

/// A 2x3 affine transform.
///
/// Maps `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
///
/// `(a, b)` and `(c, d)` are the images of the x and y basis vectors and
/// `(e, f)` is the translation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Matrix {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

/// How `Matrix::fit` maps a source rectangle into a destination rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FitStyle {
    /// Scale each axis independently to fill the destination.
    #[default]
    Fill,
    /// Uniform scale, aligned to the left or top.
    Start,
    /// Uniform scale, centered.
    Center,
    /// Uniform scale, aligned to the right or bottom.
    End,
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Matrix { a, b, c, d, e, f }
    }

    #[inline]
    pub fn from_array(m: [f32; 6]) -> Self {
        Matrix::new(m[0], m[1], m[2], m[3], m[4], m[5])
    }

    #[inline]
    pub fn to_array(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// Build a matrix from its x basis `u`, its y basis `v` and its translation `t`.
    #[inline]
    pub fn from_basis(u: Vector, v: Vector, t: Point) -> Self {
        Matrix::new(u.x, u.y, v.x, v.y, t.x, t.y)
    }

    /// A matrix with `e0` as the x basis and its clockwise perpendicular as the y basis.
    #[inline]
    pub fn basis(e0: Vector) -> Self {
        Matrix::from_basis(e0, cw(e0), point(0.0, 0.0))
    }

    #[inline]
    pub fn translation(x: f32, y: f32) -> Self {
        Matrix::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    #[inline]
    pub fn scale(x: f32, y: f32) -> Self {
        Matrix::new(x, 0.0, 0.0, y, 0.0, 0.0)
    }

    #[inline]
    pub fn skew(x: f32, y: f32) -> Self {
        Matrix::new(1.0, y, x, 1.0, 0.0, 0.0)
    }

    pub fn rotation(radians: f32) -> Self {
        let (s, c) = radians.sin_cos();
        Matrix::new(c, s, -s, c, 0.0, 0.0)
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Matrix::IDENTITY
    }

    /// The x basis vector.
    #[inline]
    pub fn x_axis(&self) -> Vector {
        vector(self.a, self.b)
    }

    /// The y basis vector.
    #[inline]
    pub fn y_axis(&self) -> Vector {
        vector(self.c, self.d)
    }

    #[inline]
    pub fn translation_part(&self) -> Vector {
        vector(self.e, self.f)
    }

    /// Returns the matrix that applies `self`, then `other`.
    #[inline]
    #[must_use]
    pub fn then(&self, other: &Matrix) -> Matrix {
        *other * *self
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a as f64 * self.d as f64 - self.b as f64 * self.c as f64
    }

    /// The inverse transform, or `None` if the matrix is singular.
    ///
    /// The determinant is computed in double precision, the matrix is considered singular
    /// when it rounds to zero in single precision.
    pub fn invert(&self) -> Option<Matrix> {
        let det = self.determinant();
        if det as f32 == 0.0 {
            return None;
        }

        let idet = 1.0 / det;
        let (a, b, c, d) = (self.a as f64, self.b as f64, self.c as f64, self.d as f64);
        let (e, f) = (self.e as f64, self.f as f64);

        Some(Matrix::new(
            (d * idet) as f32,
            (-b * idet) as f32,
            (-c * idet) as f32,
            (a * idet) as f32,
            ((c * f - d * e) * idet) as f32,
            ((b * e - a * f) * idet) as f32,
        ))
    }

    /// The inverse transform, or the identity if the matrix is singular.
    pub fn invert_or_identity(&self) -> Matrix {
        self.invert().unwrap_or(Matrix::IDENTITY)
    }

    #[inline]
    pub fn transform_point(&self, p: Point) -> Point {
        self.to_transform().transform_point(p)
    }

    /// Maps a vector, ignoring the translation.
    #[inline]
    pub fn transform_vector(&self, v: Vector) -> Vector {
        self.to_transform().transform_vector(v)
    }

    /// Transform points in place.
    pub fn map_points(&self, points: &mut [Point]) {
        for p in points {
            *p = self.transform_point(*p);
        }
    }

    /// The transform mapping `src` onto `dst`.
    ///
    /// With any style other than `FitStyle::Fill` the scale is uniform (the smaller of the
    /// two axis scales) and the leftover space on the other axis is distributed according
    /// to the style.
    pub fn fit(src: &Rect, dst: &Rect, style: FitStyle) -> Matrix {
        let mut sx = dst.width() / src.width();
        let mut sy = dst.height() / src.height();
        let mut gap = vector(0.0, 0.0);

        if style != FitStyle::Fill {
            if sx > sy {
                sx = sy;
                gap.x = dst.width() - sx * src.width();
            } else {
                sy = sx;
                gap.y = dst.height() - sy * src.height();
            }
        }

        match style {
            FitStyle::Fill | FitStyle::End => {}
            FitStyle::Start => {
                gap = vector(0.0, 0.0);
            }
            FitStyle::Center => {
                gap = gap * 0.5;
            }
        }

        Matrix::translation(dst.left + gap.x, dst.top + gap.y)
            * Matrix::scale(sx, sy)
            * Matrix::translation(-src.left, -src.top)
    }

    #[inline]
    pub fn to_transform(&self) -> Transform {
        Transform::new(self.a, self.b, self.c, self.d, self.e, self.f)
    }
}

/// `self * rhs` applies `rhs` first, then `self`.
impl Mul<Matrix> for Matrix {
    type Output = Matrix;

    #[inline]
    fn mul(self, o: Matrix) -> Matrix {
        o.to_transform().then(&self.to_transform()).into()
    }
}

impl MulAssign<Matrix> for Matrix {
    #[inline]
    fn mul_assign(&mut self, rhs: Matrix) {
        *self = *self * rhs;
    }
}

impl Mul<Point> for Matrix {
    type Output = Point;

    #[inline]
    fn mul(self, p: Point) -> Point {
        self.transform_point(p)
    }
}

impl From<Transform> for Matrix {
    fn from(t: Transform) -> Self {
        Matrix::new(t.m11, t.m12, t.m21, t.m22, t.m31, t.m32)
    }
}

impl From<Matrix> for Transform {
    fn from(m: Matrix) -> Self {
        m.to_transform()
    }
}

#[cfg(test)]
fn assert_approx_point(a: Point, b: Point) {
    assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
}

#[test]
fn composition_order() {
    let t = Matrix::translation(10.0, 0.0);
    let s = Matrix::scale(2.0, 2.0);

    // Scale first, then translate.
    assert_eq!((t * s) * point(1.0, 1.0), point(12.0, 2.0));
    assert_eq!(s.then(&t) * point(1.0, 1.0), point(12.0, 2.0));
    // Translate first, then scale.
    assert_eq!((s * t) * point(1.0, 1.0), point(22.0, 2.0));
}

#[test]
fn inverse() {
    let m = Matrix::translation(3.0, -2.0) * Matrix::rotation(0.7) * Matrix::scale(2.0, 0.5);
    let inv = m.invert().unwrap();
    for p in [point(0.0, 0.0), point(1.0, 5.0), point(-3.0, 2.5)] {
        assert_approx_point(inv * (m * p), p);
    }
    assert!((inv * m).to_array().iter().zip(Matrix::IDENTITY.to_array().iter()).all(|(a, b)| (a - b).abs() < 1e-5));
}

#[test]
fn singular_inverse() {
    let m = Matrix::scale(0.0, 1.0);
    assert!(m.invert().is_none());
    assert_eq!(m.invert_or_identity(), Matrix::IDENTITY);

    // Collinear basis vectors.
    let m = Matrix::new(1.0, 2.0, 2.0, 4.0, 5.0, 5.0);
    assert!(m.invert().is_none());
}

#[test]
fn basis() {
    let m = Matrix::basis(vector(0.0, 1.0));
    assert_eq!(m.transform_vector(vector(1.0, 0.0)), vector(0.0, 1.0));
    assert_eq!(m.transform_vector(vector(0.0, 1.0)), vector(-1.0, 0.0));

    let m = Matrix::from_basis(vector(1.0, 0.0), vector(0.0, 1.0), point(4.0, 5.0));
    assert_eq!(m, Matrix::translation(4.0, 5.0));
}

#[test]
fn fit_styles() {
    let src = Rect::ltrb(0.0, 0.0, 1.0, 1.0);
    let dst = Rect::ltrb(0.0, 0.0, 3.0, 1.0);

    let m = Matrix::fit(&src, &dst, FitStyle::Center);
    assert_eq!(m * point(0.0, 0.0), point(1.0, 0.0));
    assert_eq!(m * point(1.0, 1.0), point(2.0, 1.0));

    let m = Matrix::fit(&src, &dst, FitStyle::Start);
    assert_eq!(m * point(0.0, 0.0), point(0.0, 0.0));
    assert_eq!(m * point(1.0, 1.0), point(1.0, 1.0));

    let m = Matrix::fit(&src, &dst, FitStyle::End);
    assert_eq!(m * point(0.0, 0.0), point(2.0, 0.0));
    assert_eq!(m * point(1.0, 1.0), point(3.0, 1.0));

    let m = Matrix::fit(&src, &dst, FitStyle::Fill);
    assert_eq!(m * point(1.0, 1.0), point(3.0, 1.0));

    // Vertical gap.
    let m = Matrix::fit(&Rect::ltrb(2.0, 2.0, 4.0, 4.0), &Rect::ltrb(0.0, 0.0, 1.0, 3.0), FitStyle::Center);
    assert_eq!(m * point(2.0, 2.0), point(0.0, 1.0));
    assert_eq!(m * point(4.0, 4.0), point(1.0, 2.0));
}

#[test]
fn euclid_conversion() {
    let m = Matrix::translation(1.0, 2.0) * Matrix::rotation(0.5);
    let t: Transform = m.into();
    let p = point(3.0, -1.0);
    assert_approx_point(t.transform_point(p), m * p);
    assert_eq!(Matrix::from(t), m);
}
