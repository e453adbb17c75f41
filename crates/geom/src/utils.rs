//! Scalar helpers, vector helpers and closed-form unit-interval root solvers.

use crate::{vector, Vector};
use arrayvec::ArrayVec;
#[cfg(not(feature = "std"))]
use num_traits::Float;

/// Default tolerance used by `nearly_eq` and `nearly_zero` callers.
pub const DEFAULT_UNIT_TOLERANCE: f32 = 1.0 / 65536.0;

// Roots computed this close outside of [0, 1] are snapped onto the interval.
const UNIT_ROOT_SLACK: f64 = 1e-7;

/// Clamp `x` to the `[min, max]` range.
#[inline]
pub fn pin<T: PartialOrd>(x: T, min: T, max: T) -> T {
    debug_assert!(min <= max);
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

/// Clamp `x` to the `[0, 1]` range.
#[inline]
pub fn pin_to_unit(x: f32) -> f32 {
    pin(x, 0.0, 1.0)
}

/// Returns true if `min <= x <= max`.
#[inline]
pub fn float_contains(x: f32, min: f32, max: f32) -> bool {
    min <= x && x <= max
}

/// Returns true if `x` is in the `[0, 1]` range.
#[inline]
pub fn float_is_unit(x: f32) -> bool {
    float_contains(x, 0.0, 1.0)
}

#[inline]
pub fn nearly_zero(x: f32, tolerance: f32) -> bool {
    debug_assert!(tolerance >= 0.0);
    x.abs() <= tolerance
}

#[inline]
pub fn nearly_eq(a: f32, b: f32, tolerance: f32) -> bool {
    nearly_zero(a - b, tolerance)
}

/// Linear interpolation, `t` is expected to be in `[0, 1]`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    debug_assert!(float_is_unit(t), "lerp parameter out of range: {}", t);
    lerp_unbounded(a, b, t)
}

/// Linear interpolation that extrapolates when `t` is outside of `[0, 1]`.
#[inline]
pub fn lerp_unbounded(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn round_to_int(x: f32) -> i32 {
    (x + 0.5).floor() as i32
}

/// The vector rotated by 90 degrees clockwise in a y-down coordinate system.
#[inline]
pub fn cw(v: Vector) -> Vector {
    vector(-v.y, v.x)
}

/// The vector rotated by 90 degrees counter-clockwise in a y-down coordinate system.
#[inline]
pub fn ccw(v: Vector) -> Vector {
    vector(v.y, -v.x)
}

/// Scale `v` so that its length is `length`.
///
/// A zero vector has no direction, in which case `(length, 0)` is returned.
#[inline]
pub fn with_length(v: Vector, length: f32) -> Vector {
    let len = v.length();
    if len == 0.0 || !len.is_finite() {
        return vector(length, 0.0);
    }

    v * (length / len)
}

#[inline]
pub fn normalize(v: Vector) -> Vector {
    with_length(v, 1.0)
}

fn push_unit_root<const N: usize>(roots: &mut ArrayVec<f32, N>, root: f64) {
    if root >= -UNIT_ROOT_SLACK && root <= 1.0 + UNIT_ROOT_SLACK && !roots.is_full() {
        roots.push(pin(root, 0.0, 1.0) as f32);
    }
}

fn sort_and_dedupe<const N: usize>(roots: &mut ArrayVec<f32, N>) {
    roots.sort_unstable_by(f32::total_cmp);
    let mut i = 1;
    while i < roots.len() {
        if roots[i] == roots[i - 1] {
            roots.remove(i);
        } else {
            i += 1;
        }
    }
}

/// Real roots of `a·t² + b·t + c` within `[0, 1]`, in ascending order and without duplicates.
///
/// The number of returned values is the root count. Zero roots is a normal outcome
/// (complex roots or roots outside of the unit interval).
pub fn quadratic_unit_roots(a: f32, b: f32, c: f32) -> ArrayVec<f32, 2> {
    let mut roots = ArrayVec::new();

    if a == 0.0 {
        if b != 0.0 {
            push_unit_root(&mut roots, (-c / b) as f64);
        }
        return roots;
    }

    if b == 0.0 {
        let sq = -c / a;
        if sq >= 0.0 {
            // The negative root is never in the unit interval.
            push_unit_root(&mut roots, sq.sqrt() as f64);
        }
        return roots;
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return roots;
    }

    if discriminant == 0.0 {
        push_unit_root(&mut roots, (-0.5 * b / a) as f64);
        return roots;
    }

    // Pick the sign that avoids cancellation, the other root follows from c/q.
    let sqrt_d = discriminant.sqrt();
    let q = if b < 0.0 {
        -0.5 * (b - sqrt_d)
    } else {
        -0.5 * (b + sqrt_d)
    };

    push_unit_root(&mut roots, (q / a) as f64);
    if q != 0.0 {
        push_unit_root(&mut roots, (c / q) as f64);
    }

    sort_and_dedupe(&mut roots);

    roots
}

/// Real roots of `a·t³ + b·t² + c·t + d` within `[0, 1]`, in ascending order and without
/// duplicates.
///
/// Intermediate computations are done in double precision.
pub fn cubic_unit_roots(a: f32, b: f32, c: f32, d: f32) -> ArrayVec<f32, 3> {
    let mut roots = ArrayVec::new();

    if a == 0.0 {
        for root in quadratic_unit_roots(b, c, d) {
            roots.push(root);
        }
        return roots;
    }

    // Normalize to t³ + a·t² + b·t + c.
    let inv_a = 1.0 / a as f64;
    let a = b as f64 * inv_a;
    let b = c as f64 * inv_a;
    let c = d as f64 * inv_a;

    let q = (a * a - b * 3.0) / 9.0;
    let r = (2.0 * a * a * a - 9.0 * a * b + 27.0 * c) / 54.0;
    let r2 = r * r;
    let q3 = q * q * q;
    let a_div_3 = a / 3.0;

    if r2 < q3 {
        // Three real roots.
        let theta = pin(r / q3.sqrt(), -1.0, 1.0).acos();
        let neg_2_root_q = -2.0 * q.sqrt();
        let third_turn = 2.0 * core::f64::consts::PI / 3.0;

        push_unit_root(&mut roots, neg_2_root_q * (theta / 3.0).cos() - a_div_3);
        push_unit_root(&mut roots, neg_2_root_q * (theta / 3.0 + third_turn).cos() - a_div_3);
        push_unit_root(&mut roots, neg_2_root_q * (theta / 3.0 - third_turn).cos() - a_div_3);
    } else {
        // One real root.
        let mut aa = (r.abs() + (r2 - q3).sqrt()).cbrt();
        if r > 0.0 {
            aa = -aa;
        }
        let bb = if aa != 0.0 { q / aa } else { 0.0 };
        push_unit_root(&mut roots, aa + bb - a_div_3);
    }

    sort_and_dedupe(&mut roots);

    roots
}

#[cfg(test)]
fn assert_roots(actual: &[f32], expected: &[f32], epsilon: f32) {
    assert_eq!(actual.len(), expected.len(), "roots {:?}, expected {:?}", actual, expected);
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!((a - e).abs() <= epsilon, "roots {:?}, expected {:?}", actual, expected);
    }
    for pair in actual.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn quadratic_two_roots() {
    assert_roots(&quadratic_unit_roots(1.0, -0.75, 0.125), &[0.25, 0.5], 0.0);
    assert_roots(&quadratic_unit_roots(1.0, -0.5, 0.0), &[0.0, 0.5], 0.0);
    assert_roots(&quadratic_unit_roots(1.0, -1.5, 0.5), &[0.5, 1.0], 0.0);
}

#[test]
fn quadratic_double_root() {
    assert_roots(&quadratic_unit_roots(1.0, -1.0, 0.25), &[0.5], 0.0);
}

#[test]
fn quadratic_degenerate() {
    // Linear.
    assert_roots(&quadratic_unit_roots(0.0, -4.0, 3.0), &[0.75], 0.0);
    // Pure square root.
    assert_roots(&quadratic_unit_roots(4.0, 0.0, -1.0), &[0.5], 0.0);
    // Constant.
    assert_roots(&quadratic_unit_roots(0.0, 0.0, 1.0), &[], 0.0);
}

#[test]
fn quadratic_no_roots() {
    assert_roots(&quadratic_unit_roots(2.0, 0.0, 1.0), &[], 0.0);
    assert_roots(&quadratic_unit_roots(1.0, 1.0, 1.0), &[], 0.0);
    // Real roots outside of the unit interval.
    assert_roots(&quadratic_unit_roots(1.0, -5.0, 6.0), &[], 0.0);
}

#[test]
fn cubic_three_roots() {
    let roots = cubic_unit_roots(1.0, -1.5, 0.6875, -0.09375);
    assert_roots(&roots, &[0.25, 0.5, 0.75], 1e-5);
}

#[test]
fn cubic_one_root() {
    assert_roots(&cubic_unit_roots(1.0, 0.0, 0.0, -0.125), &[0.5], 1e-6);
    // (t - 0.5)(t² + 1)
    assert_roots(&cubic_unit_roots(1.0, -0.5, 1.0, -0.5), &[0.5], 1e-6);
}

#[test]
fn cubic_roots_outside_unit_interval() {
    // (t + 1)(t - 2)(t - 3)
    assert_roots(&cubic_unit_roots(1.0, -4.0, 1.0, 6.0), &[], 0.0);
}

#[test]
fn cubic_falls_back_to_quadratic() {
    assert_roots(&cubic_unit_roots(0.0, 1.0, -0.75, 0.125), &[0.25, 0.5], 0.0);
}

#[test]
fn cubic_double_root() {
    // (t - 0.5)² (t - 0.25)
    // Rounding decides whether the double root is reported, the simple root always is.
    let roots = cubic_unit_roots(1.0, -1.25, 0.5, -0.0625);
    assert!(!roots.is_empty());
    assert!((roots[0] - 0.25).abs() < 1e-4);
    for root in &roots {
        assert!((root - 0.25).abs() < 1e-4 || (root - 0.5).abs() < 1e-3);
    }
}

#[test]
fn scalar_helpers() {
    assert_eq!(pin(3.0, 0.0, 1.0), 1.0);
    assert_eq!(pin(-3.0, 0.0, 1.0), 0.0);
    assert_eq!(pin_to_unit(0.25), 0.25);
    assert!(float_is_unit(1.0));
    assert!(!float_is_unit(1.5));
    assert!(nearly_eq(1.0, 1.0 + DEFAULT_UNIT_TOLERANCE * 0.5, DEFAULT_UNIT_TOLERANCE));
    assert!(!nearly_eq(1.0, 1.1, DEFAULT_UNIT_TOLERANCE));
    assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    assert_eq!(lerp_unbounded(2.0, 4.0, 2.0), 6.0);
    assert_eq!(round_to_int(1.5), 2);
    assert_eq!(round_to_int(-1.2), -1);
}

#[test]
fn vector_helpers() {
    assert_eq!(cw(vector(1.0, 0.0)), vector(0.0, 1.0));
    assert_eq!(ccw(vector(1.0, 0.0)), vector(0.0, -1.0));
    assert_eq!(with_length(vector(0.0, 0.0), 2.0), vector(2.0, 0.0));
    assert_eq!(with_length(vector(3.0, 4.0), 10.0), vector(6.0, 8.0));
    assert_eq!(normalize(vector(0.0, -5.0)), vector(0.0, -1.0));
}
