//! Easing curves: cubic béziers confined to the unit square.

use crate::utils::{cubic_unit_roots, nearly_eq, pin_to_unit};
use crate::{point, Point};

/// Nearly 1/3 with a clean power-of-two denominator.
const SORT_OF_ONE_THIRD: f32 = 21845.0 / 65536.0;
/// Nearly 2/3 with a clean power-of-two denominator.
const SORT_OF_TWO_THIRDS: f32 = 43691.0 / 65536.0;

// Control points this close to the diagonal make the curve `y = x`.
const LINEAR_TOLERANCE: f32 = 1.0 / 64.0;
// Root solving is ill-conditioned next to the end points.
const ENDPOINT_EPSILON: f32 = 0.00001;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Kind {
    Linear,
    Complex,
}

/// A cubic bézier curve from `(0, 0)` to `(1, 1)` used as a monotonic mapping of x to y.
///
/// The x coordinates of the two control points are pinned to `[0, 1]`, which makes
/// the x component of the curve monotonic so that each x maps to exactly one y.
///
/// Curves whose control points lie near the diagonal are treated as the identity
/// mapping and skip root finding entirely.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubicUnit {
    points: [Point; 2],
    // x(t) = ((a.x·t + b.x)·t + c.x)·t, same for y.
    a: Point,
    b: Point,
    c: Point,
    // The y polynomial is evaluated in double precision.
    da: f64,
    db: f64,
    dc: f64,
    kind: Kind,
}

impl Default for CubicUnit {
    fn default() -> Self {
        CubicUnit::new(CubicUnit::DEFAULT_POINTS[0], CubicUnit::DEFAULT_POINTS[1])
    }
}

impl CubicUnit {
    /// Control points of the default curve, nearly `(1/3, 1/3)` and `(2/3, 2/3)`.
    pub const DEFAULT_POINTS: [Point; 2] = [
        Point::new(SORT_OF_ONE_THIRD, SORT_OF_ONE_THIRD),
        Point::new(SORT_OF_TWO_THIRDS, SORT_OF_TWO_THIRDS),
    ];

    /// Creates the curve with control points `b` and `c`.
    pub fn new(b: Point, c: Point) -> Self {
        let points = [b, c];
        let b = point(pin_to_unit(b.x), b.y);
        let c = point(pin_to_unit(c.x), c.y);

        // With the end points at (0, 0) and (1, 1) the bernstein form
        //   3b·t·(1-t)² + 3c·t²·(1-t) + t³
        // becomes A·t³ + B·t² + C·t with:
        //   A = 3b - 3c + 1
        //   B = 3c - 6b
        //   C = 3b
        let b3 = b.to_vector() * 3.0;
        let c3 = c.to_vector() * 3.0;
        let a = (b3 - c3).to_point() + crate::vector(1.0, 1.0);
        let bb = (c3 - b3 - b3).to_point();
        let cc = b3.to_point();

        let (by, cy) = (b.y as f64, c.y as f64);

        CubicUnit {
            points,
            a,
            b: bb,
            c: cc,
            da: 3.0 * by - 3.0 * cy + 1.0,
            db: 3.0 * cy - 6.0 * by,
            dc: 3.0 * by,
            kind: if CubicUnit::nearly_linear(b, c) {
                Kind::Linear
            } else {
                Kind::Complex
            },
        }
    }

    pub fn from_points(points: &[Point; 2]) -> Self {
        CubicUnit::new(points[0], points[1])
    }

    /// Whether control points `a` and `b` are close enough to the diagonal to make
    /// the curve the identity.
    pub fn nearly_linear(a: Point, b: Point) -> bool {
        nearly_eq(a.x, a.y, LINEAR_TOLERANCE) && nearly_eq(b.x, b.y, LINEAR_TOLERANCE)
    }

    /// The control points as they were given (before pinning).
    #[inline]
    pub fn points(&self) -> &[Point; 2] {
        &self.points
    }

    #[inline]
    pub fn is_linear(&self) -> bool {
        self.kind == Kind::Linear
    }

    /// Maps `x` (pinned to `[0, 1]`) to the y coordinate of the curve point with that x.
    ///
    /// Returns `x` exactly for linear curves and near the end points, so
    /// `x_to_y(0.0) == 0.0` and `x_to_y(1.0) == 1.0`.
    pub fn x_to_y(&self, x: f32) -> f32 {
        let x = pin_to_unit(x);
        if self.kind == Kind::Linear || x <= ENDPOINT_EPSILON || x >= 1.0 - ENDPOINT_EPSILON {
            return x;
        }

        let t = self.solve_t_for_x(x) as f64;

        (((self.da * t + self.db) * t + self.dc) * t) as f32
    }

    fn solve_t_for_x(&self, x: f32) -> f32 {
        let roots = cubic_unit_roots(self.a.x, self.b.x, self.c.x, -x);
        if let Some(t) = roots.first() {
            return *t;
        }

        self.bisect_t_for_x(x)
    }

    // The x polynomial is monotonic over [0, 1], bisection always converges.
    fn bisect_t_for_x(&self, x: f32) -> f32 {
        let (a, b, c) = (self.a.x as f64, self.b.x as f64, self.c.x as f64);
        let x = x as f64;
        let mut lo = 0.0f64;
        let mut hi = 1.0f64;
        for _ in 0..48 {
            let mid = (lo + hi) * 0.5;
            let mx = ((a * mid + b) * mid + c) * mid;
            if mx < x {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        ((lo + hi) * 0.5) as f32
    }
}

#[test]
fn default_is_linear() {
    let cu = CubicUnit::default();
    assert!(cu.is_linear());
    assert_eq!(cu.points(), &CubicUnit::DEFAULT_POINTS);
    assert_eq!(cu.x_to_y(0.3), 0.3);
}

#[test]
fn diagonal_control_points_are_linear() {
    let mut t = 0.0;
    while t <= 1.0 {
        let cu = CubicUnit::new(point(t, t), point(1.0 - t, 1.0 - t));
        assert!(cu.is_linear());
        assert_eq!(cu.x_to_y(t), t);
        assert_eq!(cu.x_to_y(0.7), 0.7);
        t += 1.0 / 64.0;
    }
}

#[test]
fn s_curves() {
    let cu = CubicUnit::new(point(1.0, 0.0), point(0.0, 1.0));
    assert!(!cu.is_linear());
    assert!(nearly_eq(cu.x_to_y(0.5), 0.5, crate::utils::DEFAULT_UNIT_TOLERANCE));

    let cu = CubicUnit::new(point(0.0, 1.0), point(1.0, 0.0));
    assert!(nearly_eq(cu.x_to_y(0.5), 0.5, crate::utils::DEFAULT_UNIT_TOLERANCE));
}

#[test]
fn pins_input() {
    let cu = CubicUnit::new(point(0.0, 1.0), point(0.0, 1.0));
    assert_eq!(cu.x_to_y(-2.0), 0.0);
    assert_eq!(cu.x_to_y(3.0), 1.0);
}

#[cfg(test)]
fn check_monotonic(cu: &CubicUnit) {
    assert_eq!(cu.x_to_y(0.0), 0.0);
    assert_eq!(cu.x_to_y(1.0), 1.0);

    let dx = 1.0 / 512.0;
    let mut y = 0.0;
    let mut x = dx;
    while x < 1.0 {
        let ny = cu.x_to_y(x);
        assert!(y <= ny, "{:?} not monotonic at x={}: {} > {}", cu.points(), x, y, ny);
        y = ny;
        x += dx;
    }
}

#[test]
fn extreme_handles_are_monotonic() {
    let pairs = [
        (point(1.0, 0.0), point(1.0, 0.0)),
        (point(0.0, 1.0), point(0.0, 1.0)),
        (point(0.0, 1.0), point(1.0, 0.0)),
        (point(1.0, 0.0), point(0.0, 1.0)),
        // Out of range x values are pinned.
        (point(-1.0, 0.5), point(2.0, 0.5)),
    ];
    for (b, c) in pairs {
        check_monotonic(&CubicUnit::new(b, c));
    }
}

#[test]
fn random_handles_are_monotonic() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..10_000 {
        let b = point(rng.gen::<f32>(), rng.gen::<f32>());
        let c = point(rng.gen::<f32>(), rng.gen::<f32>());
        check_monotonic(&CubicUnit::new(b, c));
    }
}
