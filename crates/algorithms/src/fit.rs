//! Fit paths into rectangles.

use crate::math::*;
use crate::path::Path;

use std::sync::Arc;

/// Maps a path's bounds into `dst` according to `style`.
///
/// A path with empty bounds (a horizontal or vertical line, a single point) is
/// returned unchanged.
pub fn fit_path(path: &Path, dst: &Rect, style: FitStyle) -> Arc<Path> {
    let src = path.bounds();
    if src.width() <= 0.0 || src.height() <= 0.0 {
        return Arc::new(path.clone());
    }

    path.transform(&Matrix::fit(&src, dst, style))
}

#[test]
fn simple_fit() {
    use crate::path::Direction;

    fn approx_eq(a: &Rect, b: &Rect) -> bool {
        let eps = 1e-5;
        (a.left - b.left).abs() < eps
            && (a.top - b.top).abs() < eps
            && (a.right - b.right).abs() < eps
            && (a.bottom - b.bottom).abs() < eps
    }

    let path = Path::rect(&Rect::ltrb(1.0, 2.0, 5.0, 6.0), Direction::Cw);

    let fitted = fit_path(&path, &Rect::ltrb(0.0, 0.0, 2.0, 8.0), FitStyle::Fill);
    assert!(approx_eq(&fitted.bounds(), &Rect::ltrb(0.0, 0.0, 2.0, 8.0)));

    let fitted = fit_path(&path, &Rect::ltrb(0.0, 0.0, 2.0, 8.0), FitStyle::Center);
    assert!(approx_eq(&fitted.bounds(), &Rect::ltrb(0.0, 3.0, 2.0, 5.0)));

    let fitted = fit_path(&path, &Rect::ltrb(0.0, 0.0, 2.0, 8.0), FitStyle::Start);
    assert!(approx_eq(&fitted.bounds(), &Rect::ltrb(0.0, 0.0, 2.0, 2.0)));

    let fitted = fit_path(&path, &Rect::ltrb(0.0, 0.0, 2.0, 8.0), FitStyle::End);
    assert!(approx_eq(&fitted.bounds(), &Rect::ltrb(0.0, 6.0, 2.0, 8.0)));

    let flat = Path::polygon(&[point(0.0, 1.0), point(4.0, 1.0)], false);
    assert_eq!(*fit_path(&flat, &Rect::wh(1.0, 1.0), FitStyle::Fill), *flat);
}
