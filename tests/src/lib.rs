//! Shared fixtures, and tests that exercise several crates together.

use std::sync::Arc;

use vellum::geom::{CubicBezierSegment, QuadraticBezierSegment};
use vellum::math::{point, Rect};
use vellum::path::builder::PathSink;
use vellum::path::{Direction, Path, PathBuilder, PathEvent};

pub static TOLERANCES: [f32; 6] = [0.01, 0.05, 0.1, 0.25, 0.5, 1.0];

/// A path mixing every verb over several contours, one of them open.
pub fn mixed_path() -> Arc<Path> {
    let mut builder = PathBuilder::new();
    builder.add_rect(&Rect::xywh(0.0, 0.0, 100.0, 50.0), Direction::Cw);
    builder.add_circle(point(200.0, 25.0), 25.0, Direction::Ccw);

    builder.move_to(point(0.0, 100.0));
    builder.quadratic_bezier_to(point(50.0, 50.0), point(100.0, 100.0));
    builder.cubic_bezier_to(point(150.0, 150.0), point(200.0, 50.0), point(250.0, 100.0));
    builder.line_to(point(300.0, 100.0));

    builder.detach()
}

/// A long wavy contour made of `n` cubic arches.
pub fn wave_path(n: usize) -> Arc<Path> {
    let mut builder = PathBuilder::with_capacity(n * 3 + 1, n + 1);
    builder.move_to(point(0.0, 0.0));
    for i in 0..n {
        let x = i as f32 * 10.0;
        let h = if i % 2 == 0 { 10.0 } else { -10.0 };
        builder.cubic_bezier_to(point(x + 2.0, h), point(x + 8.0, h), point(x + 10.0, 0.0));
    }

    builder.detach()
}

/// Extracts the curves of a path, quadratics promoted to cubics.
pub fn cubic_curves(path: &Path) -> Vec<CubicBezierSegment> {
    let mut curves = Vec::new();
    for evt in path.iter() {
        match evt {
            PathEvent::Cubic([from, ctrl1, ctrl2, to]) => {
                curves.push(CubicBezierSegment { from, ctrl1, ctrl2, to });
            }
            PathEvent::Quad([from, ctrl, to]) => {
                curves.push(QuadraticBezierSegment { from, ctrl, to }.to_cubic());
            }
            _ => {}
        }
    }

    curves
}

#[cfg(test)]
fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

#[cfg(test)]
fn assert_same_geometry(a: &Path, b: &Path) {
    assert_eq!(a.verbs(), b.verbs());
    assert_eq!(a.points().len(), b.points().len());
    for (pa, pb) in a.points().iter().zip(b.points()) {
        assert!((*pa - *pb).length() < 1e-4, "{:?} != {:?}", pa, pb);
    }
}

#[test]
fn svg_output_parses_back() {
    use vellum::extra::parser::parse_path;

    let path = mixed_path();
    let svg = path.to_svg_string();
    let parsed = parse_path(&svg).unwrap();

    assert_same_geometry(&path, &parsed);
    assert_eq!(parsed.to_svg_string(), svg);
}

#[test]
fn circle_length() {
    use vellum::measure::ContourMeasure;

    let r = 100.0;
    let circle = Path::circle(point(0.0, 0.0), r, Direction::Cw);
    let expected = 2.0 * std::f32::consts::PI * r;

    for tolerance in TOLERANCES {
        let contour = ContourMeasure::from_path(&circle, tolerance).unwrap();
        assert!(contour.is_closed());
        let error = (contour.length() - expected).abs();
        assert!(error < expected * 0.01, "tolerance {} length {}", tolerance, contour.length());
    }

    let precise = ContourMeasure::from_path(&circle, 0.01).unwrap();
    assert!((precise.length() - expected).abs() < 0.1);
}

#[test]
fn contour_lengths_match_approximate_length() {
    use vellum::algorithms::length::approximate_length;
    use vellum::measure::ContourMeasureIter;

    let path = mixed_path();
    for tolerance in TOLERANCES {
        let measured: f32 = ContourMeasureIter::new(&path, tolerance)
            .map(|contour| contour.length())
            .sum();
        let approximated = approximate_length(path.iter(), tolerance);
        assert!(
            approx_eq(measured, approximated, measured * 0.01),
            "tolerance {}: {} vs {}",
            tolerance,
            measured,
            approximated
        );
    }
}

#[test]
fn full_segment_keeps_length() {
    use vellum::measure::ContourMeasureIter;

    let path = mixed_path();
    for contour in ContourMeasureIter::new(&path, 0.1) {
        let mut builder = PathBuilder::new();
        assert!(contour.get_segment(0.0, contour.length(), true, &mut builder));
        let extracted = builder.detach();

        let lengths: Vec<f32> = ContourMeasureIter::new(&extracted, 0.1)
            .map(|c| c.length())
            .collect();
        assert_eq!(lengths.len(), 1);
        assert!(
            approx_eq(lengths[0], contour.length(), contour.length() * 0.01),
            "{} vs {}",
            lengths[0],
            contour.length()
        );
    }
}

#[test]
fn segment_halves_add_up() {
    use vellum::measure::ContourMeasure;

    let path = wave_path(8);
    let contour = ContourMeasure::from_path(&path, 0.05).unwrap();
    let half = contour.length() * 0.5;

    let mut first = PathBuilder::new();
    let mut second = PathBuilder::new();
    assert!(contour.get_segment(0.0, half, true, &mut first));
    assert!(contour.get_segment(half, contour.length(), true, &mut second));

    let first = ContourMeasure::from_path(&first.detach(), 0.05).unwrap();
    let second = ContourMeasure::from_path(&second.detach(), 0.05).unwrap();

    let sum = first.length() + second.length();
    assert!(approx_eq(sum, contour.length(), contour.length() * 0.01));

    // The pieces join where the contour is cut.
    let (end_of_first, _) = first.get_pos_tan(first.length());
    let (start_of_second, _) = second.get_pos_tan(0.0);
    let (cut, _) = contour.get_pos_tan(half);
    assert!((end_of_first - cut).length() < 0.5);
    assert!((start_of_second - cut).length() < 0.5);
}

#[test]
fn fit_then_measure() {
    use vellum::algorithms::fit::fit_path;
    use vellum::math::FitStyle;
    use vellum::measure::ContourMeasure;

    let square = Path::rect(&Rect::xywh(5.0, 5.0, 10.0, 10.0), Direction::Cw);
    let fitted = fit_path(&square, &Rect::ltrb(0.0, 0.0, 100.0, 100.0), FitStyle::Fill);

    let bounds = fitted.bounds();
    assert!(approx_eq(bounds.left, 0.0, 1e-4) && approx_eq(bounds.top, 0.0, 1e-4));
    assert!(approx_eq(bounds.right, 100.0, 1e-4) && approx_eq(bounds.bottom, 100.0, 1e-4));
    let contour = ContourMeasure::from_path(&fitted, 0.1).unwrap();
    assert!(approx_eq(contour.length(), 400.0, 1e-2));
}

#[test]
fn positions_follow_the_curve() {
    use vellum::geom::Segment;
    use vellum::measure::ContourMeasure;

    let path = wave_path(1);
    let curve = cubic_curves(&path)[0];
    let contour = ContourMeasure::from_path(&path, 0.01).unwrap();

    let mut d = 0.0;
    while d <= contour.length() {
        let (position, _) = contour.get_pos_tan(d);
        // Every measured position lies close to the curve.
        let mut closest = f32::MAX;
        for i in 0..=1000 {
            let p = curve.sample(i as f32 / 1000.0);
            closest = closest.min((p - position).length());
        }
        assert!(closest < 0.05, "distance {} is {} away from the curve", d, closest);
        d += 1.0;
    }
}

#[test]
fn animated_morph() {
    use vellum::extra::animator::Animator;
    use vellum::geom::CubicUnit;

    let from = Path::rect(&Rect::wh(10.0, 10.0), Direction::Cw);
    let to = Path::rect(&Rect::wh(20.0, 40.0), Direction::Cw);
    let ease = CubicUnit::new(point(0.42, 0.0), point(0.58, 1.0));

    let mut animator = Animator::new(2.0);
    animator.set_time(10.0);

    let mut frames: Vec<Arc<Path>> = Vec::new();
    for i in 0..=4 {
        animator.set_time(10.0 + i as f64 * 0.5);
        let t = ease.x_to_y(animator.percent_time() as f32);
        frames.push(Path::lerp(&from, &to, t));
    }

    assert!(animator.is_finished());
    assert_eq!(frames[0].points(), from.points());
    assert_eq!(frames[4].points(), to.points());

    let widths: Vec<f32> = frames.iter().map(|f| f.bounds().width()).collect();
    for pair in widths.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    assert!(approx_eq(widths[2], 15.0, 1e-3));
}

#[test]
fn keyframed_dash() {
    use vellum::extra::keyframes::KeyFrames;
    use vellum::measure::ContourMeasure;

    // Animates the visible end of a line from 0 to its full length.
    let line = Path::polygon(&[point(0.0, 0.0), point(100.0, 0.0)], false);
    let contour = ContourMeasure::from_path(&line, 0.1).unwrap();

    let mut keys = KeyFrames::new(1);
    keys.add_frame_value(0.0, 0.0, None);
    keys.add_frame_value(1.0, 1.0, None);

    let mut end = [0.0];
    keys.sample(0.25, Some(&mut end)).unwrap();

    let mut builder = PathBuilder::new();
    assert!(contour.get_segment(0.0, end[0] * contour.length(), true, &mut builder));
    let dash = builder.detach();

    let points = dash.points();
    assert_eq!(points.first(), Some(&point(0.0, 0.0)));
    assert!((points[points.len() - 1] - point(25.0, 0.0)).length() < 1e-3);
}
