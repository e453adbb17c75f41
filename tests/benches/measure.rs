#[macro_use]
extern crate criterion;

use criterion::{BenchmarkId, Criterion};
use vellum::geom::utils::cubic_unit_roots;
use vellum::geom::CubicUnit;
use vellum::math::point;
use vellum::measure::{ContourMeasure, ContourMeasureIter};
use vellum::path::PathBuilder;
use vellum_tests::*;

fn measure_contours(c: &mut Criterion) {
    let path = mixed_path();
    let mut g = c.benchmark_group("measure");
    for tol in &TOLERANCES {
        g.bench_with_input(BenchmarkId::new("contours", tol), tol, |b, tol| {
            b.iter(|| {
                let mut length = 0.0;
                for contour in ContourMeasureIter::new(&path, *tol) {
                    length += contour.length();
                }
                criterion::black_box(length)
            })
        });
    }
    g.finish();
}

fn sample_positions(c: &mut Criterion) {
    let path = wave_path(100);
    let contour = match ContourMeasure::from_path(&path, 0.1) {
        Some(contour) => contour,
        None => return,
    };
    let step = contour.length() / 1000.0;

    c.bench_function("get_pos_tan", |b| {
        b.iter(|| {
            for i in 0..1000 {
                criterion::black_box(contour.get_pos_tan(i as f32 * step));
            }
        })
    });

    c.bench_function("get_segment", |b| {
        b.iter(|| {
            let mut builder = PathBuilder::new();
            for i in 0..100 {
                let start = i as f32 * step * 10.0;
                contour.get_segment(start, start + step * 5.0, true, &mut builder);
            }
            criterion::black_box(builder.detach())
        })
    });
}

fn unit_roots(c: &mut Criterion) {
    let ease = CubicUnit::new(point(0.25, 0.1), point(0.25, 1.0));

    c.bench_function("cubic_unit_roots", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..1000 {
                let x = i as f32 / 1000.0;
                for t in cubic_unit_roots(1.0, -1.5, 0.75, -x) {
                    sum += t;
                }
            }
            criterion::black_box(sum)
        })
    });

    c.bench_function("cubic_unit_x_to_y", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for i in 0..1000 {
                sum += ease.x_to_y(i as f32 / 1000.0);
            }
            criterion::black_box(sum)
        })
    });
}

criterion_group!(measure, measure_contours, sample_positions);
criterion_group!(solvers, unit_roots);
criterion_main!(measure, solvers);
