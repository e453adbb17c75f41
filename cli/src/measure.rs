use std::io::Write;

use crate::commands::{CliError, LengthCmd, SampleCmd, SegmentCmd};
use vellum::measure::ContourMeasureIter;
use vellum::path::PathBuilder;

pub fn length(mut cmd: LengthCmd) -> Result<(), CliError> {
    let mut total = 0.0;
    for (i, contour) in ContourMeasureIter::new(&cmd.path, cmd.tolerance).enumerate() {
        writeln!(
            &mut *cmd.output,
            "contour {}: {}{}",
            i,
            contour.length(),
            if contour.is_closed() { " (closed)" } else { "" },
        )?;
        total += contour.length();
    }
    writeln!(&mut *cmd.output, "total: {}", total)?;

    Ok(())
}

pub fn sample(mut cmd: SampleCmd) -> Result<(), CliError> {
    for (i, contour) in ContourMeasureIter::new(&cmd.path, cmd.tolerance).enumerate() {
        for &distance in &cmd.distances {
            let (position, tangent) = if cmd.extend {
                contour.get_pos_tan_extend(distance)
            } else {
                contour.get_pos_tan(distance)
            };
            writeln!(
                &mut *cmd.output,
                "contour {} at {}: position ({}, {}) tangent ({}, {})",
                i, distance, position.x, position.y, tangent.x, tangent.y,
            )?;
        }
    }

    Ok(())
}

pub fn segment(mut cmd: SegmentCmd) -> Result<(), CliError> {
    let mut builder = PathBuilder::with_fill_rule(cmd.path.fill_rule());
    for contour in ContourMeasureIter::new(&cmd.path, cmd.tolerance) {
        if !contour.get_segment(cmd.start, cmd.end, true, &mut builder) {
            log::info!(
                "range {}..{} is empty on a contour of length {}",
                cmd.start,
                cmd.end,
                contour.length()
            );
        }
    }

    writeln!(&mut *cmd.output, "{}", builder.detach().to_svg_string())?;

    Ok(())
}

#[cfg(test)]
use crate::commands::SharedOutput;
#[cfg(test)]
use vellum::extra::parser::parse_path;

#[test]
fn length_of_each_contour() {
    let output = SharedOutput::default();
    length(LengthCmd {
        path: parse_path("M0,0L8,0L8,6Z M0,0L3,4").unwrap(),
        output: output.boxed(),
        tolerance: 0.25,
    })
    .unwrap();

    assert_eq!(output.text(), "contour 0: 24 (closed)\ncontour 1: 5\ntotal: 29\n");
}

#[test]
fn sample_clamped_and_extended() {
    let path = parse_path("M0,0L8,0").unwrap();

    let output = SharedOutput::default();
    sample(SampleCmd {
        path: path.clone(),
        output: output.boxed(),
        tolerance: 0.25,
        distances: vec![2.0, 10.0],
        extend: false,
    })
    .unwrap();
    assert_eq!(
        output.text(),
        "contour 0 at 2: position (2, 0) tangent (1, 0)\n\
         contour 0 at 10: position (8, 0) tangent (1, 0)\n"
    );

    let output = SharedOutput::default();
    sample(SampleCmd {
        path,
        output: output.boxed(),
        tolerance: 0.25,
        distances: vec![10.0],
        extend: true,
    })
    .unwrap();
    assert_eq!(output.text(), "contour 0 at 10: position (10, 0) tangent (1, 0)\n");
}

#[test]
fn segment_of_each_contour() {
    let output = SharedOutput::default();
    segment(SegmentCmd {
        path: parse_path("M0,0L8,0 M0,4L8,4").unwrap(),
        output: output.boxed(),
        tolerance: 0.25,
        start: 2.0,
        end: 6.0,
    })
    .unwrap();
    assert_eq!(output.text(), "M2,0L6,0M2,4L6,4\n");

    // Reversed ranges extract nothing.
    let output = SharedOutput::default();
    segment(SegmentCmd {
        path: parse_path("M0,0L8,0").unwrap(),
        output: output.boxed(),
        tolerance: 0.25,
        start: 6.0,
        end: 2.0,
    })
    .unwrap();
    assert_eq!(output.text(), "\n");
}
