use std::io::Write;

use crate::commands::{CliError, FitCmd};
use vellum::algorithms::fit::fit_path;

pub fn fit(mut cmd: FitCmd) -> Result<(), CliError> {
    let bounds = cmd.path.bounds();
    log::debug!("fitting {:?} into {:?} ({:?})", bounds, cmd.dst, cmd.style);

    let fitted = fit_path(&cmd.path, &cmd.dst, cmd.style);
    writeln!(&mut *cmd.output, "{}", fitted.to_svg_string())?;

    Ok(())
}

#[cfg(test)]
use crate::commands::SharedOutput;
#[cfg(test)]
use vellum::extra::parser::parse_path;
#[cfg(test)]
use vellum::math::{FitStyle, Rect};

#[test]
fn fit_into_rect() {
    let path = parse_path("M0,0L8,0L8,6Z").unwrap();

    let output = SharedOutput::default();
    fit(FitCmd {
        path: path.clone(),
        output: output.boxed(),
        dst: Rect::ltrb(0.0, 0.0, 16.0, 12.0),
        style: FitStyle::Fill,
    })
    .unwrap();
    assert_eq!(output.text(), "M0,0L16,0L16,12Z\n");

    let output = SharedOutput::default();
    fit(FitCmd {
        path,
        output: output.boxed(),
        dst: Rect::ltrb(0.0, 0.0, 16.0, 24.0),
        style: FitStyle::Center,
    })
    .unwrap();
    assert_eq!(output.text(), "M0,6L16,6L16,18Z\n");
}
