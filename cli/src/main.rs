mod commands;
mod fit;
mod measure;

use clap::{App, Arg, ArgMatches, SubCommand};
use commands::*;

use std::fs::File;
use std::io::prelude::*;
use std::io::stdout;
use std::process;

use vellum::extra::parser::parse_path;
use vellum::math::{FitStyle, Rect};

fn main() {
    env_logger::init();

    let matches = app().get_matches();

    if let Err(e) = run(&matches) {
        log::error!("{:?}", e);
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn app() -> App<'static, 'static> {
    let tolerance_arg = Arg::with_name("TOLERANCE")
        .short("t")
        .long("tolerance")
        .help("Sets the flattening tolerance used when measuring curves (0.25 by default)")
        .value_name("TOLERANCE")
        .takes_value(true);

    App::new("vellum command-line interface")
        .version("0.1")
        .author("The vellum developers")
        .about("Measures and transforms SVG path data")
        .subcommand(
            SubCommand::with_name("length")
                .about("Prints the length of each contour")
                .arg(tolerance_arg.clone()),
        )
        .subcommand(
            SubCommand::with_name("sample")
                .about("Prints the position and tangent at distances along each contour")
                .arg(tolerance_arg.clone())
                .arg(
                    Arg::with_name("EXTEND")
                        .short("e")
                        .long("extend")
                        .help("Extrapolates along the end tangents for distances outside of the contour"),
                )
                .arg(
                    Arg::with_name("DISTANCE")
                        .help("Distances along the contour")
                        .multiple(true)
                        .allow_hyphen_values(true)
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("segment")
                .about("Extracts the [START, END] distance range of each contour")
                .arg(tolerance_arg)
                .arg(
                    Arg::with_name("START")
                        .allow_hyphen_values(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("END")
                        .allow_hyphen_values(true)
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("fit")
                .about("Maps the path's bounds onto a rectangle")
                .arg(
                    Arg::with_name("STYLE")
                        .short("s")
                        .long("style")
                        .help("fill, start, center or end (fill by default)")
                        .value_name("STYLE")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("RECT")
                        .help("Left, top, right and bottom of the destination rectangle")
                        .multiple(true)
                        .number_of_values(4)
                        .allow_hyphen_values(true)
                        .required(true),
                ),
        )
        .arg(
            Arg::with_name("PATH")
                .value_name("PATH")
                .help("An SVG path")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the input file to use")
                .short("i")
                .long("input")
                .value_name("FILE")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Sets the output file to use")
                .value_name("FILE")
                .short("o")
                .long("output")
                .takes_value(true)
                .required(false),
        )
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let mut input_buffer = matches.value_of("PATH").unwrap_or("").to_string();

    if let Some(input_file) = matches.value_of("INPUT") {
        let mut file = File::open(input_file)?;
        file.read_to_string(&mut input_buffer)?;
    }

    if input_buffer.trim().is_empty() {
        return Err(CliError::MissingInput);
    }

    let path = parse_path(&input_buffer)?;
    log::debug!("parsed {} contour(s)", path.contour_count());

    let mut output: Box<dyn Write> = Box::new(stdout());
    if let Some(output_file) = matches.value_of("OUTPUT") {
        output = Box::new(File::create(output_file)?);
    }

    if let Some(cmd_matches) = matches.subcommand_matches("length") {
        measure::length(LengthCmd {
            path,
            output,
            tolerance: get_tolerance(cmd_matches)?,
        })
    } else if let Some(cmd_matches) = matches.subcommand_matches("sample") {
        let distances = cmd_matches
            .values_of("DISTANCE")
            .into_iter()
            .flatten()
            .map(|value| parse_number("DISTANCE", value))
            .collect::<Result<Vec<f32>, CliError>>()?;

        measure::sample(SampleCmd {
            path,
            output,
            tolerance: get_tolerance(cmd_matches)?,
            distances,
            extend: cmd_matches.is_present("EXTEND"),
        })
    } else if let Some(cmd_matches) = matches.subcommand_matches("segment") {
        measure::segment(SegmentCmd {
            path,
            output,
            tolerance: get_tolerance(cmd_matches)?,
            start: parse_number("START", cmd_matches.value_of("START").unwrap_or(""))?,
            end: parse_number("END", cmd_matches.value_of("END").unwrap_or(""))?,
        })
    } else if let Some(cmd_matches) = matches.subcommand_matches("fit") {
        let ltrb = cmd_matches
            .values_of("RECT")
            .into_iter()
            .flatten()
            .map(|value| parse_number("RECT", value))
            .collect::<Result<Vec<f32>, CliError>>()?;
        let dst = match ltrb[..] {
            [l, t, r, b] => Rect::ltrb(l, t, r, b),
            _ => {
                return Err(CliError::InvalidArgument {
                    name: "RECT",
                    value: format!("{:?}", ltrb),
                })
            }
        };

        fit::fit(FitCmd {
            path,
            output,
            dst,
            style: get_fit_style(cmd_matches)?,
        })
    } else {
        // No subcommand: normalize the input.
        writeln!(&mut *output, "{}", path.to_svg_string())?;
        Ok(())
    }
}

fn parse_number(name: &'static str, value: &str) -> Result<f32, CliError> {
    value.parse().map_err(|_| CliError::InvalidArgument {
        name,
        value: value.to_string(),
    })
}

fn get_tolerance(matches: &ArgMatches) -> Result<f32, CliError> {
    match matches.value_of("TOLERANCE") {
        Some(tolerance_str) => {
            let tolerance = parse_number("TOLERANCE", tolerance_str)?;
            if tolerance > 0.0 {
                Ok(tolerance)
            } else {
                Err(CliError::InvalidArgument {
                    name: "TOLERANCE",
                    value: tolerance_str.to_string(),
                })
            }
        }
        None => Ok(0.25),
    }
}

fn get_fit_style(matches: &ArgMatches) -> Result<FitStyle, CliError> {
    Ok(match matches.value_of("STYLE") {
        None | Some("fill") => FitStyle::Fill,
        Some("start") => FitStyle::Start,
        Some("center") => FitStyle::Center,
        Some("end") => FitStyle::End,
        Some(other) => {
            return Err(CliError::InvalidArgument {
                name: "STYLE",
                value: other.to_string(),
            })
        }
    })
}

#[cfg(test)]
fn matches_from(args: &[&str]) -> ArgMatches<'static> {
    app().get_matches_from_safe(args).unwrap()
}

#[cfg(test)]
fn temp_file(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("vellum_cli_{}_{}", process::id(), name))
}

#[test]
fn number_arguments() {
    assert_eq!(parse_number("START", "-1.5").unwrap(), -1.5);
    assert!(matches!(
        parse_number("START", "one"),
        Err(CliError::InvalidArgument { name: "START", .. })
    ));
}

#[test]
fn tolerance_argument() {
    let matches = matches_from(&["vellum", "length"]);
    assert_eq!(get_tolerance(matches.subcommand_matches("length").unwrap()).unwrap(), 0.25);

    let matches = matches_from(&["vellum", "length", "--tolerance", "0.5"]);
    assert_eq!(get_tolerance(matches.subcommand_matches("length").unwrap()).unwrap(), 0.5);

    for bad in ["abc", "0", "-1"] {
        let tolerance = format!("--tolerance={}", bad);
        let matches = matches_from(&["vellum", "segment", &tolerance, "0", "1"]);
        match get_tolerance(matches.subcommand_matches("segment").unwrap()) {
            Err(CliError::InvalidArgument { name, value }) => {
                assert_eq!(name, "TOLERANCE");
                assert_eq!(value, bad);
            }
            other => panic!("tolerance {:?} accepted: {:?}", bad, other),
        }
    }
}

#[test]
fn fit_style_argument() {
    let expectations = [
        (None, FitStyle::Fill),
        (Some("fill"), FitStyle::Fill),
        (Some("start"), FitStyle::Start),
        (Some("center"), FitStyle::Center),
        (Some("end"), FitStyle::End),
    ];
    for (style, expected) in expectations {
        let mut args = vec!["vellum", "fit"];
        if let Some(style) = style {
            args.extend(["--style", style]);
        }
        args.extend(["0", "0", "1", "1"]);
        let matches = matches_from(&args);
        assert_eq!(get_fit_style(matches.subcommand_matches("fit").unwrap()).unwrap(), expected);
    }

    let matches = matches_from(&["vellum", "fit", "--style", "diagonal", "0", "0", "1", "1"]);
    assert!(matches!(
        get_fit_style(matches.subcommand_matches("fit").unwrap()),
        Err(CliError::InvalidArgument { name: "STYLE", .. })
    ));
}

#[test]
fn run_from_files() {
    let input = temp_file("run_input.txt");
    let output = temp_file("run_output.txt");
    std::fs::write(&input, "M0,0L8,0L8,6Z").unwrap();
    let input_arg = input.to_str().unwrap();
    let output_arg = output.to_str().unwrap();

    let matches = matches_from(&["vellum", "-i", input_arg, "-o", output_arg, "length"]);
    run(&matches).unwrap();
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "contour 0: 24 (closed)\ntotal: 24\n"
    );

    let matches = matches_from(&["vellum", "-i", input_arg, "-o", output_arg, "fit", "0", "0", "16", "12"]);
    run(&matches).unwrap();
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "M0,0L16,0L16,12Z\n");

    let matches = matches_from(&["vellum", "-i", input_arg, "-o", output_arg]);
    run(&matches).unwrap();
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "M0,0L8,0L8,6Z\n");

    let _ = std::fs::remove_file(&input);
    let _ = std::fs::remove_file(&output);
}

#[test]
fn run_errors() {
    let matches = matches_from(&["vellum", "length"]);
    assert!(matches!(run(&matches), Err(CliError::MissingInput)));

    let input = temp_file("run_errors.txt");
    std::fs::write(&input, "M 0 *2").unwrap();
    let matches = matches_from(&["vellum", "-i", input.to_str().unwrap(), "length"]);
    assert!(matches!(run(&matches), Err(CliError::Parse(_))));
    let _ = std::fs::remove_file(&input);

    let missing = temp_file("does_not_exist.txt");
    let matches = matches_from(&["vellum", "-i", missing.to_str().unwrap(), "length"]);
    assert!(matches!(run(&matches), Err(CliError::Io(_))));
}
