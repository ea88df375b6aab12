//! lineweld - Consolidate or group line segments from a line detector
//!
//! Reads a JSON array of `[x0, y0, x1, y1]` segments from a file or stdin and
//! writes either the consolidated segments or the slope/length groups as JSON.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::{Level, info};
use tracing_subscriber::fmt::SubscriberBuilder;

use lineweld_core::{
    InvalidSegmentPolicy, RawSegment, SegmentSettings, consolidate_segments_with_report,
    group_segments_by_slope_length_with_report,
};

/// Consolidate fragmented line segments, or group them by slope and length.
#[derive(Parser, Debug)]
#[command(name = "lineweld")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Use debug logging level
    #[arg(short = 'd', long, global = true, action = ArgAction::SetTrue)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge collinear, touching fragments into long segments
    Consolidate(SegmentArgs),
    /// Group segments sharing orientation and similar length
    Group(SegmentArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct SegmentArgs {
    /// JSON file holding [x0, y0, x1, y1] segments, or "-" for stdin
    #[arg(default_value = "-")]
    input: String,

    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Angular tolerance in degrees
    #[arg(short = 'a', long = "angle-tol", default_value = "2.0")]
    angle_tol: f64,

    /// Intercept and endpoint gap tolerance, in input units
    #[arg(short = 't', long = "dist-tol", default_value = "3.0")]
    dist_tol: f64,

    /// Length tolerance relative to the longer segment
    #[arg(short = 'l', long = "length-tol", default_value = "0.1")]
    length_tol: f64,

    /// Drop consolidated segments shorter than this
    #[arg(long = "min-length", default_value = "0.0")]
    min_length: f64,

    /// Fail on zero-length or non-finite segments instead of skipping them
    #[arg(long = "reject-invalid", action = ArgAction::SetTrue)]
    reject_invalid: bool,

    /// Process collinearity groups on the calling thread only
    #[arg(long, action = ArgAction::SetTrue)]
    sequential: bool,

    /// Wrap the output with per-stage counters
    #[arg(long, action = ArgAction::SetTrue)]
    report: bool,

    /// Pretty-print the JSON output
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,
}

/// Build pipeline settings from command line arguments.
fn build_settings(args: &SegmentArgs) -> SegmentSettings {
    let policy = if args.reject_invalid {
        InvalidSegmentPolicy::Reject
    } else {
        InvalidSegmentPolicy::Skip
    };
    SegmentSettings::new(
        args.angle_tol.to_radians(),
        args.dist_tol,
        args.length_tol,
    )
    .with_invalid_policy(policy)
    .with_parallel(!args.sequential)
    .with_min_output_length(args.min_length)
}

fn read_segments(input: &str) -> Result<Vec<RawSegment>> {
    let data = if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read segments from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input))?
    };
    serde_json::from_str(&data).with_context(|| format!("invalid segment JSON in {}", input))
}

fn write_json<T: Serialize>(outfile: &str, value: &T, pretty: bool) -> Result<()> {
    let mut output: Box<dyn Write> = if outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(outfile)
            .with_context(|| format!("failed to create output file {}", outfile))?;
        Box::new(BufWriter::new(file))
    };
    if pretty {
        serde_json::to_writer_pretty(&mut output, value)?;
    } else {
        serde_json::to_writer(&mut output, value)?;
    }
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn consolidate(args: &SegmentArgs) -> Result<()> {
    let segments = read_segments(&args.input)?;
    let result = consolidate_segments_with_report(&segments, &build_settings(args))?;
    info!(
        input = result.report.input_segments,
        output = result.report.output_segments,
        skipped = result.report.skipped.len(),
        "consolidated"
    );
    if args.report {
        write_json(&args.outfile, &result, args.pretty)
    } else {
        write_json(&args.outfile, &result.segments, args.pretty)
    }
}

fn group(args: &SegmentArgs) -> Result<()> {
    let segments = read_segments(&args.input)?;
    let result = group_segments_by_slope_length_with_report(&segments, &build_settings(args))?;
    info!(
        input = result.report.input_segments,
        groups = result.report.groups,
        skipped = result.report.skipped.len(),
        "grouped"
    );
    if args.report {
        write_json(&args.outfile, &result, args.pretty)
    } else {
        write_json(&args.outfile, &result.groups, args.pretty)
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Consolidate(args) => consolidate(args),
        Command::Group(args) => group(args),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::WARN };
    SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    run(&cli)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_input(dir: &tempfile::TempDir, json: &str) -> String {
        let path = dir.path().join("segments.json");
        std::fs::write(&path, json).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn run_args(argv: &[&str]) -> Result<()> {
        let cli = Cli::try_parse_from(argv)?;
        run(&cli)
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["lineweld", "consolidate"]).unwrap();
        let Command::Consolidate(args) = cli.command else {
            panic!("expected consolidate");
        };
        assert_eq!(args.input, "-");
        assert_eq!(args.outfile, "-");
        let settings = build_settings(&args);
        assert!((settings.angle_tolerance - 2.0f64.to_radians()).abs() < 1e-12);
        assert_eq!(settings.distance_tolerance, 3.0);
        assert_eq!(settings.invalid_policy, InvalidSegmentPolicy::Skip);
        assert!(settings.parallel);
        assert!(!cli.debug);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "lineweld",
            "group",
            "in.json",
            "-d",
            "--length-tol",
            "0.4",
            "--reject-invalid",
            "--sequential",
        ])
        .unwrap();
        assert!(cli.debug);
        let Command::Group(args) = cli.command else {
            panic!("expected group");
        };
        let settings = build_settings(&args);
        assert_eq!(settings.proportional_tolerance, 0.4);
        assert_eq!(settings.invalid_policy, InvalidSegmentPolicy::Reject);
        assert!(!settings.parallel);
    }

    #[test]
    fn test_consolidate_writes_merged_segments() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, "[[0, 0, 10, 0], [12, 0, 20, 0]]");
        let out = dir.path().join("out.json");
        let out_str = out.to_string_lossy().into_owned();
        run_args(&["lineweld", "consolidate", &input, "-o", &out_str]).unwrap();

        let written: Vec<RawSegment> =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written, vec![RawSegment::new(0.0, 0.0, 20.0, 0.0)]);
    }

    #[test]
    fn test_consolidate_report_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, "[[0, 0, 10, 0], [5, 5, 5, 5], [12, 0, 20, 0]]");
        let out = dir.path().join("out.json");
        let out_str = out.to_string_lossy().into_owned();
        run_args(&[
            "lineweld",
            "consolidate",
            &input,
            "-o",
            &out_str,
            "--report",
            "--dist-tol",
            "1",
        ])
        .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["report"]["input_segments"], 3);
        assert_eq!(written["report"]["skipped"], serde_json::json!([1]));
        assert_eq!(written["segments"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_group_output_carries_annotations() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, "[[0, 0, 10, 0], [0, 30, 15, 30], [4, 0, 4, 10]]");
        let out = dir.path().join("groups.json");
        let out_str = out.to_string_lossy().into_owned();
        run_args(&["lineweld", "group", &input, "-o", &out_str, "-l", "0.4"]).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        let groups = written.as_array().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].as_array().unwrap().len(), 2);
        assert_eq!(groups[1][0]["rank"], 2);
        assert_eq!(groups[1][0]["x_intercept"], 4.0);
    }

    #[test]
    fn test_reject_invalid_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, "[[1, 1, 1, 1]]");
        let out = dir.path().join("out.json");
        let out_str = out.to_string_lossy().into_owned();
        let err = run_args(&[
            "lineweld",
            "consolidate",
            &input,
            "-o",
            &out_str,
            "--reject-invalid",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("zero-length"));
    }

    #[test]
    fn test_malformed_json_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(&dir, "[[1, 2, 3]]");
        let err = run_args(&["lineweld", "consolidate", &input]).unwrap_err();
        assert!(err.to_string().contains("invalid segment JSON"));
    }
}
