//! Command line driver for the footprint pipeline.
//!
//! ```text
//! footprint --output-dir output bldg/*.ccl
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use footprint::{Settings, run_batch};
use miette::{Report, WrapErr};

#[derive(Parser, Debug)]
#[command(name = "footprint")]
#[command(about = "Convert building footprint files into SimpleConfig geometry files")]
struct Args {
    /// Footprint files to process
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory the documents and the master index are written to
    #[arg(long, short, default_value = "output")]
    output_dir: PathBuf,

    /// TOML settings file (world extents, offsets, include prefix)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Log every resolved point
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(report) => {
            eprintln!("{report:?}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every file was processed.
fn run(args: &Args) -> miette::Result<bool> {
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let report = run_batch(&args.files, &settings)?;

    let written = report
        .write_to(&args.output_dir, &settings)
        .wrap_err("cannot write output")?;

    tracing::info!(
        files = args.files.len(),
        failed = report.failures.len(),
        written = written.len(),
        "done"
    );

    let success = report.is_success();
    for failure in report.failures {
        eprintln!("{:?}", Report::new(failure));
    }
    Ok(success)
}
