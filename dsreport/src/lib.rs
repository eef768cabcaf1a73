//! Command line driver: reads program files, runs the analysis on each of them
//! and writes the dead stores to stdout or to a file.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use deadstore::DeadStoreReport;
use rayon::prelude::*;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Overrides the `-v` log filter when set.
pub const LOG_ENV: &str = "DSREPORT_LOG";

/// Reports assignments whose value is never read.
#[derive(Parser, Debug)]
#[command(name = "dsreport", version)]
pub struct Cli {
    /// Program files or glob patterns
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// More logging on stderr, repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Format {
    /// One dead store per line
    Text,
    /// Array of per file reports
    Json,
}

#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub dead_stores: DeadStoreReport,
}

pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Expands glob patterns. A pattern that matches nothing is kept as a plain
/// path so that reading it reports the problem.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(inputs.len());

    for input in inputs {
        let matched: Vec<PathBuf> = glob::glob(input)
            .with_context(|| format!("invalid pattern '{}'", input))?
            .filter_map(Result::ok)
            .collect();

        if matched.is_empty() {
            paths.push(PathBuf::from(input));
        } else {
            paths.extend(matched);
        }
    }

    Ok(paths)
}

pub fn analyze_file(path: &Path) -> Result<DeadStoreReport> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let report = deadstore::analyze(&source)
        .with_context(|| format!("failed to analyze {}", path.display()))?;

    debug!(path = %path.display(), dead_stores = report.len(), "analyzed");
    Ok(report)
}

pub fn write_reports<W: Write>(
    mut out: W,
    reports: &[FileReport],
    format: Format,
    with_path: bool,
) -> Result<()> {
    match format {
        Format::Text => {
            for report in reports {
                for line in report.dead_stores.lines() {
                    if with_path {
                        writeln!(out, "{}: {}", report.path.display(), line)?;
                    } else {
                        writeln!(out, "{}", line)?;
                    }
                }
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, reports)?;
            writeln!(out)?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Runs the whole command. Files that fail are reported on stderr and the
/// others are still written; returns `false` if any file failed.
pub fn run(cli: &Cli) -> Result<bool> {
    let paths = expand_inputs(&cli.inputs)?;
    let with_path = paths.len() > 1;
    info!(files = paths.len(), "analyzing");

    let results: Vec<_> = paths
        .into_par_iter()
        .map(|path| {
            let result = analyze_file(&path);
            (path, result)
        })
        .collect();

    let mut reports = Vec::with_capacity(results.len());
    let mut failed = 0;

    for (path, result) in results {
        match result {
            Ok(dead_stores) => reports.push(FileReport { path, dead_stores }),
            Err(err) => {
                eprintln!("dsreport: {:#}", err);
                failed += 1;
            }
        }
    }

    match &cli.output {
        Some(output) => {
            let file = File::create(output)
                .with_context(|| format!("failed to create {}", output.display()))?;
            write_reports(BufWriter::new(file), &reports, cli.format, with_path)?;
        }
        None => {
            let stdout = io::stdout();
            write_reports(stdout.lock(), &reports, cli.format, with_path)?;
        }
    }

    if failed > 0 {
        info!(failed, "some files could not be analyzed");
    }

    Ok(failed == 0)
}
