//! CLI entrypoint for `blastradius`.
//!
//! Parses command-line arguments, loads the credential dump through the
//! library, analyzes password reuse, presents the report (optionally behind a
//! progress animation) and writes the text/CSV outputs that were requested.
use std::io;
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Result, bail};
use blastradius::{
    analyze::{AnalyzeError, analyze},
    export::{save_shared_hashes_csv, write_report},
    io::DEFAULT_MMAP_THRESHOLD_BYTES,
    loader::load_with_threshold,
    present::{Animated, Immediate, Presenter},
    report::{render_empty_lines, render_lines, style_lines},
};
use clap::{Parser, ValueEnum};
use log::{LevelFilter, error, info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "blastradius",
    version,
    about = "Analyze an NTDS dump for password reuse and blast radius"
)]
struct Args {
    /// File containing the NTDS credential dump
    #[arg(short = 'f', long = "file")]
    file: PathBuf,

    /// Output file to store the report (overwritten)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Print the report immediately, without the progress bar
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Directory to write a CSV of shared hashes into
    #[arg(long = "csv-dir")]
    csv_dir: Option<PathBuf>,

    /// Override mmap threshold in bytes. If zero, disable mmap.
    #[arg(long = "mmap-threshold", default_value_t = DEFAULT_MMAP_THRESHOLD_BYTES)]
    mmap_threshold: u64,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log counts of skipped/malformed lines encountered during parsing
    #[arg(long = "log-parse-stats")]
    log_parse_stats: bool,

    /// Control color output (auto, always, never)
    #[arg(long = "color", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Suppress terminal output (still writes files if requested)
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}

fn verify_inputs(args: &Args) -> Result<()> {
    if !args.file.exists() {
        bail!("input file not found: {}", args.file.display());
    }
    if let Some(dir) = &args.csv_dir {
        if dir.exists() && !dir.is_dir() {
            bail!("CSV output path is not a directory: {}", dir.display());
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);
    match args.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {}
    }
    if let Err(e) = verify_inputs(&args) {
        error!("{}", e);
        process::exit(2);
    }

    let started = Instant::now();
    let threshold = if args.mmap_threshold == 0 {
        u64::MAX
    } else {
        args.mmap_threshold
    };
    let outcome = match load_with_threshold(&args.file, threshold) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("load failed: {}", e);
            process::exit(3);
        }
    };
    if args.log_parse_stats {
        let s = outcome.stats;
        info!(
            "parse stats: lines={}, accepted={}, malformed={}, empty_hash={}, overwritten={}",
            s.lines, s.accepted, s.malformed, s.empty_hash, s.overwritten
        );
    }

    let (report, lines) = match analyze(&outcome.table) {
        Ok(report) => {
            info!(
                "analyzed {} accounts, {} shared hashes",
                report.total_users, report.reused_password_count
            );
            let lines = render_lines(&report);
            (Some(report), lines)
        }
        Err(AnalyzeError::EmptyInput) => {
            warn!("{}: {}", args.file.display(), AnalyzeError::EmptyInput);
            (None, render_empty_lines())
        }
    };

    if !args.quiet {
        let presenter: Box<dyn Presenter> = if args.debug {
            Box::new(Immediate)
        } else {
            Box::new(Animated::new())
        };
        let styled = style_lines(&lines);
        if let Err(e) = presenter.present(&styled, &mut io::stdout().lock()) {
            error!("failed to print report: {}", e);
            process::exit(4);
        }
    }

    if let Some(path) = &args.output {
        if let Err(e) = write_report(&lines, path) {
            error!("persist failed for {}: {:#}", path.display(), e);
            process::exit(5);
        }
        info!("report written to {}", path.display());
    }

    if let Some(dir) = &args.csv_dir {
        match &report {
            Some(report) => {
                let ts = chrono::Local::now().format("%Y.%m.%d_%H.%M.%S");
                let csv = dir.join(format!("blastradius_shared_hashes_{}.csv", ts));
                let res = std::fs::create_dir_all(dir)
                    .map_err(anyhow::Error::from)
                    .and_then(|_| save_shared_hashes_csv(report, &csv));
                if let Err(e) = res {
                    error!("persist failed for {}: {:#}", csv.display(), e);
                    process::exit(6);
                }
                info!("shared hashes written to {}", csv.display());
            }
            None => warn!("no records loaded, skipping CSV export"),
        }
    }

    if !args.quiet {
        println!("\nTime taken: {:.2} seconds", started.elapsed().as_secs_f64());
    }
}
