//! chunkcp - Chunked Parallel Copy
//!
//! Copies one file by splitting it into byte ranges copied in parallel,
//! then reports how many bytes each worker copied.

use chunkcopy::{
    CopyOutcome, CopyRange, CopyReport, Error as ChunkcopyError, ErrorCode, ProgressCallback,
    create_progress_bar,
};
use clap::{Parser, ValueEnum};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// chunkcp - Copy a file as parallel byte ranges
///
/// The source is split into JOBS contiguous ranges of equal size (the last
/// one may be shorter); each range is copied by its own worker thread using
/// positioned reads and writes.
///
/// Usage:
///   chunkcp SOURCE DEST
///   chunkcp -j 8 SOURCE DEST
#[derive(Parser, Debug)]
#[command(name = "chunkcp", version, about, long_about = None)]
struct Args {
    /// Source file
    source: PathBuf,

    /// Destination file (created or overwritten)
    dest: PathBuf,

    /// Number of worker threads (and ranges)
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    output: OutputMode,

    /// Disable progress bar
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Do not call fsync on the destination after copying (faster but less safe)
    #[arg(long)]
    no_sync: bool,

    /// Fail if any range could not be copied completely
    #[arg(long)]
    strict: bool,

    /// Print the range plan without copying anything
    #[arg(short = 'n', long = "plan", alias = "dry-run")]
    plan: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputMode {
    Human,
    Json,
    Jsonl,
}

type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to plan copy of {path}: {source}")]
    Plan {
        path: PathBuf,
        source: ChunkcopyError,
    },

    #[error("Failed to copy {path}: {source}")]
    Copy {
        path: PathBuf,
        source: ChunkcopyError,
    },

    #[error("Failed to serialize JSON output: {source}")]
    JsonSerialize { source: serde_json::Error },
}

impl CliError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Plan { source, .. } | Self::Copy { source, .. } => source.code(),
            Self::JsonSerialize { .. } => ErrorCode::Internal,
        }
    }
}

fn exit_code_for(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::InvalidConfiguration => 2,
        _ => 1,
    }
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error[{}]: {}", error.code(), error);
        std::process::exit(exit_code_for(error.code()));
    }
}

fn run() -> CliResult<()> {
    let args = Args::parse();

    let mut builder = chunkcopy::CopyBuilder::new(&args.source, &args.dest).workers(args.jobs);
    if args.no_sync {
        builder = builder.no_fsync();
    }
    if args.strict {
        builder = builder.strict();
    }
    if args.output == OutputMode::Human {
        builder = builder.on_warning(|msg| eprintln!("warning: {}", msg));
        if args.verbose {
            builder = builder.verbose(|msg| eprintln!("{}", msg));
        }
    }

    if args.plan {
        let ranges = builder.plan().map_err(|source| CliError::Plan {
            path: args.source.clone(),
            source,
        })?;
        return emit_plan_output(&args, &ranges);
    }

    let pb = if args.output == OutputMode::Human && !args.quiet {
        args.source.metadata().ok().map(|meta| {
            let pb = create_progress_bar(meta.len());
            let pb_clone = pb.clone();
            let callback: ProgressCallback = Arc::new(move |done, _total| {
                pb_clone.set_position(done);
            });
            (pb, callback)
        })
    } else {
        None
    };

    if let Some((_, callback)) = &pb {
        builder = builder.progress(callback.clone());
    }

    let result = builder.run();

    if let Some((pb, _)) = pb {
        pb.finish_and_clear();
    }

    let report = result.map_err(|source| CliError::Copy {
        path: args.source.clone(),
        source,
    })?;

    match args.output {
        OutputMode::Human => {
            print_report(&report, args.verbose);
            Ok(())
        }
        OutputMode::Json => print_json_value(&execute_payload(&args, &report)),
        OutputMode::Jsonl => {
            print_json_value(&config_record(&args, "execute"))?;
            for outcome in &report.outcomes {
                print_json_value(&outcome_record(outcome))?;
            }
            print_json_value(&summary_record(&report))
        }
    }
}

fn emit_plan_output(args: &Args, ranges: &[CopyRange]) -> CliResult<()> {
    let file_size: u64 = ranges.iter().map(|r| r.length).sum();
    match args.output {
        OutputMode::Human => {
            println!(
                "Plan ({} ranges, {} bytes):",
                ranges.len(),
                file_size
            );
            for range in ranges {
                println!(
                    "  Thread {}: {} bytes from offset {}",
                    range.index, range.length, range.offset
                );
            }
            Ok(())
        }
        OutputMode::Json => {
            let payload = json!({
                "schema_version": "1.0",
                "mode": "plan",
                "source": display_path(&args.source),
                "destination": display_path(&args.dest),
                "file_size": file_size,
                "workers": args.jobs,
                "ranges": ranges.iter().map(range_value).collect::<Vec<Value>>(),
            });
            print_json_value(&payload)
        }
        OutputMode::Jsonl => {
            print_json_value(&config_record(args, "plan"))?;
            for range in ranges {
                let mut record = range_value(range);
                if let Value::Object(ref mut obj) = record {
                    obj.insert("schema_version".to_owned(), json!("1.0"));
                    obj.insert("record_type".to_owned(), json!("plan_range"));
                }
                print_json_value(&record)?;
            }
            Ok(())
        }
    }
}

fn range_value(range: &CopyRange) -> Value {
    json!({
        "index": range.index,
        "offset": range.offset,
        "length": range.length,
    })
}

fn outcome_value(outcome: &CopyOutcome) -> Value {
    json!({
        "index": outcome.index,
        "offset": outcome.offset,
        "length": outcome.length,
        "bytes_copied": outcome.bytes_copied,
        "status": outcome.status.as_str(),
    })
}

fn outcome_record(outcome: &CopyOutcome) -> Value {
    let mut record = outcome_value(outcome);
    if let Value::Object(ref mut obj) = record {
        obj.insert("schema_version".to_owned(), json!("1.0"));
        obj.insert("record_type".to_owned(), json!("range"));
    }
    record
}

fn config_record(args: &Args, mode: &str) -> Value {
    json!({
        "schema_version": "1.0",
        "record_type": "copy_config",
        "mode": mode,
        "source": display_path(&args.source),
        "destination": display_path(&args.dest),
        "workers": args.jobs,
        "fsync": !args.no_sync,
        "strict": args.strict,
    })
}

fn summary_record(report: &CopyReport) -> Value {
    json!({
        "schema_version": "1.0",
        "record_type": "summary",
        "file_size": report.file_size,
        "bytes_copied": report.bytes_copied(),
        "complete": report.is_complete(),
        "elapsed_seconds": report.elapsed_secs(),
    })
}

fn execute_payload(args: &Args, report: &CopyReport) -> Value {
    json!({
        "schema_version": "1.0",
        "mode": "execute",
        "source": display_path(&args.source),
        "destination": display_path(&args.dest),
        "file_size": report.file_size,
        "workers": args.jobs,
        "ranges": report.outcomes.iter().map(outcome_value).collect::<Vec<Value>>(),
        "bytes_copied": report.bytes_copied(),
        "complete": report.is_complete(),
        "elapsed_seconds": report.elapsed_secs(),
    })
}

fn print_report(report: &CopyReport, verbose: bool) {
    println!("File Size: {} bytes", report.file_size);
    println!();
    println!("Copy Details:");
    for outcome in &report.outcomes {
        println!(
            "Thread {}: {} bytes copied from offset {}",
            outcome.index, outcome.bytes_copied, outcome.offset
        );
    }
    println!("Total Time Taken: {} seconds", report.elapsed_secs());

    if verbose && report.elapsed_secs() > 0.0 {
        let speed = report.bytes_copied() as f64 / report.elapsed_secs();
        println!("Speed: {}/s", format_bytes(speed as u64));
    }

    let failed = report.failed_ranges().count();
    if failed > 0 {
        eprintln!(
            "warning: {} of {} ranges were not copied completely",
            failed,
            report.outcomes.len()
        );
    }
}

fn print_json_value(value: &Value) -> CliResult<()> {
    let serialized =
        serde_json::to_string(value).map_err(|source| CliError::JsonSerialize { source })?;
    println!("{serialized}");
    Ok(())
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}

fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
