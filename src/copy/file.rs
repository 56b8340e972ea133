//! Chunked single-file copy.
//!
//! The coordinator opens both files once, splits the source into ranges,
//! copies every range on its own worker thread and joins them all before
//! releasing the handles.

use crate::error::{Error, Result};
use crate::options::CopyOptions;
use crate::plan::{CopyRange, plan_ranges, validate_workers};
use crate::progress::ProgressCallback;
use crate::report::{CopyOutcome, CopyReport};
use crate::utils::path::safe_path;
use rayon::prelude::*;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use super::range::{ReadAt, WriteAt, copy_range};
use super::utils::is_same_file;

/// Copy `src` to `dst` by splitting it into `options.workers` ranges that
/// are copied in parallel.
///
/// The destination is created or truncated, then sized to the source length
/// before any range is copied. Ranges that fail leave their bytes zeroed and
/// are reported with `bytes_copied == 0`.
///
/// # Errors
///
/// Returns an error if:
/// - `options.workers` is zero, or `dst` is the source file itself
///   ([`Error::InvalidConfiguration`]); nothing is opened in that case
/// - The source is missing, unreadable, or not a regular file ([`Error::SourceOpen`])
/// - The destination cannot be created ([`Error::DestinationOpen`])
/// - The source length cannot be read ([`Error::SizeQuery`])
/// - Sizing or syncing the destination fails ([`Error::Io`])
/// - Strict mode is on and a range is incomplete ([`Error::PartialCopy`])
///
/// # Example
///
/// ```no_run
/// use chunkcopy::{copy_file, CopyOptions};
/// use std::path::Path;
///
/// let options = CopyOptions::default().with_workers(8);
/// let report = copy_file(Path::new("disk.img"), Path::new("backup.img"), &options)?;
/// assert!(report.is_complete());
/// # Ok::<(), chunkcopy::Error>(())
/// ```
pub fn copy_file(src: &Path, dst: &Path, options: &CopyOptions) -> Result<CopyReport> {
    copy_file_internal(src, dst, options, None)
}

/// File copy with an optional progress callback. Used by the builder.
pub(crate) fn copy_file_internal(
    src: &Path,
    dst: &Path,
    options: &CopyOptions,
    progress: Option<&ProgressCallback>,
) -> Result<CopyReport> {
    validate_workers(options.workers)?;

    let src_meta = fs::metadata(src).map_err(|source| Error::SourceOpen {
        path: src.to_path_buf(),
        source,
    })?;
    if !src_meta.is_file() {
        return Err(Error::SourceOpen {
            path: src.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    if is_same_file(src, &src_meta, dst) {
        return Err(Error::invalid_configuration(format!(
            "source and destination are the same file: {}",
            dst.display()
        )));
    }

    let source = open_source(src).map_err(|source| Error::SourceOpen {
        path: src.to_path_buf(),
        source,
    })?;

    // Any early return from here drops `source` before propagating
    let destination = open_destination(dst).map_err(|source| Error::DestinationOpen {
        path: dst.to_path_buf(),
        source,
    })?;

    let file_size = source
        .metadata()
        .map_err(|source| Error::SizeQuery {
            path: src.to_path_buf(),
            source,
        })?
        .len();

    // Devices and pipes cannot be resized or synced
    let regular_destination = destination.metadata()?.is_file();

    // Ranges that fail read back as zeros instead of shortening the file
    if regular_destination {
        destination.set_len(file_size)?;
    }

    let ranges = plan_ranges(file_size, options.workers)?;
    options.verbose(&format!(
        "copying {} ({} bytes) to {} in {} ranges",
        src.display(),
        file_size,
        dst.display(),
        ranges.len()
    ));

    let start = Instant::now();
    let outcomes = copy_ranges(&source, &destination, &ranges, file_size, options, progress);
    let elapsed = start.elapsed();

    if options.fsync && regular_destination {
        destination.sync_all()?;
    }
    drop(source);
    drop(destination);

    finish_report(
        CopyReport {
            file_size,
            outcomes,
            elapsed,
        },
        options,
    )
}

// Neither file may be opened by another process while the copy runs
#[cfg(windows)]
fn open_source(path: &Path) -> io::Result<File> {
    use std::os::windows::fs::OpenOptionsExt;
    OpenOptions::new()
        .read(true)
        .share_mode(0)
        .open(safe_path(path))
}

#[cfg(windows)]
fn open_destination(path: &Path) -> io::Result<File> {
    use std::os::windows::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .share_mode(0)
        .open(safe_path(path))
}

#[cfg(not(windows))]
fn open_source(path: &Path) -> io::Result<File> {
    File::open(safe_path(path))
}

#[cfg(not(windows))]
fn open_destination(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(safe_path(path))
}

/// Copy every range on its own task and wait for all of them.
///
/// The pool has exactly one thread per range. Outcomes come back in range
/// order no matter which task finishes first.
pub(crate) fn copy_ranges<R, W>(
    source: &R,
    destination: &W,
    ranges: &[CopyRange],
    file_size: u64,
    options: &CopyOptions,
    progress: Option<&ProgressCallback>,
) -> Vec<CopyOutcome>
where
    R: ReadAt + ?Sized,
    W: WriteAt + ?Sized,
{
    let done = AtomicU64::new(0);

    let do_copy = || -> Vec<CopyOutcome> {
        ranges
            .par_iter()
            .with_max_len(1)
            .map(|range| {
                let outcome = copy_range(source, destination, range);
                let total = done.fetch_add(outcome.bytes_copied, Ordering::Relaxed)
                    + outcome.bytes_copied;
                if let Some(callback) = progress {
                    callback(total, file_size);
                }
                outcome
            })
            .collect()
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(ranges.len().max(1))
        .thread_name(|i| format!("chunkcopy-{i}"))
        .build();

    let outcomes = match pool {
        Ok(pool) => pool.install(do_copy),
        Err(e) => {
            options.warn(&format!(
                "Failed to create thread pool ({e}), using global pool"
            ));
            do_copy()
        }
    };

    for outcome in &outcomes {
        let end = outcome.offset + outcome.length;
        if outcome.is_complete() {
            options.verbose(&format!(
                "range {} [{}, {}): {} bytes copied",
                outcome.index, outcome.offset, end, outcome.bytes_copied
            ));
        } else {
            options.warn(&format!(
                "range {} [{}, {}) incomplete ({}): {} of {} bytes copied",
                outcome.index,
                outcome.offset,
                end,
                outcome.status.as_str(),
                outcome.bytes_copied,
                outcome.length
            ));
        }
    }

    outcomes
}

/// Apply strict mode to a finished report.
fn finish_report(report: CopyReport, options: &CopyOptions) -> Result<CopyReport> {
    if options.strict {
        let failed = report.failed_ranges().count();
        if failed > 0 {
            return Err(Error::PartialCopy {
                failed,
                total: report.outcomes.len(),
            });
        }
    }
    Ok(report)
}

// =============================================================================
// Tests
// =============================================================================
